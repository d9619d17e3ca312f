// SPDX-License-Identifier: Apache-2.0

use crate::int_parser::{from_ascii, Integer};

/// Bytes that may make up a number token. The span is validated afterwards.
const NUMBER_CHARACTERS: &[u8] = b"+-0123456789";

/// A single lexical token. String tokens borrow from the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    /// A quoted string, without the quotes.
    String(&'a str),
    /// An integer literal.
    Number(Integer),
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `:`
    Colon,
    /// `,`
    Comma,
}

/// Why the input was rejected.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ErrKind {
    /// A string has no closing quote.
    UnterminatedString,
    /// A number span is malformed or out of range.
    InvalidNumber,
    /// A string is not valid UTF-8.
    InvalidUtf8,
    /// A byte that starts no token.
    InvalidToken,
    /// The document does not start with `{`.
    InvalidRoot,
    /// An object member does not start with a string key.
    ExpectedKey,
    /// A key is not followed by `:`.
    ExpectedColon,
    /// A member value is not a string, number or object.
    ExpectedValue,
    /// A member value is not followed by `,` or `}`.
    ExpectedCommaOrEnd,
    /// The input ended where a token was required.
    UnexpectedEnd,
    /// Tokens follow the closing brace of the root object.
    TrailingContent,
}

/// A format error with the offending byte and its position in the input.
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct FormatError {
    kind: ErrKind,
    character: u8,
    position: usize,
}

impl FormatError {
    pub fn kind(&self) -> ErrKind {
        self.kind
    }

    /// The first byte of the offending token, or a space at end of input.
    pub fn character(&self) -> u8 {
        self.character
    }

    /// Byte offset of the offending token.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl core::fmt::Debug for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:?}({}) at {}",
            self.kind, self.character as char, self.position
        )
    }
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

const fn until_nul(data: &[u8]) -> &[u8] {
    let mut end = 0;
    while end < data.len() {
        if data[end] == 0 {
            break;
        }
        end += 1;
    }
    data.split_at(end).0
}

enum Lexed<'a> {
    Token(Token<'a>),
    Skip,
    End,
}

/// Scans a byte buffer one token at a time.
///
/// The buffer ends at its length or at the first NUL byte, whichever comes
/// first, so zero-padded fixed buffers can be handed over as they are.
#[derive(Debug)]
pub struct Lexer<'a> {
    data: &'a [u8],
    pos: usize,
    /// Start of the most recently scanned token, used for error reporting
    token_start: usize,
}

impl<'a> Lexer<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data: until_nul(data),
            pos: 0,
            token_start: 0,
        }
    }

    /// Rewinds the cursor onto a new buffer.
    pub fn reset(&mut self, data: &'a [u8]) {
        *self = Self::new(data);
    }

    pub fn current_pos(&self) -> usize {
        self.pos
    }

    /// Returns the next token, `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>, FormatError> {
        loop {
            match self.lex_core()? {
                Lexed::Skip => continue,
                Lexed::End => return Ok(None),
                Lexed::Token(token) => {
                    log::trace!("token {:?} at {}", token, self.token_start);
                    return Ok(Some(token));
                }
            }
        }
    }

    /// Builds an error pointing at the most recently scanned token.
    pub fn error(&self, kind: ErrKind) -> FormatError {
        FormatError {
            kind,
            character: self.data.get(self.token_start).copied().unwrap_or(b' '),
            position: self.token_start,
        }
    }

    fn remaining(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or(&[])
    }

    fn lex_core(&mut self) -> Result<Lexed<'a>, FormatError> {
        self.token_start = self.pos;
        let Some(&byte) = self.data.get(self.pos) else {
            return Ok(Lexed::End);
        };

        if let Some(token) = self.lex_string()? {
            return Ok(Lexed::Token(token));
        }
        if let Some(token) = self.lex_number()? {
            return Ok(Lexed::Token(token));
        }

        let token = match byte {
            b' ' | b'\\' | b'\t' | b'\r' | b'\n' => {
                self.pos += 1;
                return Ok(Lexed::Skip);
            }
            b'{' => Token::LeftBrace,
            b'}' => Token::RightBrace,
            b',' => Token::Comma,
            b':' => Token::Colon,
            _ => return Err(self.error(ErrKind::InvalidToken)),
        };
        self.pos += 1;
        Ok(Lexed::Token(token))
    }

    fn lex_string(&mut self) -> Result<Option<Token<'a>>, FormatError> {
        let [b'"', rest @ ..] = self.remaining() else {
            return Ok(None);
        };
        // No escapes: the first quote closes the string
        let Some(len) = rest.iter().position(|&b| b == b'"') else {
            return Err(self.error(ErrKind::UnterminatedString));
        };
        let (content, _) = rest.split_at(len);
        let content =
            core::str::from_utf8(content).map_err(|_| self.error(ErrKind::InvalidUtf8))?;
        self.pos += len + 2;
        Ok(Some(Token::String(content)))
    }

    fn lex_number(&mut self) -> Result<Option<Token<'a>>, FormatError> {
        let rest = self.remaining();
        let len = rest
            .iter()
            .take_while(|&&b| NUMBER_CHARACTERS.contains(&b))
            .count();
        if len == 0 {
            return Ok(None);
        }
        let (span, _) = rest.split_at(len);
        let value = from_ascii(span).map_err(|_| self.error(ErrKind::InvalidNumber))?;
        self.pos += len;
        Ok(Some(Token::Number(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn lexer(input: &str) -> Lexer<'_> {
        Lexer::new(input.as_bytes())
    }

    fn collect<'a>(lexer: &mut Lexer<'a>) -> Result<Vec<Token<'a>>, FormatError> {
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    #[test]
    fn tokenizes_simple_object() {
        let mut lexer = lexer(r#"{"key": 12, "s":"v"}"#);
        assert_eq!(
            collect(&mut lexer),
            Ok(vec![
                Token::LeftBrace,
                Token::String("key"),
                Token::Colon,
                Token::Number(12),
                Token::Comma,
                Token::String("s"),
                Token::Colon,
                Token::String("v"),
                Token::RightBrace,
            ])
        );
        assert_eq!(lexer.next_token(), Ok(None));
    }

    #[test]
    fn skips_whitespace_and_backslashes() {
        let mut lexer = lexer(" \t\r\n{ \\ } \\");
        assert_eq!(
            collect(&mut lexer),
            Ok(vec![Token::LeftBrace, Token::RightBrace])
        );
    }

    #[test]
    fn strings_are_zero_copy() {
        let input = String::from(r#""hello world""#);
        let mut lexer = lexer(&input);
        match lexer.next_token() {
            Ok(Some(Token::String(s))) => {
                assert_eq!(s, "hello world");
                let base = input.as_ptr() as usize;
                assert_eq!(s.as_ptr() as usize, base + 1);
            }
            other => panic!("Expected string token, got: {:?}", other),
        }
        assert_eq!(lexer.current_pos(), input.len());
    }

    #[test]
    fn empty_string_token() {
        let mut lexer = lexer(r#""""#);
        assert_eq!(lexer.next_token(), Ok(Some(Token::String(""))));
        assert_eq!(lexer.next_token(), Ok(None));
    }

    #[test]
    fn backslash_does_not_escape_quote() {
        // The backslash belongs to the string, the next quote closes it
        let mut lexer = lexer(r#""a\"b""#);
        assert_eq!(lexer.next_token(), Ok(Some(Token::String("a\\"))));
        assert_eq!(
            lexer.next_token().map_err(|e| e.kind()),
            Err(ErrKind::InvalidToken)
        );
    }

    #[test]
    fn unterminated_string_is_reported_at_opening_quote() {
        let mut lexer = lexer(r#"{ "abc"#);
        assert_eq!(lexer.next_token(), Ok(Some(Token::LeftBrace)));
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.kind(), ErrKind::UnterminatedString);
        assert_eq!(err.position(), 2);
        assert_eq!(err.character(), b'"');
    }

    #[test]
    fn numbers_with_signs() {
        let mut lexer = lexer("-17 +5 0");
        assert_eq!(
            collect(&mut lexer),
            Ok(vec![Token::Number(-17), Token::Number(5), Token::Number(0)])
        );
    }

    #[test]
    fn malformed_numbers_are_errors() {
        for input in ["-", "+", "1-2", "--1", "+-3"] {
            let mut lexer = lexer(input);
            let err = lexer.next_token().unwrap_err();
            assert_eq!(err.kind(), ErrKind::InvalidNumber, "input {:?}", input);
            assert_eq!(err.position(), 0);
        }
    }

    #[test]
    fn number_overflow_is_an_error() {
        let input = format!("{}0", Integer::MAX);
        let mut lexer = lexer(&input);
        assert_eq!(
            lexer.next_token().map_err(|e| e.kind()),
            Err(ErrKind::InvalidNumber)
        );
    }

    #[test]
    fn number_ends_at_first_foreign_byte() {
        let mut lexer = lexer("12}");
        assert_eq!(lexer.next_token(), Ok(Some(Token::Number(12))));
        assert_eq!(lexer.next_token(), Ok(Some(Token::RightBrace)));
    }

    #[test]
    fn unknown_characters_are_rejected() {
        for input in ["[", "t", "n", "1.5", "/"] {
            let mut lexer = lexer(input);
            let mut last = lexer.next_token();
            while let Ok(Some(_)) = last {
                last = lexer.next_token();
            }
            assert_eq!(
                last.map_err(|e| e.kind()),
                Err(ErrKind::InvalidToken),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn error_position_points_at_token() {
        let mut lexer = lexer("{ : @");
        assert_eq!(lexer.next_token(), Ok(Some(Token::LeftBrace)));
        assert_eq!(lexer.next_token(), Ok(Some(Token::Colon)));
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.position(), 4);
        assert_eq!(err.character(), b'@');
        assert_eq!(format!("{:?}", err), "InvalidToken(@) at 4");
    }

    #[test]
    fn nul_byte_ends_input() {
        let mut buffer = [0u8; 16];
        buffer[..2].copy_from_slice(b"{}");
        buffer[5] = b'x';
        let mut lexer = Lexer::new(b"{");
        lexer.reset(&buffer);
        assert_eq!(
            collect(&mut lexer),
            Ok(vec![Token::LeftBrace, Token::RightBrace])
        );
    }

    #[test]
    fn invalid_utf8_in_string() {
        let bytes = [b'"', 0xff, b'"'];
        let mut lexer = Lexer::new(&bytes);
        assert_eq!(
            lexer.next_token().map_err(|e| e.kind()),
            Err(ErrKind::InvalidUtf8)
        );
    }

    #[test]
    fn end_of_input_error_uses_space_placeholder() {
        let mut lexer = lexer("{");
        assert_eq!(lexer.next_token(), Ok(Some(Token::LeftBrace)));
        assert_eq!(lexer.next_token(), Ok(None));
        let err = lexer.error(ErrKind::UnexpectedEnd);
        assert_eq!(err.character(), b' ');
        assert_eq!(err.position(), 1);
    }
}
