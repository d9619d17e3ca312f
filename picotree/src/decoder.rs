// SPDX-License-Identifier: Apache-2.0

use log::debug;

use crate::lexer::Lexer;
use crate::parse_error::ParseError;
use crate::parser::parse_tokens;
use crate::pool::NodePool;
use crate::stack::SoftStack;
use crate::tree::Tree;

/// Maximum key count used by [`DefaultDecoder`].
pub const DEFAULT_MAX_KEYS: usize = 32;

/// Decoder with room for [`DEFAULT_MAX_KEYS`] members.
pub type DefaultDecoder<'a> = Decoder<'a, DEFAULT_MAX_KEYS>;

/// A decoding session with all of its storage inline.
///
/// `N` is the maximum key count. It bounds both the node pool (one slot per
/// object member, across all nesting levels) and the continuation stack
/// (one frame per level of member nesting). Nothing is allocated on the heap
/// and the parser never recurses.
///
/// Every call to [`decode`](Self::decode) starts from an empty pool and
/// stack, so the ceiling applies per call. The returned [`Tree`] borrows the
/// decoder, which keeps it from being read once the next decode starts.
///
/// Lifetime `'a` is the input buffer lifetime; keys and string values in the
/// tree are slices of it.
pub struct Decoder<'a, const N: usize> {
    pool: NodePool<'a, N>,
    stack: SoftStack<N>,
    lexer: Lexer<'a>,
}

impl<'a, const N: usize> Decoder<'a, N> {
    /// Creates a decoder. Usable in `static` or `const` context.
    ///
    /// # Example
    /// ```
    /// use picotree::Decoder;
    /// let mut decoder = Decoder::<4>::new();
    /// let tree = decoder.decode(r#"{"name": "value", "n": 42}"#).unwrap();
    /// assert_eq!(tree.root().get("n").and_then(|v| v.as_int()), Some(42));
    /// ```
    pub const fn new() -> Self {
        Self {
            pool: NodePool::new(),
            stack: SoftStack::new(),
            lexer: Lexer::new(&[]),
        }
    }

    /// Decodes a JSON object from a string slice.
    pub fn decode(&mut self, input: &'a str) -> Result<Tree<'_, 'a>, ParseError> {
        self.decode_from_slice(input.as_bytes())
    }

    /// Decodes a JSON object from a byte slice.
    ///
    /// Input ends at the first NUL byte if there is one, so a zero-padded
    /// fixed buffer can be passed whole.
    ///
    /// # Example
    /// ```
    /// # use picotree::Decoder;
    /// let json = br#"{"a": 1}"#;
    /// let mut buffer = [0u8; 32];
    /// buffer[..json.len()].copy_from_slice(json);
    /// let mut decoder = Decoder::<2>::new();
    /// let tree = decoder.decode_from_slice(&buffer).unwrap();
    /// assert_eq!(tree.node_count(), 1);
    /// ```
    pub fn decode_from_slice(&mut self, input: &'a [u8]) -> Result<Tree<'_, 'a>, ParseError> {
        debug!(
            "Decoding {} bytes, capacity {} keys",
            input.len(),
            self.pool.capacity()
        );
        self.pool.reset();
        self.stack.reset();
        self.lexer.reset(input);

        match parse_tokens(&mut self.lexer, &mut self.pool, &mut self.stack) {
            Ok(root) => {
                debug!(
                    "Decoded {} nodes, peak stack depth {}",
                    self.pool.len(),
                    self.stack.peak()
                );
                Ok(Tree::new(self.pool.nodes(), root))
            }
            Err(e) => {
                debug!("Decode failed at byte {}: {}", self.lexer.current_pos(), e);
                Err(e)
            }
        }
    }

    /// The maximum key count `N`.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for Decoder<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
