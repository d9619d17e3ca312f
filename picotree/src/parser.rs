// SPDX-License-Identifier: Apache-2.0

//! Explicit-stack recursive descent over the token stream.
//!
//! The grammar is
//!
//! ```text
//! value   := '{' members? '}' | STRING | NUMBER
//! members := STRING ':' value (',' STRING ':' value)*
//! ```
//!
//! with the root value restricted to an object. Instead of recursing, each
//! call is a [`Frame`]. The frame that runs next is held in a one-slot tail
//! register; only `ResumeLoop` continuations wait on the [`SoftStack`], so
//! the stack depth is the current member nesting depth.

use log::trace;

use crate::lexer::{ErrKind, Lexer, Token};
use crate::parse_error::ParseError;
use crate::pool::{Kind, NodeId, NodePool, Scalar};
use crate::stack::{Frame, SoftStack};

/// How the most recent `Call` frame completed.
#[derive(Debug, Clone, Copy)]
enum Completion<'a> {
    /// An object was opened and closed.
    Object,
    /// The value was a string or number.
    Leaf(Scalar<'a>),
}

fn expect_token<'a>(lexer: &mut Lexer<'a>) -> Result<Token<'a>, ParseError> {
    match lexer.next_token()? {
        Some(token) => Ok(token),
        None => Err(lexer.error(ErrKind::UnexpectedEnd).into()),
    }
}

/// Consumes the whole token stream into `pool`.
///
/// Returns the first member of the root object, `None` for `{}`. When
/// present it is always the first pool slot.
pub(crate) fn parse_tokens<'a, const N: usize, const D: usize>(
    lexer: &mut Lexer<'a>,
    pool: &mut NodePool<'a, N>,
    stack: &mut SoftStack<D>,
) -> Result<Option<NodeId>, ParseError> {
    let mut root = None;
    // Key token read ahead of a CallLoop
    let mut pending: Option<Token<'a>> = None;
    // Member whose key or value is being parsed
    let mut current: Option<NodeId> = None;
    let mut completion = Completion::Object;
    let mut tail = Some(Frame::Call { root: true });

    while let Some(frame) = tail.take().or_else(|| stack.pop()) {
        trace!("frame {:?} (stack depth {})", frame, stack.depth());
        match frame {
            Frame::Call { root: is_root } => match expect_token(lexer)? {
                Token::LeftBrace => {
                    if !is_root {
                        let parent = current.ok_or(ParseError::UnexpectedState(
                            "Nested object without a parent member",
                        ))?;
                        pool.get_mut(parent)?.kind = Kind::Object(None);
                    }

                    let token = expect_token(lexer)?;
                    if token == Token::RightBrace {
                        completion = Completion::Object;
                        continue;
                    }

                    let first = pool.alloc()?;
                    match current {
                        Some(parent) if !is_root => {
                            pool.get_mut(parent)?.kind = Kind::Object(Some(first));
                        }
                        _ => root = Some(first),
                    }
                    current = Some(first);
                    pending = Some(token);
                    tail = Some(Frame::CallLoop);
                }
                _ if is_root => return Err(lexer.error(ErrKind::InvalidRoot).into()),
                Token::String(s) => completion = Completion::Leaf(Scalar::Str(s)),
                Token::Number(n) => completion = Completion::Leaf(Scalar::Int(n)),
                _ => return Err(lexer.error(ErrKind::ExpectedValue).into()),
            },

            Frame::CallLoop => {
                let node = current.ok_or(ParseError::UnexpectedState(
                    "Member loop without a current node",
                ))?;
                let Some(Token::String(key)) = pending.take() else {
                    return Err(lexer.error(ErrKind::ExpectedKey).into());
                };
                pool.get_mut(node)?.key = key;

                if expect_token(lexer)? != Token::Colon {
                    return Err(lexer.error(ErrKind::ExpectedColon).into());
                }

                stack.push(Frame::ResumeLoop { parent: node })?;
                tail = Some(Frame::Call { root: false });
            }

            Frame::ResumeLoop { parent } => {
                if let Completion::Leaf(scalar) = completion {
                    pool.get_mut(parent)?.kind = Kind::Leaf(scalar);
                }

                match expect_token(lexer)? {
                    Token::RightBrace => completion = Completion::Object,
                    Token::Comma => {
                        let sibling = pool.alloc()?;
                        pool.get_mut(parent)?.next = Some(sibling);
                        current = Some(sibling);
                        pending = Some(expect_token(lexer)?);
                        tail = Some(Frame::CallLoop);
                    }
                    _ => return Err(lexer.error(ErrKind::ExpectedCommaOrEnd).into()),
                }
            }
        }
    }

    if lexer.next_token()?.is_some() {
        return Err(lexer.error(ErrKind::TrailingContent).into());
    }
    Ok(root)
}
