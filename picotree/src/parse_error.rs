// SPDX-License-Identifier: Apache-2.0

use crate::lexer::{ErrKind, FormatError};

/// The fixed storage that ran out.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Resource {
    /// Every node slot is in use.
    NodePool,
    /// The continuation stack is full.
    Stack,
}

/// Errors that can occur while decoding
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParseError {
    /// The input is not a JSON object this decoder accepts.
    BadFormat(FormatError),
    /// The input is valid so far but does not fit the configured capacity.
    NoMoreSpace(Resource),
    /// The parser entered an unexpected internal state.
    UnexpectedState(&'static str),
}

impl ParseError {
    pub fn is_bad_format(&self) -> bool {
        matches!(self, ParseError::BadFormat(_))
    }

    pub fn is_no_more_space(&self) -> bool {
        matches!(self, ParseError::NoMoreSpace(_))
    }

    /// The format error kind, if this is a format error.
    pub fn kind(&self) -> Option<ErrKind> {
        match self {
            ParseError::BadFormat(e) => Some(e.kind()),
            _ => None,
        }
    }
}

impl From<FormatError> for ParseError {
    fn from(err: FormatError) -> Self {
        ParseError::BadFormat(err)
    }
}

impl From<Resource> for ParseError {
    fn from(resource: Resource) -> Self {
        ParseError::NoMoreSpace(resource)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::BadFormat(e) => write!(f, "Bad format: {e}"),
            ParseError::NoMoreSpace(r) => write!(f, "No more space: {r:?} exhausted"),
            ParseError::UnexpectedState(s) => write!(f, "Unexpected state: {s}"),
        }
    }
}
