// SPDX-License-Identifier: Apache-2.0

//! A fixed-memory JSON object decoder for resource-constrained systems.
//!
//! Decodes a JSON object whose values are strings, integers or nested
//! objects into a tree stored in a node pool sized at compile time. No heap,
//! no recursion: nesting is handled by an explicit, bounded continuation
//! stack.
//!
//! ```
//! use picotree::{Decoder, Value};
//!
//! let mut decoder = Decoder::<8>::new();
//! let tree = decoder.decode(r#"{"a": {"b": 1}, "c": "x"}"#).unwrap();
//! for member in tree.root().members() {
//!     match member.value {
//!         Value::Str(s) => println!("{} = {:?}", member.key, s),
//!         Value::Int(n) => println!("{} = {}", member.key, n),
//!         Value::Object(o) => println!("{} = object with {} members", member.key, o.len()),
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]

// Compile-time configuration validation
mod config_check;

mod int_parser;
pub use int_parser::Integer;

mod lexer;
pub use lexer::{ErrKind, FormatError, Lexer, Token};

mod parse_error;
pub use parse_error::{ParseError, Resource};

mod pool;
pub use pool::NodeId;

mod stack;

mod parser;

mod tree;
pub use tree::{Member, Members, Object, Tree, Value};

mod decoder;
pub use decoder::{Decoder, DefaultDecoder, DEFAULT_MAX_KEYS};
