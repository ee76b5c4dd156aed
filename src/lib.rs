// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Parslet
//!
//! A cursor-based parser-combinator engine. Parsers are plain values: each
//! one is a small struct whose [`apply`](parser::Parser::apply) drives a
//! mutable [`cursor`](cursor::Cursor) over the input, and combinators build
//! new parser values out of existing ones with no allocation and no
//! macro-generated grammar.
//!
//! ## Features
//!
//! * **Primitives over any input** — single items, literals, scanning,
//!   bracketed spans with balanced nesting, over `&str` or `&[T]` alike.
//! * **A complete combinator algebra** — monadic bind, sequencing,
//!   alternation, repetition with separators, folding, lookahead,
//!   left-associative operator chaining, and recursion.
//! * **Compile-time error modes** — error text is carried or erased
//!   depending on the cursor type, with no runtime switch.
//! * **Numeric parsers** — configurable integer and floating-point parsers
//!   generic over the output type.
//! * **Optional user state** — threaded by mutable reference through the
//!   cursor for context-sensitive grammars.
//!
//! ## Usage
//!
//! ```rust
//! use parslet::prelude::*;
//!
//! // key = value ; key = value …
//! let key = items_while(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
//!     .at_least_one(true)
//!     .map(str::to_owned);
//! let assignment = key.then_ignore(item('=').padded()).then(integer::<i64>());
//! let config = assignment
//!     .repeated()
//!     .separated_by(item(';').padded())
//!     .no_trailing_separator(true)
//!     .collect::<Vec<_>>();
//!
//! let parsed = parse(&config, "retries=3; timeout_ms=500").unwrap();
//! assert_eq!(parsed, vec![("retries".into(), 3), ("timeout_ms".into(), 500)]);
//! ```
//!
//! ## Recursion
//!
//! Self-referential grammars tie the knot with
//! [`recursive`](recursive::recursive):
//!
//! ```rust
//! use parslet::prelude::*;
//!
//! // expr := int | '(' expr '+' expr ')'
//! let expr = recursive(|expr| {
//!     let sum = item('(')
//!         .ignore_then(expr.clone())
//!         .then_ignore(item('+'))
//!         .then(expr)
//!         .then_ignore(item(')'))
//!         .map(|(a, b): (i64, i64)| a + b);
//!     integer::<i64>().or(sum)
//! });
//! assert_eq!(parse(&expr, "((1+2)+(3+4))"), Ok(10));
//! ```
//!
//! ## Error modes
//!
//! A parse either runs through [`parse`](parser::parse) — error messages
//! on, outcome converted to `Result` — or against a caller-built
//! [`Scanner`](cursor::Scanner), which also exposes the terminal position
//! and lets the message payload be compiled out entirely:
//!
//! ```rust
//! use parslet::prelude::*;
//!
//! let p = literal("v=").ignore_then(integer::<u32>());
//! let mut cursor = Scanner::verbose("v=x");
//! let err = run(&p, &mut cursor).unwrap_err();
//! assert_eq!(err.offset, 2);  // how far the parse got
//! ```

pub mod combinator;
pub mod cursor;
pub mod input;
pub mod number;
pub mod outcome;
pub mod parser;
pub mod primitive;
pub mod recursive;
pub mod repeat;
pub mod text;

pub use cursor::{Cursor, Scanner};
pub use outcome::{Failure, Message, Parsed, ParseError, Silent};
pub use parser::{parse, parse_with_state, run, Parser};

/// Everything needed to write a grammar, in one import.
pub mod prelude {
    pub use crate::combinator::{chain, to_state, until, update_state, with_state, Emptiness};
    pub use crate::cursor::{
        Cursor, ItemOf, Scanner, SliceCursor, SliceOf, StrCursor, VerboseStrCursor,
    };
    pub use crate::input::{Input, Offsets};
    pub use crate::number::{
        float, integer, FloatParser, FloatParserBuilder, IntParser, IntParserBuilder,
    };
    pub use crate::outcome::{Failure, Message, Parsed, ParseError, Silent};
    pub use crate::parser::{choice, choice_into, group, parse, parse_with_state, run, Parser};
    pub use crate::primitive::{
        any_item, between_items, between_literals, cond, consume, end, fail, fail_with, from_fn,
        item, item_if, item_if_not, items_in, items_while, items_while_not, literal, not_item,
        one_of, pure, rest, until_item, until_literal, ItemSet, Needle,
    };
    pub use crate::recursive::{recursive, Boxed, Recursive};
    pub use crate::repeat::{MapInsert, NoSep, Repeated};
    pub use crate::text::{is_whitespace_char, non_whitespace, whitespace};
}
