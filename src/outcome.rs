// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Parse Outcomes and Error Modes
//!
//! Applying a parser to a cursor yields a [`Parsed<T, E>`]: either a matched
//! value or a miss. The miss payload `E` is fixed by the cursor type at
//! compile time:
//!
//! * [`Silent`] — a zero-sized payload. Misses carry no text and the
//!   optimizer erases every message the combinators would have attached.
//! * [`Message`] — a human-readable text, defaulting to `"Parsing error"`
//!   and replaceable via [`Parser::or_fail`](crate::parser::Parser::or_fail).
//!
//! [`ParseError`] is the boundary type: the convenience runners in
//! [`parser`](crate::parser) convert a miss into a `ParseError` carrying the
//! terminal offset, so callers get an ordinary `Result`.

use std::borrow::Cow;

/// Text attached to a miss when no combinator supplied anything better.
pub const DEFAULT_ERROR_TEXT: &str = "Parsing error";

/// The result of applying a parser to a cursor.
///
/// Exactly one branch holds. Unlike `Result`, a [`Miss`](Parsed::Miss) is
/// not an exceptional condition — alternation and repetition consume misses
/// as ordinary control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed<T, E> {
    /// The parser matched and produced a value.
    Match(T),
    /// The parser did not match.
    Miss(E),
}

impl<T, E> Parsed<T, E> {
    /// Whether this outcome is a match.
    pub fn is_match(&self) -> bool {
        matches!(self, Parsed::Match(_))
    }

    /// Whether this outcome is a miss.
    pub fn is_miss(&self) -> bool {
        !self.is_match()
    }

    /// Transform the matched value, passing a miss through.
    pub fn map_match<U, F: FnOnce(T) -> U>(self, f: F) -> Parsed<U, E> {
        match self {
            Parsed::Match(value) => Parsed::Match(f(value)),
            Parsed::Miss(err) => Parsed::Miss(err),
        }
    }

    /// Transform the miss payload, passing a match through.
    pub fn map_miss<E2, F: FnOnce(E) -> E2>(self, f: F) -> Parsed<T, E2> {
        match self {
            Parsed::Match(value) => Parsed::Match(value),
            Parsed::Miss(err) => Parsed::Miss(f(err)),
        }
    }

    /// Chain a fallible continuation on the matched value.
    pub fn and_then<U, F: FnOnce(T) -> Parsed<U, E>>(self, f: F) -> Parsed<U, E> {
        match self {
            Parsed::Match(value) => f(value),
            Parsed::Miss(err) => Parsed::Miss(err),
        }
    }

    /// The matched value, discarding any miss payload.
    pub fn into_option(self) -> Option<T> {
        match self {
            Parsed::Match(value) => Some(value),
            Parsed::Miss(_) => None,
        }
    }

    /// Re-declare the value type carried by a miss, preserving its payload.
    ///
    /// Returns `None` when the outcome is a match; a match cannot change its
    /// value type without a mapping function.
    pub fn retag<U>(self) -> Option<Parsed<U, E>> {
        match self {
            Parsed::Match(_) => None,
            Parsed::Miss(err) => Some(Parsed::Miss(err)),
        }
    }
}

/// The contract a miss payload must satisfy.
///
/// Implemented by [`Silent`] and [`Message`]; the cursor's error-mode type
/// parameter selects which one a parse uses.
pub trait Failure: Sized + std::fmt::Debug {
    /// A miss with the default text (where text is kept at all).
    fn unmatched() -> Self;

    /// A miss carrying the given text (dropped under [`Silent`]).
    fn with_text(text: &'static str) -> Self;

    /// A miss carrying an owned text (dropped under [`Silent`]).
    fn with_owned_text(text: String) -> Self;

    /// The attached text, if this mode keeps one.
    fn text(&self) -> Option<&str>;
}

/// Error mode that keeps no message. Zero-sized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Silent;

impl Failure for Silent {
    fn unmatched() -> Self {
        Silent
    }

    fn with_text(_text: &'static str) -> Self {
        Silent
    }

    fn with_owned_text(_text: String) -> Self {
        Silent
    }

    fn text(&self) -> Option<&str> {
        None
    }
}

/// Error mode that carries a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(Cow<'static, str>);

impl Message {
    /// The message text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Failure for Message {
    fn unmatched() -> Self {
        Message(Cow::Borrowed(DEFAULT_ERROR_TEXT))
    }

    fn with_text(text: &'static str) -> Self {
        Message(Cow::Borrowed(text))
    }

    fn with_owned_text(text: String) -> Self {
        Message(Cow::Owned(text))
    }

    fn text(&self) -> Option<&str> {
        Some(&self.0)
    }
}

/// Boundary error returned by the convenience runners.
///
/// Carries the cursor's terminal offset, which tells the caller how far the
/// parse progressed before the miss.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("parse error at offset {offset}: {message}")]
pub struct ParseError {
    /// Position of the cursor when the top-level parser returned.
    pub offset: usize,
    /// The miss text, or the default text under [`Silent`].
    pub message: String,
}

impl ParseError {
    pub(crate) fn from_failure<E: Failure>(offset: usize, failure: &E) -> Self {
        ParseError {
            offset,
            message: failure.text().unwrap_or(DEFAULT_ERROR_TEXT).to_owned(),
        }
    }
}
