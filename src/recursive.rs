// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Recursion and Type Erasure
//!
//! [`recursive`] ties the knot for self-referential grammars: the builder
//! closure receives a cheaply-cloneable handle standing for the parser being
//! defined, and the handle resolves through a shared cell once the body is
//! built. The construction satisfies the fixed-point law — applying
//! `recursive(f)` behaves as applying `f(recursive(f))`.
//!
//! Left recursion is the caller's responsibility: a body whose first step is
//! the handle itself recurses without consuming and will overflow the stack,
//! exactly as it would in any recursive-descent parser. Use
//! [`chain`](crate::combinator::chain) for left-associative operators.
//!
//! [`Boxed`] is the same erasure without the knot: a reference-counted
//! parser handle for naming-heavy grammars where spelling out nested
//! combinator types is not worth it.

use std::cell::OnceCell;
use std::rc::Rc;

use crate::cursor::Cursor;
use crate::outcome::{Failure, Parsed};
use crate::parser::Parser;

/// Object-safe mirror of [`Parser`], used behind the erasure handles.
trait DynParser<C: Cursor, O> {
    fn apply_dyn(&self, cursor: &mut C) -> Parsed<O, C::Error>;
}

impl<C: Cursor, P: Parser<C>> DynParser<C, P::Output> for P {
    fn apply_dyn(&self, cursor: &mut C) -> Parsed<P::Output, C::Error> {
        self.apply(cursor)
    }
}

/// A self-referential parser produced by [`recursive`].
///
/// Clones share the underlying definition; cloning is a reference-count
/// bump.
pub struct Recursive<'p, C: Cursor, O> {
    cell: Rc<OnceCell<Box<dyn DynParser<C, O> + 'p>>>,
}

impl<'p, C: Cursor, O> Clone for Recursive<'p, C, O> {
    fn clone(&self) -> Self {
        Recursive { cell: Rc::clone(&self.cell) }
    }
}

impl<'p, C: Cursor, O> std::fmt::Debug for Recursive<'p, C, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recursive")
            .field("defined", &self.cell.get().is_some())
            .finish()
    }
}

/// Build a parser that can refer to itself.
///
/// The closure receives the handle for the parser being defined and returns
/// the body; occurrences of the handle inside the body resolve to the whole
/// definition when applied.
///
/// ```
/// use parslet::prelude::*;
///
/// // nesting := '(' nesting ')' | ""   — reports the nesting depth.
/// let depth = recursive(|depth| {
///     item('(')
///         .ignore_then(depth)
///         .then_ignore(item(')'))
///         .map(|d: usize| d + 1)
///         .or(pure(0))
/// });
/// assert_eq!(parse(&depth, "((()))"), Ok(3));
/// assert_eq!(parse(&depth, ""), Ok(0));
/// ```
pub fn recursive<'p, C, O, P, F>(build: F) -> Recursive<'p, C, O>
where
    C: Cursor,
    P: Parser<C, Output = O> + 'p,
    F: FnOnce(Recursive<'p, C, O>) -> P,
{
    let cell = Rc::new(OnceCell::new());
    let handle = Recursive { cell: Rc::clone(&cell) };
    let body = build(handle);
    let _ = cell.set(Box::new(body) as Box<dyn DynParser<C, O> + 'p>);
    Recursive { cell }
}

impl<'p, C: Cursor, O> Parser<C> for Recursive<'p, C, O> {
    type Output = O;

    fn apply(&self, cursor: &mut C) -> Parsed<O, C::Error> {
        match self.cell.get() {
            Some(parser) => parser.apply_dyn(cursor),
            // Only reachable by applying the handle inside the builder
            // closure itself, before the body exists.
            None => Parsed::Miss(C::Error::with_text(
                "recursive parser applied before its definition",
            )),
        }
    }
}

/// A type-erased, reference-counted parser; see [`Parser::boxed`].
pub struct Boxed<'p, C: Cursor, O> {
    inner: Rc<dyn DynParser<C, O> + 'p>,
}

impl<'p, C: Cursor, O> Boxed<'p, C, O> {
    pub(crate) fn new<P>(parser: P) -> Self
    where
        P: Parser<C, Output = O> + 'p,
    {
        Boxed { inner: Rc::new(parser) }
    }
}

impl<'p, C: Cursor, O> Clone for Boxed<'p, C, O> {
    fn clone(&self) -> Self {
        Boxed { inner: Rc::clone(&self.inner) }
    }
}

impl<'p, C: Cursor, O> std::fmt::Debug for Boxed<'p, C, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Boxed(..)")
    }
}

impl<'p, C: Cursor, O> Parser<C> for Boxed<'p, C, O> {
    type Output = O;

    fn apply(&self, cursor: &mut C) -> Parsed<O, C::Error> {
        self.inner.apply_dyn(cursor)
    }
}
