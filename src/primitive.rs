// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Primitive Parsers
//!
//! The leaf parsers everything else is assembled from. Each primitive either
//! matches, advancing the cursor by exactly what it consumed, or misses and
//! leaves the cursor at its entry position ([`literal`] in particular never
//! partially advances).
//!
//! Scanning primitives ([`until_item`], [`between_items`], …) are configured
//! through builder methods on the returned parser value rather than extra
//! arguments, so the call site reads as a sentence:
//!
//! ```
//! use parslet::prelude::*;
//!
//! let comment = literal("//").ignore_then(until_item('\n').leave_match(true));
//! assert_eq!(parse(&comment, "// hi\nrest"), Ok(" hi"));
//! ```

use crate::cursor::{Cursor, ItemOf, SliceOf};
use crate::input::Input;
use crate::outcome::{Failure, Parsed};
use crate::parser::Parser;

/// A fixed pattern that can be matched against an input at a position.
///
/// Implemented for single items (`char` against `&str`, `T` against
/// `&[T]`) and for sub-sequences (`&str` against `&str`, `&[T]` against
/// `&[T]`), so the same scanning primitives serve both.
pub trait Needle<I: Input> {
    /// If the pattern matches at `pos`, the position just past the match.
    fn match_at(&self, input: I, pos: usize) -> Option<usize>;
}

impl<'a> Needle<&'a str> for char {
    fn match_at(&self, input: &'a str, pos: usize) -> Option<usize> {
        let (ch, next) = input.next_item(pos)?;
        (ch == *self).then_some(next)
    }
}

impl<'a, 'n> Needle<&'a str> for &'n str {
    fn match_at(&self, input: &'a str, pos: usize) -> Option<usize> {
        input
            .get(pos..)
            .is_some_and(|rest| rest.starts_with(*self))
            .then(|| pos + self.len())
    }
}

impl<'a, T: Clone + PartialEq> Needle<&'a [T]> for T {
    fn match_at(&self, input: &'a [T], pos: usize) -> Option<usize> {
        (input.get(pos) == Some(self)).then(|| pos + 1)
    }
}

impl<'a, 'n, T: Clone + PartialEq> Needle<&'a [T]> for &'n [T] {
    fn match_at(&self, input: &'a [T], pos: usize) -> Option<usize> {
        input
            .get(pos..)
            .is_some_and(|rest| rest.starts_with(self))
            .then(|| pos + self.len())
    }
}

impl<I: Input, N: Needle<I>> Needle<crate::input::Offsets<I>> for N {
    fn match_at(&self, input: crate::input::Offsets<I>, pos: usize) -> Option<usize> {
        self.match_at(input.0, pos)
    }
}

/// A finite set of items, for [`one_of`] and [`items_in`].
pub trait ItemSet<T> {
    /// Whether `item` belongs to the set.
    fn contains_item(&self, item: &T) -> bool;
}

impl<'s> ItemSet<char> for &'s str {
    fn contains_item(&self, item: &char) -> bool {
        self.contains(*item)
    }
}

impl<'s, T: PartialEq> ItemSet<T> for &'s [T] {
    fn contains_item(&self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T: PartialEq, const N: usize> ItemSet<T> for [T; N] {
    fn contains_item(&self, item: &T) -> bool {
        self.as_slice().contains(item)
    }
}

// ---------------------------------------------------------------------------
// Constant outcomes
// ---------------------------------------------------------------------------

/// Parser that always matches `value` without touching the cursor.
#[derive(Debug, Clone, Copy)]
pub struct Pure<T> {
    value: T,
}

/// Always match `value`; consume nothing.
pub fn pure<T: Clone>(value: T) -> Pure<T> {
    Pure { value }
}

impl<C: Cursor, T: Clone> Parser<C> for Pure<T> {
    type Output = T;

    fn apply(&self, _cursor: &mut C) -> Parsed<T, C::Error> {
        Parsed::Match(self.value.clone())
    }
}

/// Parser that always misses without touching the cursor.
#[derive(Debug, Clone, Copy)]
pub struct Fail<T> {
    text: Option<&'static str>,
    _out: core::marker::PhantomData<fn() -> T>,
}

/// Always miss with the default text; consume nothing.
pub fn fail<T>() -> Fail<T> {
    Fail { text: None, _out: core::marker::PhantomData }
}

/// Always miss with the given text; consume nothing.
pub fn fail_with<T>(text: &'static str) -> Fail<T> {
    Fail { text: Some(text), _out: core::marker::PhantomData }
}

impl<C: Cursor, T> Parser<C> for Fail<T> {
    type Output = T;

    fn apply(&self, _cursor: &mut C) -> Parsed<T, C::Error> {
        Parsed::Miss(match self.text {
            Some(text) => C::Error::with_text(text),
            None => C::Error::unmatched(),
        })
    }
}

/// Parser matching only at the end of input.
#[derive(Debug, Clone, Copy)]
pub struct End;

/// Match only at the end of input; consume nothing.
pub fn end() -> End {
    End
}

impl<C: Cursor> Parser<C> for End {
    type Output = ();

    fn apply(&self, cursor: &mut C) -> Parsed<(), C::Error> {
        if cursor.at_end() {
            Parsed::Match(())
        } else {
            Parsed::Miss(C::Error::with_text("expected end of input"))
        }
    }
}

/// Parser matching iff a boolean held at construction.
#[derive(Debug, Clone, Copy)]
pub struct Cond {
    ok: bool,
}

/// Match iff `ok`; consume nothing. Combined with
/// [`bind`](crate::parser::Parser::bind), this turns a previously parsed
/// value into a branch condition.
pub fn cond(ok: bool) -> Cond {
    Cond { ok }
}

impl<C: Cursor> Parser<C> for Cond {
    type Output = ();

    fn apply(&self, _cursor: &mut C) -> Parsed<(), C::Error> {
        if self.ok {
            Parsed::Match(())
        } else {
            Parsed::Miss(C::Error::unmatched())
        }
    }
}

// ---------------------------------------------------------------------------
// Single items
// ---------------------------------------------------------------------------

/// Parser consuming any single item.
#[derive(Debug, Clone, Copy)]
pub struct AnyItem;

/// Consume and return one item; miss at end of input.
pub fn any_item() -> AnyItem {
    AnyItem
}

impl<C: Cursor> Parser<C> for AnyItem {
    type Output = ItemOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<ItemOf<C>, C::Error> {
        match cursor.bump() {
            Some(item) => Parsed::Match(item),
            None => Parsed::Miss(C::Error::unmatched()),
        }
    }
}

/// Parser consuming one specific item.
#[derive(Debug, Clone, Copy)]
pub struct Item<T> {
    wanted: T,
}

/// Consume the given item, returning it.
pub fn item<T>(wanted: T) -> Item<T> {
    Item { wanted }
}

impl<C, T> Parser<C> for Item<T>
where
    C: Cursor,
    C::Src: Input<Item = T>,
    T: Clone + PartialEq,
{
    type Output = T;

    fn apply(&self, cursor: &mut C) -> Parsed<T, C::Error> {
        match cursor.front() {
            Some(found) if found == self.wanted => {
                cursor.bump();
                Parsed::Match(found)
            }
            _ => Parsed::Miss(C::Error::unmatched()),
        }
    }
}

/// Parser consuming any single item except one.
#[derive(Debug, Clone, Copy)]
pub struct NotItem<T> {
    unwanted: T,
}

/// Consume any item other than the given one.
pub fn not_item<T>(unwanted: T) -> NotItem<T> {
    NotItem { unwanted }
}

impl<C, T> Parser<C> for NotItem<T>
where
    C: Cursor,
    C::Src: Input<Item = T>,
    T: Clone + PartialEq,
{
    type Output = T;

    fn apply(&self, cursor: &mut C) -> Parsed<T, C::Error> {
        match cursor.front() {
            Some(found) if found != self.unwanted => {
                cursor.bump();
                Parsed::Match(found)
            }
            _ => Parsed::Miss(C::Error::unmatched()),
        }
    }
}

/// Parser consuming one item satisfying a predicate.
#[derive(Debug, Clone, Copy)]
pub struct ItemIf<F> {
    predicate: F,
}

/// Consume one item for which `predicate` holds.
pub fn item_if<F>(predicate: F) -> ItemIf<F> {
    ItemIf { predicate }
}

impl<C, F> Parser<C> for ItemIf<F>
where
    C: Cursor,
    F: Fn(&ItemOf<C>) -> bool,
{
    type Output = ItemOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<ItemOf<C>, C::Error> {
        match cursor.front() {
            Some(found) if (self.predicate)(&found) => {
                cursor.bump();
                Parsed::Match(found)
            }
            _ => Parsed::Miss(C::Error::unmatched()),
        }
    }
}

/// Parser consuming one item violating a predicate.
#[derive(Debug, Clone, Copy)]
pub struct ItemIfNot<F> {
    predicate: F,
}

/// Consume one item for which `predicate` does not hold.
pub fn item_if_not<F>(predicate: F) -> ItemIfNot<F> {
    ItemIfNot { predicate }
}

impl<C, F> Parser<C> for ItemIfNot<F>
where
    C: Cursor,
    F: Fn(&ItemOf<C>) -> bool,
{
    type Output = ItemOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<ItemOf<C>, C::Error> {
        match cursor.front() {
            Some(found) if !(self.predicate)(&found) => {
                cursor.bump();
                Parsed::Match(found)
            }
            _ => Parsed::Miss(C::Error::unmatched()),
        }
    }
}

/// Parser consuming one item from a finite set.
#[derive(Debug, Clone, Copy)]
pub struct OneOf<S> {
    set: S,
}

/// Consume one item belonging to `set` (a `&str` of chars, a slice, or an
/// array), returning it.
pub fn one_of<S>(set: S) -> OneOf<S> {
    OneOf { set }
}

impl<C, S> Parser<C> for OneOf<S>
where
    C: Cursor,
    S: ItemSet<ItemOf<C>>,
{
    type Output = ItemOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<ItemOf<C>, C::Error> {
        match cursor.front() {
            Some(found) if self.set.contains_item(&found) => {
                cursor.bump();
                Parsed::Match(found)
            }
            _ => Parsed::Miss(C::Error::unmatched()),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixed sub-sequences and bulk consumption
// ---------------------------------------------------------------------------

/// Parser consuming an exact sub-sequence.
#[derive(Debug, Clone, Copy)]
pub struct Literal<N> {
    needle: N,
}

/// Consume exactly `needle` at the current position, returning the matched
/// span. Atomic: a miss consumes nothing.
pub fn literal<N>(needle: N) -> Literal<N> {
    Literal { needle }
}

impl<C, N> Parser<C> for Literal<N>
where
    C: Cursor,
    N: Needle<C::Src>,
{
    type Output = SliceOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<SliceOf<C>, C::Error> {
        let entry = cursor.position();
        match self.needle.match_at(cursor.source(), entry) {
            Some(end) => {
                cursor.set_position(end);
                Parsed::Match(cursor.convert(entry, end))
            }
            None => Parsed::Miss(C::Error::unmatched()),
        }
    }
}

/// Parser consuming a fixed number of items.
#[derive(Debug, Clone, Copy)]
pub struct Consume {
    count: usize,
}

/// Consume exactly `count` items, returning the span; miss (consuming
/// nothing) if fewer remain.
pub fn consume(count: usize) -> Consume {
    Consume { count }
}

impl<C: Cursor> Parser<C> for Consume {
    type Output = SliceOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<SliceOf<C>, C::Error> {
        let entry = cursor.position();
        if cursor.advance(self.count) {
            Parsed::Match(cursor.convert(entry, cursor.position()))
        } else {
            Parsed::Miss(C::Error::unmatched())
        }
    }
}

/// Parser consuming the whole remainder.
#[derive(Debug, Clone, Copy)]
pub struct Rest;

/// Consume everything up to the end of input, returning it. Never misses.
pub fn rest() -> Rest {
    Rest
}

impl<C: Cursor> Parser<C> for Rest {
    type Output = SliceOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<SliceOf<C>, C::Error> {
        let entry = cursor.position();
        cursor.set_position(cursor.source().len());
        Parsed::Match(cursor.convert(entry, cursor.position()))
    }
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// Parser consuming up to the first occurrence of a pattern.
///
/// By default the span before the pattern is returned and the pattern
/// itself is consumed; [`include_match`](UntilMatch::include_match) adds the
/// pattern to the returned span, [`leave_match`](UntilMatch::leave_match)
/// leaves it unconsumed.
#[derive(Debug, Clone, Copy)]
pub struct UntilMatch<N> {
    needle: N,
    include: bool,
    eat: bool,
}

/// Consume up to the first occurrence of the given item.
pub fn until_item<N>(needle: N) -> UntilMatch<N> {
    UntilMatch { needle, include: false, eat: true }
}

/// Consume up to the first occurrence of the given sub-sequence.
pub fn until_literal<N>(needle: N) -> UntilMatch<N> {
    UntilMatch { needle, include: false, eat: true }
}

impl<N> UntilMatch<N> {
    /// Include the matched pattern in the returned span.
    pub fn include_match(mut self, include: bool) -> Self {
        self.include = include;
        self
    }

    /// Leave the matched pattern unconsumed.
    pub fn leave_match(mut self, leave: bool) -> Self {
        self.eat = !leave;
        self
    }
}

impl<C, N> Parser<C> for UntilMatch<N>
where
    C: Cursor,
    N: Needle<C::Src>,
{
    type Output = SliceOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<SliceOf<C>, C::Error> {
        let entry = cursor.position();
        let src = cursor.source();
        let mut probe = entry;
        loop {
            if let Some(end) = self.needle.match_at(src, probe) {
                let value_end = if self.include { end } else { probe };
                cursor.set_position(if self.eat { end } else { probe });
                return Parsed::Match(cursor.convert(entry, value_end));
            }
            match src.next_item(probe) {
                Some((_, next)) => probe = next,
                None => return Parsed::Miss(C::Error::with_text("target not found")),
            }
        }
    }
}

/// Parser consuming the maximal prefix satisfying a predicate.
#[derive(Debug, Clone, Copy)]
pub struct ItemsWhile<F> {
    predicate: F,
    at_least_one: bool,
}

/// Consume items while `predicate` holds, returning the span (possibly
/// empty).
pub fn items_while<F>(predicate: F) -> ItemsWhile<F> {
    ItemsWhile { predicate, at_least_one: false }
}

impl<F> ItemsWhile<F> {
    /// Miss on an empty run instead of matching a zero-length span.
    pub fn at_least_one(mut self, required: bool) -> Self {
        self.at_least_one = required;
        self
    }
}

fn run_while<C, F>(cursor: &mut C, predicate: F, at_least_one: bool) -> Parsed<SliceOf<C>, C::Error>
where
    C: Cursor,
    F: Fn(&ItemOf<C>) -> bool,
{
    let entry = cursor.position();
    while let Some(item) = cursor.front() {
        if !predicate(&item) {
            break;
        }
        cursor.bump();
    }
    if at_least_one && cursor.position() == entry {
        return Parsed::Miss(C::Error::unmatched());
    }
    Parsed::Match(cursor.convert(entry, cursor.position()))
}

impl<C, F> Parser<C> for ItemsWhile<F>
where
    C: Cursor,
    F: Fn(&ItemOf<C>) -> bool,
{
    type Output = SliceOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<SliceOf<C>, C::Error> {
        run_while(cursor, |item| (self.predicate)(item), self.at_least_one)
    }
}

/// Parser consuming the maximal prefix violating a predicate.
#[derive(Debug, Clone, Copy)]
pub struct ItemsWhileNot<F> {
    predicate: F,
    at_least_one: bool,
}

/// Consume items while `predicate` does not hold.
pub fn items_while_not<F>(predicate: F) -> ItemsWhileNot<F> {
    ItemsWhileNot { predicate, at_least_one: false }
}

impl<F> ItemsWhileNot<F> {
    /// Miss on an empty run instead of matching a zero-length span.
    pub fn at_least_one(mut self, required: bool) -> Self {
        self.at_least_one = required;
        self
    }
}

impl<C, F> Parser<C> for ItemsWhileNot<F>
where
    C: Cursor,
    F: Fn(&ItemOf<C>) -> bool,
{
    type Output = SliceOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<SliceOf<C>, C::Error> {
        run_while(cursor, |item| !(self.predicate)(item), self.at_least_one)
    }
}

/// Parser consuming the maximal prefix of items from a set.
#[derive(Debug, Clone, Copy)]
pub struct ItemsIn<S> {
    set: S,
    at_least_one: bool,
}

/// Consume items while they belong to `set`.
pub fn items_in<S>(set: S) -> ItemsIn<S> {
    ItemsIn { set, at_least_one: false }
}

impl<S> ItemsIn<S> {
    /// Miss on an empty run instead of matching a zero-length span.
    pub fn at_least_one(mut self, required: bool) -> Self {
        self.at_least_one = required;
        self
    }
}

impl<C, S> Parser<C> for ItemsIn<S>
where
    C: Cursor,
    S: ItemSet<ItemOf<C>>,
{
    type Output = SliceOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<SliceOf<C>, C::Error> {
        run_while(cursor, |item| self.set.contains_item(item), self.at_least_one)
    }
}

/// Parser matching a span bracketed by an opening and a closing marker.
///
/// Requires the opening marker at the current position, scans for the
/// closing one, and leaves the cursor just past it. With
/// [`nested`](Between::nested), inner open/close pairs are counted so only
/// the balancing close terminates; with equal markers nesting has no
/// effect since the close is tested first.
#[derive(Debug, Clone, Copy)]
pub struct Between<A, B> {
    open: A,
    close: B,
    nested: bool,
    include_markers: bool,
}

/// Match a span bracketed by two marker items.
pub fn between_items<A, B>(open: A, close: B) -> Between<A, B> {
    Between { open, close, nested: false, include_markers: false }
}

/// Match a span bracketed by two marker sub-sequences.
pub fn between_literals<A, B>(open: A, close: B) -> Between<A, B> {
    Between { open, close, nested: false, include_markers: false }
}

impl<A, B> Between<A, B> {
    /// Count balanced inner marker pairs.
    pub fn nested(mut self, nested: bool) -> Self {
        self.nested = nested;
        self
    }

    /// Include the markers in the returned span.
    pub fn include_markers(mut self, include: bool) -> Self {
        self.include_markers = include;
        self
    }
}

impl<C, A, B> Parser<C> for Between<A, B>
where
    C: Cursor,
    A: Needle<C::Src>,
    B: Needle<C::Src>,
{
    type Output = SliceOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<SliceOf<C>, C::Error> {
        let entry = cursor.position();
        let src = cursor.source();
        let Some(inner_begin) = self.open.match_at(src, entry) else {
            return Parsed::Miss(C::Error::unmatched());
        };
        let mut probe = inner_begin;
        let mut depth = 1usize;
        loop {
            // Close is tested first so equal markers never re-open.
            if let Some(after_close) = self.close.match_at(src, probe) {
                depth -= 1;
                if depth == 0 {
                    let (begin, end) = if self.include_markers {
                        (entry, after_close)
                    } else {
                        (inner_begin, probe)
                    };
                    cursor.set_position(after_close);
                    return Parsed::Match(cursor.convert(begin, end));
                }
                probe = after_close;
                continue;
            }
            if self.nested {
                if let Some(after_open) = self.open.match_at(src, probe) {
                    depth += 1;
                    probe = after_open;
                    continue;
                }
            }
            match src.next_item(probe) {
                Some((_, next)) => probe = next,
                None => return Parsed::Miss(C::Error::with_text("unbalanced delimiters")),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// User-supplied primitives
// ---------------------------------------------------------------------------

/// Parser wrapping a bare function over the cursor.
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F> {
    f: F,
}

/// Build a parser from a function on the cursor. The function owns its
/// rewind discipline: if it misses after consuming, wrap the result in
/// [`attempt`](crate::parser::Parser::attempt) or restore the position
/// itself.
pub fn from_fn<F>(f: F) -> FromFn<F> {
    FromFn { f }
}

impl<C, T, F> Parser<C> for FromFn<F>
where
    C: Cursor,
    F: Fn(&mut C) -> Parsed<T, C::Error>,
{
    type Output = T;

    fn apply(&self, cursor: &mut C) -> Parsed<T, C::Error> {
        (self.f)(cursor)
    }
}
