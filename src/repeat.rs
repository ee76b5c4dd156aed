// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Repetition
//!
//! [`Repeated`] drives a parser until it misses, optionally interleaving a
//! separator. The builder methods pick the policy, the terminal adapters
//! pick what happens to the matched values:
//!
//! ```
//! use parslet::prelude::*;
//!
//! let csv = IntParserBuilder::<i64>::new()
//!     .build()
//!     .repeated()
//!     .separated_by(item(','))
//!     .collect::<Vec<_>>();
//! assert_eq!(parse(&csv, "1,2,3"), Ok(vec![1, 2, 3]));
//! ```
//!
//! Repetition semantics, shared by every form:
//!
//! 1. A miss on the very first item yields a zero-length match, unless
//!    [`at_least_one`](Repeated::at_least_one) is set.
//! 2. After each matched item, the separator runs before the next item; a
//!    separator miss ends the loop.
//! 3. If the separator matched but the following item misses, the loop ends
//!    with the separator consumed — unless
//!    [`no_trailing_separator`](Repeated::no_trailing_separator) is set, in
//!    which case the whole repetition misses with the cursor restored to
//!    the start of that separator.
//! 4. The base form's value is the span from entry to where the loop
//!    stopped.

use core::marker::PhantomData;

use crate::cursor::{Cursor, SliceOf};
use crate::outcome::Parsed;
use crate::parser::Parser;

/// Separator placeholder for a repetition without one.
#[derive(Debug, Clone, Copy)]
pub struct NoSep;

impl<C: Cursor> Parser<C> for NoSep {
    type Output = ();

    fn apply(&self, _cursor: &mut C) -> Parsed<(), C::Error> {
        Parsed::Match(())
    }
}

/// Repetition of a parser; see the [module docs](self) for the loop
/// semantics and [`Parser::repeated`] for construction.
///
/// As a parser in its own right, the values are discarded and the matched
/// span is the output; the terminal adapters ([`collect`](Repeated::collect)
/// and friends) change that.
#[derive(Debug, Clone, Copy)]
pub struct Repeated<P, S = NoSep> {
    item: P,
    separator: Option<S>,
    at_least_one: bool,
    no_trailing_separator: bool,
}

impl<P> Repeated<P> {
    pub(crate) fn new(item: P) -> Self {
        Repeated {
            item,
            separator: None,
            at_least_one: false,
            no_trailing_separator: false,
        }
    }
}

impl<P, S> Repeated<P, S> {
    /// Require `separator` between consecutive items.
    pub fn separated_by<S2>(self, separator: S2) -> Repeated<P, S2> {
        Repeated {
            item: self.item,
            separator: Some(separator),
            at_least_one: self.at_least_one,
            no_trailing_separator: self.no_trailing_separator,
        }
    }

    /// Miss unless at least one item matches.
    pub fn at_least_one(mut self, required: bool) -> Self {
        self.at_least_one = required;
        self
    }

    /// Treat a separator with no item after it as a failure of the whole
    /// repetition, restoring the cursor to the start of that separator.
    pub fn no_trailing_separator(mut self, forbid: bool) -> Self {
        self.no_trailing_separator = forbid;
        self
    }

    /// Collect the values into any `Default + Extend` container: `Vec`,
    /// `String`, or — for key/value pair items — `HashMap` and `BTreeMap`.
    pub fn collect<Co>(self) -> Collect<P, S, Co> {
        Collect { repeat: self, _collection: PhantomData }
    }

    /// Fill a fixed-size array, stopping silently once it is full. The
    /// output is the array plus the number of slots filled.
    pub fn collect_array<const N: usize>(self) -> CollectArray<P, S, N> {
        CollectArray { repeat: self }
    }

    /// Collect key/value pair items into an associative container, keeping
    /// the first occurrence of each key and silently ignoring later
    /// duplicates. The container type argument picks the ordering
    /// (`BTreeMap`) or lack of it (`HashMap`); for last-wins semantics use
    /// [`collect`](Repeated::collect), whose `Extend` overwrites.
    pub fn collect_map<M>(self) -> CollectMap<P, S, M> {
        CollectMap { repeat: self, _map: PhantomData }
    }

    /// Invoke a callback per matched value; the output is the matched span.
    pub fn for_each<F>(self, f: F) -> ForEach<P, S, F> {
        ForEach { repeat: self, f }
    }

    /// Invoke a callback per matched value with the user state.
    pub fn for_each_state<F>(self, f: F) -> ForEachState<P, S, F> {
        ForEachState { repeat: self, f }
    }

    /// Left-fold the values into an accumulator seeded with a clone of
    /// `init` on every application.
    pub fn fold<A: Clone, F>(self, init: A, f: F) -> Fold<P, S, A, F> {
        Fold { repeat: self, init, f }
    }

    /// The shared drive loop. `on_item` consumes each value and returns
    /// whether to keep going; it receives the cursor so state-threading
    /// adapters can reach the user state.
    fn drive<C, F>(&self, cursor: &mut C, mut on_item: F) -> Parsed<(), C::Error>
    where
        C: Cursor,
        P: Parser<C>,
        S: Parser<C>,
        F: FnMut(&mut C, P::Output) -> bool,
    {
        let entry = cursor.position();
        match self.item.apply(cursor) {
            Parsed::Miss(err) => {
                cursor.set_position(entry);
                return if self.at_least_one {
                    Parsed::Miss(err)
                } else {
                    Parsed::Match(())
                };
            }
            Parsed::Match(value) => {
                if !on_item(cursor, value) {
                    return Parsed::Match(());
                }
            }
        }
        loop {
            let sep_mark = cursor.position();
            if let Some(separator) = &self.separator {
                if separator.apply(cursor).is_miss() {
                    cursor.set_position(sep_mark);
                    return Parsed::Match(());
                }
            }
            let item_mark = cursor.position();
            match self.item.apply(cursor) {
                Parsed::Miss(err) => {
                    if self.separator.is_some() && self.no_trailing_separator {
                        cursor.set_position(sep_mark);
                        return Parsed::Miss(err);
                    }
                    cursor.set_position(item_mark);
                    return Parsed::Match(());
                }
                Parsed::Match(value) => {
                    if cursor.position() == sep_mark {
                        // Zero-width iteration; stop instead of spinning.
                        return Parsed::Match(());
                    }
                    if !on_item(cursor, value) {
                        return Parsed::Match(());
                    }
                }
            }
        }
    }
}

impl<C, P, S> Parser<C> for Repeated<P, S>
where
    C: Cursor,
    P: Parser<C>,
    S: Parser<C>,
{
    type Output = SliceOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<SliceOf<C>, C::Error> {
        let entry = cursor.position();
        self.drive(cursor, |_, _| true)
            .map_match(|()| cursor.convert(entry, cursor.position()))
    }
}

/// See [`Repeated::collect`].
#[derive(Debug, Clone, Copy)]
pub struct Collect<P, S, Co> {
    repeat: Repeated<P, S>,
    _collection: PhantomData<fn() -> Co>,
}

impl<C, P, S, Co> Parser<C> for Collect<P, S, Co>
where
    C: Cursor,
    P: Parser<C>,
    S: Parser<C>,
    Co: Default + Extend<P::Output>,
{
    type Output = Co;

    fn apply(&self, cursor: &mut C) -> Parsed<Co, C::Error> {
        let mut out = Co::default();
        self.repeat
            .drive(cursor, |_, value| {
                out.extend(core::iter::once(value));
                true
            })
            .map_match(|()| out)
    }
}

/// See [`Repeated::collect_array`].
#[derive(Debug, Clone, Copy)]
pub struct CollectArray<P, S, const N: usize> {
    repeat: Repeated<P, S>,
}

impl<C, P, S, const N: usize> Parser<C> for CollectArray<P, S, N>
where
    C: Cursor,
    P: Parser<C>,
    S: Parser<C>,
    P::Output: Default,
{
    type Output = ([P::Output; N], usize);

    fn apply(&self, cursor: &mut C) -> Parsed<Self::Output, C::Error> {
        let mut out: [P::Output; N] = core::array::from_fn(|_| Default::default());
        let mut count = 0usize;
        if N == 0 {
            return Parsed::Match((out, 0));
        }
        self.repeat
            .drive(cursor, |_, value| {
                out[count] = value;
                count += 1;
                count < N
            })
            .map_match(|()| (out, count))
    }
}

/// A map that can decline to overwrite; see [`Repeated::collect_map`].
pub trait MapInsert<K, V>: Default {
    /// Insert `(key, value)` unless `key` is already present.
    fn insert_first(&mut self, key: K, value: V);
}

impl<K: core::hash::Hash + Eq, V> MapInsert<K, V> for std::collections::HashMap<K, V> {
    fn insert_first(&mut self, key: K, value: V) {
        self.entry(key).or_insert(value);
    }
}

impl<K: Ord, V> MapInsert<K, V> for std::collections::BTreeMap<K, V> {
    fn insert_first(&mut self, key: K, value: V) {
        self.entry(key).or_insert(value);
    }
}

/// See [`Repeated::collect_map`].
#[derive(Debug, Clone, Copy)]
pub struct CollectMap<P, S, M> {
    repeat: Repeated<P, S>,
    _map: PhantomData<fn() -> M>,
}

impl<C, P, S, K, V, M> Parser<C> for CollectMap<P, S, M>
where
    C: Cursor,
    P: Parser<C, Output = (K, V)>,
    S: Parser<C>,
    M: MapInsert<K, V>,
{
    type Output = M;

    fn apply(&self, cursor: &mut C) -> Parsed<M, C::Error> {
        let mut out = M::default();
        self.repeat
            .drive(cursor, |_, (key, value)| {
                out.insert_first(key, value);
                true
            })
            .map_match(|()| out)
    }
}

/// See [`Repeated::for_each`].
#[derive(Debug, Clone, Copy)]
pub struct ForEach<P, S, F> {
    repeat: Repeated<P, S>,
    f: F,
}

impl<C, P, S, F> Parser<C> for ForEach<P, S, F>
where
    C: Cursor,
    P: Parser<C>,
    S: Parser<C>,
    F: Fn(P::Output),
{
    type Output = SliceOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<SliceOf<C>, C::Error> {
        let entry = cursor.position();
        self.repeat
            .drive(cursor, |_, value| {
                (self.f)(value);
                true
            })
            .map_match(|()| cursor.convert(entry, cursor.position()))
    }
}

/// See [`Repeated::for_each_state`].
#[derive(Debug, Clone, Copy)]
pub struct ForEachState<P, S, F> {
    repeat: Repeated<P, S>,
    f: F,
}

impl<C, P, S, F> Parser<C> for ForEachState<P, S, F>
where
    C: Cursor,
    P: Parser<C>,
    S: Parser<C>,
    F: Fn(&mut C::State, P::Output),
{
    type Output = SliceOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<SliceOf<C>, C::Error> {
        let entry = cursor.position();
        self.repeat
            .drive(cursor, |cursor, value| {
                (self.f)(cursor.state(), value);
                true
            })
            .map_match(|()| cursor.convert(entry, cursor.position()))
    }
}

/// See [`Repeated::fold`].
#[derive(Debug, Clone, Copy)]
pub struct Fold<P, S, A, F> {
    repeat: Repeated<P, S>,
    init: A,
    f: F,
}

impl<C, P, S, A, F> Parser<C> for Fold<P, S, A, F>
where
    C: Cursor,
    P: Parser<C>,
    S: Parser<C>,
    A: Clone,
    F: Fn(A, P::Output) -> A,
{
    type Output = A;

    fn apply(&self, cursor: &mut C) -> Parsed<A, C::Error> {
        let mut acc = Some(self.init.clone());
        let outcome = self.repeat.drive(cursor, |_, value| {
            if let Some(current) = acc.take() {
                acc = Some((self.f)(current, value));
            }
            true
        });
        outcome.map_match(|()| acc.unwrap_or_else(|| self.init.clone()))
    }
}
