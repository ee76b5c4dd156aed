// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # The Parser Trait
//!
//! A parser is a value: applying it to a mutable [`Cursor`] either matches
//! and produces an output, or misses. Every combinator in this crate is a
//! plain struct implementing [`Parser`], built by the provided methods on
//! this trait or by the free functions in [`primitive`](crate::primitive).
//! Construction allocates nothing except for the explicitly type-erased
//! forms ([`boxed`](Parser::boxed), [`recursive`](crate::recursive::recursive)).
//!
//! Sequencing obeys the monad laws through [`pure`](crate::primitive::pure)
//! and [`bind`](Parser::bind):
//!
//! * `pure(v).bind(f)` behaves as `f(v)`;
//! * `p.bind(pure)` behaves as `p`;
//! * `p.bind(f).bind(g)` behaves as `p.bind(|r| f(r).bind(g))`.
//!
//! ## Examples
//!
//! ```
//! use parslet::prelude::*;
//!
//! let key = items_while(|c: &char| c.is_ascii_alphabetic()).at_least_one(true);
//! let pair = key.then_ignore(item('=')).then(IntParserBuilder::<i64>::new().build());
//!
//! assert_eq!(parse(&pair, "retries=3"), Ok(("retries", 3)));
//! ```

use core::marker::PhantomData;

use crate::combinator::{
    Attempt, Bind, Filter, Ignored, IgnoreThen, Map, NonEmpty, Or, OrFail, OrNot, Reparse, Rewind,
    Succeeds, ThenIgnore, To, ToSlice, WithSpan,
};
use crate::cursor::{Cursor, Scanner};
use crate::input::Input;
use crate::outcome::{Message, Parsed, ParseError};
use crate::recursive::Boxed;
use crate::repeat::Repeated;
use crate::text::Padded;

/// A value that can be applied to a cursor of type `C`.
///
/// The single required method is [`apply`](Parser::apply). Applying never
/// panics; it either matches, advancing the cursor past what it consumed,
/// or misses. Whether a missing parser rewinds is part of each combinator's
/// contract: primitives always restore their entry position, composite
/// parsers restore only at their documented rewind points
/// ([`attempt`](Parser::attempt) makes any parser atomic).
pub trait Parser<C: Cursor> {
    /// The value produced on a match.
    type Output;

    /// Run this parser against the cursor.
    fn apply(&self, cursor: &mut C) -> Parsed<Self::Output, C::Error>;

    /// Transform the output with a pure function.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Map { parser: self, f }
    }

    /// Replace the output with a constant.
    fn to<U: Clone>(self, value: U) -> To<Self, U>
    where
        Self: Sized,
    {
        To { parser: self, value }
    }

    /// Discard the output.
    fn ignored(self) -> Ignored<Self>
    where
        Self: Sized,
    {
        Ignored { parser: self }
    }

    /// Monadic bind: feed the output into `f`, which builds the parser to
    /// run next on the same cursor.
    ///
    /// A miss propagates with the cursor wherever this parser left it.
    fn bind<Q, F>(self, f: F) -> Bind<Self, F>
    where
        Self: Sized,
        Q: Parser<C>,
        F: Fn(Self::Output) -> Q,
    {
        Bind { parser: self, build: f }
    }

    /// Run `self`, then `next`, producing both outputs as a pair.
    fn then<Q>(self, next: Q) -> Group<(Self, Q)>
    where
        Self: Sized,
        Q: Parser<C>,
    {
        Group((self, next))
    }

    /// Run `self` for effect, then `next` for its value.
    fn ignore_then<Q>(self, next: Q) -> IgnoreThen<Self, Q>
    where
        Self: Sized,
        Q: Parser<C>,
    {
        IgnoreThen { first: self, second: next }
    }

    /// Run `self` for its value, then `next` for effect.
    ///
    /// A miss of `next` propagates with the cursor wherever `next` left it.
    fn then_ignore<Q>(self, next: Q) -> ThenIgnore<Self, Q>
    where
        Self: Sized,
        Q: Parser<C>,
    {
        ThenIgnore { first: self, second: next }
    }

    /// Try `self`; on a miss, restore the cursor and try `other`.
    fn or<Q>(self, other: Q) -> Or<Self, Q>
    where
        Self: Sized,
        Q: Parser<C, Output = Self::Output>,
    {
        Or { first: self, second: other }
    }

    /// Never miss: yield `Some(value)` on a match, `None` otherwise. The
    /// cursor advances only on a match.
    fn or_not(self) -> OrNot<Self>
    where
        Self: Sized,
    {
        OrNot { parser: self }
    }

    /// Never miss: yield whether this parser matched. The cursor advances
    /// only on a match.
    fn succeeds(self) -> Succeeds<Self>
    where
        Self: Sized,
    {
        Succeeds { parser: self }
    }

    /// Replace the text a miss carries, preserving everything else.
    fn or_fail(self, text: &'static str) -> OrFail<Self>
    where
        Self: Sized,
    {
        OrFail { parser: self, text }
    }

    /// Run without committing: the cursor is restored whether or not the
    /// parser matched. The output is kept.
    fn rewind(self) -> Rewind<Self>
    where
        Self: Sized,
    {
        Rewind { parser: self }
    }

    /// Make this parser atomic: on a miss the cursor is restored to the
    /// entry position, no matter how far the parser advanced internally.
    fn attempt(self) -> Attempt<Self>
    where
        Self: Sized,
    {
        Attempt { parser: self }
    }

    /// Miss (with this parser's output type) when the predicate rejects an
    /// otherwise matched value. The cursor is left where the parser left it.
    fn filter<F>(self, predicate: F) -> Filter<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Output) -> bool,
    {
        Filter { parser: self, predicate }
    }

    /// Miss when the matched value is empty (zero for integers, zero-length
    /// for containers and spans).
    fn non_empty(self) -> NonEmpty<Self>
    where
        Self: Sized,
    {
        NonEmpty { parser: self }
    }

    /// Discard the output and yield the consumed span instead, from the
    /// entry position to wherever this parser stopped. Misses rewind.
    fn to_slice(self) -> ToSlice<Self>
    where
        Self: Sized,
    {
        ToSlice { parser: self }
    }

    /// Pair the output with the `(begin, end)` positions it spans.
    fn spanned(self) -> WithSpan<Self>
    where
        Self: Sized,
    {
        WithSpan { parser: self }
    }

    /// Skip surrounding whitespace.
    fn padded(self) -> Padded<Self>
    where
        Self: Sized,
    {
        Padded { parser: self }
    }

    /// Repeat this parser until it misses. See [`Repeated`] for separators,
    /// occupancy flags, and the collecting terminal forms.
    fn repeated(self) -> Repeated<Self>
    where
        Self: Sized,
    {
        Repeated::new(self)
    }

    /// Run `inner` against a fresh cursor over this parser's output span.
    ///
    /// The nested cursor shares the outer error mode; its terminal position
    /// is never written back to the outer cursor.
    fn reparse<Q>(self, inner: Q) -> Reparse<Self, Q>
    where
        Self: Sized,
        Self::Output: Input,
        Q: Parser<Scanner<Self::Output, (), C::Error>>,
    {
        Reparse { outer: self, inner }
    }

    /// Erase this parser's type behind a cheaply-cloneable handle.
    fn boxed<'p>(self) -> Boxed<'p, C, Self::Output>
    where
        Self: Sized + 'p,
    {
        Boxed::new(self)
    }
}

impl<C: Cursor, P: Parser<C> + ?Sized> Parser<C> for &P {
    type Output = P::Output;

    fn apply(&self, cursor: &mut C) -> Parsed<Self::Output, C::Error> {
        (**self).apply(cursor)
    }
}

/// Sequencing over a tuple of parsers: run each in order, produce the tuple
/// of outputs. The first miss propagates with the cursor wherever the
/// missing parser left it (wrap in [`Parser::attempt`] for atomicity, or
/// use [`Parser::to_slice`] which rewinds on its own).
#[derive(Debug, Clone, Copy)]
pub struct Group<T>(pub(crate) T);

/// Run a tuple of parsers in order; see [`Group`].
pub fn group<T>(parsers: T) -> Group<T> {
    Group(parsers)
}

/// Ordered alternation over a tuple of same-output parsers: the cursor is
/// restored before each retry, and restored again when every branch misses
/// (the last branch's miss payload is kept).
#[derive(Debug, Clone, Copy)]
pub struct Choice<T>(pub(crate) T);

/// Try each parser of a tuple in order; see [`Choice`].
pub fn choice<T>(parsers: T) -> Choice<T> {
    Choice(parsers)
}

/// Ordered alternation whose branches may produce distinct types, funneled
/// into `T` through an `Into<T>` conversion per branch.
#[derive(Debug, Clone, Copy)]
pub struct ChoiceInto<T, Tup> {
    parsers: Tup,
    _out: PhantomData<fn() -> T>,
}

/// Try each parser of a tuple in order, converting the first match into `T`.
///
/// ```
/// use parslet::prelude::*;
///
/// #[derive(Debug, PartialEq)]
/// enum Token { Word(String), Number(i64) }
///
/// impl From<String> for Token {
///     fn from(word: String) -> Self { Token::Word(word) }
/// }
/// impl From<i64> for Token {
///     fn from(n: i64) -> Self { Token::Number(n) }
/// }
///
/// let word = items_while(|c: &char| c.is_ascii_alphabetic())
///     .at_least_one(true)
///     .map(str::to_owned);
/// let number = IntParserBuilder::<i64>::new().build();
/// let token = choice_into::<Token, _>((word, number));
///
/// assert_eq!(parse(&token, "hello"), Ok(Token::Word("hello".into())));
/// assert_eq!(parse(&token, "42"), Ok(Token::Number(42)));
/// ```
pub fn choice_into<T, Tup>(parsers: Tup) -> ChoiceInto<T, Tup> {
    ChoiceInto { parsers, _out: PhantomData }
}

macro_rules! impl_tuple_parsers {
    ($($name:ident),+) => {
        #[allow(non_snake_case)]
        impl<C: Cursor, $($name: Parser<C>),+> Parser<C> for Group<($($name,)+)> {
            type Output = ($($name::Output,)+);

            fn apply(&self, cursor: &mut C) -> Parsed<Self::Output, C::Error> {
                let Group(($($name,)+)) = self;
                $(
                    let $name = match $name.apply(cursor) {
                        Parsed::Match(value) => value,
                        Parsed::Miss(err) => return Parsed::Miss(err),
                    };
                )+
                Parsed::Match(($($name,)+))
            }
        }

        #[allow(non_snake_case)]
        impl<C: Cursor, Out, $($name: Parser<C, Output = Out>),+> Parser<C> for Choice<($($name,)+)> {
            type Output = Out;

            #[allow(unused_assignments)]
            fn apply(&self, cursor: &mut C) -> Parsed<Out, C::Error> {
                let Choice(($($name,)+)) = self;
                let entry = cursor.position();
                let mut last_err;
                $(
                    cursor.set_position(entry);
                    match $name.apply(cursor) {
                        Parsed::Match(value) => return Parsed::Match(value),
                        Parsed::Miss(err) => last_err = err,
                    }
                )+
                cursor.set_position(entry);
                Parsed::Miss(last_err)
            }
        }

        #[allow(non_snake_case)]
        impl<C: Cursor, Out, $($name: Parser<C>),+> Parser<C> for ChoiceInto<Out, ($($name,)+)>
        where
            $($name::Output: Into<Out>,)+
        {
            type Output = Out;

            #[allow(unused_assignments)]
            fn apply(&self, cursor: &mut C) -> Parsed<Out, C::Error> {
                let ($($name,)+) = &self.parsers;
                let entry = cursor.position();
                let mut last_err;
                $(
                    cursor.set_position(entry);
                    match $name.apply(cursor) {
                        Parsed::Match(value) => return Parsed::Match(value.into()),
                        Parsed::Miss(err) => last_err = err,
                    }
                )+
                cursor.set_position(entry);
                Parsed::Miss(last_err)
            }
        }
    };
}

impl_tuple_parsers!(P1);
impl_tuple_parsers!(P1, P2);
impl_tuple_parsers!(P1, P2, P3);
impl_tuple_parsers!(P1, P2, P3, P4);
impl_tuple_parsers!(P1, P2, P3, P4, P5);
impl_tuple_parsers!(P1, P2, P3, P4, P5, P6);
impl_tuple_parsers!(P1, P2, P3, P4, P5, P6, P7);
impl_tuple_parsers!(P1, P2, P3, P4, P5, P6, P7, P8);

/// Apply a parser to a caller-built cursor, converting a miss into a
/// [`ParseError`] that carries the cursor's terminal position.
///
/// The cursor is left wherever the parse stopped, so callers can inspect
/// how far it got (or keep parsing).
pub fn run<C, P>(parser: &P, cursor: &mut C) -> Result<P::Output, ParseError>
where
    C: Cursor,
    P: Parser<C>,
{
    match parser.apply(cursor) {
        Parsed::Match(value) => Ok(value),
        Parsed::Miss(err) => Err(ParseError::from_failure(cursor.position(), &err)),
    }
}

/// Parse an input from the start with error messages enabled.
///
/// This does not require the input to be fully consumed; sequence an
/// [`end`](crate::primitive::end) for that.
pub fn parse<I, P>(parser: &P, input: I) -> Result<P::Output, ParseError>
where
    I: Input,
    P: Parser<Scanner<I, (), Message>>,
{
    let mut cursor = Scanner::verbose(input);
    run(parser, &mut cursor)
}

/// Parse an input from the start, threading mutable user state.
pub fn parse_with_state<'s, I, U, P>(
    parser: &P,
    input: I,
    state: &'s mut U,
) -> Result<P::Output, ParseError>
where
    I: Input,
    P: Parser<Scanner<I, &'s mut U, Message>>,
{
    let mut cursor = Scanner::stateful_verbose(input, state);
    run(parser, &mut cursor)
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn group_yields_outputs_in_order() {
        let p = group((item('a'), item('b'), item('c')));
        assert_eq!(parse(&p, "abc"), Ok(('a', 'b', 'c')));
        assert!(parse(&p, "abx").is_err());
    }

    #[test]
    fn group_miss_reports_failing_position() {
        let p = group((literal("ab"), literal("cd")));
        let err = parse(&p, "abxx").unwrap_err();
        // `literal("cd")` restored its own entry position before missing.
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn choice_restores_between_branches() {
        let p = choice((literal("abc"), literal("abd")));
        assert_eq!(parse(&p, "abd"), Ok("abd"));
        let err = parse(&p, "abx").unwrap_err();
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn or_is_binary_choice() {
        let p = item('a').or(item('b'));
        assert_eq!(parse(&p, "b"), Ok('b'));
        assert!(parse(&p, "c").is_err());
    }

    #[test]
    fn bind_threads_the_matched_value() {
        // A length-prefixed field: digit, then that many items.
        let p = IntParserBuilder::<usize>::new().build().bind(consume);
        assert_eq!(parse(&p, "3abcd"), Ok("abc"));
        assert!(parse(&p, "5abc").is_err());
    }

    #[test]
    fn monad_left_identity() {
        let lifted = pure(7).bind(|n| pure(n + 1));
        let direct = pure(8);
        let mut c1 = Scanner::new("zzz");
        let mut c2 = Scanner::new("zzz");
        assert_eq!(lifted.apply(&mut c1), direct.apply(&mut c2));
        assert_eq!(c1.position(), c2.position());
    }

    #[test]
    fn monad_right_identity() {
        let p = item('x').bind(pure);
        let q = item('x');
        for input in ["xy", "y", ""] {
            let mut c1 = Scanner::new(input);
            let mut c2 = Scanner::new(input);
            assert_eq!(p.apply(&mut c1), q.apply(&mut c2));
            assert_eq!(c1.position(), c2.position());
        }
    }

    #[test]
    fn monad_associativity() {
        let f = |c: char| item(c);
        let g = |c: char| pure(c.to_ascii_uppercase());
        let left = any_item().bind(f).bind(g);
        let right = any_item().bind(move |r| f(r).bind(g));
        for input in ["aa", "ab", "a", ""] {
            let mut c1 = Scanner::new(input);
            let mut c2 = Scanner::new(input);
            assert_eq!(left.apply(&mut c1), right.apply(&mut c2));
            assert_eq!(c1.position(), c2.position());
        }
    }

    #[test]
    fn run_reports_terminal_position() {
        let p = literal("ab").ignore_then(literal("cd"));
        let mut cursor = Scanner::verbose("abce");
        let err = run(&p, &mut cursor).unwrap_err();
        assert_eq!(err.offset, 2);
        assert_eq!(cursor.position(), 2);
    }
}
