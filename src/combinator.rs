// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Combinators
//!
//! The parser structs produced by the methods on [`Parser`], plus the free
//! combinators that don't read naturally as methods: [`until`], [`chain`],
//! and the user-state family ([`with_state`], [`update_state`],
//! [`to_state`]).
//!
//! Each struct here wraps one or more parsers by value and implements
//! [`Parser`] itself, so combination is ordinary struct construction and
//! carries no allocation.

use core::ops::Range;

use crate::cursor::{Cursor, Scanner, SliceOf};
use crate::input::Input;
use crate::outcome::{Failure, Parsed};
use crate::parser::{Group, Parser};

/// See [`Parser::map`].
#[derive(Debug, Clone, Copy)]
pub struct Map<P, F> {
    pub(crate) parser: P,
    pub(crate) f: F,
}

impl<C, P, U, F> Parser<C> for Map<P, F>
where
    C: Cursor,
    P: Parser<C>,
    F: Fn(P::Output) -> U,
{
    type Output = U;

    fn apply(&self, cursor: &mut C) -> Parsed<U, C::Error> {
        self.parser.apply(cursor).map_match(&self.f)
    }
}

/// See [`Parser::to`].
#[derive(Debug, Clone, Copy)]
pub struct To<P, U> {
    pub(crate) parser: P,
    pub(crate) value: U,
}

impl<C, P, U> Parser<C> for To<P, U>
where
    C: Cursor,
    P: Parser<C>,
    U: Clone,
{
    type Output = U;

    fn apply(&self, cursor: &mut C) -> Parsed<U, C::Error> {
        self.parser.apply(cursor).map_match(|_| self.value.clone())
    }
}

/// See [`Parser::ignored`].
#[derive(Debug, Clone, Copy)]
pub struct Ignored<P> {
    pub(crate) parser: P,
}

impl<C, P> Parser<C> for Ignored<P>
where
    C: Cursor,
    P: Parser<C>,
{
    type Output = ();

    fn apply(&self, cursor: &mut C) -> Parsed<(), C::Error> {
        self.parser.apply(cursor).map_match(|_| ())
    }
}

/// See [`Parser::bind`].
#[derive(Debug, Clone, Copy)]
pub struct Bind<P, F> {
    pub(crate) parser: P,
    pub(crate) build: F,
}

impl<C, P, Q, F> Parser<C> for Bind<P, F>
where
    C: Cursor,
    P: Parser<C>,
    Q: Parser<C>,
    F: Fn(P::Output) -> Q,
{
    type Output = Q::Output;

    fn apply(&self, cursor: &mut C) -> Parsed<Q::Output, C::Error> {
        match self.parser.apply(cursor) {
            Parsed::Match(value) => (self.build)(value).apply(cursor),
            Parsed::Miss(err) => Parsed::Miss(err),
        }
    }
}

/// See [`Parser::ignore_then`].
#[derive(Debug, Clone, Copy)]
pub struct IgnoreThen<P, Q> {
    pub(crate) first: P,
    pub(crate) second: Q,
}

impl<C, P, Q> Parser<C> for IgnoreThen<P, Q>
where
    C: Cursor,
    P: Parser<C>,
    Q: Parser<C>,
{
    type Output = Q::Output;

    fn apply(&self, cursor: &mut C) -> Parsed<Q::Output, C::Error> {
        match self.first.apply(cursor) {
            Parsed::Match(_) => self.second.apply(cursor),
            Parsed::Miss(err) => Parsed::Miss(err),
        }
    }
}

/// See [`Parser::then_ignore`].
#[derive(Debug, Clone, Copy)]
pub struct ThenIgnore<P, Q> {
    pub(crate) first: P,
    pub(crate) second: Q,
}

impl<C, P, Q> Parser<C> for ThenIgnore<P, Q>
where
    C: Cursor,
    P: Parser<C>,
    Q: Parser<C>,
{
    type Output = P::Output;

    fn apply(&self, cursor: &mut C) -> Parsed<P::Output, C::Error> {
        let value = match self.first.apply(cursor) {
            Parsed::Match(value) => value,
            Parsed::Miss(err) => return Parsed::Miss(err),
        };
        match self.second.apply(cursor) {
            Parsed::Match(_) => Parsed::Match(value),
            Parsed::Miss(err) => Parsed::Miss(err),
        }
    }
}

/// See [`Parser::or`].
#[derive(Debug, Clone, Copy)]
pub struct Or<P, Q> {
    pub(crate) first: P,
    pub(crate) second: Q,
}

impl<C, P, Q> Parser<C> for Or<P, Q>
where
    C: Cursor,
    P: Parser<C>,
    Q: Parser<C, Output = P::Output>,
{
    type Output = P::Output;

    fn apply(&self, cursor: &mut C) -> Parsed<P::Output, C::Error> {
        let entry = cursor.position();
        if let Parsed::Match(value) = self.first.apply(cursor) {
            return Parsed::Match(value);
        }
        cursor.set_position(entry);
        match self.second.apply(cursor) {
            Parsed::Match(value) => Parsed::Match(value),
            Parsed::Miss(err) => {
                cursor.set_position(entry);
                Parsed::Miss(err)
            }
        }
    }
}

/// See [`Parser::or_not`].
#[derive(Debug, Clone, Copy)]
pub struct OrNot<P> {
    pub(crate) parser: P,
}

impl<C, P> Parser<C> for OrNot<P>
where
    C: Cursor,
    P: Parser<C>,
{
    type Output = Option<P::Output>;

    fn apply(&self, cursor: &mut C) -> Parsed<Option<P::Output>, C::Error> {
        let entry = cursor.position();
        match self.parser.apply(cursor) {
            Parsed::Match(value) => Parsed::Match(Some(value)),
            Parsed::Miss(_) => {
                cursor.set_position(entry);
                Parsed::Match(None)
            }
        }
    }
}

/// See [`Parser::succeeds`].
#[derive(Debug, Clone, Copy)]
pub struct Succeeds<P> {
    pub(crate) parser: P,
}

impl<C, P> Parser<C> for Succeeds<P>
where
    C: Cursor,
    P: Parser<C>,
{
    type Output = bool;

    fn apply(&self, cursor: &mut C) -> Parsed<bool, C::Error> {
        let entry = cursor.position();
        match self.parser.apply(cursor) {
            Parsed::Match(_) => Parsed::Match(true),
            Parsed::Miss(_) => {
                cursor.set_position(entry);
                Parsed::Match(false)
            }
        }
    }
}

/// See [`Parser::or_fail`].
#[derive(Debug, Clone, Copy)]
pub struct OrFail<P> {
    pub(crate) parser: P,
    pub(crate) text: &'static str,
}

impl<C, P> Parser<C> for OrFail<P>
where
    C: Cursor,
    P: Parser<C>,
{
    type Output = P::Output;

    fn apply(&self, cursor: &mut C) -> Parsed<P::Output, C::Error> {
        self.parser
            .apply(cursor)
            .map_miss(|_| C::Error::with_text(self.text))
    }
}

/// See [`Parser::rewind`].
#[derive(Debug, Clone, Copy)]
pub struct Rewind<P> {
    pub(crate) parser: P,
}

impl<C, P> Parser<C> for Rewind<P>
where
    C: Cursor,
    P: Parser<C>,
{
    type Output = P::Output;

    fn apply(&self, cursor: &mut C) -> Parsed<P::Output, C::Error> {
        let entry = cursor.position();
        let outcome = self.parser.apply(cursor);
        cursor.set_position(entry);
        outcome
    }
}

/// See [`Parser::attempt`].
#[derive(Debug, Clone, Copy)]
pub struct Attempt<P> {
    pub(crate) parser: P,
}

impl<C, P> Parser<C> for Attempt<P>
where
    C: Cursor,
    P: Parser<C>,
{
    type Output = P::Output;

    fn apply(&self, cursor: &mut C) -> Parsed<P::Output, C::Error> {
        let entry = cursor.position();
        let outcome = self.parser.apply(cursor);
        if outcome.is_miss() {
            cursor.set_position(entry);
        }
        outcome
    }
}

/// See [`Parser::filter`].
#[derive(Debug, Clone, Copy)]
pub struct Filter<P, F> {
    pub(crate) parser: P,
    pub(crate) predicate: F,
}

impl<C, P, F> Parser<C> for Filter<P, F>
where
    C: Cursor,
    P: Parser<C>,
    F: Fn(&P::Output) -> bool,
{
    type Output = P::Output;

    fn apply(&self, cursor: &mut C) -> Parsed<P::Output, C::Error> {
        match self.parser.apply(cursor) {
            Parsed::Match(value) if (self.predicate)(&value) => Parsed::Match(value),
            Parsed::Match(_) => Parsed::Miss(C::Error::with_text("constraint not satisfied")),
            Parsed::Miss(err) => Parsed::Miss(err),
        }
    }
}

/// A value that can be judged empty: zero for integers, zero length for
/// containers and spans. Used by [`Parser::non_empty`].
pub trait Emptiness {
    /// Whether the value counts as empty.
    fn is_empty_value(&self) -> bool;
}

macro_rules! impl_emptiness_for_int {
    ($($ty:ty),+) => {
        $(
            impl Emptiness for $ty {
                fn is_empty_value(&self) -> bool {
                    *self == 0
                }
            }
        )+
    };
}

impl_emptiness_for_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Emptiness for &str {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for &[T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for Range<usize> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

/// See [`Parser::non_empty`].
#[derive(Debug, Clone, Copy)]
pub struct NonEmpty<P> {
    pub(crate) parser: P,
}

impl<C, P> Parser<C> for NonEmpty<P>
where
    C: Cursor,
    P: Parser<C>,
    P::Output: Emptiness,
{
    type Output = P::Output;

    fn apply(&self, cursor: &mut C) -> Parsed<P::Output, C::Error> {
        match self.parser.apply(cursor) {
            Parsed::Match(value) if value.is_empty_value() => {
                Parsed::Miss(C::Error::with_text("empty result"))
            }
            outcome => outcome,
        }
    }
}

/// See [`Parser::to_slice`].
#[derive(Debug, Clone, Copy)]
pub struct ToSlice<P> {
    pub(crate) parser: P,
}

impl<C, P> Parser<C> for ToSlice<P>
where
    C: Cursor,
    P: Parser<C>,
{
    type Output = SliceOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<SliceOf<C>, C::Error> {
        let entry = cursor.position();
        match self.parser.apply(cursor) {
            Parsed::Match(_) => Parsed::Match(cursor.convert(entry, cursor.position())),
            Parsed::Miss(err) => {
                cursor.set_position(entry);
                Parsed::Miss(err)
            }
        }
    }
}

/// See [`Parser::spanned`].
#[derive(Debug, Clone, Copy)]
pub struct WithSpan<P> {
    pub(crate) parser: P,
}

impl<C, P> Parser<C> for WithSpan<P>
where
    C: Cursor,
    P: Parser<C>,
{
    type Output = (P::Output, Range<usize>);

    fn apply(&self, cursor: &mut C) -> Parsed<Self::Output, C::Error> {
        let entry = cursor.position();
        self.parser
            .apply(cursor)
            .map_match(|value| (value, entry..cursor.position()))
    }
}

/// See [`Parser::reparse`].
#[derive(Debug, Clone, Copy)]
pub struct Reparse<P, Q> {
    pub(crate) outer: P,
    pub(crate) inner: Q,
}

impl<C, P, Q> Parser<C> for Reparse<P, Q>
where
    C: Cursor,
    P: Parser<C>,
    P::Output: Input,
    Q: Parser<Scanner<P::Output, (), C::Error>>,
{
    type Output = Q::Output;

    fn apply(&self, cursor: &mut C) -> Parsed<Q::Output, C::Error> {
        match self.outer.apply(cursor) {
            Parsed::Match(span) => {
                let mut nested = Scanner::nested(span);
                self.inner.apply(&mut nested)
            }
            Parsed::Miss(err) => Parsed::Miss(err),
        }
    }
}

/// Scan item by item, applying a parser at each position; see [`until`].
#[derive(Debug, Clone, Copy)]
pub struct Until<P> {
    parser: P,
    include: bool,
    eat: bool,
}

/// Consume up to the position where `parser` first matches, returning the
/// span before it. By default the match itself is neither consumed nor
/// included; see [`Until::consume_match`] and [`Until::include_match`].
/// Misses (restoring the cursor) when `parser` never matches before the end.
pub fn until<P>(parser: P) -> Until<P> {
    Until { parser, include: false, eat: false }
}

impl<P> Until<P> {
    /// Include the matched span in the returned span.
    pub fn include_match(mut self, include: bool) -> Self {
        self.include = include;
        self
    }

    /// Consume the matched span.
    pub fn consume_match(mut self, consume: bool) -> Self {
        self.eat = consume;
        self
    }
}

impl<C, P> Parser<C> for Until<P>
where
    C: Cursor,
    P: Parser<C>,
{
    type Output = SliceOf<C>;

    fn apply(&self, cursor: &mut C) -> Parsed<SliceOf<C>, C::Error> {
        let entry = cursor.position();
        let mut probe = entry;
        loop {
            cursor.set_position(probe);
            if self.parser.apply(cursor).is_match() {
                let match_end = cursor.position();
                let value_end = if self.include { match_end } else { probe };
                cursor.set_position(if self.eat { match_end } else { probe });
                return Parsed::Match(cursor.convert(entry, value_end));
            }
            cursor.set_position(probe);
            match cursor.source().next_item(probe) {
                Some((_, next)) => probe = next,
                None => {
                    cursor.set_position(entry);
                    return Parsed::Miss(C::Error::with_text("target not found"));
                }
            }
        }
    }
}

/// Left-associative infix chaining; see [`chain`].
#[derive(Debug, Clone, Copy)]
pub struct Chain<P, Op> {
    operand: P,
    operator: Op,
}

/// Parse `operand (operator operand)*`, folding left-associatively: the
/// operator parser yields the binary function applied to the accumulator
/// and the next operand. Requires at least one operand; stops (restoring
/// the last operator's consumption) at the first miss of the operator or
/// of the operand after it.
///
/// ```
/// use parslet::prelude::*;
///
/// let number = IntParserBuilder::<i64>::new().build();
/// let sub = chain(number, item('-').to(|a: i64, b: i64| a - b));
/// assert_eq!(parse(&sub, "10-3-2"), Ok(5));
/// ```
pub fn chain<P, Op>(operand: P, operator: Op) -> Chain<P, Op> {
    Chain { operand, operator }
}

impl<C, P, Op> Parser<C> for Chain<P, Op>
where
    C: Cursor,
    P: Parser<C>,
    Op: Parser<C>,
    Op::Output: Fn(P::Output, P::Output) -> P::Output,
{
    type Output = P::Output;

    fn apply(&self, cursor: &mut C) -> Parsed<P::Output, C::Error> {
        let mut acc = match self.operand.apply(cursor) {
            Parsed::Match(value) => value,
            Parsed::Miss(err) => return Parsed::Miss(err),
        };
        loop {
            let mark = cursor.position();
            let combine = match self.operator.apply(cursor) {
                Parsed::Match(f) => f,
                Parsed::Miss(_) => {
                    cursor.set_position(mark);
                    break;
                }
            };
            match self.operand.apply(cursor) {
                Parsed::Match(rhs) => acc = combine(acc, rhs),
                Parsed::Miss(_) => {
                    cursor.set_position(mark);
                    break;
                }
            }
        }
        Parsed::Match(acc)
    }
}

/// Parser built from the user state at application time; see [`with_state`].
#[derive(Debug, Clone, Copy)]
pub struct WithState<F> {
    build: F,
}

/// Build a parser dynamically from the user state each time it is applied.
pub fn with_state<F>(build: F) -> WithState<F> {
    WithState { build }
}

impl<C, P, F> Parser<C> for WithState<F>
where
    C: Cursor,
    P: Parser<C>,
    F: Fn(&C::State) -> P,
{
    type Output = P::Output;

    fn apply(&self, cursor: &mut C) -> Parsed<P::Output, C::Error> {
        let parser = (self.build)(cursor.state());
        parser.apply(cursor)
    }
}

/// State mutation as a parser; see [`update_state`].
#[derive(Debug, Clone, Copy)]
pub struct UpdateState<F> {
    f: F,
}

/// Apply `f` to the user state, yielding its return value. Never misses,
/// never consumes.
pub fn update_state<F>(f: F) -> UpdateState<F> {
    UpdateState { f }
}

impl<C, R, F> Parser<C> for UpdateState<F>
where
    C: Cursor,
    F: Fn(&mut C::State) -> R,
{
    type Output = R;

    fn apply(&self, cursor: &mut C) -> Parsed<R, C::Error> {
        Parsed::Match((self.f)(cursor.state()))
    }
}

/// Sequenced parsers folded into the user state; see [`to_state`].
#[derive(Debug, Clone, Copy)]
pub struct ToState<F, T> {
    f: F,
    parsers: Group<T>,
}

/// Run a tuple of parsers in order, then apply `f` to the user state and
/// the tuple of results, yielding `f`'s return value.
pub fn to_state<F, T>(f: F, parsers: T) -> ToState<F, T> {
    ToState { f, parsers: Group(parsers) }
}

impl<C, F, T, R> Parser<C> for ToState<F, T>
where
    C: Cursor,
    Group<T>: Parser<C>,
    F: Fn(&mut C::State, <Group<T> as Parser<C>>::Output) -> R,
{
    type Output = R;

    fn apply(&self, cursor: &mut C) -> Parsed<R, C::Error> {
        match self.parsers.apply(cursor) {
            Parsed::Match(values) => Parsed::Match((self.f)(cursor.state(), values)),
            Parsed::Miss(err) => Parsed::Miss(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn then_ignore_keeps_left_value() {
        let p = item('a').then_ignore(item(';'));
        assert_eq!(parse(&p, "a;"), Ok('a'));
        // The right side's miss propagates without rewinding past `a`.
        let err = parse(&p, "a!").unwrap_err();
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn ignore_then_keeps_right_value() {
        let p = item('#').ignore_then(items_while(char::is_ascii_alphanumeric));
        assert_eq!(parse(&p, "#tag"), Ok("tag"));
    }

    #[test]
    fn or_not_and_succeeds_never_miss() {
        let sign = one_of("+-").or_not();
        assert_eq!(parse(&sign, "-x"), Ok(Some('-')));
        assert_eq!(parse(&sign, "x"), Ok(None));

        let saw = literal("v=").succeeds();
        assert_eq!(parse(&saw, "v=1"), Ok(true));
        let mut cursor = Scanner::new("w=1");
        assert_eq!(literal("v=").succeeds().apply(&mut cursor), Parsed::Match(false));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn or_fail_replaces_the_text() {
        let p = item('{').or_fail("expected an opening brace");
        let err = parse(&p, "x").unwrap_err();
        assert_eq!(err.message, "expected an opening brace");
    }

    #[test]
    fn rewind_never_commits() {
        let peek = literal("ab").rewind();
        let mut cursor = Scanner::new("abc");
        assert_eq!(peek.apply(&mut cursor), Parsed::Match("ab"));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn attempt_restores_only_on_miss() {
        let p = item('a').ignore_then(item('b')).attempt();
        let mut cursor = Scanner::new("ax");
        assert!(p.apply(&mut cursor).is_miss());
        assert_eq!(cursor.position(), 0);

        let mut cursor = Scanner::new("ab");
        assert!(p.apply(&mut cursor).is_match());
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn filter_rejects_without_rewinding() {
        let small = IntParserBuilder::<u32>::new().build().filter(|n| *n < 100);
        assert_eq!(parse(&small, "42"), Ok(42));
        let err = parse(&small, "420").unwrap_err();
        assert_eq!(err.message, "constraint not satisfied");
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn non_empty_rejects_zero_and_empty() {
        let digits = items_while(char::is_ascii_digit).non_empty();
        assert_eq!(parse(&digits, "12x"), Ok("12"));
        assert!(parse(&digits, "x").is_err());

        let zero = IntParserBuilder::<u64>::new().build().non_empty();
        assert!(parse(&zero, "0").is_err());
        assert_eq!(parse(&zero, "7"), Ok(7));
    }

    #[test]
    fn to_slice_spans_entry_to_final() {
        let p = group((items_while(char::is_ascii_alphabetic), item(':'), rest())).to_slice();
        assert_eq!(parse(&p, "key:value"), Ok("key:value"));

        let mut cursor = Scanner::new("key value");
        let failing = group((items_while(char::is_ascii_alphabetic), item(':'))).to_slice();
        assert!(failing.apply(&mut cursor).is_miss());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn spanned_reports_offsets() {
        let word = items_while(char::is_ascii_alphabetic).at_least_one(true);
        let p = whitespace().ignore_then(word.spanned());
        assert_eq!(parse(&p, "  abc"), Ok(("abc", 2..5)));
    }

    #[test]
    fn reparse_runs_on_an_independent_cursor() {
        let header = until_item('\n');
        let fields = chain(
            IntParserBuilder::<i64>::new().build(),
            item(',').to(|a: i64, b: i64| a + b),
        );
        let p = header.reparse(fields);
        let mut cursor = Scanner::verbose("1,2,3\nrest");
        assert_eq!(p.apply(&mut cursor), Parsed::Match(6));
        // Outer cursor sits after the header; the nested one is discarded.
        assert_eq!(cursor.remainder(), "rest");
    }

    #[test]
    fn until_leaves_match_by_default() {
        let p = until(literal("-->"));
        let mut cursor = Scanner::new("note-->tail");
        assert_eq!(p.apply(&mut cursor), Parsed::Match("note"));
        assert_eq!(cursor.remainder(), "-->tail");
    }

    #[test]
    fn until_consume_and_include() {
        let p = until(literal("-->")).consume_match(true).include_match(true);
        let mut cursor = Scanner::new("note-->tail");
        assert_eq!(p.apply(&mut cursor), Parsed::Match("note-->"));
        assert_eq!(cursor.remainder(), "tail");
    }

    #[test]
    fn until_restores_when_parser_never_matches() {
        let p = until(literal("-->"));
        let mut cursor = Scanner::new("no terminator");
        assert!(p.apply(&mut cursor).is_miss());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn chain_folds_left() {
        let number = IntParserBuilder::<i64>::new().build();
        let sub = chain(number, item('-').to(|a: i64, b: i64| a - b));
        // (10 - 3) - 2, not 10 - (3 - 2).
        assert_eq!(parse(&sub, "10-3-2"), Ok(5));
        assert_eq!(parse(&sub, "7"), Ok(7));
        assert!(parse(&sub, "x").is_err());
    }

    #[test]
    fn chain_rewinds_a_dangling_operator() {
        let number = IntParserBuilder::<i64>::new().build();
        let sub = chain(number, item('-').to(|a: i64, b: i64| a - b));
        let mut cursor = Scanner::new("4-");
        assert_eq!(sub.apply(&mut cursor), Parsed::Match(4));
        assert_eq!(cursor.remainder(), "-");
    }

    #[test]
    fn state_combinators_thread_the_state() {
        // Count words while collecting nothing else.
        let word = items_while(char::is_ascii_alphabetic).at_least_one(true);
        let counted = to_state(
            |count: &mut usize, (_word,): (&str,)| {
                *count += 1;
            },
            (word,),
        );
        let line = counted.then_ignore(whitespace()).repeated().at_least_one(true);

        let mut count = 0usize;
        parse_with_state(&line, "one two three", &mut count).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn with_state_picks_the_parser_dynamically() {
        // The state carries the expected delimiter.
        let delimited = with_state(|delim: &char| item(*delim)).ignore_then(rest());
        let mut delim = ';';
        assert_eq!(parse_with_state(&delimited, ";tail", &mut delim), Ok("tail"));
        let mut delim = ':';
        assert!(parse_with_state(&delimited, ";tail", &mut delim).is_err());
    }

    #[test]
    fn update_state_never_consumes() {
        let p = update_state(|n: &mut u32| {
            *n += 1;
            *n
        });
        let mut n = 41;
        assert_eq!(parse_with_state(&p, "anything", &mut n), Ok(42));
        assert_eq!(n, 42);
    }
}
