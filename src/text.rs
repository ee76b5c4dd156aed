// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Whitespace
//!
//! Whitespace runs over char inputs, and the [`Parser::padded`] wrapper
//! that trims around an inner parser.

use crate::cursor::Cursor;
use crate::input::Input;
use crate::outcome::Parsed;
use crate::parser::Parser;
use crate::primitive::{items_while, items_while_not, ItemsWhile, ItemsWhileNot};

/// The whitespace classification used throughout: space, tab, newline,
/// carriage return, form feed, and vertical tab.
pub fn is_whitespace_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C' | '\x0B')
}

fn whitespace_pred(c: &char) -> bool {
    is_whitespace_char(*c)
}

/// A possibly-empty run of whitespace.
pub fn whitespace() -> ItemsWhile<fn(&char) -> bool> {
    items_while(whitespace_pred as fn(&char) -> bool)
}

/// A non-empty run of anything but whitespace.
pub fn non_whitespace() -> ItemsWhileNot<fn(&char) -> bool> {
    items_while_not(whitespace_pred as fn(&char) -> bool).at_least_one(true)
}

/// See [`Parser::padded`].
#[derive(Debug, Clone, Copy)]
pub struct Padded<P> {
    pub(crate) parser: P,
}

impl<C, P> Parser<C> for Padded<P>
where
    C: Cursor,
    C::Src: Input<Item = char>,
    P: Parser<C>,
{
    type Output = P::Output;

    fn apply(&self, cursor: &mut C) -> Parsed<P::Output, C::Error> {
        let entry = cursor.position();
        skip_whitespace(cursor);
        match self.parser.apply(cursor) {
            Parsed::Match(value) => {
                skip_whitespace(cursor);
                Parsed::Match(value)
            }
            Parsed::Miss(err) => {
                cursor.set_position(entry);
                Parsed::Miss(err)
            }
        }
    }
}

fn skip_whitespace<C>(cursor: &mut C)
where
    C: Cursor,
    C::Src: Input<Item = char>,
{
    while let Some(c) = cursor.front() {
        if !is_whitespace_char(c) {
            break;
        }
        cursor.bump();
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn whitespace_matches_all_six_classes() {
        assert_eq!(parse(&whitespace(), " \t\n\r\x0C\x0Bx"), Ok(" \t\n\r\x0C\x0B"));
        assert_eq!(parse(&whitespace(), "x"), Ok(""));
    }

    #[test]
    fn non_whitespace_requires_progress() {
        assert_eq!(parse(&non_whitespace(), "word rest"), Ok("word"));
        assert!(parse(&non_whitespace(), " ").is_err());
    }

    #[test]
    fn padded_trims_both_sides() {
        let p = item('=').padded();
        let mut cursor = Scanner::new("  =  x");
        assert_eq!(p.apply(&mut cursor), Parsed::Match('='));
        assert_eq!(cursor.remainder(), "x");
    }

    #[test]
    fn padded_restores_entry_on_miss() {
        let p = item('=').padded();
        let mut cursor = Scanner::new("  x");
        assert!(p.apply(&mut cursor).is_miss());
        assert_eq!(cursor.position(), 0);
    }
}
