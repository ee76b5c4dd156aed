// Copyright 2025 Asim Ihsan
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! # Number Parsing
//!
//! Configurable parsers for numeric literals: integers into any primitive
//! integer type, and floating-point numbers with optional fractional and
//! scientific parts into any float type. Both use builder-style
//! configuration.
//!
//! ## Features
//!
//! * Generic over the output type via `num-traits` bounds
//! * Optional leading `+`, forbidden leading `-`, leading-zero policy
//! * Scientific notation and decimal-comma variants for floats
//! * Checked accumulation: a literal that overflows the target type misses
//!   instead of wrapping
//!
//! ## Examples
//!
//! ```
//! use parslet::prelude::*;
//!
//! let strict = IntParserBuilder::<i32>::new()
//!     .leading_plus(true)
//!     .leading_zero(false)
//!     .build();
//! assert_eq!(parse(&strict, "+123"), Ok(123));
//! assert!(parse(&strict, "0123").is_err());
//!
//! let float = FloatParserBuilder::<f64>::new().build();
//! assert_eq!(parse(&float, "123.456e-7"), Ok(123.456e-7));
//! ```

use core::marker::PhantomData;

use num_traits::{CheckedAdd, CheckedMul, CheckedSub, Float, PrimInt};

use crate::cursor::Cursor;
use crate::input::Input;
use crate::outcome::{Failure, Parsed};
use crate::parser::Parser;

/// Builder for configuring and creating an integer parser.
///
/// By default negative literals are accepted when `T` is signed, a leading
/// `+` is rejected, and leading zeros are accepted.
#[derive(Debug, Clone, Copy)]
pub struct IntParserBuilder<T> {
    allow_negative: bool,
    allow_leading_plus: bool,
    allow_leading_zero: bool,
    _num: PhantomData<fn() -> T>,
}

impl<T> IntParserBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        IntParserBuilder {
            allow_negative: true,
            allow_leading_plus: false,
            allow_leading_zero: true,
            _num: PhantomData,
        }
    }

    /// Configure whether a leading `-` is accepted. Irrelevant for unsigned
    /// `T`, which never accepts one.
    pub fn negative(mut self, allow: bool) -> Self {
        self.allow_negative = allow;
        self
    }

    /// Configure whether a leading `+` is accepted.
    pub fn leading_plus(mut self, allow: bool) -> Self {
        self.allow_leading_plus = allow;
        self
    }

    /// Configure whether `0` may be followed by further digits. When
    /// disallowed, `"0123"` misses while a lone `"0"` still matches.
    pub fn leading_zero(mut self, allow: bool) -> Self {
        self.allow_leading_zero = allow;
        self
    }

    /// Build the configured integer parser.
    pub fn build(self) -> IntParser<T> {
        IntParser {
            allow_negative: self.allow_negative,
            allow_leading_plus: self.allow_leading_plus,
            allow_leading_zero: self.allow_leading_zero,
            _num: PhantomData,
        }
    }
}

impl<T> Default for IntParserBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Integer parser; see [`IntParserBuilder`].
#[derive(Debug, Clone, Copy)]
pub struct IntParser<T> {
    allow_negative: bool,
    allow_leading_plus: bool,
    allow_leading_zero: bool,
    _num: PhantomData<fn() -> T>,
}

/// An integer parser with default settings, shorthand for
/// `IntParserBuilder::<T>::new().build()`.
pub fn integer<T>() -> IntParser<T> {
    IntParserBuilder::new().build()
}

impl<C, T> Parser<C> for IntParser<T>
where
    C: Cursor,
    C::Src: Input<Item = char>,
    T: PrimInt + CheckedAdd + CheckedMul + CheckedSub,
{
    type Output = T;

    fn apply(&self, cursor: &mut C) -> Parsed<T, C::Error> {
        let entry = cursor.position();
        let signed = T::min_value() < T::zero();
        let mut negative = false;
        match cursor.front() {
            Some('+') if self.allow_leading_plus => {
                cursor.bump();
            }
            Some('-') if self.allow_negative && signed => {
                cursor.bump();
                negative = true;
            }
            _ => {}
        }

        let first = match cursor.front() {
            Some(c) if c.is_ascii_digit() => c,
            // An isolated sign is not consumed.
            _ => {
                cursor.set_position(entry);
                return Parsed::Miss(C::Error::unmatched());
            }
        };

        if !self.allow_leading_zero && first == '0' {
            if let Some((_, after_zero)) = cursor.source().next_item(cursor.position()) {
                if let Some((second, _)) = cursor.source().next_item(after_zero) {
                    if second.is_ascii_digit() {
                        cursor.set_position(entry);
                        return Parsed::Miss(C::Error::with_text("leading zero"));
                    }
                }
            }
        }

        let ten = match T::from(10u8) {
            Some(ten) => ten,
            None => {
                cursor.set_position(entry);
                return Parsed::Miss(C::Error::with_text("integer out of range"));
            }
        };
        let mut acc = T::zero();
        while let Some(c) = cursor.front() {
            if !c.is_ascii_digit() {
                break;
            }
            cursor.bump();
            // Negative values accumulate on the negative side so T::MIN
            // round-trips.
            let step = T::from(c as u8 - b'0').and_then(|digit| {
                let scaled = acc.checked_mul(&ten)?;
                if negative {
                    scaled.checked_sub(&digit)
                } else {
                    scaled.checked_add(&digit)
                }
            });
            match step {
                Some(next) => acc = next,
                None => {
                    cursor.set_position(entry);
                    return Parsed::Miss(C::Error::with_text("integer out of range"));
                }
            }
        }
        Parsed::Match(acc)
    }
}

/// Builder for configuring and creating a floating-point parser.
///
/// By default negative literals and scientific notation are accepted, a
/// leading `+` is rejected, and the decimal separator is `.`.
#[derive(Debug, Clone, Copy)]
pub struct FloatParserBuilder<T> {
    allow_negative: bool,
    allow_leading_plus: bool,
    allow_scientific: bool,
    decimal_comma: bool,
    _num: PhantomData<fn() -> T>,
}

impl<T> FloatParserBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        FloatParserBuilder {
            allow_negative: true,
            allow_leading_plus: false,
            allow_scientific: true,
            decimal_comma: false,
            _num: PhantomData,
        }
    }

    /// Configure whether a leading `-` is accepted.
    pub fn negative(mut self, allow: bool) -> Self {
        self.allow_negative = allow;
        self
    }

    /// Configure whether a leading `+` is accepted (the exponent sign is
    /// always free to be `+` or `-`).
    pub fn leading_plus(mut self, allow: bool) -> Self {
        self.allow_leading_plus = allow;
        self
    }

    /// Configure whether an `e`/`E` exponent is accepted.
    pub fn scientific(mut self, allow: bool) -> Self {
        self.allow_scientific = allow;
        self
    }

    /// Use `,` instead of `.` as the decimal separator.
    pub fn decimal_comma(mut self, comma: bool) -> Self {
        self.decimal_comma = comma;
        self
    }

    /// Build the configured float parser.
    pub fn build(self) -> FloatParser<T> {
        FloatParser {
            allow_negative: self.allow_negative,
            allow_leading_plus: self.allow_leading_plus,
            allow_scientific: self.allow_scientific,
            decimal_comma: self.decimal_comma,
            _num: PhantomData,
        }
    }
}

impl<T> Default for FloatParserBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Floating-point parser; see [`FloatParserBuilder`].
#[derive(Debug, Clone, Copy)]
pub struct FloatParser<T> {
    allow_negative: bool,
    allow_leading_plus: bool,
    allow_scientific: bool,
    decimal_comma: bool,
    _num: PhantomData<fn() -> T>,
}

/// A float parser with default settings, shorthand for
/// `FloatParserBuilder::<T>::new().build()`.
pub fn float<T>() -> FloatParser<T> {
    FloatParserBuilder::new().build()
}

// `T::from` would be ambiguous between `From<u8>` and the `NumCast`
// supertrait of `Float`; this pins the former.
fn byte_to_float<T: From<u8>>(byte: u8) -> T {
    T::from(byte)
}

impl<C, T> Parser<C> for FloatParser<T>
where
    C: Cursor,
    C::Src: Input<Item = char>,
    T: Float + From<u8>,
{
    type Output = T;

    fn apply(&self, cursor: &mut C) -> Parsed<T, C::Error> {
        let entry = cursor.position();
        let ten: T = byte_to_float(10);
        let mut negative = false;
        match cursor.front() {
            Some('+') if self.allow_leading_plus => {
                cursor.bump();
            }
            Some('-') if self.allow_negative => {
                cursor.bump();
                negative = true;
            }
            _ => {}
        }

        match cursor.front() {
            Some(c) if c.is_ascii_digit() => {}
            _ => {
                cursor.set_position(entry);
                return Parsed::Miss(C::Error::unmatched());
            }
        }

        let mut magnitude = T::zero();
        while let Some(c) = cursor.front() {
            if !c.is_ascii_digit() {
                break;
            }
            cursor.bump();
            magnitude = magnitude * ten + byte_to_float(c as u8 - b'0');
        }

        let separator = if self.decimal_comma { ',' } else { '.' };
        if cursor.front() == Some(separator) {
            cursor.bump();
            // Digits after the separator are optional: "42." parses as 42.
            let mut fraction = T::zero();
            let mut divisor = T::one();
            while let Some(c) = cursor.front() {
                if !c.is_ascii_digit() {
                    break;
                }
                cursor.bump();
                fraction = fraction * ten + byte_to_float(c as u8 - b'0');
                divisor = divisor * ten;
            }
            magnitude = magnitude + fraction / divisor;
        }

        let mut exponent = 0i32;
        if self.allow_scientific && matches!(cursor.front(), Some('e') | Some('E')) {
            let marker = cursor.position();
            cursor.bump();
            let exp_negative = match cursor.front() {
                Some('+') => {
                    cursor.bump();
                    false
                }
                Some('-') => {
                    cursor.bump();
                    true
                }
                _ => false,
            };
            match cursor.front() {
                Some(c) if c.is_ascii_digit() => {
                    let mut digits = 0i32;
                    while let Some(c) = cursor.front() {
                        if !c.is_ascii_digit() {
                            break;
                        }
                        cursor.bump();
                        digits = digits.saturating_mul(10).saturating_add((c as u8 - b'0') as i32);
                    }
                    exponent = if exp_negative { -digits } else { digits };
                }
                // A dangling marker belongs to whatever follows the number.
                _ => cursor.set_position(marker),
            }
        }

        let mut value = magnitude;
        if negative {
            value = -value;
        }
        if exponent != 0 {
            value = value * ten.powi(exponent);
        }
        Parsed::Match(value)
    }
}
