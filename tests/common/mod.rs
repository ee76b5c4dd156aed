use parslet::cursor::{Cursor, Scanner, VerboseStrCursor};
use parslet::parser::Parser;

/// Run `parser` from the start of `input` and report the cursor's terminal
/// position alongside the outcome, for tests that pin down rewind points.
#[allow(dead_code)]
pub fn stopped_at<'a, P>(parser: &P, input: &'a str) -> (Result<P::Output, parslet::ParseError>, usize)
where
    P: Parser<VerboseStrCursor<'a>>,
{
    let mut cursor = Scanner::verbose(input);
    let outcome = parslet::run(parser, &mut cursor);
    (outcome, cursor.position())
}

// -------------------------------------------------------------------------------------------------
// Macro helpers used by many test modules so we keep them in a common place.
// -------------------------------------------------------------------------------------------------

/// Assert that a parser matches `src` and yields `want`.
///
/// Example:
/// ```
/// assert_parses_to!(integer::<i64>(), "42", 42);
/// ```
#[macro_export]
macro_rules! assert_parses_to {
    ($parser:expr, $src:expr, $want:expr $(,)?) => {{
        let got = parslet::parse(&$parser, $src).expect("parse error");
        assert_eq!(got, $want, "on input {:?}", $src);
    }};
}

/// Assert that parsing `src` misses.
#[macro_export]
macro_rules! assert_fails {
    ($parser:expr, $src:expr $(,)?) => {{
        assert!(
            parslet::parse(&$parser, $src).is_err(),
            "expected a miss on input {:?}",
            $src
        );
    }};
}
