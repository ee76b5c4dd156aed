use parslet::prelude::*;
use rstest::rstest;
mod common;
use common::stopped_at;

#[rstest]
#[case("0", 0)]
#[case("42", 42)]
#[case("-5", -5)]
#[case("-0", 0)]
#[case("9223372036854775807", i64::MAX)]
#[case("-9223372036854775808", i64::MIN)]
fn parses_integers(#[case] input: &str, #[case] expected: i64) {
    assert_parses_to!(integer::<i64>(), input, expected);
}

#[rstest]
#[case("+1", 1)]
#[case("+123", 123)]
#[case("-7", -7)]
fn leading_plus_option(#[case] input: &str, #[case] expected: i64) {
    let parser = IntParserBuilder::<i64>::new().leading_plus(true).build();
    assert_parses_to!(parser, input, expected);
}

#[test]
fn plus_is_rejected_by_default() {
    assert_fails!(integer::<i64>(), "+1");
}

#[test]
fn strict_options_reject_padded_zeroes_and_rewind() {
    // no_leading_zero + leading_plus on "+00123": the whole literal is
    // rejected and nothing is consumed.
    let parser = IntParserBuilder::<i32>::new()
        .leading_plus(true)
        .leading_zero(false)
        .build();
    let (outcome, position) = stopped_at(&parser, "+00123");
    assert!(outcome.is_err());
    assert_eq!(position, 0);
}

#[test]
fn stops_before_trailing_text() {
    let parser = IntParserBuilder::<i32>::new()
        .leading_plus(true)
        .leading_zero(false)
        .build();
    let (outcome, position) = stopped_at(&parser, "+123rest");
    assert_eq!(outcome.unwrap(), 123);
    assert_eq!(position, 4);
}

#[rstest]
#[case::bare_minus("-")]
#[case::bare_plus("+")]
#[case::minus_then_letter("-x")]
#[case::empty("")]
#[case::letter("x")]
fn non_numbers_consume_nothing(#[case] input: &str) {
    let parser = IntParserBuilder::<i64>::new().leading_plus(true).build();
    let (outcome, position) = stopped_at(&parser, input);
    assert!(outcome.is_err());
    assert_eq!(position, 0);
}

#[rstest]
#[case::i8_overflow("128")]
#[case::i8_underflow("-129")]
fn out_of_range_literals_miss(#[case] input: &str) {
    assert_fails!(integer::<i8>(), input);
}

#[test]
fn unsigned_parsers_reject_signs() {
    assert_fails!(integer::<u64>(), "-1");
    assert_parses_to!(integer::<u64>(), "18446744073709551615", u64::MAX);
}

#[test]
fn integers_compose_with_the_algebra() {
    // A dotted quad, using the same integer parser four times.
    let octet = integer::<u8>();
    let quad = group((
        octet.then_ignore(item('.')),
        octet.then_ignore(item('.')),
        octet.then_ignore(item('.')),
        octet,
    ));
    assert_parses_to!(quad, "192.168.0.1", (192, 168, 0, 1));
    assert_fails!(quad, "192.168.0.256");
}
