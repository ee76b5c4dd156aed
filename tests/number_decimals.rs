use parslet::prelude::*;
use rstest::rstest;
mod common;
use common::stopped_at;

#[rstest]
#[case("42.0", 42.0)]
#[case("42.", 42.0)]
#[case("0.5", 0.5)]
#[case("-0.5", -0.5)]
#[case("123.456", 123.456)]
#[case("3", 3.0)]
fn parses_decimals(#[case] input: &str, #[case] expected: f64) {
    assert_parses_to!(float::<f64>(), input, expected);
}

#[test]
fn integer_part_is_mandatory() {
    assert_fails!(float::<f64>(), ".5");
    assert_fails!(float::<f64>(), "-.5");
}

#[test]
fn negative_option_gates_the_sign() {
    let unsigned = FloatParserBuilder::<f64>::new().negative(false).build();
    assert_fails!(unsigned, "-1.5");
    assert_parses_to!(unsigned, "1.5", 1.5);
}

#[test]
fn leading_plus_option() {
    let parser = FloatParserBuilder::<f64>::new().leading_plus(true).build();
    assert_parses_to!(parser, "+1.5", 1.5);
    assert_fails!(float::<f64>(), "+1.5");
}

#[rstest]
#[case("3,14", 3.14)]
#[case("-2,5", -2.5)]
#[case("7", 7.0)]
fn decimal_comma_variant(#[case] input: &str, #[case] expected: f64) {
    let parser = FloatParserBuilder::<f64>::new().decimal_comma(true).build();
    assert_parses_to!(parser, input, expected);
}

#[test]
fn decimal_comma_leaves_a_dot_unconsumed() {
    let parser = FloatParserBuilder::<f64>::new().decimal_comma(true).build();
    let (outcome, position) = stopped_at(&parser, "3.14");
    assert_eq!(outcome.unwrap(), 3.0);
    assert_eq!(position, 1);
}

#[test]
fn isolated_sign_consumes_nothing() {
    let (outcome, position) = stopped_at(&float::<f64>(), "-x");
    assert!(outcome.is_err());
    assert_eq!(position, 0);
}

#[test]
fn decimals_compose_with_repetition() {
    let csv = float::<f64>()
        .repeated()
        .separated_by(item(';'))
        .no_trailing_separator(true)
        .collect::<Vec<_>>();
    assert_parses_to!(csv, "1.5;2.25;3.0", vec![1.5, 2.25, 3.0]);
}
