use std::collections::BTreeMap;

use parslet::prelude::*;
mod common;
use common::stopped_at;

#[test]
fn trailing_separator_is_consumed_without_the_option() {
    let csv = integer::<i64>()
        .repeated()
        .separated_by(item(','))
        .collect::<Vec<_>>();
    let (outcome, position) = stopped_at(&csv, "1,2,3,");
    assert_eq!(outcome.unwrap(), vec![1, 2, 3]);
    assert_eq!(position, 6);
}

#[test]
fn no_trailing_separator_fails_at_the_separator() {
    let csv = integer::<i64>()
        .repeated()
        .separated_by(item(','))
        .no_trailing_separator(true)
        .collect::<Vec<_>>();
    let (outcome, position) = stopped_at(&csv, "1,2,3,");
    assert!(outcome.is_err());
    assert_eq!(position, 5);

    let (outcome, position) = stopped_at(&csv, "1,2,3");
    assert_eq!(outcome.unwrap(), vec![1, 2, 3]);
    assert_eq!(position, 5);
}

#[test]
fn zero_matches_succeed_by_default() {
    let csv = integer::<i64>()
        .repeated()
        .separated_by(item(','))
        .collect::<Vec<_>>();
    let (outcome, position) = stopped_at(&csv, "abc");
    assert_eq!(outcome.unwrap(), vec![]);
    assert_eq!(position, 0);
}

#[test]
fn at_least_one_turns_empty_into_a_miss() {
    let csv = integer::<i64>()
        .repeated()
        .separated_by(item(','))
        .at_least_one(true)
        .collect::<Vec<_>>();
    assert_fails!(csv, "abc");
}

#[test]
fn key_value_lines_into_an_ordered_map() {
    let key = items_while(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
        .at_least_one(true)
        .map(str::to_owned);
    let pair = key.then_ignore(item('=')).then(integer::<i64>());
    let table = pair
        .repeated()
        .separated_by(item('\n'))
        .collect_map::<BTreeMap<String, i64>>();

    let parsed = parslet::parse(&table, "b=2\na=1\nb=9").unwrap();
    assert_eq!(parsed.keys().cloned().collect::<Vec<_>>(), vec!["a", "b"]);
    // First occurrence of a duplicate key wins.
    assert_eq!(parsed["b"], 2);
}

#[test]
fn fixed_slots_fill_and_stop() {
    let quad = integer::<u8>()
        .repeated()
        .separated_by(item('.'))
        .collect_array::<4>();
    let (outcome, position) = stopped_at(&quad, "10.20.30.40.50");
    let (octets, count) = outcome.unwrap();
    assert_eq!(octets, [10, 20, 30, 40]);
    assert_eq!(count, 4);
    // "…40" consumed, ".50" untouched.
    assert_eq!(position, 11);
}

#[test]
fn fold_sums_a_separated_list() {
    let total = integer::<i64>()
        .repeated()
        .separated_by(item('+'))
        .fold(0i64, |acc, n| acc + n);
    assert_parses_to!(total, "1+2+3+4", 10);
    assert_parses_to!(total, "7", 7);
    assert_parses_to!(total, "", 0);
}

#[test]
fn repetition_span_covers_all_iterations() {
    // The base form reports the full consumed span.
    let span = literal("ab").repeated();
    assert_parses_to!(span, "ababab!", "ababab");
    assert_parses_to!(span, "x", "");
}

#[test]
fn separated_words_with_state_counting() {
    let word = non_whitespace().map(str::to_owned);
    let count_words = word
        .repeated()
        .separated_by(whitespace().at_least_one(true))
        .for_each_state(|seen: &mut Vec<String>, w| seen.push(w));

    let mut seen = Vec::new();
    parslet::parse_with_state(&count_words, "alpha beta gamma", &mut seen).unwrap();
    assert_eq!(seen, vec!["alpha", "beta", "gamma"]);
}
