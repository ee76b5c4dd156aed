//! An infix calculator built on the public API: left-associative operator
//! chaining plus recursion for parenthesised groups.

use parslet::prelude::*;
mod common;
use common::stopped_at;

fn add(a: f64, b: f64) -> f64 {
    a + b
}
fn sub(a: f64, b: f64) -> f64 {
    a - b
}
fn mul(a: f64, b: f64) -> f64 {
    a * b
}
fn div(a: f64, b: f64) -> f64 {
    a / b
}

type BinOp = fn(f64, f64) -> f64;

/// expr := product (('+' | '-') product)*
/// product := atom (('*' | '/') atom)*
/// atom := number | '(' expr ')'
fn calculator<'a>() -> impl Parser<VerboseStrCursor<'a>, Output = f64> {
    recursive(|expr| {
        let parens = item('(').ignore_then(expr).then_ignore(item(')'));
        let atom = float::<f64>().or(parens).padded();

        let mul_op = choice((item('*').to(mul as BinOp), item('/').to(div as BinOp))).padded();
        let product = chain(atom, mul_op);

        let add_op = choice((item('+').to(add as BinOp), item('-').to(sub as BinOp))).padded();
        chain(product, add_op)
    })
}

#[test]
fn subtraction_chains_to_the_left() {
    // (10 - 3) - 2, not 10 - (3 - 2).
    let number = integer::<i64>();
    let sub_chain = chain(number, item('-').to(|a: i64, b: i64| a - b));
    assert_parses_to!(sub_chain, "10-3-2", 5);
}

#[test]
fn evaluates_flat_expressions() {
    let calc = calculator();
    assert_parses_to!(calc, "1+2+3", 6.0);
    assert_parses_to!(calc, "10-4", 6.0);
    assert_parses_to!(calc, "6*7", 42.0);
    assert_parses_to!(calc, "9/2", 4.5);
}

#[test]
fn respects_precedence_and_parentheses() {
    let calc = calculator();
    assert_parses_to!(calc, "2+3*4", 14.0);
    assert_parses_to!(calc, "(2+3)*4", 20.0);
    assert_parses_to!(calc, "2 * (3 + 4) - 5", 9.0);
    assert_parses_to!(calc, "1.5e1 + 2.5", 17.5);
}

#[test]
fn whitespace_is_free_around_tokens() {
    let calc = calculator();
    assert_parses_to!(calc, "  1 +  2*3 ", 7.0);
}

#[test]
fn rejects_garbage_and_reports_how_far_it_got() {
    let calc = calculator().then_ignore(end());
    assert_fails!(calc, "+");
    assert_fails!(calc, "()");
    assert_fails!(calc, "1+");

    // The terminal position points at the unconsumable tail.
    let (outcome, position) = stopped_at(&calc, "1+2 x");
    assert!(outcome.is_err());
    assert_eq!(position, 4);
}

#[test]
fn dangling_operator_is_not_consumed() {
    let calc = calculator();
    let (outcome, position) = stopped_at(&calc, "4*2-");
    assert_eq!(outcome.unwrap(), 8.0);
    assert_eq!(position, 3);
}
