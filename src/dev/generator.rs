// src/dev/generator.rs
// Random inputs for the `pemdas` grammar, shared by tests and perf_parse.

use rand::{Rng, seq::IndexedRandom};

use crate::token::Token;

const BINARY_OPS: &[&str] = &["+", "-", "*", "/", "%", "**"];
const UNARY_OPS: &[&str] = &["-", "+"];
const SEPARATORS: &[&str] = &[" ", "  ", "\t", "\n", " \r\n", "\n\t"];

/// One random expression, nesting at most `max_depth` levels.
pub fn gen_expr<R: Rng>(rng: &mut R, max_depth: usize) -> String {
    let mut out = String::new();
    push_expr(rng, max_depth, &mut out);
    out
}

fn push_expr<R: Rng>(rng: &mut R, depth: usize, out: &mut String) {
    let roll = if depth == 0 { 0 } else { rng.random_range(0..10) };
    match roll {
        0..=3 => {
            let n: u32 = rng.random_range(0..1000);
            out.push_str(&n.to_string());
        }
        4..=7 => {
            push_expr(rng, depth - 1, out);
            out.push(' ');
            out.push_str(BINARY_OPS.choose(rng).copied().unwrap_or("+"));
            out.push(' ');
            push_expr(rng, depth - 1, out);
        }
        8 => {
            out.push_str(UNARY_OPS.choose(rng).copied().unwrap_or("-"));
            push_expr(rng, depth - 1, out);
        }
        _ => {
            out.push('(');
            push_expr(rng, depth - 1, out);
            out.push(')');
        }
    }
}

/// A valid expression of at least `target_len` bytes: random terms chained
/// with `+`.
pub fn gen_valid_source<R: Rng>(rng: &mut R, target_len: usize) -> String {
    let mut s = gen_expr(rng, 4);
    while s.len() < target_len {
        s.push_str(" + ");
        s.push_str(&gen_expr(rng, 4));
    }
    s
}

/// Rejoin lexemes with random non-empty whitespace runs. Token boundaries are
/// preserved because every separator is at least one whitespace character.
pub fn respace<R: Rng>(rng: &mut R, tokens: &[Token]) -> String {
    let mut out = String::new();
    if rng.random_bool(0.5) {
        out.push_str(SEPARATORS.choose(rng).copied().unwrap_or(" "));
    }
    for (i, t) in tokens.iter().enumerate() {
        if i > 0 {
            out.push_str(SEPARATORS.choose(rng).copied().unwrap_or(" "));
        }
        out.push_str(&t.lexeme);
    }
    if rng.random_bool(0.5) {
        out.push_str(SEPARATORS.choose(rng).copied().unwrap_or(" "));
    }
    out
}
