#![allow(dead_code)]

use fprule::{Context, DEFAULT_KEYWORDS, Expr, keyword};
use proptest::prelude::*;

// --- Fixed vocabulary ---
// Contexts and rules draw values from small alphabets so that predicates hit
// often enough for matching branches to be exercised.

const PATTERNS: &[&str] = &[
    "^a",
    "b$",
    "a.c",
    r"\d+",
    "(?i)AB",
    "[abc]{2}",
    "^$",
    r#"x"y"#,
];

/// A short field value. No backslashes, so every value can be rendered as a
/// rule literal and parsed back unchanged.
pub fn arb_value() -> impl Strategy<Value = String> {
    "[abcxyABC0-9 \"]{0,6}"
}

pub fn arb_keyword() -> impl Strategy<Value = &'static str> {
    prop::sample::select(DEFAULT_KEYWORDS.to_vec())
}

/// Generate a context over the default vocabulary. Some keys are left out.
pub fn arb_context() -> impl Strategy<Value = Context> {
    prop::collection::vec((arb_keyword(), arb_value()), 0..=4)
        .prop_map(|pairs| pairs.into_iter().collect())
}

/// Generate a single predicate. `~=` only uses patterns known to compile.
pub fn arb_predicate() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (arb_keyword(), arb_value()).prop_map(|(k, v)| keyword(k).contains(v)),
        (arb_keyword(), arb_value()).prop_map(|(k, v)| keyword(k).equal(v)),
        (arb_keyword(), arb_value()).prop_map(|(k, v)| keyword(k).not_contains(v)),
        (arb_keyword(), prop::sample::select(PATTERNS))
            .prop_map(|(k, p)| keyword(k).regexp_match(p)),
    ]
}

/// Generate a random expression tree of predicates joined by `&&` and `||`.
pub fn arb_expr() -> impl Strategy<Value = Expr> {
    arb_predicate().prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.and(b)),
            (inner.clone(), inner).prop_map(|(a, b)| a.or(b)),
        ]
    })
}

/// Generate a long flat `&&` or `||` chain, deeper than the default
/// parenthesis limit if it were nested.
pub fn arb_chain() -> impl Strategy<Value = Expr> {
    (prop::collection::vec(arb_predicate(), 60..=120), any::<bool>()).prop_map(|(preds, all)| {
        preds
            .into_iter()
            .reduce(|a, b| if all { a.and(b) } else { a.or(b) })
            .unwrap()
    })
}
