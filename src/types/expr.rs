use std::fmt;

use regex::Regex;

use super::comparator::Comparator;
use super::literal::escape_literal;

/// User-facing expression tree. Leaves are `keyword COMPARATOR "value"`
/// predicates, inner nodes are `&&` and `||` over two or more operands.
/// Chains like `a || b || c` are a single flat node, so tree depth only grows
/// with parenthesised grouping.
/// Transformed into [`CompiledExpr`] during compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Predicate {
        keyword: String,
        comparator: Comparator,
        value: String,
    },
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

/// Compiled expression: case-folded needles are precomputed and regex
/// patterns are compiled up front unless validation is deferred.
#[derive(Debug, Clone)]
pub(crate) enum CompiledExpr {
    Predicate(CompiledPredicate),
    And(Vec<CompiledExpr>),
    Or(Vec<CompiledExpr>),
}

#[derive(Debug, Clone)]
pub(crate) struct CompiledPredicate {
    pub(crate) keyword: String,
    pub(crate) comparator: Comparator,
    pub(crate) value: String,
    pub(crate) matcher: Matcher,
}

#[derive(Debug, Clone)]
pub(crate) enum Matcher {
    /// Lower-cased literal for `=` and `!=`.
    Folded(String),
    /// `==` compares against `value` directly.
    Exact,
    Pattern(Regex),
    /// `~=` with the pattern compiled at evaluation time.
    Deferred { size_limit: usize },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Predicate {
                keyword,
                comparator,
                value,
            } => write!(f, "{keyword}{comparator}\"{}\"", escape_literal(value)),
            // `&&` binds tighter, so `||` operands are grouped under `&&` but not the
            // reverse. Same-connective nesting only comes from hand-built trees.
            Expr::And(operands) => write_operands(f, operands, " && ", |e| {
                matches!(e, Expr::And(_) | Expr::Or(_))
            }),
            Expr::Or(operands) => {
                write_operands(f, operands, " || ", |e| matches!(e, Expr::Or(_)))
            }
        }
    }
}

fn write_operands(
    f: &mut fmt::Formatter<'_>,
    operands: &[Expr],
    separator: &str,
    needs_group: impl Fn(&Expr) -> bool,
) -> fmt::Result {
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        if needs_group(operand) {
            write!(f, "({operand})")?;
        } else {
            write!(f, "{operand}")?;
        }
    }
    Ok(())
}

impl fmt::Display for CompiledPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}\"{}\"",
            self.keyword,
            self.comparator,
            escape_literal(&self.value)
        )
    }
}

impl Expr {
    /// Join with `&&`. Operands that are already `&&` nodes are merged into
    /// one flat node.
    #[must_use]
    pub fn and(self, other: Expr) -> Expr {
        let mut operands = match self {
            Expr::And(operands) => operands,
            expr => vec![expr],
        };
        match other {
            Expr::And(rest) => operands.extend(rest),
            expr => operands.push(expr),
        }
        Expr::And(operands)
    }

    /// Join with `||`. Operands that are already `||` nodes are merged into
    /// one flat node.
    #[must_use]
    pub fn or(self, other: Expr) -> Expr {
        let mut operands = match self {
            Expr::Or(operands) => operands,
            expr => vec![expr],
        };
        match other {
            Expr::Or(rest) => operands.extend(rest),
            expr => operands.push(expr),
        }
        Expr::Or(operands)
    }

    /// Number of predicate leaves in the tree.
    #[must_use]
    pub fn predicate_count(&self) -> usize {
        match self {
            Expr::Predicate { .. } => 1,
            Expr::And(operands) | Expr::Or(operands) => {
                operands.iter().map(Expr::predicate_count).sum()
            }
        }
    }

    /// Distinct keywords referenced by the tree, in order of first appearance.
    #[must_use]
    pub fn keywords(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_keywords(&mut out);
        out
    }

    fn collect_keywords<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Predicate { keyword, .. } => {
                if !out.contains(&keyword.as_str()) {
                    out.push(keyword);
                }
            }
            Expr::And(operands) | Expr::Or(operands) => {
                for operand in operands {
                    operand.collect_keywords(out);
                }
            }
        }
    }
}

/// Intermediate builder for predicates.
/// Created by [`keyword()`]; requires a comparator method to produce a valid [`Expr`].
#[derive(Debug, Clone)]
pub struct KeywordExpr {
    name: String,
}

impl KeywordExpr {
    fn predicate(self, comparator: Comparator, value: impl Into<String>) -> Expr {
        Expr::Predicate {
            keyword: self.name,
            comparator,
            value: value.into(),
        }
    }

    /// `keyword="value"`
    #[must_use]
    pub fn contains(self, value: impl Into<String>) -> Expr {
        self.predicate(Comparator::Contains, value)
    }

    /// `keyword=="value"`
    #[must_use]
    pub fn equal(self, value: impl Into<String>) -> Expr {
        self.predicate(Comparator::Equal, value)
    }

    /// `keyword!="value"`
    #[must_use]
    pub fn not_contains(self, value: impl Into<String>) -> Expr {
        self.predicate(Comparator::NotContains, value)
    }

    /// `keyword~="pattern"`
    #[must_use]
    pub fn regexp_match(self, pattern: impl Into<String>) -> Expr {
        self.predicate(Comparator::RegexpMatch, pattern)
    }
}

/// Start a predicate on `name`. The name is lower-cased.
#[must_use]
pub fn keyword(name: &str) -> KeywordExpr {
    KeywordExpr {
        name: name.to_lowercase(),
    }
}
