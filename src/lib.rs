//! Compiled fingerprint rules.
//!
//! A rule is a boolean expression over `keyword COMPARATOR "value"`
//! predicates joined with `&&`, `||` and parentheses, such as
//! `body="nginx" && (title="Welcome" || header~="X-Powered-By")`. An
//! [`Engine`] owns the keyword vocabulary and compiles rule text once into a
//! [`CompiledRule`], which is then evaluated against any number of
//! [`Context`]s.

mod compile;
mod error;
mod evaluate;
pub mod parse;
mod types;

pub use error::FpruleError;
pub use parse::{ParseError, ParseErrorKind};
pub use types::{
    Comparator, CompiledRule, Context, DEFAULT_KEYWORDS, Engine, EngineConfig, EvaluationReport,
    Expr, KeywordExpr, KeywordRegistry, PredicateOutcome, RegexValidation, RuleError,
    escape_literal, keyword, unescape_literal,
};
