mod comparator;
mod config;
mod context;
mod engine;
mod error;
mod evaluation_report;
mod expr;
mod keyword_registry;
mod literal;
mod rule;

pub use comparator::Comparator;
pub use config::{EngineConfig, RegexValidation};
pub use context::Context;
pub use engine::{DEFAULT_KEYWORDS, Engine};
pub use error::RuleError;
pub use evaluation_report::{EvaluationReport, PredicateOutcome};
pub use expr::{Expr, KeywordExpr, keyword};
pub use keyword_registry::KeywordRegistry;
pub use literal::{escape_literal, unescape_literal};
pub use rule::CompiledRule;

pub(crate) use comparator::contains_folded;
pub(crate) use expr::{CompiledExpr, CompiledPredicate, Matcher};
