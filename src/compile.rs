use regex::RegexBuilder;

use crate::types::{CompiledExpr, CompiledPredicate, KeywordRegistry, Matcher};
use crate::{Comparator, EngineConfig, Expr, RegexValidation, RuleError};

/// Resolve an expression tree into its evaluable form.
///
/// Every keyword must be registered in `keywords`. Literals for `=` and `!=`
/// are case-folded once here; `~=` patterns are compiled here unless the
/// config defers them to evaluation.
pub(crate) fn compile(
    expr: &Expr,
    keywords: &KeywordRegistry,
    config: &EngineConfig,
) -> Result<CompiledExpr, RuleError> {
    match expr {
        Expr::Predicate {
            keyword,
            comparator,
            value,
        } => {
            if !keywords.contains(keyword) {
                return Err(RuleError::UndefinedKeyword {
                    keyword: keyword.clone(),
                });
            }
            let matcher = build_matcher(keyword, *comparator, value, config)?;
            Ok(CompiledExpr::Predicate(CompiledPredicate {
                keyword: keyword.to_lowercase(),
                comparator: *comparator,
                value: value.clone(),
                matcher,
            }))
        }
        Expr::And(operands) => Ok(CompiledExpr::And(compile_all(operands, keywords, config)?)),
        Expr::Or(operands) => Ok(CompiledExpr::Or(compile_all(operands, keywords, config)?)),
    }
}

fn compile_all(
    operands: &[Expr],
    keywords: &KeywordRegistry,
    config: &EngineConfig,
) -> Result<Vec<CompiledExpr>, RuleError> {
    operands
        .iter()
        .map(|operand| compile(operand, keywords, config))
        .collect()
}

fn build_matcher(
    keyword: &str,
    comparator: Comparator,
    value: &str,
    config: &EngineConfig,
) -> Result<Matcher, RuleError> {
    match comparator {
        Comparator::Contains | Comparator::NotContains => Ok(Matcher::Folded(value.to_lowercase())),
        Comparator::Equal => Ok(Matcher::Exact),
        Comparator::RegexpMatch => match config.regex_validation {
            RegexValidation::Eager => RegexBuilder::new(value)
                .size_limit(config.regex_size_limit)
                .build()
                .map(Matcher::Pattern)
                .map_err(|e| RuleError::invalid_pattern(keyword, value, &e)),
            RegexValidation::Deferred => Ok(Matcher::Deferred {
                size_limit: config.regex_size_limit,
            }),
        },
    }
}
