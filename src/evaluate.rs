use tracing::{debug, trace};

use crate::types::{CompiledExpr, CompiledPredicate, Matcher, PredicateOutcome, contains_folded};
use crate::{Comparator, Context, RuleError};

/// Evaluate a compiled tree against `ctx`. `&&` and `||` short-circuit:
/// operands are evaluated left to right and evaluation stops at the first
/// one that decides the result.
pub(crate) fn evaluate(expr: &CompiledExpr, ctx: &Context) -> Result<bool, RuleError> {
    match expr {
        CompiledExpr::Predicate(p) => eval_predicate(p, ctx),
        CompiledExpr::And(operands) => {
            for operand in operands {
                if !evaluate(operand, ctx)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        CompiledExpr::Or(operands) => {
            for operand in operands {
                if evaluate(operand, ctx)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

/// Same as [`evaluate`], recording every predicate that was actually reached.
pub(crate) fn evaluate_detailed(
    expr: &CompiledExpr,
    ctx: &Context,
    steps: &mut Vec<PredicateOutcome>,
) -> Result<bool, RuleError> {
    match expr {
        CompiledExpr::Predicate(p) => {
            let matched = eval_predicate(p, ctx)?;
            trace!(predicate = %p, matched, "predicate evaluated");
            steps.push(PredicateOutcome::new(p.to_string(), p.keyword.clone(), matched));
            Ok(matched)
        }
        CompiledExpr::And(operands) => {
            for operand in operands {
                if !evaluate_detailed(operand, ctx, steps)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        CompiledExpr::Or(operands) => {
            for operand in operands {
                if evaluate_detailed(operand, ctx, steps)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

fn eval_predicate(p: &CompiledPredicate, ctx: &Context) -> Result<bool, RuleError> {
    let observed = ctx.value_of(&p.keyword);
    match &p.matcher {
        Matcher::Folded(needle) => {
            let found = contains_folded(observed, needle);
            Ok(if p.comparator == Comparator::NotContains {
                !found
            } else {
                found
            })
        }
        Matcher::Exact => Ok(observed == p.value),
        Matcher::Pattern(re) => Ok(re.is_match(observed)),
        Matcher::Deferred { size_limit } => p
            .comparator
            .apply(observed, &p.value, *size_limit)
            .map_err(|e| {
                debug!(keyword = %p.keyword, pattern = %p.value, error = %e, "invalid pattern at evaluation");
                RuleError::invalid_pattern(&p.keyword, &p.value, &e)
            }),
    }
}
