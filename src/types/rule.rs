use std::fmt;
use std::time::Instant;

use super::context::Context;
use super::error::RuleError;
use super::evaluation_report::EvaluationReport;
use super::expr::{CompiledExpr, Expr};

/// A parsed, validated rule ready for repeated evaluation.
///
/// Produced by [`Engine::compile()`](super::Engine::compile) or
/// [`Engine::compile_expr()`](super::Engine::compile_expr). Immutable, `Send`
/// and `Sync`: share it behind `Arc` and call [`is_match`](Self::is_match)
/// from as many threads as needed. Later changes to the engine's vocabulary
/// do not affect it.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub(crate) text: String,
    pub(crate) expr: Expr,
    pub(crate) compiled: CompiledExpr,
}

impl CompiledRule {
    /// The rule text this rule was compiled from. For rules built with
    /// [`Engine::compile_expr()`](super::Engine::compile_expr) this is the
    /// canonical rendering of the expression.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parsed expression tree.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Distinct keywords the rule reads, in order of first appearance.
    #[must_use]
    pub fn keywords(&self) -> Vec<&str> {
        self.expr.keywords()
    }

    #[must_use]
    pub fn predicate_count(&self) -> usize {
        self.expr.predicate_count()
    }

    /// Evaluate the rule against `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] if a `~=` pattern that was not
    /// validated at compile time is reached and fails to compile.
    pub fn is_match(&self, ctx: &Context) -> Result<bool, RuleError> {
        crate::evaluate::evaluate(&self.compiled, ctx)
    }

    /// Evaluate with diagnostics: which predicates were reached, their
    /// outcomes and how long evaluation took.
    ///
    /// # Errors
    ///
    /// Same as [`is_match`](Self::is_match).
    pub fn explain(&self, ctx: &Context) -> Result<EvaluationReport, RuleError> {
        let start = Instant::now();
        let mut steps = Vec::new();
        let result = crate::evaluate::evaluate_detailed(&self.compiled, ctx, &mut steps)?;
        Ok(EvaluationReport::new(result, steps, start.elapsed()))
    }
}

impl fmt::Display for CompiledRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
