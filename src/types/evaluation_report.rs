use std::fmt;
use std::time::Duration;

/// The outcome of a single predicate reached during evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateOutcome {
    predicate: String,
    keyword: String,
    matched: bool,
}

impl PredicateOutcome {
    pub(crate) fn new(predicate: String, keyword: String, matched: bool) -> Self {
        Self {
            predicate,
            keyword,
            matched,
        }
    }

    /// The predicate in rule syntax, e.g. `body="nginx"`.
    #[must_use]
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    #[must_use]
    pub fn matched(&self) -> bool {
        self.matched
    }
}

/// Detailed evaluation report returned by
/// [`CompiledRule::explain()`](super::rule::CompiledRule::explain).
///
/// Contains the result, each predicate that was evaluated (predicates
/// skipped by short-circuiting are absent), and the wall-clock duration.
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    result: bool,
    steps: Vec<PredicateOutcome>,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(result: bool, steps: Vec<PredicateOutcome>, duration: Duration) -> Self {
        Self {
            result,
            steps,
            duration,
        }
    }

    /// The evaluation result, same as [`CompiledRule::is_match()`](super::rule::CompiledRule::is_match).
    #[must_use]
    pub fn result(&self) -> bool {
        self.result
    }

    /// Predicates in the order they were evaluated.
    #[must_use]
    pub fn steps(&self) -> &[PredicateOutcome] {
        &self.steps
    }

    /// Predicates that evaluated to `true`.
    pub fn matched(&self) -> impl Iterator<Item = &PredicateOutcome> {
        self.steps.iter().filter(|s| s.matched)
    }

    /// Wall-clock duration of the evaluation.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "result: {} ({} predicates evaluated in {:?})",
            self.result,
            self.steps.len(),
            self.duration
        )?;
        for step in &self.steps {
            let mark = if step.matched { "+" } else { "-" };
            writeln!(f, "  {mark} {}", step.predicate)?;
        }
        Ok(())
    }
}
