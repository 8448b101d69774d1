use tracing::{debug, trace};

use super::config::EngineConfig;
use super::context::Context;
use super::error::RuleError;
use super::expr::Expr;
use super::keyword_registry::KeywordRegistry;
use super::rule::CompiledRule;

/// The vocabulary used by [`Engine::default()`].
pub const DEFAULT_KEYWORDS: [&str; 4] = ["header", "body", "title", "icon"];

/// Owns a keyword vocabulary and compiles rule text against it.
///
/// # Example
///
/// ```
/// use fprule::Engine;
///
/// let engine = Engine::new(["body", "title"]);
/// let rule = engine.compile(r#"body="aaaaa" && title="aaaaaa""#).unwrap();
///
/// let ctx = engine.new_context([("body", "aaaaaaaaaaaaaaaa"), ("title", "aaaaaaaaaaaaaa")]);
/// assert!(rule.is_match(&ctx).unwrap());
///
/// let ctx = engine.new_context([("body", "bbbbbbbbbbbbb"), ("title", "aaaaaaaaaaaaaa")]);
/// assert!(!rule.is_match(&ctx).unwrap());
/// ```
///
/// Reconfiguring the vocabulary takes `&mut self`, so it can never race with
/// compilation. Rules compiled earlier keep working unchanged.
#[derive(Debug, Clone)]
pub struct Engine {
    keywords: KeywordRegistry,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine recognising `keywords`, with the default config.
    #[must_use]
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: KeywordRegistry::new(keywords),
            config: EngineConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn keywords(&self) -> &KeywordRegistry {
        &self.keywords
    }

    /// Replace the vocabulary.
    pub fn configure<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords.configure(keywords);
        debug!(keywords = self.keywords.len(), "keyword vocabulary replaced");
    }

    /// Add keywords to the vocabulary. Already registered keywords are skipped.
    pub fn extend<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords.extend(keywords);
        debug!(keywords = self.keywords.len(), "keyword vocabulary extended");
    }

    /// Build an evaluation context from field values. Keys are lower-cased.
    pub fn new_context<I, K, V>(&self, values: I) -> Context
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut ctx = Context::new();
        for (key, value) in values {
            let key = key.as_ref();
            if !self.keywords.contains(key) {
                trace!(keyword = key, "context value for unregistered keyword");
            }
            ctx.insert(key, value);
        }
        ctx
    }

    /// Parse and compile rule text.
    ///
    /// # Errors
    ///
    /// Returns [`FpruleError::Parse`](crate::FpruleError::Parse) for malformed
    /// text or unknown keywords, and
    /// [`FpruleError::Rule`](crate::FpruleError::Rule) for `~=` patterns that
    /// fail eager validation.
    pub fn compile(&self, text: &str) -> Result<CompiledRule, crate::FpruleError> {
        let expr = crate::parse::parse(text, &self.keywords, self.config.max_nesting)
            .inspect_err(|e| {
                debug!(rule = text, error = %e, "rule failed to parse");
            })?;
        let rule = self.build(text.to_owned(), expr)?;
        Ok(rule)
    }

    /// Compile an expression built with [`keyword()`](crate::keyword).
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::UndefinedKeyword`] if the expression names a
    /// keyword outside the vocabulary, or [`RuleError::InvalidPattern`] for
    /// `~=` patterns that fail eager validation.
    pub fn compile_expr(&self, expr: Expr) -> Result<CompiledRule, RuleError> {
        self.build(expr.to_string(), expr)
    }

    fn build(&self, text: String, expr: Expr) -> Result<CompiledRule, RuleError> {
        let compiled = crate::compile::compile(&expr, &self.keywords, &self.config)
            .inspect_err(|e| {
                debug!(rule = %text, error = %e, "rule failed to compile");
            })?;
        debug!(rule = %text, predicates = expr.predicate_count(), "compiled rule");
        Ok(CompiledRule {
            text,
            expr,
            compiled,
        })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS)
    }
}
