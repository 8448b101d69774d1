/// When `~=` patterns are compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegexValidation {
    /// Compile once while compiling the rule. Invalid patterns fail
    /// [`Engine::compile`](crate::Engine::compile).
    #[default]
    Eager,
    /// Compile on every evaluation of the predicate. Invalid patterns fail
    /// [`CompiledRule::is_match`](crate::CompiledRule::is_match), and only
    /// when the predicate is reached.
    Deferred,
}

/// Tunables for an [`Engine`](crate::Engine).
///
/// ```
/// use fprule::{EngineConfig, RegexValidation};
///
/// let config = EngineConfig::default()
///     .with_regex_validation(RegexValidation::Deferred)
///     .with_max_nesting(16);
/// assert_eq!(config.max_nesting, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub regex_validation: RegexValidation,
    /// Upper bound in bytes on the size of one compiled `~=` pattern.
    pub regex_size_limit: usize,
    /// Maximum parenthesis depth accepted by the parser.
    pub max_nesting: usize,
}

impl EngineConfig {
    pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);
    pub const DEFAULT_MAX_NESTING: usize = 64;

    #[must_use]
    pub fn with_regex_validation(mut self, mode: RegexValidation) -> Self {
        self.regex_validation = mode;
        self
    }

    #[must_use]
    pub fn with_regex_size_limit(mut self, bytes: usize) -> Self {
        self.regex_size_limit = bytes;
        self
    }

    #[must_use]
    pub fn with_max_nesting(mut self, depth: usize) -> Self {
        self.max_nesting = depth;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            regex_validation: RegexValidation::Eager,
            regex_size_limit: Self::DEFAULT_REGEX_SIZE_LIMIT,
            max_nesting: Self::DEFAULT_MAX_NESTING,
        }
    }
}
