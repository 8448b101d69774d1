use thiserror::Error;

/// A rule that parsed but cannot be compiled or evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("invalid regular expression \"{pattern}\" for keyword '{keyword}': {reason}")]
    InvalidPattern {
        keyword: String,
        pattern: String,
        reason: String,
    },

    #[error("undefined keyword '{keyword}'")]
    UndefinedKeyword { keyword: String },
}

impl RuleError {
    pub(crate) fn invalid_pattern(keyword: &str, pattern: &str, err: &regex::Error) -> Self {
        RuleError::InvalidPattern {
            keyword: keyword.to_owned(),
            pattern: pattern.to_owned(),
            reason: err.to_string(),
        }
    }
}
