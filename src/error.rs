use thiserror::Error;

use crate::parse::ParseError;
use crate::RuleError;

/// Unified error type covering parsing and rule compilation.
///
/// Returned by [`Engine::compile()`](crate::Engine::compile).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FpruleError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_transparent() {
        let err: FpruleError = RuleError::UndefinedKeyword {
            keyword: "server".into(),
        }
        .into();
        assert_eq!(err.to_string(), "undefined keyword 'server'");
    }
}
