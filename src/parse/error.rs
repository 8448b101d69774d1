use std::fmt;

use thiserror::Error;

/// What went wrong while parsing rule text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("rule is empty")]
    Empty,

    #[error("unknown keyword '{keyword}'")]
    UnknownKeyword { keyword: String },

    #[error("unexpected character '{found}'")]
    UnexpectedCharacter { found: char },

    #[error("unrecognized comparator '{found}', expected one of ==, ~=, !=, =")]
    InvalidComparator { found: String },

    #[error("expected a double-quoted value")]
    ExpectedLiteral,

    #[error("unterminated string literal")]
    UnterminatedLiteral,

    #[error("unclosed '('")]
    UnclosedParen,

    #[error("unmatched ')'")]
    UnmatchedCloseParen,

    #[error("missing '&&' or '||' between expressions")]
    MissingConnective,

    #[error("unexpected '{found}', expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
    },

    #[error("unexpected end of rule, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("parentheses nested deeper than {limit}")]
    NestingTooDeep { limit: usize },
}

/// Errors produced when parsing rule text. `offset` is the byte position in
/// the rule text where the problem starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    offset: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    #[must_use]
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at offset {}: {}", self.offset, self.kind)
    }
}

impl std::error::Error for ParseError {}
