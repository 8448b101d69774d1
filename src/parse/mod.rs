mod error;
mod grammar;
mod lexer;

pub use error::{ParseError, ParseErrorKind};

use crate::types::KeywordRegistry;
use crate::Expr;

/// Parse rule text into an [`Expr`] tree, recognising the keywords in
/// `keywords`. Parentheses may nest at most `max_depth` levels.
///
/// # Errors
///
/// Returns [`ParseError`] if the text is not a valid rule.
pub fn parse(input: &str, keywords: &KeywordRegistry, max_depth: usize) -> Result<Expr, ParseError> {
    let tokens = lexer::tokenize(input, keywords)?;
    grammar::parse_tokens(&tokens, input.len(), max_depth)
}
