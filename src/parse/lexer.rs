use winnow::combinator::alt;
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::types::{KeywordRegistry, unescape_literal};
use crate::{Comparator, Expr};

use super::error::{ParseError, ParseErrorKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    And,
    Or,
    LParen,
    RParen,
    Predicate(Expr),
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::And => "&&".to_owned(),
            TokenKind::Or => "||".to_owned(),
            TokenKind::LParen => "(".to_owned(),
            TokenKind::RParen => ")".to_owned(),
            TokenKind::Predicate(expr) => expr.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) offset: usize,
}

// -- Primitives -------------------------------------------------------------

fn is_keyword_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.' || c == '-'
}

fn keyword_run<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| is_keyword_char(c)).parse_next(input)
}

fn operator_run<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| matches!(c, '=' | '!' | '~' | '<' | '>' | ':')).parse_next(input)
}

fn connective(input: &mut &str) -> ModalResult<TokenKind> {
    alt((
        "&&".value(TokenKind::And),
        "||".value(TokenKind::Or),
        '('.value(TokenKind::LParen),
        ')'.value(TokenKind::RParen),
    ))
    .parse_next(input)
}

// Longest symbols first so `==` and `!=` are never read as `=`.
fn comparator_symbol(input: &mut &str) -> ModalResult<Comparator> {
    alt((
        "==".value(Comparator::Equal),
        "~=".value(Comparator::RegexpMatch),
        "!=".value(Comparator::NotContains),
        "=".value(Comparator::Contains),
    ))
    .parse_next(input)
}

fn next_char(input: &mut &str) -> ModalResult<char> {
    any.parse_next(input)
}

fn open_quote(input: &mut &str) -> ModalResult<char> {
    '"'.parse_next(input)
}

/// A double-quoted value. `\"` does not terminate the literal.
fn quoted_value(input: &mut &str) -> ModalResult<String> {
    open_quote(input)?;
    let mut raw = String::new();
    loop {
        match next_char(input)? {
            '"' => return Ok(unescape_literal(&raw)),
            '\\' => {
                raw.push('\\');
                if input.starts_with('"') {
                    raw.push(next_char(input)?);
                }
            }
            c => raw.push(c),
        }
    }
}

// -- Tokenizer --------------------------------------------------------------

struct Lexer<'s, 'k> {
    source: &'s str,
    rest: &'s str,
    keywords: &'k KeywordRegistry,
}

impl Lexer<'_, '_> {
    fn offset(&self) -> usize {
        self.source.len() - self.rest.len()
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.skip_whitespace();
        if self.rest.is_empty() {
            return Ok(None);
        }

        let offset = self.offset();
        if let Ok(kind) = connective(&mut self.rest) {
            return Ok(Some(Token { kind, offset }));
        }

        let kind = self.predicate()?;
        Ok(Some(Token { kind, offset }))
    }

    fn predicate(&mut self) -> Result<TokenKind, ParseError> {
        let keyword = self.keyword()?;
        self.skip_whitespace();

        let offset = self.offset();
        let comparator = match comparator_symbol(&mut self.rest) {
            Ok(c) => c,
            Err(_) => {
                let found = match operator_run(&mut self.rest) {
                    Ok(op) => op.to_owned(),
                    Err(_) => self.rest.chars().next().map(String::from).unwrap_or_default(),
                };
                return Err(ParseError::new(
                    ParseErrorKind::InvalidComparator { found },
                    offset,
                ));
            }
        };
        self.skip_whitespace();

        let offset = self.offset();
        if !self.rest.starts_with('"') {
            return Err(ParseError::new(ParseErrorKind::ExpectedLiteral, offset));
        }
        let value = quoted_value(&mut self.rest)
            .map_err(|_| ParseError::new(ParseErrorKind::UnterminatedLiteral, offset))?;

        Ok(TokenKind::Predicate(Expr::Predicate {
            keyword,
            comparator,
            value,
        }))
    }

    fn keyword(&mut self) -> Result<String, ParseError> {
        let offset = self.offset();
        if let Some(len) = self.keywords.match_prefix(self.rest) {
            let (matched, after) = self.rest.split_at(len);
            if !after.starts_with(is_keyword_char) {
                self.rest = after;
                return Ok(matched.to_lowercase());
            }
        }

        let kind = match keyword_run(&mut self.rest) {
            Ok(word) => ParseErrorKind::UnknownKeyword {
                keyword: word.to_owned(),
            },
            Err(_) => ParseErrorKind::UnexpectedCharacter {
                found: self.rest.chars().next().unwrap_or_default(),
            },
        };
        Err(ParseError::new(kind, offset))
    }
}

/// Split rule text into connectives and `keyword COMPARATOR "value"` predicates.
pub(crate) fn tokenize(source: &str, keywords: &KeywordRegistry) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer {
        source,
        rest: source,
        keywords,
    };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}
