use winnow::combinator::{alt, cut_err, opt, preceded, repeat};
use winnow::error::{ErrMode, ModalResult, ParserError};
use winnow::prelude::*;
use winnow::stream::Stateful;
use winnow::token::{any, one_of};

use crate::Expr;

use super::error::{ParseError, ParseErrorKind};
use super::lexer::{Token, TokenKind};

const EXPECTED_OPERAND: &str = "a predicate or '('";

#[derive(Debug, Clone, Copy)]
struct Nesting {
    depth: usize,
    limit: usize,
    /// Length of the rule text, reported when the tokens run out.
    end: usize,
}

type Tokens<'t> = Stateful<&'t [Token], Nesting>;

/// A positioned [`ParseError`] travelling through the combinators.
#[derive(Debug)]
struct GrammarError(ParseError);

impl<'t> ParserError<Tokens<'t>> for GrammarError {
    type Inner = Self;

    // Token primitives only fail where an operand is expected.
    fn from_input(input: &Tokens<'t>) -> Self {
        let end = input.state.end;
        let err = match input.input.first() {
            None => ParseError::new(
                ParseErrorKind::UnexpectedEnd {
                    expected: EXPECTED_OPERAND,
                },
                end,
            ),
            Some(token) => match token.kind {
                TokenKind::RParen => {
                    ParseError::new(ParseErrorKind::UnmatchedCloseParen, token.offset)
                }
                TokenKind::And | TokenKind::Or => ParseError::new(
                    ParseErrorKind::UnexpectedToken {
                        found: token.kind.describe(),
                        expected: EXPECTED_OPERAND,
                    },
                    token.offset,
                ),
                TokenKind::Predicate(_) | TokenKind::LParen => {
                    ParseError::new(ParseErrorKind::MissingConnective, token.offset)
                }
            },
        };
        GrammarError(err)
    }

    fn into_inner(self) -> Result<Self::Inner, Self> {
        Ok(self)
    }
}

type PResult<O> = ModalResult<O, GrammarError>;

fn cut(err: ParseError) -> ErrMode<GrammarError> {
    ErrMode::Cut(GrammarError(err))
}

// -- Token primitives -------------------------------------------------------

fn connective<'t>(kind: TokenKind) -> impl Parser<Tokens<'t>, Token, ErrMode<GrammarError>> {
    one_of(move |t: Token| t.kind == kind)
}

fn predicate(input: &mut Tokens<'_>) -> PResult<Expr> {
    any.verify_map(|t: Token| match t.kind {
        TokenKind::Predicate(expr) => Some(expr),
        _ => None,
    })
    .parse_next(input)
}

// -- Expressions (precedence: OR < AND < primary) ---------------------------
//
// expr    := or_expr
// or_expr := and_expr ('||' and_expr)*
// and_expr:= primary ('&&' primary)*
// primary := predicate | '(' expr ')'

fn group(input: &mut Tokens<'_>) -> PResult<Expr> {
    let open = connective(TokenKind::LParen).parse_next(input)?;
    if input.state.depth >= input.state.limit {
        return Err(cut(ParseError::new(
            ParseErrorKind::NestingTooDeep {
                limit: input.state.limit,
            },
            open.offset,
        )));
    }

    input.state.depth += 1;
    let inner = cut_err(expr).parse_next(input)?;
    input.state.depth -= 1;

    match opt(connective(TokenKind::RParen)).parse_next(input)? {
        Some(_) => Ok(inner),
        None => Err(cut(match input.input.first() {
            Some(token) => unexpected_after_operand(token),
            None => ParseError::new(ParseErrorKind::UnclosedParen, open.offset),
        })),
    }
}

fn primary(input: &mut Tokens<'_>) -> PResult<Expr> {
    alt((predicate, group)).parse_next(input)
}

fn and_expr(input: &mut Tokens<'_>) -> PResult<Expr> {
    let first = primary(input)?;
    let rest: Vec<Expr> =
        repeat(0.., preceded(connective(TokenKind::And), cut_err(primary))).parse_next(input)?;
    Ok(rest.into_iter().fold(first, Expr::and))
}

fn or_expr(input: &mut Tokens<'_>) -> PResult<Expr> {
    let first = and_expr(input)?;
    let rest: Vec<Expr> =
        repeat(0.., preceded(connective(TokenKind::Or), cut_err(and_expr))).parse_next(input)?;
    Ok(rest.into_iter().fold(first, Expr::or))
}

fn expr(input: &mut Tokens<'_>) -> PResult<Expr> {
    or_expr(input)
}

/// A complete operand was followed by something that cannot continue it.
fn unexpected_after_operand(token: &Token) -> ParseError {
    let kind = match token.kind {
        TokenKind::RParen => ParseErrorKind::UnmatchedCloseParen,
        TokenKind::Predicate(_) | TokenKind::LParen => ParseErrorKind::MissingConnective,
        TokenKind::And | TokenKind::Or => ParseErrorKind::UnexpectedToken {
            found: token.kind.describe(),
            expected: "'&&', '||' or ')'",
        },
    };
    ParseError::new(kind, token.offset)
}

// -- Top-level parser -------------------------------------------------------

/// Build an expression tree from the token stream. `end` is the length of the
/// source text, reported when the tokens run out early.
pub(crate) fn parse_tokens(
    tokens: &[Token],
    end: usize,
    max_depth: usize,
) -> Result<Expr, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::new(ParseErrorKind::Empty, 0));
    }

    let mut input = Stateful {
        input: tokens,
        state: Nesting {
            depth: 0,
            limit: max_depth,
            end,
        },
    };
    let tree = expr.parse_next(&mut input).map_err(|e| match e {
        ErrMode::Backtrack(GrammarError(err)) | ErrMode::Cut(GrammarError(err)) => err,
        ErrMode::Incomplete(_) => ParseError::new(
            ParseErrorKind::UnexpectedEnd {
                expected: EXPECTED_OPERAND,
            },
            end,
        ),
    })?;

    match input.input.first() {
        None => Ok(tree),
        Some(token) => Err(unexpected_after_operand(token)),
    }
}

#[cfg(test)]
mod tests {
    use crate::parse::parse;
    use crate::types::KeywordRegistry;
    use crate::{Comparator, Expr, ParseErrorKind, keyword};

    fn registry() -> KeywordRegistry {
        KeywordRegistry::new(["header", "body", "title", "icon"])
    }

    fn parse_ok(input: &str) -> Expr {
        parse(input, &registry(), 64).unwrap()
    }

    fn parse_err(input: &str) -> (ParseErrorKind, usize) {
        let err = parse(input, &registry(), 64).unwrap_err();
        (err.kind().clone(), err.offset())
    }

    #[test]
    fn parse_single_predicate() {
        assert_eq!(parse_ok(r#"body="nginx""#), keyword("body").contains("nginx"));
    }

    #[test]
    fn parse_and_expression() {
        assert!(matches!(
            parse_ok(r#"body="a" && title="b""#),
            Expr::And(ref operands) if operands.len() == 2
        ));
    }

    #[test]
    fn parse_or_expression() {
        assert!(matches!(
            parse_ok(r#"body="a" || title="b""#),
            Expr::Or(ref operands) if operands.len() == 2
        ));
    }

    #[test]
    fn parse_precedence_and_before_or() {
        let expr = parse_ok(r#"body="1" || header="2" && title="3""#);
        match expr {
            Expr::Or(operands) => {
                assert_eq!(operands[0], keyword("body").contains("1"));
                assert!(matches!(&operands[1], Expr::And(_)));
            }
            other => panic!("expected Or, got {other:?}"),
        }
        assert_eq!(
            parse_ok(r#"body="1" || header="2" && title="3""#),
            parse_ok(r#"body="1" || (header="2" && title="3")"#)
        );
    }

    #[test]
    fn parse_parenthesized_grouping() {
        let expr = parse_ok(r#"(body="1"||header="2")&&title="3""#);
        match expr {
            Expr::And(operands) => {
                assert!(matches!(&operands[0], Expr::Or(_)));
                assert_eq!(operands[1], keyword("title").contains("3"));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn parse_chains_are_flat() {
        let expr = parse_ok(r#"body="a" && body="b" && body="c""#);
        let expected = keyword("body")
            .contains("a")
            .and(keyword("body").contains("b"))
            .and(keyword("body").contains("c"));
        assert_eq!(expr, expected);
        assert!(matches!(expr, Expr::And(ref operands) if operands.len() == 3));
    }

    #[test]
    fn parse_grouped_same_connective_merges() {
        assert_eq!(
            parse_ok(r#"(body="a" || body="b") || body="c""#),
            parse_ok(r#"body="a" || body="b" || body="c""#)
        );
    }

    #[test]
    fn parse_long_chain_stays_shallow() {
        let text = (0..5_000)
            .map(|i| format!("body==\"v{i}\""))
            .collect::<Vec<_>>()
            .join(" && ");
        match parse_ok(&text) {
            Expr::And(operands) => {
                assert_eq!(operands.len(), 5_000);
                assert!(operands.iter().all(|o| matches!(o, Expr::Predicate { .. })));
            }
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn parse_redundant_parentheses() {
        assert_eq!(parse_ok(r#"((body="a"))"#), keyword("body").contains("a"));
    }

    #[test]
    fn parse_all_comparators() {
        let ops = [
            ("=", Comparator::Contains),
            ("==", Comparator::Equal),
            ("!=", Comparator::NotContains),
            ("~=", Comparator::RegexpMatch),
        ];
        for (sym, expected) in ops {
            match parse_ok(&format!("body{sym}\"x\"")) {
                Expr::Predicate { comparator, .. } => {
                    assert_eq!(comparator, expected, "failed for {sym}");
                }
                other => panic!("expected Predicate for {sym}, got {other:?}"),
            }
        }
    }

    #[test]
    fn parse_complex_expression() {
        let expr = parse_ok(
            r#"(body="111"||header="222") && title="333" && body="4444" || title="555555""#,
        );
        match expr {
            Expr::Or(operands) => {
                assert_eq!(operands.len(), 2);
                assert!(matches!(&operands[0], Expr::And(inner) if inner.len() == 3));
                assert_eq!(operands[1], keyword("title").contains("555555"));
            }
            other => panic!("expected Or, got {other:?}"),
        }
    }

    #[test]
    fn empty_rule() {
        assert_eq!(parse_err("   "), (ParseErrorKind::Empty, 0));
    }

    #[test]
    fn missing_connective() {
        assert_eq!(
            parse_err(r#"body="a" title="b""#),
            (ParseErrorKind::MissingConnective, 9)
        );
        assert_eq!(
            parse_err(r#"(body="a") (title="b")"#).0,
            ParseErrorKind::MissingConnective
        );
    }

    #[test]
    fn unclosed_paren() {
        assert_eq!(
            parse_err(r#"(body="a" && title="b""#),
            (ParseErrorKind::UnclosedParen, 0)
        );
    }

    #[test]
    fn unmatched_close_paren() {
        assert_eq!(
            parse_err(r#"body="a")"#),
            (ParseErrorKind::UnmatchedCloseParen, 8)
        );
        assert_eq!(parse_err(")").0, ParseErrorKind::UnmatchedCloseParen);
    }

    #[test]
    fn dangling_connective() {
        let (kind, offset) = parse_err(r#"body="a" &&"#);
        assert!(matches!(kind, ParseErrorKind::UnexpectedEnd { .. }));
        assert_eq!(offset, 11);
    }

    #[test]
    fn leading_connective() {
        let (kind, offset) = parse_err(r#"|| body="a""#);
        assert!(matches!(kind, ParseErrorKind::UnexpectedToken { .. }));
        assert_eq!(offset, 0);
    }

    #[test]
    fn doubled_connective() {
        let (kind, _) = parse_err(r#"body="a" && || title="b""#);
        assert_eq!(
            kind,
            ParseErrorKind::UnexpectedToken {
                found: "||".into(),
                expected: "a predicate or '('",
            }
        );
    }

    #[test]
    fn empty_group() {
        assert_eq!(parse_err("()").0, ParseErrorKind::UnmatchedCloseParen);
    }

    #[test]
    fn nesting_limit() {
        let deep = format!("{}body=\"a\"{}", "(".repeat(5), ")".repeat(5));
        assert!(parse(&deep, &registry(), 5).is_ok());
        let err = parse(&deep, &registry(), 4).unwrap_err();
        assert_eq!(*err.kind(), ParseErrorKind::NestingTooDeep { limit: 4 });
        assert_eq!(err.offset(), 4);
    }
}
