//! Selector expression parser and matcher.
//!
//! Selectors pick nodes out of a tree. Predicates combine with boolean
//! operators (`and`, `or`, `not`) and parentheses for grouping.
//!
//! ## Grammar
//!
//! ```text
//! <expr>       := <term> (("and" | "or") <term>)*
//! <term>       := ["not"] <factor>
//! <factor>     := <predicate> | "(" <expr> ")"
//! <predicate>  := key ":" value | key "~" regex | key comparator value
//! ```
//!
//! Whitespace is insignificant around keywords and operators.
//!
//! ## Examples
//!
//! ```text
//! kind:int                        # Simple predicate
//! kind:int and value>10           # Conjunction
//! kind:float and value > 30       # Same, spaced comparator
//! label:items or label:extras     # Disjunction
//! not kind:branch                 # Negation
//! (kind:int or kind:float) and value<=3.5
//! text~"^item_[0-9]+$"            # Regex on text leaves
//! ```
//!
//! Validation is front-loaded: unknown keys, operator/key mismatches, and
//! bad regexes or numbers fail at parse time, so matching never errors.

use thiserror::Error;
use winnow::ascii::multispace0;
use winnow::combinator::{alt, delimited, opt, preceded, repeat};
use winnow::error::{ErrMode, ParserError};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};
use winnow::ModalResult;

use super::predicate::{PredError, Predicate, RawOp};
use crate::node::Node;

/// Error type for selector parsing.
#[derive(Debug, Error)]
pub enum SelectError {
    /// Invalid selector syntax.
    #[error("invalid selector '{input}': {message}")]
    InvalidExpression { input: String, message: String },

    /// Predicate validation error.
    #[error(transparent)]
    Predicate(#[from] PredError),
}

/// A selector expression combining predicates with boolean operators.
#[derive(Debug, Clone)]
pub enum SelectExpr {
    /// Conjunction (all must match).
    And(Vec<SelectExpr>),
    /// Disjunction (any must match).
    Or(Vec<SelectExpr>),
    /// Negation.
    Not(Box<SelectExpr>),
    /// A single predicate.
    Pred(Predicate),
}

impl SelectExpr {
    /// Test a node against this expression. Infallible: everything that
    /// can go wrong went wrong at parse time.
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            SelectExpr::And(exprs) => exprs.iter().all(|e| e.matches(node)),
            SelectExpr::Or(exprs) => exprs.iter().any(|e| e.matches(node)),
            SelectExpr::Not(expr) => !expr.matches(node),
            SelectExpr::Pred(pred) => pred.matches(node),
        }
    }
}

/// Parse a selector expression from a string.
pub fn parse_select_expr(input: &str) -> Result<SelectExpr, SelectError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SelectError::InvalidExpression {
            input: input.to_string(),
            message: "empty selector".to_string(),
        });
    }

    let raw = parse_expr
        .parse(input)
        .map_err(|e| SelectError::InvalidExpression {
            input: input.to_string(),
            message: format!("{:?}", e),
        })?;

    compile(raw).map_err(SelectError::from)
}

// ============================================================================
// Raw tree and predicate compilation
// ============================================================================

/// Uncompiled expression: predicates still carry their raw strings.
/// Splitting grammar from validation keeps the validation errors specific.
enum RawExpr {
    And(Vec<RawExpr>),
    Or(Vec<RawExpr>),
    Not(Box<RawExpr>),
    Pred {
        key: String,
        op: RawOp,
        value: String,
    },
}

fn compile(raw: RawExpr) -> Result<SelectExpr, PredError> {
    match raw {
        RawExpr::And(exprs) => Ok(SelectExpr::And(
            exprs.into_iter().map(compile).collect::<Result<_, _>>()?,
        )),
        RawExpr::Or(exprs) => Ok(SelectExpr::Or(
            exprs.into_iter().map(compile).collect::<Result<_, _>>()?,
        )),
        RawExpr::Not(expr) => Ok(SelectExpr::Not(Box::new(compile(*expr)?))),
        RawExpr::Pred { key, op, value } => {
            Predicate::build(&key, op, &value).map(SelectExpr::Pred)
        }
    }
}

// ============================================================================
// Parser implementation using winnow
// ============================================================================

/// Parse the top-level expression (handles 'or' at lowest precedence).
fn parse_expr(input: &mut &str) -> ModalResult<RawExpr> {
    let first = parse_and_expr(input)?;

    let rest: Vec<RawExpr> = repeat(
        0..,
        preceded((multispace0, parse_or_keyword, multispace0), parse_and_expr),
    )
    .parse_next(input)?;

    if rest.is_empty() {
        Ok(first)
    } else {
        let mut all = vec![first];
        all.extend(rest);
        Ok(RawExpr::Or(all))
    }
}

/// Parse an 'and' expression (higher precedence than 'or').
fn parse_and_expr(input: &mut &str) -> ModalResult<RawExpr> {
    let first = parse_term(input)?;

    let rest: Vec<RawExpr> = repeat(
        0..,
        preceded((multispace0, parse_and_keyword, multispace0), parse_term),
    )
    .parse_next(input)?;

    if rest.is_empty() {
        Ok(first)
    } else {
        let mut all = vec![first];
        all.extend(rest);
        Ok(RawExpr::And(all))
    }
}

/// Parse a term (handles 'not' prefix).
fn parse_term(input: &mut &str) -> ModalResult<RawExpr> {
    let _ = multispace0.parse_next(input)?;

    let negated = opt((parse_not_keyword, multispace0))
        .parse_next(input)?
        .is_some();

    let factor = parse_factor(input)?;

    if negated {
        Ok(RawExpr::Not(Box::new(factor)))
    } else {
        Ok(factor)
    }
}

/// Parse a factor (predicate or parenthesized expression).
fn parse_factor(input: &mut &str) -> ModalResult<RawExpr> {
    let _ = multispace0.parse_next(input)?;

    alt((
        delimited(('(', multispace0), parse_expr, (multispace0, ')')),
        parse_predicate,
    ))
    .parse_next(input)
}

/// Parse a predicate triple; validation happens in [`compile`].
/// Whitespace may surround the operator (`value > 30` and `value>30`
/// are the same predicate).
fn parse_predicate(input: &mut &str) -> ModalResult<RawExpr> {
    let _ = multispace0.parse_next(input)?;

    let key: &str =
        take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)?;

    let op = delimited(multispace0, parse_operator, multispace0).parse_next(input)?;
    let value = parse_value(input)?;

    Ok(RawExpr::Pred {
        key: key.to_string(),
        op,
        value,
    })
}

/// Parse an operator. Two-character operators first.
fn parse_operator(input: &mut &str) -> ModalResult<RawOp> {
    alt((
        ">=".map(|_| RawOp::Gte),
        "<=".map(|_| RawOp::Lte),
        "!=".map(|_| RawOp::Neq),
        ">".map(|_| RawOp::Gt),
        "<".map(|_| RawOp::Lt),
        "=".map(|_| RawOp::Eq),
        ":".map(|_| RawOp::Colon),
        "~".map(|_| RawOp::Match),
    ))
    .parse_next(input)
}

/// Parse a value (quoted or unquoted).
fn parse_value(input: &mut &str) -> ModalResult<String> {
    alt((parse_double_quoted, parse_single_quoted, parse_unquoted)).parse_next(input)
}

/// Parse a double-quoted string.
fn parse_double_quoted(input: &mut &str) -> ModalResult<String> {
    delimited('"', take_till(0.., |c| c == '"'), '"')
        .map(|s: &str| s.to_string())
        .parse_next(input)
}

/// Parse a single-quoted string.
fn parse_single_quoted(input: &mut &str) -> ModalResult<String> {
    delimited('\'', take_till(0.., |c| c == '\''), '\'')
        .map(|s: &str| s.to_string())
        .parse_next(input)
}

/// Parse an unquoted value (stops at whitespace or parens).
fn parse_unquoted(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |c: char| !c.is_whitespace() && c != ')' && c != '(')
        .map(|s: &str| s.to_string())
        .parse_next(input)
}

/// Parse the 'and' keyword (case-insensitive).
fn parse_and_keyword(input: &mut &str) -> ModalResult<()> {
    let checkpoint = *input;
    let word: &str = take_while(1.., |c: char| c.is_alphabetic()).parse_next(input)?;

    if word.eq_ignore_ascii_case("and") {
        Ok(())
    } else {
        *input = checkpoint;
        Err(ErrMode::from_input(input))
    }
}

/// Parse the 'or' keyword (case-insensitive).
fn parse_or_keyword(input: &mut &str) -> ModalResult<()> {
    let checkpoint = *input;
    let word: &str = take_while(1.., |c: char| c.is_alphabetic()).parse_next(input)?;

    if word.eq_ignore_ascii_case("or") {
        Ok(())
    } else {
        *input = checkpoint;
        Err(ErrMode::from_input(input))
    }
}

/// Parse the 'not' keyword (case-insensitive).
fn parse_not_keyword(input: &mut &str) -> ModalResult<()> {
    let checkpoint = *input;
    let word: &str = take_while(1.., |c: char| c.is_alphabetic()).parse_next(input)?;

    if word.eq_ignore_ascii_case("not") {
        // Must be followed by whitespace or '(' so "nothing" stays a key.
        if input.is_empty() || input.starts_with(char::is_whitespace) || input.starts_with('(') {
            Ok(())
        } else {
            *input = checkpoint;
            Err(ErrMode::from_input(input))
        }
    } else {
        *input = checkpoint;
        Err(ErrMode::from_input(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    // =========================================================================
    // Parse Tests
    // =========================================================================

    #[test]
    fn parse_simple_predicate() {
        let expr = parse_select_expr("kind:int").unwrap();
        match expr {
            SelectExpr::Pred(Predicate::KindIs(kind)) => assert_eq!(kind, NodeKind::Int),
            other => panic!("expected kind predicate, got {:?}", other),
        }
    }

    #[test]
    fn parse_comparison_predicate() {
        let expr = parse_select_expr("value>10").unwrap();
        match expr {
            SelectExpr::Pred(Predicate::ValueCmp { rhs, .. }) => assert_eq!(rhs, 10.0),
            other => panic!("expected value predicate, got {:?}", other),
        }
    }

    #[test]
    fn parse_and_expression() {
        let expr = parse_select_expr("kind:int and value>10").unwrap();
        match expr {
            SelectExpr::And(exprs) => assert_eq!(exprs.len(), 2),
            other => panic!("expected And, got {:?}", other),
        }
    }

    #[test]
    fn parse_or_expression() {
        let expr = parse_select_expr("kind:int or kind:float").unwrap();
        match expr {
            SelectExpr::Or(exprs) => assert_eq!(exprs.len(), 2),
            other => panic!("expected Or, got {:?}", other),
        }
    }

    #[test]
    fn parse_not_expression() {
        let expr = parse_select_expr("not kind:branch").unwrap();
        match expr {
            SelectExpr::Not(inner) => match *inner {
                SelectExpr::Pred(Predicate::KindIs(kind)) => {
                    assert_eq!(kind, NodeKind::Branch)
                }
                other => panic!("expected predicate inside Not, got {:?}", other),
            },
            other => panic!("expected Not, got {:?}", other),
        }
    }

    #[test]
    fn parse_nested_parentheses() {
        let expr = parse_select_expr("(kind:int or kind:float) and value<=3.5").unwrap();
        match expr {
            SelectExpr::And(exprs) => {
                assert_eq!(exprs.len(), 2);
                match &exprs[0] {
                    SelectExpr::Or(or_exprs) => assert_eq!(or_exprs.len(), 2),
                    other => panic!("expected Or as first element, got {:?}", other),
                }
            }
            other => panic!("expected And, got {:?}", other),
        }
    }

    #[test]
    fn parse_case_insensitive_keywords() {
        assert!(matches!(
            parse_select_expr("kind:int AND value>1").unwrap(),
            SelectExpr::And(_)
        ));
        assert!(matches!(
            parse_select_expr("kind:int OR kind:bool").unwrap(),
            SelectExpr::Or(_)
        ));
        assert!(matches!(
            parse_select_expr("NOT kind:bool").unwrap(),
            SelectExpr::Not(_)
        ));
    }

    #[test]
    fn parse_spaced_comparison_predicate() {
        let expr = parse_select_expr("kind:float and value > 30").unwrap();
        match expr {
            SelectExpr::And(exprs) => assert_eq!(exprs.len(), 2),
            other => panic!("expected And, got {:?}", other),
        }

        let expr = parse_select_expr("value >= 2.5").unwrap();
        assert!(expr.matches(&Node::leaf(3.0f64)));
        assert!(!expr.matches(&Node::leaf(2.0f64)));

        // Colon and regex operators take the same padding.
        let expr = parse_select_expr("label : items").unwrap();
        assert!(expr.matches(&Node::branch("items")));
    }

    #[test]
    fn parse_quoted_value_keeps_spaces() {
        let expr = parse_select_expr("text:\"hello world\"").unwrap();
        match expr {
            SelectExpr::Pred(Predicate::TextEq(text)) => assert_eq!(text, "hello world"),
            other => panic!("expected text predicate, got {:?}", other),
        }
    }

    #[test]
    fn parse_empty_selector_error() {
        let err = parse_select_expr("   ").unwrap_err();
        match err {
            SelectError::InvalidExpression { message, .. } => {
                assert!(message.contains("empty"))
            }
            other => panic!("expected InvalidExpression, got {:?}", other),
        }
    }

    #[test]
    fn parse_unknown_key_is_a_predicate_error() {
        let err = parse_select_expr("ext:py").unwrap_err();
        assert!(matches!(
            err,
            SelectError::Predicate(PredError::UnknownKey { .. })
        ));
    }

    #[test]
    fn parse_trailing_garbage_is_rejected() {
        assert!(parse_select_expr("kind:int )").is_err());
    }

    // =========================================================================
    // Match Tests
    // =========================================================================

    #[test]
    fn and_requires_every_predicate() {
        let expr = parse_select_expr("kind:int and value>10").unwrap();
        assert!(expr.matches(&Node::leaf(11i64)));
        assert!(!expr.matches(&Node::leaf(9i64)));
        assert!(!expr.matches(&Node::leaf(11.0f64)));
    }

    #[test]
    fn or_requires_any_predicate() {
        let expr = parse_select_expr("kind:bool or value>10").unwrap();
        assert!(expr.matches(&Node::leaf(true)));
        assert!(expr.matches(&Node::leaf(11i64)));
        assert!(!expr.matches(&Node::leaf(2i64)));
    }

    #[test]
    fn not_inverts() {
        let expr = parse_select_expr("not kind:branch").unwrap();
        assert!(expr.matches(&Node::leaf(1i64)));
        assert!(!expr.matches(&Node::branch("b")));
    }
}
