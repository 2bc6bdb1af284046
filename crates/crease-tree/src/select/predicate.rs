//! Selector predicates: compiled single-node tests.
//!
//! A predicate is built from a raw `key op value` triple at parse time;
//! validation (known key, operator fit, regex compilation, numeric value)
//! happens there, so matching is infallible. A predicate that does not
//! apply to a node, say a `value` comparison against a branch, is simply
//! false.

use regex::Regex;
use thiserror::Error;

use crate::node::{Node, NodeKind, Value};

/// Error from predicate validation.
#[derive(Debug, Error)]
pub enum PredError {
    #[error("unknown key '{key}' (expected kind, label, text, or value)")]
    UnknownKey { key: String },

    #[error("operator '{op}' does not apply to key '{key}'")]
    BadOperator { key: String, op: String },

    #[error("'{value}' is not a valid {expected}")]
    BadValue {
        value: String,
        expected: &'static str,
    },

    #[error("invalid regex '{pattern}': {source}")]
    BadRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Surface operator token, as written in the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RawOp {
    /// `:`, equality (the default operator).
    Colon,
    /// `~`, regex match.
    Match,
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl RawOp {
    fn token(&self) -> &'static str {
        match self {
            RawOp::Colon => ":",
            RawOp::Match => "~",
            RawOp::Eq => "=",
            RawOp::Neq => "!=",
            RawOp::Gt => ">",
            RawOp::Lt => "<",
            RawOp::Gte => ">=",
            RawOp::Lte => "<=",
        }
    }
}

/// Numeric comparison for `value` predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CmpOp {
    fn holds(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            CmpOp::Eq => lhs == rhs,
            CmpOp::Neq => lhs != rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Lte => lhs <= rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Gte => lhs >= rhs,
        }
    }
}

/// A compiled predicate.
#[derive(Debug, Clone)]
pub enum Predicate {
    KindIs(NodeKind),
    KindIsNot(NodeKind),
    LabelEq(String),
    LabelNeq(String),
    LabelMatches(Regex),
    TextEq(String),
    TextNeq(String),
    TextMatches(Regex),
    ValueCmp { op: CmpOp, rhs: f64 },
}

impl Predicate {
    /// Validate a raw `key op value` triple into a compiled predicate.
    pub(crate) fn build(key: &str, op: RawOp, value: &str) -> Result<Predicate, PredError> {
        let bad_operator = || PredError::BadOperator {
            key: key.to_string(),
            op: op.token().to_string(),
        };

        match key {
            "kind" => {
                let kind = NodeKind::parse(value).ok_or_else(|| PredError::BadValue {
                    value: value.to_string(),
                    expected: "node kind",
                })?;
                match op {
                    RawOp::Colon | RawOp::Eq => Ok(Predicate::KindIs(kind)),
                    RawOp::Neq => Ok(Predicate::KindIsNot(kind)),
                    _ => Err(bad_operator()),
                }
            }
            "label" | "text" => {
                let textual = |eq: fn(String) -> Predicate,
                               neq: fn(String) -> Predicate,
                               re: fn(Regex) -> Predicate|
                 -> Result<Predicate, PredError> {
                    match op {
                        RawOp::Colon | RawOp::Eq => Ok(eq(value.to_string())),
                        RawOp::Neq => Ok(neq(value.to_string())),
                        RawOp::Match => {
                            let regex = Regex::new(value).map_err(|source| PredError::BadRegex {
                                pattern: value.to_string(),
                                source,
                            })?;
                            Ok(re(regex))
                        }
                        _ => Err(bad_operator()),
                    }
                };
                if key == "label" {
                    textual(
                        Predicate::LabelEq,
                        Predicate::LabelNeq,
                        Predicate::LabelMatches,
                    )
                } else {
                    textual(
                        Predicate::TextEq,
                        Predicate::TextNeq,
                        Predicate::TextMatches,
                    )
                }
            }
            "value" => {
                let rhs: f64 = value.parse().map_err(|_| PredError::BadValue {
                    value: value.to_string(),
                    expected: "number",
                })?;
                let cmp = match op {
                    RawOp::Colon | RawOp::Eq => CmpOp::Eq,
                    RawOp::Neq => CmpOp::Neq,
                    RawOp::Gt => CmpOp::Gt,
                    RawOp::Lt => CmpOp::Lt,
                    RawOp::Gte => CmpOp::Gte,
                    RawOp::Lte => CmpOp::Lte,
                    RawOp::Match => return Err(bad_operator()),
                };
                Ok(Predicate::ValueCmp { op: cmp, rhs })
            }
            _ => Err(PredError::UnknownKey {
                key: key.to_string(),
            }),
        }
    }

    /// Test a node. Non-applicable predicates are false, not errors.
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Predicate::KindIs(kind) => node.kind() == *kind,
            Predicate::KindIsNot(kind) => node.kind() != *kind,
            Predicate::LabelEq(want) => node.label() == Some(want.as_str()),
            Predicate::LabelNeq(want) => {
                node.label().is_some_and(|label| label != want.as_str())
            }
            Predicate::LabelMatches(regex) => {
                node.label().is_some_and(|label| regex.is_match(label))
            }
            Predicate::TextEq(want) => {
                node.value().and_then(Value::as_text) == Some(want.as_str())
            }
            Predicate::TextNeq(want) => node
                .value()
                .and_then(Value::as_text)
                .is_some_and(|text| text != want.as_str()),
            Predicate::TextMatches(regex) => node
                .value()
                .and_then(Value::as_text)
                .is_some_and(|text| regex.is_match(text)),
            Predicate::ValueCmp { op, rhs } => node
                .value()
                .and_then(Value::as_numeric)
                .is_some_and(|lhs| op.holds(lhs, *rhs)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
