//! Criterion module: parses one free-text criterion string into an operator
//! and operand.
//!
//! The micro-grammar is deliberately forgiving. A leading `!`, `=`, `>` or
//! `<` (optionally followed by `=`) names the operator; anything else is
//! literal equality over the whole input, so a user can type `male` instead
//! of `=male`. Parsing is total: every input yields a [`ParsedCriterion`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator governing how an operand compares to a column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl ComparisonOp {
    /// Canonical operator symbol as it appears in a compiled expression.
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "==",
            ComparisonOp::Neq => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Lte => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Gte => ">=",
        }
    }

    /// Symbol used in status text and plot titles: `==` renders as `=`.
    pub fn display_symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            other => other.symbol(),
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A criterion string split into operator and the literal operand tail.
/// The operand is not yet type-coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCriterion {
    pub op: ComparisonOp,
    pub operand: String,
}

/// Parse one raw criterion string. Never fails: input that starts with no
/// operator character becomes an exact match against the full text.
pub fn parse_criterion(raw: &str) -> ParsedCriterion {
    let bytes = raw.as_bytes();
    let (op, rest) = match bytes.first() {
        Some(c1 @ (b'!' | b'=' | b'>' | b'<')) => {
            if bytes.get(1) == Some(&b'=') {
                let op = match c1 {
                    b'!' => ComparisonOp::Neq,
                    b'=' => ComparisonOp::Eq,
                    b'>' => ComparisonOp::Gte,
                    _ => ComparisonOp::Lte,
                };
                (op, &raw[2..])
            } else {
                let op = match c1 {
                    b'!' => ComparisonOp::Neq,
                    b'=' => ComparisonOp::Eq,
                    b'>' => ComparisonOp::Gt,
                    _ => ComparisonOp::Lt,
                };
                (op, &raw[1..])
            }
        }
        _ => (ComparisonOp::Eq, raw),
    };
    ParsedCriterion {
        op,
        operand: rest.to_string(),
    }
}
