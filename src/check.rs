//! Check module: decides whether an operand is legal against a column's
//! declared kind, and how it must be quoted in the compiled expression.

use crate::types::ColumnKind;
use crate::FilterError;
use serde::{Deserialize, Serialize};

/// How an operand is rendered inside a compiled term: bare for numeric
/// comparisons, double-quoted for string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quoting {
    None,
    Double,
}

/// Numeric test for an operand: strip at most one `.`, then require a
/// non-empty all-digit remainder.
///
/// This classifies integers and simple decimals as numeric but not negative
/// numbers (a leading `-` is not a digit) and not multi-dot strings. The
/// rule is intentional and load-bearing; see the quirks covered in tests.
pub fn operand_is_numeric(operand: &str) -> bool {
    let stripped = operand.replacen('.', "", 1);
    !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit())
}

/// Check one operand against a column kind.
///
/// A numeric operand cannot compare against text data, and a non-numeric
/// operand cannot compare against numeric data; everything else passes with
/// the quoting the operand's shape demands.
pub fn check_operand(operand: &str, kind: ColumnKind) -> Result<Quoting, FilterError> {
    match (operand_is_numeric(operand), kind) {
        (true, ColumnKind::Text) => Err(FilterError::NumericOperandAgainstTextColumn),
        (false, ColumnKind::Numeric) => Err(FilterError::TextOperandAgainstNumericColumn),
        (true, ColumnKind::Numeric) => Ok(Quoting::None),
        (false, ColumnKind::Text) => Ok(Quoting::Double),
    }
}
