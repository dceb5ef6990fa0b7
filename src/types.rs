//! Types module: column kinds and cell values for the filter engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared kind of a dataset column, fixed once the dataset is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Text,
}

/// One stored cell. Numeric cells are `f64` so integer measurements (age,
/// ejection fraction) and fractional ones (strain) share a kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn kind(&self) -> ColumnKind {
        match self {
            CellValue::Number(_) => ColumnKind::Numeric,
            CellValue::Text(_) => ColumnKind::Text,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_kind() {
        assert_eq!(CellValue::Number(55.0).kind(), ColumnKind::Numeric);
        assert_eq!(CellValue::Text("M".into()).kind(), ColumnKind::Text);
    }

    #[test]
    fn test_cell_value_accessors() {
        assert_eq!(CellValue::Number(5.5).as_number(), Some(5.5));
        assert_eq!(CellValue::Number(5.5).as_text(), None);
        assert_eq!(CellValue::Text("F".into()).as_text(), Some("F"));
        assert_eq!(CellValue::Text("F".into()).as_number(), None);
    }

    #[test]
    fn test_cell_value_from_conversions() {
        assert_eq!(CellValue::from(42i64), CellValue::Number(42.0));
        assert_eq!(CellValue::from("abc"), CellValue::Text("abc".into()));
    }

    #[test]
    fn test_serialization_deserialization() {
        let val = CellValue::Text("male".into());
        let json = serde_json::to_string(&val).unwrap();
        let deser: CellValue = serde_json::from_str(&json).unwrap();
        assert_eq!(val, deser);
    }
}
