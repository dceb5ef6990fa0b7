//! Schema module: the dataset — columns, declared kinds, and records.
//!
//! Column names are normalized at build time (whitespace becomes `_`) so a
//! compiled expression can reference them as bare identifiers, and every cell
//! is validated against its column's declared kind. Both happen once, here;
//! nothing downstream re-derives them.

use crate::types::{CellValue, ColumnKind};
use crate::FilterError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One dataset column: a normalized, unique name plus its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    kind: ColumnKind,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }
}

/// An immutable in-memory table: ordered columns and row-major records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Dataset {
    columns: Vec<Column>,
    column_ids: HashMap<String, usize>,
    records: Vec<Vec<CellValue>>,
}

impl Dataset {
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get the column ID for a given (normalized) name, if it exists.
    pub fn column_id(&self, name: &str) -> Option<usize> {
        self.column_ids.get(name).copied()
    }

    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.column_id(name).map(|id| self.columns[id].kind)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Vec<CellValue>] {
        &self.records
    }

    pub fn record(&self, row: usize) -> Option<&[CellValue]> {
        self.records.get(row).map(|r| r.as_slice())
    }

    /// Snapshot of the given rows under the same schema. Out-of-range
    /// indices are ignored.
    pub fn subset(&self, rows: &[usize]) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            column_ids: self.column_ids.clone(),
            records: rows
                .iter()
                .filter_map(|&i| self.records.get(i).cloned())
                .collect(),
        }
    }
}

/// Replace whitespace in a column name with underscores so the name is a
/// bare identifier in expressions and display strings.
pub(crate) fn normalize_column_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Builder for [`Dataset`]. Declares columns in order, then appends records;
/// `build` validates record arity and per-column cell kinds.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    columns: Vec<Column>,
    records: Vec<Vec<CellValue>>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a column. The name is normalized; a duplicate normalized name
    /// is rejected at `build` time.
    pub fn column(mut self, name: impl Into<String>, kind: ColumnKind) -> Self {
        self.columns.push(Column {
            name: normalize_column_name(&name.into()),
            kind,
        });
        self
    }

    /// Append one record; cells must be in column order.
    pub fn record(mut self, cells: Vec<CellValue>) -> Self {
        self.records.push(cells);
        self
    }

    pub fn build(self) -> Result<Dataset, FilterError> {
        let mut column_ids = HashMap::new();
        for (id, col) in self.columns.iter().enumerate() {
            if column_ids.insert(col.name.clone(), id).is_some() {
                return Err(FilterError::MalformedDataset(format!(
                    "duplicate column name '{}'",
                    col.name
                )));
            }
        }
        for (row, cells) in self.records.iter().enumerate() {
            if cells.len() != self.columns.len() {
                return Err(FilterError::MalformedDataset(format!(
                    "record {} has {} values, expected {}",
                    row,
                    cells.len(),
                    self.columns.len()
                )));
            }
            for (cell, col) in cells.iter().zip(&self.columns) {
                if cell.kind() != col.kind {
                    return Err(FilterError::MalformedDataset(format!(
                        "record {}: column '{}' is {:?} but holds a {:?} value",
                        row,
                        col.name,
                        col.kind,
                        cell.kind()
                    )));
                }
            }
        }
        Ok(Dataset {
            columns: self.columns,
            column_ids,
            records: self.records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        DatasetBuilder::new()
            .column("pt code", ColumnKind::Text)
            .column("gender", ColumnKind::Text)
            .column("age", ColumnKind::Numeric)
            .record(vec!["n001".into(), "M".into(), 61.into()])
            .record(vec!["n002".into(), "F".into(), 48.into()])
            .build()
            .unwrap()
    }

    #[test]
    fn test_column_registration_and_lookup() {
        let ds = dataset();
        assert_eq!(ds.num_columns(), 3);
        assert_eq!(ds.column_kind("age"), Some(ColumnKind::Numeric));
        assert_eq!(ds.column_kind("gender"), Some(ColumnKind::Text));
        assert_eq!(ds.column_kind("weight"), None);
    }

    #[test]
    fn test_column_name_normalization() {
        let ds = dataset();
        // "pt code" was declared with a space
        assert_eq!(ds.column_id("pt_code"), Some(0));
        assert_eq!(ds.column_id("pt code"), None);
        assert_eq!(normalize_column_name("rest EF"), "rest_EF");
        assert_eq!(normalize_column_name("age"), "age");
    }

    #[test]
    fn test_record_access() {
        let ds = dataset();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.record(1).unwrap()[2], CellValue::Number(48.0));
        assert!(ds.record(5).is_none());
    }

    #[test]
    fn test_subset_keeps_schema() {
        let ds = dataset();
        let sub = ds.subset(&[1, 9]);
        assert_eq!(sub.len(), 1);
        assert_eq!(sub.num_columns(), 3);
        assert_eq!(sub.record(0).unwrap()[0], CellValue::Text("n002".into()));
    }

    #[test]
    fn test_build_rejects_duplicate_columns() {
        let res = DatasetBuilder::new()
            .column("pt code", ColumnKind::Text)
            .column("pt_code", ColumnKind::Numeric)
            .build();
        assert!(matches!(res, Err(FilterError::MalformedDataset(_))));
    }

    #[test]
    fn test_build_rejects_bad_arity() {
        let res = DatasetBuilder::new()
            .column("age", ColumnKind::Numeric)
            .record(vec![61.into(), 48.into()])
            .build();
        assert!(matches!(res, Err(FilterError::MalformedDataset(_))));
    }

    #[test]
    fn test_build_rejects_kind_mismatch() {
        let res = DatasetBuilder::new()
            .column("age", ColumnKind::Numeric)
            .record(vec!["old".into()])
            .build();
        assert!(matches!(res, Err(FilterError::MalformedDataset(_))));
    }

    #[test]
    fn test_serialization_deserialization() {
        let ds = dataset();
        let json = serde_json::to_string(&ds).unwrap();
        let deser: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(ds, deser);
    }
}
