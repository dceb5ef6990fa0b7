//! Executor module: evaluates a compiled expression against the dataset and
//! produces a filtered snapshot.
//!
//! Evaluation is a linear scan; a record passes when every term in the
//! conjunction matches. Failures are error values, never panics, so the
//! caller can keep its previously displayed view.

use crate::compiler::{CompiledTerm, FilterExpression, TermOperand};
use crate::criterion::ComparisonOp;
use crate::schema::Dataset;
use crate::types::CellValue;
use crate::FilterError;
use log::debug;
use serde::{Deserialize, Serialize};

/// The dataset subset matching a filter, with its display summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterResult {
    pub table: Dataset,
    pub row_count: usize,
    /// The expression rendered for humans (`==` shown as `=`).
    pub summary: String,
}

impl FilterResult {
    /// Title for a plot of this subset: the summary plus the match count.
    pub fn plot_title(&self) -> String {
        format!("{} (n = {})", self.summary, self.row_count)
    }

    /// Zero matches. Not an error; the caller surfaces "No data found."
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

fn compare_numbers(op: ComparisonOp, a: f64, b: f64) -> bool {
    match op {
        ComparisonOp::Eq => a == b,
        ComparisonOp::Neq => a != b,
        ComparisonOp::Lt => a < b,
        ComparisonOp::Lte => a <= b,
        ComparisonOp::Gt => a > b,
        ComparisonOp::Gte => a >= b,
    }
}

fn compare_text(op: ComparisonOp, a: &str, b: &str) -> bool {
    match op {
        ComparisonOp::Eq => a == b,
        ComparisonOp::Neq => a != b,
        ComparisonOp::Lt => a < b,
        ComparisonOp::Lte => a <= b,
        ComparisonOp::Gt => a > b,
        ComparisonOp::Gte => a >= b,
    }
}

fn term_matches(term: &CompiledTerm, record: &[CellValue]) -> Result<bool, FilterError> {
    let cell = record.get(term.column_id()).ok_or_else(|| {
        FilterError::Evaluation(format!(
            "column '{}' (id {}) out of range for record",
            term.column(),
            term.column_id()
        ))
    })?;
    // Kind mismatches cannot survive dataset validation plus compilation,
    // but a mismatched cell must not take the filter down with it.
    Ok(match (cell, term.operand()) {
        (CellValue::Number(a), TermOperand::Number(b)) => compare_numbers(term.op(), *a, *b),
        (CellValue::Text(a), TermOperand::Text(b)) => compare_text(term.op(), a, b),
        _ => false,
    })
}

/// Evaluate the conjunction against every record, returning the matching
/// subset as a same-schema snapshot. An empty subset is a valid result.
pub fn execute(dataset: &Dataset, expression: &FilterExpression) -> Result<FilterResult, FilterError> {
    if expression.is_empty() {
        return Err(FilterError::Evaluation("empty expression".into()));
    }
    let mut matching = Vec::new();
    for (row, record) in dataset.records().iter().enumerate() {
        let mut keep = true;
        for term in expression.terms() {
            if !term_matches(term, record)? {
                keep = false;
                break;
            }
        }
        if keep {
            matching.push(row);
        }
    }
    let result = FilterResult {
        table: dataset.subset(&matching),
        row_count: matching.len(),
        summary: expression.to_string(),
    };
    debug!(
        "filter '{}' matched {} of {} record(s)",
        result.summary,
        result.row_count,
        dataset.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{compile, FilterRow};
    use crate::schema::DatasetBuilder;
    use crate::types::ColumnKind;

    fn dataset() -> Dataset {
        DatasetBuilder::new()
            .column("pt code", ColumnKind::Text)
            .column("gender", ColumnKind::Text)
            .column("age", ColumnKind::Numeric)
            .column("rest EF", ColumnKind::Numeric)
            .record(vec!["n001".into(), "M".into(), 61.into(), 55.into()])
            .record(vec!["n002".into(), "F".into(), 48.into(), 71.into()])
            .record(vec!["n003".into(), "M".into(), 55.into(), 62.into()])
            .record(vec!["n004".into(), "F".into(), 72.into(), 58.into()])
            .build()
            .unwrap()
    }

    fn run(rows: &[FilterRow]) -> FilterResult {
        let ds = dataset();
        let c = compile(rows, &ds).unwrap();
        execute(&ds, &c.expression).unwrap()
    }

    #[test]
    fn test_numeric_range_filter() {
        let result = run(&[FilterRow::new("age", ">=55")]);
        assert_eq!(result.row_count, 3);
        assert_eq!(result.summary, "age>=55");
        assert_eq!(result.table.len(), 3);
    }

    #[test]
    fn test_text_equality_filter() {
        let result = run(&[FilterRow::new("gender", "M")]);
        assert_eq!(result.row_count, 2);
        assert_eq!(result.summary, "gender=\"M\"");
    }

    #[test]
    fn test_text_inequality_filter() {
        let result = run(&[FilterRow::new("gender", "!F")]);
        assert_eq!(result.row_count, 2);
        assert_eq!(result.summary, "gender!=\"F\"");
    }

    #[test]
    fn test_conjunction() {
        let result = run(&[
            FilterRow::new("gender", "=M"),
            FilterRow::new("age", ">55"),
        ]);
        assert_eq!(result.row_count, 1);
        assert_eq!(
            result.table.record(0).unwrap()[0],
            CellValue::Text("n001".into())
        );
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let result = run(&[FilterRow::new("age", ">200")]);
        assert!(result.is_empty());
        assert_eq!(result.row_count, 0);
        assert_eq!(result.table.num_columns(), 4);
    }

    #[test]
    fn test_lexicographic_text_comparison() {
        // Ordered operators on text columns compare lexicographically.
        let result = run(&[FilterRow::new("pt_code", ">n002")]);
        assert_eq!(result.row_count, 2);
    }

    #[test]
    fn test_fractional_threshold() {
        let ds = DatasetBuilder::new()
            .column("strain", ColumnKind::Numeric)
            .record(vec![CellValue::Number(-18.2)])
            .record(vec![CellValue::Number(-12.7)])
            .build()
            .unwrap();
        let c = compile(&[FilterRow::new("strain", "<=15.0")], &ds).unwrap();
        let result = execute(&ds, &c.expression).unwrap();
        assert_eq!(result.row_count, 2);
    }

    #[test]
    fn test_plot_title() {
        let result = run(&[FilterRow::new("age", ">=55")]);
        assert_eq!(result.plot_title(), "age>=55 (n = 3)");
    }

    #[test]
    fn test_execute_is_idempotent() {
        let ds = dataset();
        let rows = [FilterRow::new("age", ">=55")];
        let c = compile(&rows, &ds).unwrap();
        let a = execute(&ds, &c.expression).unwrap();
        let b = execute(&ds, &c.expression).unwrap();
        assert_eq!(a, b);
    }
}
