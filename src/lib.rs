//! Tablesift: an embeddable criterion-filter engine for in-memory tabular data.
//!
//! The engine takes free-text per-column filter criteria as a user would type
//! them into a viewer UI (`>=55`, `=M`, `!F`, or a bare literal like `male`),
//! validates them against the column kinds of a loaded dataset, combines the
//! valid ones into a single conjunctive expression, and evaluates that
//! expression against the table.
//!
//! # Architecture
//! - Dataset definition (columns/kinds/records)
//! - Criterion parsing (operator + operand)
//! - Operand/column type-compatibility checking
//! - Compilation to an ordered conjunction of terms
//! - Execution against the in-memory records
//! - A single-writer "current view" holder for the embedding UI

mod types;
mod schema;
mod criterion;
mod check;
mod compiler;
mod executor;
mod view;

pub use types::*;
pub use schema::*;
pub use criterion::*;
pub use check::*;
pub use compiler::*;
pub use executor::*;
pub use view::*;

use thiserror::Error;

/// Unified error type for tablesift operations.
///
/// Every variant is recoverable and carries the exact status-bar message the
/// embedding UI shows for it. Parsing and type-checking never panic; they
/// classify and return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FilterError {
    /// A row has criterion text but no column chosen.
    #[error("Data item not specified.")]
    ColumnNotSpecified,
    /// A row has a column chosen but no usable criterion value.
    #[error("Filter criterion not specified.")]
    CriterionNotSpecified,
    /// A numeric-looking operand was entered against a text column.
    #[error("Can't compare numeric filter to string data.")]
    NumericOperandAgainstTextColumn,
    /// A text operand was entered against a numeric column.
    #[error("Can't compare filter string to numeric data.")]
    TextOperandAgainstNumericColumn,
    /// Some rows compiled, at least one did not. Non-fatal: the partial
    /// filter from the valid rows is still applied.
    #[error("At least one invalid filter criterion.")]
    AtLeastOneInvalidCriterion,
    /// Every row was blank.
    #[error("No filter defined.")]
    NoFilterDefined,
    /// A valid filter matched zero records. Non-fatal: the empty view is
    /// still the applied result.
    #[error("No data found.")]
    EmptyResult,
    /// The named column does not exist in the dataset.
    #[error("Unknown data item: {0}")]
    ColumnNotFound(String),
    /// A dataset failed construction-time validation.
    #[error("Malformed dataset: {0}")]
    MalformedDataset(String),
    /// Expression evaluation failed; the previous view is retained.
    #[error("Filter evaluation failed: {0}")]
    Evaluation(String),
}
