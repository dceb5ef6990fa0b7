//! Compiler module: turns a set of (column, criterion) filter rows into a
//! single conjunctive expression.
//!
//! Compilation is row-by-row and never aborts early: a bad row is recorded
//! and the remaining rows still contribute terms. Only when no row at all
//! yields a term does the whole attempt fail, with the single most specific
//! blocking error.

use crate::check::{check_operand, Quoting};
use crate::criterion::{parse_criterion, ComparisonOp};
use crate::schema::Dataset;
use crate::FilterError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One filter row as the UI hands it over: a column selection and the raw
/// criterion text, either of which may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRow {
    pub column: String,
    pub criterion: String,
}

impl FilterRow {
    pub fn new(column: impl Into<String>, criterion: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            criterion: criterion.into(),
        }
    }

    /// Both parts empty: an intentionally unused row, skipped without error.
    pub fn is_blank(&self) -> bool {
        self.column.is_empty() && self.criterion.is_empty()
    }
}

/// A type-coerced operand, ready for evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TermOperand {
    Number(f64),
    Text(String),
}

/// One column's fully compiled, type-checked comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledTerm {
    column: String,
    column_id: usize,
    op: ComparisonOp,
    operand: TermOperand,
    /// Operand exactly as typed, for display fidelity (`055` stays `055`).
    literal: String,
}

impl CompiledTerm {
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn column_id(&self) -> usize {
        self.column_id
    }

    pub fn op(&self) -> ComparisonOp {
        self.op
    }

    pub fn operand(&self) -> &TermOperand {
        &self.operand
    }
}

impl fmt::Display for CompiledTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operand {
            TermOperand::Number(_) => {
                write!(f, "{}{}{}", self.column, self.op.display_symbol(), self.literal)
            }
            TermOperand::Text(_) => {
                write!(f, "{}{}\"{}\"", self.column, self.op.display_symbol(), self.literal)
            }
        }
    }
}

/// Ordered conjunction of compiled terms. Terms keep the row order they were
/// entered in; there is no reordering or per-column de-duplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterExpression {
    terms: Vec<CompiledTerm>,
}

impl FilterExpression {
    pub fn terms(&self) -> &[CompiledTerm] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" & ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

/// Successful compilation: the expression plus any per-row errors that were
/// tolerated because other rows still produced terms.
#[derive(Debug, Clone, PartialEq)]
pub struct Compilation {
    pub expression: FilterExpression,
    /// Rows that were fully entered but failed to compile.
    pub row_errors: Vec<(usize, FilterError)>,
    /// Rows with only one of column/criterion filled in. These behave like
    /// unused rows while any term compiles, and only surface their error
    /// when nothing does.
    pub incomplete_rows: Vec<(usize, FilterError)>,
}

impl Compilation {
    /// Non-fatal notice for the caller when the filter is only partial.
    pub fn notice(&self) -> Option<FilterError> {
        if self.row_errors.is_empty() {
            None
        } else {
            Some(FilterError::AtLeastOneInvalidCriterion)
        }
    }
}

/// Ranking used to pick the single blocking error when no term compiled:
/// type mismatches beat a missing criterion, which beats a missing or
/// unknown column.
fn specificity(err: &FilterError) -> u8 {
    match err {
        FilterError::NumericOperandAgainstTextColumn
        | FilterError::TextOperandAgainstNumericColumn => 3,
        FilterError::CriterionNotSpecified => 2,
        FilterError::ColumnNotSpecified | FilterError::ColumnNotFound(_) => 1,
        _ => 0,
    }
}

/// Compile the active filter rows against a dataset.
///
/// Blank rows are skipped and half-specified rows set aside; malformed or
/// type-incompatible rows are recorded as row errors. None of these stop
/// compilation. If at least one term compiled the expression is returned
/// (check [`Compilation::notice`] for the partial case); otherwise the most
/// specific blocking error is returned, or [`FilterError::NoFilterDefined`]
/// when every row was blank.
pub fn compile(rows: &[FilterRow], dataset: &Dataset) -> Result<Compilation, FilterError> {
    let mut terms = Vec::new();
    let mut row_errors: Vec<(usize, FilterError)> = Vec::new();
    let mut incomplete_rows: Vec<(usize, FilterError)> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        if row.is_blank() {
            continue;
        }
        if row.column.is_empty() {
            incomplete_rows.push((i, FilterError::ColumnNotSpecified));
            continue;
        }
        if row.criterion.is_empty() {
            incomplete_rows.push((i, FilterError::CriterionNotSpecified));
            continue;
        }

        let parsed = parse_criterion(&row.criterion);
        if parsed.operand.is_empty() {
            // An operator with nothing after it, e.g. a lone `!`.
            row_errors.push((i, FilterError::CriterionNotSpecified));
            continue;
        }

        let Some(column_id) = dataset.column_id(&row.column) else {
            row_errors.push((i, FilterError::ColumnNotFound(row.column.clone())));
            continue;
        };
        let kind = dataset.columns()[column_id].kind();

        match check_operand(&parsed.operand, kind) {
            Err(err) => row_errors.push((i, err)),
            Ok(quoting) => {
                let operand = match quoting {
                    Quoting::None => match parsed.operand.parse::<f64>() {
                        Ok(n) => TermOperand::Number(n),
                        Err(_) => {
                            row_errors.push((i, FilterError::TextOperandAgainstNumericColumn));
                            continue;
                        }
                    },
                    Quoting::Double => TermOperand::Text(parsed.operand.clone()),
                };
                terms.push(CompiledTerm {
                    column: row.column.clone(),
                    column_id,
                    op: parsed.op,
                    operand,
                    literal: parsed.operand,
                });
            }
        }
    }

    if terms.is_empty() {
        let blocking = row_errors
            .into_iter()
            .chain(incomplete_rows)
            .max_by_key(|(i, err)| (specificity(err), std::cmp::Reverse(*i)))
            .map(|(_, err)| err)
            .unwrap_or(FilterError::NoFilterDefined);
        return Err(blocking);
    }

    let compilation = Compilation {
        expression: FilterExpression { terms },
        row_errors,
        incomplete_rows,
    };
    debug!(
        "compiled filter expression: {} ({} invalid row(s))",
        compilation.expression,
        compilation.row_errors.len()
    );
    Ok(compilation)
}
