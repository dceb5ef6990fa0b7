//! View module: the single-writer "current view" holder the embedding UI
//! reads from.
//!
//! Exactly one current view exists at a time. It is written only by
//! [`DataView::compile_and_apply`] and [`DataView::reset_filter`]; statistics
//! and plotting collaborators read it through [`DataView::current`]. A failed
//! filter attempt leaves the view exactly as it was.

use crate::compiler::{compile, FilterRow};
use crate::executor::execute;
use crate::schema::Dataset;
use crate::FilterError;
use log::debug;
use serde::{Deserialize, Serialize};

/// Overall outcome class of one filter attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyStatus {
    /// Every active row compiled and the filter was applied.
    Success,
    /// The filter was applied from the valid rows, but at least one row was
    /// invalid.
    PartialSuccess,
    /// No filter could be applied; the prior view is retained.
    Failure,
}

/// What one call to [`DataView::compile_and_apply`] produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutcome {
    pub status: ApplyStatus,
    /// Blocking error on failure; non-fatal notice otherwise
    /// ([`FilterError::AtLeastOneInvalidCriterion`] or
    /// [`FilterError::EmptyResult`]).
    pub error_kind: Option<FilterError>,
    /// Records in the view after this attempt.
    pub row_count: usize,
    /// Human-readable expression for the view after this attempt, if any
    /// filter is in effect.
    pub display_expression: Option<String>,
}

impl ApplyOutcome {
    /// Status-bar text for this outcome.
    pub fn status_text(&self) -> String {
        match &self.error_kind {
            Some(err) => err.to_string(),
            None => format!("{} record(s) shown.", self.row_count),
        }
    }
}

/// Owner of the full dataset and the one mutable filtered view over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataView {
    full: Dataset,
    current: Dataset,
    summary: Option<String>,
}

impl DataView {
    /// Start with the full dataset as the current view.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            current: dataset.clone(),
            full: dataset,
            summary: None,
        }
    }

    /// The view readers (statistics, plots) should display right now.
    pub fn current(&self) -> &Dataset {
        &self.current
    }

    /// The complete, unfiltered dataset.
    pub fn full(&self) -> &Dataset {
        &self.full
    }

    /// Display form of the filter currently in effect, if any.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Title for a plot of the current view.
    pub fn plot_title(&self) -> String {
        match &self.summary {
            Some(summary) => format!("{} (n = {})", summary, self.current.len()),
            None => format!("all data (n = {})", self.current.len()),
        }
    }

    /// Compile the filter rows and, when anything valid came out of them,
    /// replace the current view with the matching subset.
    ///
    /// The replacement is atomic from the caller's perspective: on any
    /// failure the previous view and summary stay untouched and the outcome
    /// reports why.
    pub fn compile_and_apply(&mut self, rows: &[FilterRow]) -> ApplyOutcome {
        let compilation = match compile(rows, &self.full) {
            Ok(c) => c,
            Err(err) => return self.failure(err),
        };
        let result = match execute(&self.full, &compilation.expression) {
            Ok(r) => r,
            Err(err) => return self.failure(err),
        };

        self.current = result.table;
        self.summary = Some(result.summary);

        let (status, error_kind) = match compilation.notice() {
            Some(notice) => (ApplyStatus::PartialSuccess, Some(notice)),
            None if result.row_count == 0 => (ApplyStatus::Success, Some(FilterError::EmptyResult)),
            None => (ApplyStatus::Success, None),
        };
        ApplyOutcome {
            status,
            error_kind,
            row_count: result.row_count,
            display_expression: self.summary.clone(),
        }
    }

    /// Reset the view to the full dataset and clear the stored summary.
    pub fn reset_filter(&mut self) -> &Dataset {
        debug!("resetting view to full dataset ({} record(s))", self.full.len());
        self.current = self.full.clone();
        self.summary = None;
        &self.current
    }

    fn failure(&self, err: FilterError) -> ApplyOutcome {
        debug!("filter attempt failed: {err}");
        ApplyOutcome {
            status: ApplyStatus::Failure,
            error_kind: Some(err),
            row_count: self.current.len(),
            display_expression: self.summary.clone(),
        }
    }
}
