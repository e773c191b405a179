//! Table extraction options

use std::fmt;
use std::sync::Arc;

use crate::range::ColumnRange;
use crate::row::TableRow;

/// Caller-supplied stop predicate, evaluated on each candidate row before the
/// empty-row checks. Returning `true` ends the table without yielding the row.
pub type StopPredicate = Arc<dyn Fn(&TableRow<'_>) -> bool + Send + Sync>;

/// How the table's location is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    /// Explicit column range; without `first_row` the table starts at the
    /// first row holding data in the range's first column
    Columns {
        columns: ColumnRange,
        first_row: Option<u32>,
    },
    /// Auto-detect the table at or below `min_row`
    Detect { min_row: Option<u32> },
}

impl TableSource {
    /// Explicit column range, first row found from the data
    pub fn columns(columns: ColumnRange) -> Self {
        TableSource::Columns {
            columns,
            first_row: None,
        }
    }

    /// Explicit column range and first row (0-based)
    pub fn at(columns: ColumnRange, first_row: u32) -> Self {
        TableSource::Columns {
            columns,
            first_row: Some(first_row),
        }
    }

    /// Auto-detect from the top of the sheet
    pub fn detect() -> Self {
        TableSource::Detect { min_row: None }
    }

    /// Auto-detect at or below `min_row` (0-based)
    pub fn detect_from(min_row: u32) -> Self {
        TableSource::Detect {
            min_row: Some(min_row),
        }
    }
}

impl Default for TableSource {
    fn default() -> Self {
        Self::detect()
    }
}

/// Options for reading a table's rows
#[derive(Clone)]
pub struct TableOptions {
    /// The table's first row holds the column labels (default: true)
    pub header: bool,
    /// Explicit labels, one per column; replaces the header values
    pub labels: Option<Vec<String>>,
    /// End the table at the first blank row or row-number gap (default: true)
    pub stop_on_empty_row: bool,
    /// Optional predicate ending the table early
    pub stop_in_row: Option<StopPredicate>,
    /// Rewrite header labels into identifier form (default: false)
    pub normalize_labels: bool,
}

impl TableOptions {
    /// Set the stop predicate
    pub fn with_stop_in_row<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&TableRow<'_>) -> bool + Send + Sync + 'static,
    {
        self.stop_in_row = Some(Arc::new(predicate));
        self
    }

    /// Set explicit labels
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            header: true,
            labels: None,
            stop_on_empty_row: true,
            stop_in_row: None,
            normalize_labels: false,
        }
    }
}

impl fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("header", &self.header)
            .field("labels", &self.labels)
            .field("stop_on_empty_row", &self.stop_on_empty_row)
            .field("stop_in_row", &self.stop_in_row.as_ref().map(|_| "<predicate>"))
            .field("normalize_labels", &self.normalize_labels)
            .finish()
    }
}

/// Options for materializing a table
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterializeOptions {
    /// Reify each column into a typed vector of its inferred element type
    pub infer_types: bool,
    /// Keep rows whose values are all missing (dropped by default)
    pub keep_empty_rows: bool,
}
