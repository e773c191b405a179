//! Table extraction error types

use thiserror::Error;

/// Result type for table operations
pub type TableResult<T> = std::result::Result<T, TableError>;

/// Errors raised while locating, indexing or reading a table
///
/// Every variant describes a caller or data error detected at the call that
/// received the bad input; none is retried or downgraded to a missing value.
#[derive(Debug, Error)]
pub enum TableError {
    /// Column-run detection on a row without the required populated cell
    #[error("Row {} has no populated cell{}", row + 1, column_suffix(*column))]
    EmptyRow {
        /// 0-based row index
        row: u32,
        /// Anchor column that was expected to be populated, if any
        column: Option<u16>,
    },

    /// Auto-detection found no row holding data
    #[error("No table found: the sheet has no row with data")]
    TableNotFound,

    /// The anchor column holds no data anywhere in the sheet
    #[error("Column {} has no data", gridtable_core::CellAddress::column_to_letters(*column))]
    ColumnHasNoData {
        /// 0-based column index
        column: u16,
    },

    /// A header cell inside the column range is missing or blank
    #[error("Header cell {address} is empty")]
    InvalidHeader {
        /// A1-style address of the offending cell
        address: String,
    },

    /// Explicit labels do not match the column range size
    #[error("Expected {expected} column labels, got {actual}")]
    LabelCountMismatch { expected: usize, actual: usize },

    /// Lookup by an unknown column label
    #[error("Unknown column label: {0}")]
    InvalidColumnLabel(String),

    /// The same label appears twice in the index
    #[error("Duplicate column label: {0}")]
    DuplicateColumnLabel(String),

    /// A column range whose start lies after its stop
    #[error("Invalid column range: start {start} is after stop {stop}")]
    InvalidColumnRange { start: u16, stop: u16 },

    /// Lookup by a table-column ordinal outside `1..=len`
    #[error("Column ordinal {ordinal} out of range (table has {len} columns)")]
    ColumnOrdinalOutOfRange { ordinal: usize, len: usize },

    /// Core error (bad column letters, address out of bounds)
    #[error("Core error: {0}")]
    Core(#[from] gridtable_core::Error),
}

fn column_suffix(column: Option<u16>) -> String {
    column
        .map(|col| {
            format!(
                " at column {}",
                gridtable_core::CellAddress::column_to_letters(col)
            )
        })
        .unwrap_or_default()
}
