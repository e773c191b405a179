//! # gridtable
//!
//! Extract labeled, column-oriented tables from sparse spreadsheet grids.
//!
//! A table is a rectangular region of a [`Worksheet`]: a header row holding
//! column labels, then data rows until a blank row, a row-number gap or a
//! caller-supplied stop predicate ends it.
//!
//! ## Features
//!
//! - Auto-detect a table's first row and column range
//! - Stream rows lazily with a restartable, immutable iteration state
//! - Access values by 1-based column ordinal or by label
//! - Materialize into columns, optionally typed by inference
//!
//! ## Example
//!
//! ```rust
//! use gridtable::prelude::*;
//!
//! let mut sheet = Worksheet::new("Stock");
//! sheet.set_cell_value("B2", "sku").unwrap();
//! sheet.set_cell_value("C2", "qty").unwrap();
//! sheet.set_cell_value("B3", "a1").unwrap();
//! sheet.set_cell_value("C3", 4).unwrap();
//!
//! for row in sheet.table_rows(TableSource::detect(), TableOptions::default()).unwrap() {
//!     assert_eq!(row.get_by_label("qty").unwrap(), &CellValue::Int(4));
//! }
//!
//! let table = sheet
//!     .table(TableSource::detect(), TableOptions::default(), MaterializeOptions::default())
//!     .unwrap();
//! assert_eq!(table.row_count(), 1);
//! ```

pub mod bounds;
pub mod column;
pub mod detect;
pub mod error;
pub mod index;
pub mod iterator;
pub mod options;
pub mod prelude;
pub mod range;
pub mod row;
pub mod table;

pub use bounds::{column_bounds, contiguous_data_end, contiguous_run_end};
pub use column::{infer_element_type, Column, ElementType, TypedValues};
pub use detect::{detect_table, first_row_with_data, TableLocation};
pub use error::{TableError, TableResult};
pub use index::{normalize_label, Index};
pub use iterator::{TableRowIterator, TableRowIteratorState};
pub use options::{MaterializeOptions, StopPredicate, TableOptions, TableSource};
pub use range::ColumnRange;
pub use row::{TableRow, TableRowValues};
pub use table::{materialize, Table};

// Re-export core types
pub use gridtable_core::{
    CellAddress, CellData, CellError, CellValue, SharedString, SheetRow, ValueKind,
    Worksheet,
};

/// Create a row iterator over a table of `sheet`
pub fn table_rows(
    sheet: &Worksheet,
    source: TableSource,
    options: TableOptions,
) -> TableResult<TableRowIterator<'_>> {
    TableRowIterator::new(sheet, source, options)
}

/// Extension trait for Worksheet to read tables
pub trait WorksheetTableExt {
    /// Locate the first table at or below `min_row`
    fn locate_table(&self, min_row: Option<u32>) -> TableResult<TableLocation>;

    /// Iterate a table's rows
    fn table_rows(
        &self,
        source: TableSource,
        options: TableOptions,
    ) -> TableResult<TableRowIterator<'_>>;

    /// Read a whole table into columns
    fn table(
        &self,
        source: TableSource,
        options: TableOptions,
        materialize: MaterializeOptions,
    ) -> TableResult<Table>;
}

impl WorksheetTableExt for Worksheet {
    fn locate_table(&self, min_row: Option<u32>) -> TableResult<TableLocation> {
        detect_table(self, min_row)
    }

    fn table_rows(
        &self,
        source: TableSource,
        options: TableOptions,
    ) -> TableResult<TableRowIterator<'_>> {
        TableRowIterator::new(self, source, options)
    }

    fn table(
        &self,
        source: TableSource,
        options: TableOptions,
        materialize_options: MaterializeOptions,
    ) -> TableResult<Table> {
        let rows = TableRowIterator::new(self, source, options)?;
        Ok(materialize(rows, materialize_options))
    }
}
