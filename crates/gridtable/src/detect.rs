//! Table boundary detection
//!
//! When no column range is given, the table is anchored at the first row
//! holding data: its first non-missing column starts the range and the
//! gap-free run of data to its right ends it.

use std::fmt;

use gridtable_core::{CellAddress, Worksheet};

use crate::bounds::contiguous_data_end;
use crate::error::{TableError, TableResult};
use crate::range::ColumnRange;

/// Where a table sits on a sheet: its first row and its column range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLocation {
    /// 0-based index of the table's first row (the header row, if any)
    pub first_row: u32,
    /// Physical columns of the table
    pub columns: ColumnRange,
}

impl fmt::Display for TableLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            CellAddress::new(self.first_row, self.columns.start())
        )?;
        if self.columns.len() > 1 {
            write!(
                f,
                ":{}",
                CellAddress::column_to_letters(self.columns.stop())
            )?;
        }
        Ok(())
    }
}

/// Locate the first table at or below `min_row` (default: the first row)
///
/// Fails with [`TableError::TableNotFound`] if no row from `min_row` on holds
/// a non-missing value.
pub fn detect_table(sheet: &Worksheet, min_row: Option<u32>) -> TableResult<TableLocation> {
    let from = min_row.unwrap_or(0);

    for row in sheet.rows_from(from) {
        let Some(start) = row.data_columns().next() else {
            log::trace!("row {} has no data, skipping", row.index() + 1);
            continue;
        };

        let stop = contiguous_data_end(&row, start)?;
        let location = TableLocation {
            first_row: row.index(),
            columns: ColumnRange::new(start, stop)?,
        };
        log::debug!(
            "detected table in '{}' at row {} columns {}",
            sheet.name(),
            location.first_row + 1,
            location.columns
        );
        return Ok(location);
    }

    log::debug!(
        "no table found in '{}' from row {}",
        sheet.name(),
        from + 1
    );
    Err(TableError::TableNotFound)
}

/// The first row holding a non-missing value at `column`
///
/// Fails with [`TableError::ColumnHasNoData`] if the column is empty throughout.
pub fn first_row_with_data(sheet: &Worksheet, column: u16) -> TableResult<u32> {
    sheet
        .rows()
        .find(|row| row.has_data(column))
        .map(|row| row.index())
        .ok_or(TableError::ColumnHasNoData { column })
}
