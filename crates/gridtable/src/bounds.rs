//! Column-run detection on a single sheet row
//!
//! "Populated" means a cell is stored at the column, even if it holds the
//! missing marker. [`contiguous_data_end`] is the stricter variant used by
//! table auto-detection, where only non-missing values count.

use gridtable_core::SheetRow;

use crate::error::{TableError, TableResult};

/// The first and last populated columns of a row
///
/// Fails with [`TableError::EmptyRow`] when the row has no populated cell.
pub fn column_bounds(row: &SheetRow<'_>) -> TableResult<(u16, u16)> {
    let mut columns = row.columns();
    let first = columns.next().ok_or(TableError::EmptyRow {
        row: row.index(),
        column: None,
    })?;
    let last = columns.last().unwrap_or(first);
    Ok((first, last))
}

/// The last column of the gap-free run of populated cells starting at `anchor`
///
/// Returns `anchor` itself when the next populated column is not adjacent.
/// Fails with [`TableError::EmptyRow`] when `anchor` is not populated.
pub fn contiguous_run_end(row: &SheetRow<'_>, anchor: u16) -> TableResult<u16> {
    if !row.is_populated(anchor) {
        return Err(TableError::EmptyRow {
            row: row.index(),
            column: Some(anchor),
        });
    }
    Ok(run_end(row.columns(), anchor))
}

/// Like [`contiguous_run_end`], but the run breaks at the first missing value
pub fn contiguous_data_end(row: &SheetRow<'_>, anchor: u16) -> TableResult<u16> {
    if !row.has_data(anchor) {
        return Err(TableError::EmptyRow {
            row: row.index(),
            column: Some(anchor),
        });
    }
    Ok(run_end(row.data_columns(), anchor))
}

fn run_end(columns: impl Iterator<Item = u16>, anchor: u16) -> u16 {
    let mut end = anchor;
    for col in columns.skip_while(|&col| col <= anchor) {
        if col != end + 1 {
            break;
        }
        end = col;
    }
    end
}
