//! Per-row table view

use std::iter::FusedIterator;
use std::slice;
use std::sync::Arc;

use gridtable_core::{CellValue, SheetRow};

use crate::error::{TableError, TableResult};
use crate::index::Index;

/// One row of a table, restricted to the table's columns
///
/// Values are addressed by 1-based column ordinal or by label. The row
/// borrows the sheet and shares the table's [`Index`].
#[derive(Debug, Clone)]
pub struct TableRow<'s> {
    index: Arc<Index>,
    row: SheetRow<'s>,
    ordinal: usize,
}

impl<'s> TableRow<'s> {
    pub(crate) fn new(index: Arc<Index>, row: SheetRow<'s>, ordinal: usize) -> Self {
        Self {
            index,
            row,
            ordinal,
        }
    }

    /// 1-based table-row ordinal
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// 0-based physical row number in the sheet
    pub fn sheet_row_number(&self) -> u32 {
        self.row.index()
    }

    /// The underlying sheet row
    pub fn sheet_row(&self) -> SheetRow<'s> {
        self.row
    }

    /// The table's column index
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Column labels in ordinal order
    pub fn labels(&self) -> &[String] {
        self.index.labels()
    }

    /// Number of table columns
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Check if every value of the row is missing
    pub fn is_blank(&self) -> bool {
        self.values().all(CellValue::is_empty)
    }

    /// Value at a 1-based column ordinal
    pub fn get(&self, ordinal: usize) -> TableResult<&'s CellValue> {
        let col = self
            .index
            .physical_column(ordinal)
            .ok_or(TableError::ColumnOrdinalOutOfRange {
                ordinal,
                len: self.index.len(),
            })?;
        Ok(self.row.value(col))
    }

    /// Value under a column label
    pub fn get_by_label(&self, label: &str) -> TableResult<&'s CellValue> {
        let ordinal = self
            .index
            .ordinal(label)
            .ok_or_else(|| TableError::InvalidColumnLabel(label.to_string()))?;
        self.get(ordinal)
    }

    /// Values in column-ordinal order
    pub fn values(&self) -> TableRowValues<'s, '_> {
        TableRowValues {
            row: self.row,
            columns: self.index.column_map().iter(),
        }
    }
}

/// Iterator over a [`TableRow`]'s values, see [`TableRow::values`]
#[derive(Debug, Clone)]
pub struct TableRowValues<'s, 'r> {
    row: SheetRow<'s>,
    columns: slice::Iter<'r, u16>,
}

impl<'s> Iterator for TableRowValues<'s, '_> {
    type Item = &'s CellValue;

    fn next(&mut self) -> Option<Self::Item> {
        self.columns.next().map(|&col| self.row.value(col))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.columns.size_hint()
    }
}

impl ExactSizeIterator for TableRowValues<'_, '_> {}

impl FusedIterator for TableRowValues<'_, '_> {}
