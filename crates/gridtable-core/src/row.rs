//! Row types

use std::collections::BTreeMap;
use std::iter::FusedIterator;

use crate::cell::{CellData, CellStorage, CellValue};

static MISSING: CellValue = CellValue::Empty;

/// Row-level settings
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Row index (0-based)
    pub index: u32,
    /// Custom height (None = default)
    pub height: Option<f64>,
    /// Row is hidden
    pub hidden: bool,
}

impl Row {
    /// Create a new row with default settings
    pub fn new(index: u32) -> Self {
        Self {
            index,
            height: None,
            hidden: false,
        }
    }

    /// Check if this row has any custom settings
    pub fn has_custom_settings(&self) -> bool {
        self.height.is_some() || self.hidden
    }
}

/// A read-only view of one row of a worksheet
///
/// A row can be present in the row sequence without any populated cell (for
/// example a row that only carries a custom height), and a populated cell can
/// still hold the missing marker (a formatted blank).
#[derive(Debug, Clone, Copy)]
pub struct SheetRow<'a> {
    index: u32,
    cells: Option<&'a BTreeMap<u16, CellData>>,
}

impl<'a> SheetRow<'a> {
    pub(crate) fn new(index: u32, cells: Option<&'a BTreeMap<u16, CellData>>) -> Self {
        Self { index, cells }
    }

    /// Row index (0-based physical row number)
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Check if the row has no populated cell
    pub fn is_empty(&self) -> bool {
        self.cells.map_or(true, |cells| cells.is_empty())
    }

    /// Number of populated cells
    pub fn cell_count(&self) -> usize {
        self.cells.map_or(0, |cells| cells.len())
    }

    /// Populated column indices, ascending
    pub fn columns(&self) -> impl Iterator<Item = u16> + 'a {
        self.cells.into_iter().flat_map(|cells| cells.keys().copied())
    }

    /// Column indices holding a non-missing value, ascending
    pub fn data_columns(&self) -> impl Iterator<Item = u16> + 'a {
        self.cells()
            .filter(|(_, cell)| !cell.value.is_empty())
            .map(|(col, _)| col)
    }

    /// Populated cells with their column index, ascending
    pub fn cells(&self) -> impl Iterator<Item = (u16, &'a CellData)> + 'a {
        self.cells
            .into_iter()
            .flat_map(|cells| cells.iter().map(|(&col, data)| (col, data)))
    }

    /// Get a cell by column index
    pub fn cell(&self, col: u16) -> Option<&'a CellData> {
        self.cells.and_then(|cells| cells.get(&col))
    }

    /// Check if a cell is stored at the column
    pub fn is_populated(&self, col: u16) -> bool {
        self.cell(col).is_some()
    }

    /// Check if the column holds a non-missing value
    pub fn has_data(&self, col: u16) -> bool {
        !self.value(col).is_empty()
    }

    /// The value at a column, or the missing marker when absent
    pub fn value(&self, col: u16) -> &'a CellValue {
        self.cell(col).map_or(&MISSING, |cell| &cell.value)
    }
}

/// Iterator over the present rows of a worksheet, ascending by index
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    storage: &'a CellStorage,
    next: Option<u32>,
}

impl<'a> Rows<'a> {
    pub(crate) fn new(storage: &'a CellStorage, from: u32) -> Self {
        Self {
            storage,
            next: Some(from),
        }
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = SheetRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.storage.next_row_index(self.next?);
        let Some(index) = index else {
            self.next = None;
            return None;
        };

        self.next = index.checked_add(1);
        Some(SheetRow::new(index, self.storage.row_cells(index)))
    }
}

impl FusedIterator for Rows<'_> {}
