//! Cell storage implementation
//!
//! Sparse storage for worksheet cells. Only populated cells are stored, using
//! a row-based BTreeMap structure so rows come out in ascending order.

use std::collections::BTreeMap;

use super::CellValue;
use crate::row::Row;

/// Complete data for a single stored cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellData {
    /// The cell's decoded value
    pub value: CellValue,
    /// Number format index (0 = default format)
    pub format_index: u32,
}

impl CellData {
    /// Create a new cell with a value and default format
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            format_index: 0,
        }
    }

    /// Create a new cell with a value and format
    pub fn with_format(value: CellValue, format_index: u32) -> Self {
        Self {
            value,
            format_index,
        }
    }

    /// Create an empty cell
    pub fn empty() -> Self {
        Self::new(CellValue::Empty)
    }

    /// Check if this cell carries nothing worth storing (no value and default format)
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.format_index == 0
    }
}

impl Default for CellData {
    fn default() -> Self {
        Self::empty()
    }
}

/// Sparse row-based storage for worksheet cells
///
/// Structure: `BTreeMap<row_index, BTreeMap<col_index, CellData>>`, plus
/// row-level settings kept apart from the cells. A row is present in the
/// row sequence when it has either.
#[derive(Debug, Default)]
pub struct CellStorage {
    /// Row index → column map
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,

    /// Rows with custom settings (height, hidden)
    row_settings: BTreeMap<u32, Row>,
}

impl CellStorage {
    /// Create a new empty cell storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell
    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Set a cell
    ///
    /// If the cell data is empty (no value, default format), the cell is removed.
    pub fn set(&mut self, row: u32, col: u16, data: CellData) {
        if data.is_empty() {
            self.remove(row, col);
        } else {
            self.rows.entry(row).or_default().insert(col, data);
        }
    }

    /// Set just the cell value (preserving format)
    pub fn set_value(&mut self, row: u32, col: u16, value: CellValue) {
        let format_index = self.get(row, col).map(|c| c.format_index).unwrap_or(0);
        self.set(row, col, CellData::with_format(value, format_index));
    }

    /// Set just the cell format (preserving value)
    pub fn set_format(&mut self, row: u32, col: u16, format_index: u32) {
        let value = self
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty);
        self.set(row, col, CellData::with_format(value, format_index));
    }

    /// Remove a cell
    pub fn remove(&mut self, row: u32, col: u16) -> Option<CellData> {
        let row_map = self.rows.get_mut(&row)?;
        let result = row_map.remove(&col);

        // Clean up empty rows
        if row_map.is_empty() {
            self.rows.remove(&row);
        }

        result
    }

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if storage holds no cells
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The cells of one row, if it has any
    pub fn row_cells(&self, row: u32) -> Option<&BTreeMap<u16, CellData>> {
        self.rows.get(&row)
    }

    /// The first present row (cells or settings) with index `>= from`
    pub fn next_row_index(&self, from: u32) -> Option<u32> {
        let with_cells = self.rows.range(from..).next().map(|(&row, _)| row);
        let with_settings = self.row_settings.range(from..).next().map(|(&row, _)| row);

        match (with_cells, with_settings) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Row-level settings, if the row has any
    pub fn row_settings(&self, row: u32) -> Option<&Row> {
        self.row_settings.get(&row)
    }

    /// Set custom row height
    pub fn set_row_height(&mut self, row: u32, height: Option<f64>) {
        self.update_row_settings(row, |settings| settings.height = height);
    }

    /// Set row hidden state
    pub fn set_row_hidden(&mut self, row: u32, hidden: bool) {
        self.update_row_settings(row, |settings| settings.hidden = hidden);
    }

    fn update_row_settings<F: FnOnce(&mut Row)>(&mut self, row: u32, update: F) {
        let settings = self.row_settings.entry(row).or_insert_with(|| Row::new(row));
        update(settings);
        if !settings.has_custom_settings() {
            self.row_settings.remove(&row);
        }
    }
}
