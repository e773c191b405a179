//! Worksheet type

use crate::cell::{CellAddress, CellData, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::row::{Row, Rows, SheetRow};
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet: a named, sparse grid of cells
#[derive(Debug)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: CellStorage,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    /// Build a worksheet from row-major values, starting at cell A1
    ///
    /// [`CellValue::Empty`] entries leave the cell unpopulated.
    pub fn from_rows<I, R, V>(name: &str, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut sheet = Self::new(name);
        for (row, values) in rows.into_iter().enumerate() {
            let row = u32::try_from(row).map_err(|_| Error::RowOutOfBounds(u32::MAX, MAX_ROWS - 1))?;
            for (col, value) in values.into_iter().enumerate() {
                let col = u16::try_from(col)
                    .map_err(|_| Error::ColumnOutOfBounds(u32::MAX, MAX_COLS - 1))?;
                sheet.set_cell_value_at(row, col, value)?;
            }
        }
        Ok(sheet)
    }

    /// Get the worksheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    /// Get cell value (convenience method)
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty)
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    /// Set a cell's number format index by address string
    ///
    /// A non-default format on a cell without a value leaves a formatted
    /// blank: the cell is populated but holds the missing marker.
    pub fn set_cell_format(&mut self, address: &str, format_index: u32) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_format_at(addr.row, addr.col, format_index)
    }

    /// Set a cell's number format index by row and column indices
    pub fn set_cell_format_at(&mut self, row: u32, col: u16, format_index: u32) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set_format(row, col, format_index);
        Ok(())
    }

    // === Row Access ===

    /// A view of one row; the row may be empty
    pub fn row(&self, index: u32) -> SheetRow<'_> {
        SheetRow::new(index, self.cells.row_cells(index))
    }

    /// The first present row with index `>= from`
    pub fn next_row(&self, from: u32) -> Option<SheetRow<'_>> {
        self.cells
            .next_row_index(from)
            .map(|index| self.row(index))
    }

    /// Iterate over all present rows in ascending order
    pub fn rows(&self) -> Rows<'_> {
        self.rows_from(0)
    }

    /// Iterate over present rows with index `>= from` in ascending order
    pub fn rows_from(&self, from: u32) -> Rows<'_> {
        Rows::new(&self.cells, from)
    }

    /// Row-level settings, if the row has any
    pub fn row_settings(&self, row: u32) -> Option<&Row> {
        self.cells.row_settings(row)
    }

    /// Set a custom row height (None restores the default)
    pub fn set_row_height(&mut self, row: u32, height: Option<f64>) {
        self.cells.set_row_height(row, height);
    }

    /// Set row hidden state
    pub fn set_row_hidden(&mut self, row: u32, hidden: bool) {
        self.cells.set_row_hidden(row, hidden);
    }

    /// Validate cell position
    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col as u32, MAX_COLS - 1));
        }
        Ok(())
    }

    /// Get the number of populated cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if the worksheet has no populated cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
