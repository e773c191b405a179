//! Column-oriented table materialization

use gridtable_core::CellValue;

use crate::column::{Column, ElementType};
use crate::iterator::TableRowIterator;
use crate::options::MaterializeOptions;

/// A fully materialized table: equal-length columns plus their labels
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    labels: Vec<String>,
}

impl Table {
    /// Column labels in ordinal order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Columns in ordinal order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column under a label
    pub fn column(&self, label: &str) -> Option<&Column> {
        let position = self.labels.iter().position(|l| l == label)?;
        self.columns.get(position)
    }

    /// Column at a 1-based ordinal
    pub fn column_at(&self, ordinal: usize) -> Option<&Column> {
        self.columns.get(ordinal.checked_sub(1)?)
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Element type of each column
    pub fn element_types(&self) -> Vec<ElementType> {
        self.columns.iter().map(Column::element_type).collect()
    }

    /// Values of a 0-based table row across all columns
    pub fn row(&self, position: usize) -> Option<Vec<CellValue>> {
        self.columns
            .iter()
            .map(|column| column.value(position))
            .collect()
    }

    /// All rows, in order
    pub fn rows(&self) -> impl Iterator<Item = Vec<CellValue>> + '_ {
        (0..self.row_count()).filter_map(move |position| self.row(position))
    }

    /// Split into columns and labels
    pub fn into_parts(self) -> (Vec<Column>, Vec<String>) {
        (self.columns, self.labels)
    }
}

/// Drain `rows` into a column-oriented [`Table`]
///
/// Rows whose table values are all missing are left out unless
/// `options.keep_empty_rows` is set. With `options.infer_types` every column is
/// reified into its inferred element type.
pub fn materialize(rows: TableRowIterator<'_>, options: MaterializeOptions) -> Table {
    let labels = rows.labels().to_vec();
    let mut data: Vec<Vec<CellValue>> = vec![Vec::new(); labels.len()];
    let mut dropped = 0usize;

    for row in rows {
        let mut blank = true;
        for (column, value) in data.iter_mut().zip(row.values()) {
            blank &= value.is_empty();
            column.push(value.clone());
        }
        if blank && !options.keep_empty_rows {
            for column in &mut data {
                column.pop();
            }
            dropped += 1;
        }
    }

    let row_count = data.first().map_or(0, Vec::len);
    log::debug!(
        "materialized {} rows x {} columns ({} blank rows dropped)",
        row_count,
        labels.len(),
        dropped
    );

    let columns = data
        .into_iter()
        .map(|values| {
            if options.infer_types {
                Column::infer(values)
            } else {
                Column::Values(values)
            }
        })
        .collect();

    Table { columns, labels }
}
