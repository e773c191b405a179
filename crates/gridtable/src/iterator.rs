//! Table row iteration
//!
//! A [`TableRowIterator`] walks the sheet's present rows from the first data
//! row and ends the table at the first row that fails a stop rule. Each step
//! is a pure function of an immutable [`TableRowIteratorState`], so a state
//! can be kept and stepped again to replay the table from that point.

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use gridtable_core::{SheetRow, Worksheet};

use crate::detect::{detect_table, first_row_with_data, TableLocation};
use crate::error::TableResult;
use crate::index::Index;
use crate::options::{StopPredicate, TableOptions, TableSource};
use crate::row::TableRow;

/// Snapshot of the iteration between two steps
#[derive(Debug, Clone, Copy)]
pub struct TableRowIteratorState<'s> {
    candidate: Option<SheetRow<'s>>,
    table_row: usize,
    last_row: Option<u32>,
}

impl<'s> TableRowIteratorState<'s> {
    /// Ordinal the next yielded row will carry
    pub fn table_row(&self) -> usize {
        self.table_row
    }

    /// Sheet row of the last yielded row
    pub fn last_row(&self) -> Option<u32> {
        self.last_row
    }

    /// Sheet row that the next step will examine
    pub fn candidate_row(&self) -> Option<u32> {
        self.candidate.map(|row| row.index())
    }

    /// Check if the underlying rows are used up
    pub fn is_exhausted(&self) -> bool {
        self.candidate.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Predicate,
    RowGap { expected: u32 },
    EmptyRow,
    BlankColumns,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Predicate => write!(f, "stop predicate matched"),
            StopReason::RowGap { expected } => write!(f, "expected row {}", u64::from(*expected) + 1),
            StopReason::EmptyRow => write!(f, "row has no cells"),
            StopReason::BlankColumns => write!(f, "all table columns are missing"),
        }
    }
}

/// Iterator over the rows of one table
///
/// Created by [`TableRowIterator::new`] or
/// [`WorksheetTableExt::table_rows`](crate::WorksheetTableExt::table_rows).
/// Rows are yielded in sheet order with ordinals `1, 2, ...`; the iterator is
/// fused once a stop rule fires.
#[derive(Clone)]
pub struct TableRowIterator<'s> {
    sheet: &'s Worksheet,
    index: Arc<Index>,
    location: TableLocation,
    first_data_row: u32,
    stop_on_empty_row: bool,
    stop_in_row: Option<StopPredicate>,
    state: Option<TableRowIteratorState<'s>>,
}

impl<'s> TableRowIterator<'s> {
    /// Resolve the table's location and index and position before its first
    /// data row
    pub fn new(sheet: &'s Worksheet, source: TableSource, options: TableOptions) -> TableResult<Self> {
        let location = match source {
            TableSource::Columns { columns, first_row } => {
                let first_row = match first_row {
                    Some(row) => row,
                    None => first_row_with_data(sheet, columns.start())?,
                };
                TableLocation { first_row, columns }
            }
            TableSource::Detect { min_row } => detect_table(sheet, min_row)?,
        };

        let index = match options.labels {
            Some(labels) => Index::new(location.columns, labels)?,
            None if options.header => Index::from_header(
                &sheet.row(location.first_row),
                location.columns,
                options.normalize_labels,
            )?,
            None => Index::from_column_letters(location.columns),
        };

        let first_data_row = if options.header {
            location.first_row.saturating_add(1)
        } else {
            location.first_row
        };

        log::debug!(
            "table at {} in '{}': {} columns, data from row {}",
            location,
            sheet.name(),
            index.len(),
            first_data_row as u64 + 1
        );

        let mut iter = Self {
            sheet,
            index: Arc::new(index),
            location,
            first_data_row,
            stop_on_empty_row: options.stop_on_empty_row,
            stop_in_row: options.stop_in_row,
            state: None,
        };
        iter.state = Some(iter.start());
        Ok(iter)
    }

    /// The table's column index
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Column labels in ordinal order
    pub fn labels(&self) -> &[String] {
        self.index.labels()
    }

    /// Where the table sits on the sheet
    pub fn location(&self) -> TableLocation {
        self.location
    }

    /// 0-based sheet row of the first data row
    pub fn first_data_row(&self) -> u32 {
        self.first_data_row
    }

    /// Current state, `None` once the table has ended
    pub fn state(&self) -> Option<&TableRowIteratorState<'s>> {
        self.state.as_ref()
    }

    /// State positioned before the first data row
    ///
    /// If the first data row is not present in the sheet the state is already
    /// exhausted and the table is empty.
    pub fn start(&self) -> TableRowIteratorState<'s> {
        let candidate = self
            .sheet
            .next_row(self.first_data_row)
            .filter(|row| row.index() == self.first_data_row);
        if candidate.is_none() {
            log::debug!(
                "first data row {} is not present, table is empty",
                self.first_data_row as u64 + 1
            );
        }
        TableRowIteratorState {
            candidate,
            table_row: 1,
            last_row: None,
        }
    }

    /// Examine the candidate row of `state`
    ///
    /// Returns the row and the state after it, or `None` when the table ends
    /// at this step. `state` itself is left untouched.
    pub fn step(
        &self,
        state: &TableRowIteratorState<'s>,
    ) -> Option<(TableRow<'s>, TableRowIteratorState<'s>)> {
        let Some(sheet_row) = state.candidate else {
            log::debug!(
                "table ended after {} rows: no more rows",
                state.table_row - 1
            );
            return None;
        };

        let row = TableRow::new(Arc::clone(&self.index), sheet_row, state.table_row);
        if let Some(reason) = self.stop_reason(&row, state) {
            log::debug!(
                "table ended at sheet row {} after {} rows: {}",
                sheet_row.index() as u64 + 1,
                state.table_row - 1,
                reason
            );
            return None;
        }

        let next = TableRowIteratorState {
            candidate: sheet_row
                .index()
                .checked_add(1)
                .and_then(|from| self.sheet.next_row(from)),
            table_row: state.table_row + 1,
            last_row: Some(sheet_row.index()),
        };
        Some((row, next))
    }

    fn stop_reason(
        &self,
        row: &TableRow<'s>,
        state: &TableRowIteratorState<'s>,
    ) -> Option<StopReason> {
        if let Some(predicate) = &self.stop_in_row {
            if predicate(row) {
                return Some(StopReason::Predicate);
            }
        }

        if !self.stop_on_empty_row {
            return None;
        }

        let sheet_row = row.sheet_row();
        let index = sheet_row.index();
        if index != self.first_data_row {
            let expected = state.last_row.map_or(self.first_data_row, |last| last + 1);
            if index != expected {
                return Some(StopReason::RowGap { expected });
            }
        }

        if sheet_row.is_empty() {
            return Some(StopReason::EmptyRow);
        }

        if row.is_blank() {
            return Some(StopReason::BlankColumns);
        }

        None
    }
}

impl<'s> Iterator for TableRowIterator<'s> {
    type Item = TableRow<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.state.take()?;
        let (row, next) = self.step(&state)?;
        self.state = Some(next);
        Some(row)
    }
}

impl FusedIterator for TableRowIterator<'_> {}

impl fmt::Debug for TableRowIterator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableRowIterator")
            .field("sheet", &self.sheet.name())
            .field("location", &self.location)
            .field("labels", &self.index.labels())
            .field("first_data_row", &self.first_data_row)
            .field("stop_on_empty_row", &self.stop_on_empty_row)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::ColumnRange;
    use gridtable_core::CellValue;
    use pretty_assertions::assert_eq;

    fn people() -> Worksheet {
        let mut sheet = Worksheet::new("People");
        sheet.set_cell_value("B2", "id").unwrap();
        sheet.set_cell_value("C2", "name").unwrap();
        for (row, name) in [(3, "ann"), (4, "bob"), (5, "cy")] {
            sheet
                .set_cell_value(&format!("B{row}"), row as i64 - 2)
                .unwrap();
            sheet.set_cell_value(&format!("C{row}"), name).unwrap();
        }
        sheet
    }

    #[test]
    fn test_rows_and_ordinals() {
        let sheet = people();
        let rows: Vec<_> = TableRowIterator::new(&sheet, TableSource::detect(), TableOptions::default())
            .unwrap()
            .map(|row| (row.ordinal(), row.sheet_row_number(), row.get(2).unwrap().to_string()))
            .collect();

        assert_eq!(
            rows,
            vec![
                (1, 2, "ann".to_string()),
                (2, 3, "bob".to_string()),
                (3, 4, "cy".to_string()),
            ]
        );
    }

    #[test]
    fn test_step_does_not_mutate_state() {
        let sheet = people();
        let iter =
            TableRowIterator::new(&sheet, TableSource::detect(), TableOptions::default()).unwrap();

        let start = iter.start();
        let (first, after_first) = iter.step(&start).unwrap();
        let (again, _) = iter.step(&start).unwrap();

        assert_eq!(first.ordinal(), again.ordinal());
        assert_eq!(first.sheet_row_number(), again.sheet_row_number());
        assert_eq!(start.table_row(), 1);
        assert_eq!(after_first.table_row(), 2);
        assert_eq!(after_first.last_row(), Some(2));
        assert_eq!(after_first.candidate_row(), Some(3));
    }

    #[test]
    fn test_missing_first_data_row() {
        let mut sheet = Worksheet::new("Header only");
        sheet.set_cell_value("A1", "a").unwrap();
        sheet.set_cell_value("A3", 1).unwrap();

        let mut iter =
            TableRowIterator::new(&sheet, TableSource::detect(), TableOptions::default()).unwrap();
        assert!(iter.start().is_exhausted());
        assert!(iter.next().is_none());
        assert!(iter.state().is_none());
    }

    #[test]
    fn test_gap_ends_table() {
        let mut sheet = people();
        sheet.set_cell_value("B8", 9).unwrap();
        sheet.set_cell_value("C8", "far").unwrap();

        let iter =
            TableRowIterator::new(&sheet, TableSource::detect(), TableOptions::default()).unwrap();
        assert_eq!(iter.count(), 3);

        let keep_going = TableOptions {
            stop_on_empty_row: false,
            ..TableOptions::default()
        };
        let iter = TableRowIterator::new(&sheet, TableSource::detect(), keep_going).unwrap();
        let rows: Vec<u32> = iter.map(|row| row.sheet_row_number()).collect();
        assert_eq!(rows, vec![2, 3, 4, 7]);
    }

    #[test]
    fn test_gap_reason_uses_row_numbers() {
        assert_eq!(StopReason::RowGap { expected: 4 }.to_string(), "expected row 5");
        assert_eq!(
            StopReason::RowGap { expected: u32::MAX }.to_string(),
            "expected row 4294967296"
        );
    }

    #[test]
    fn test_row_with_settings_only_ends_table() {
        let mut sheet = people();
        sheet.set_row_hidden(5, true);
        sheet.set_cell_value("B7", 4).unwrap();

        let iter =
            TableRowIterator::new(&sheet, TableSource::detect(), TableOptions::default()).unwrap();
        assert_eq!(iter.count(), 3);
    }

    #[test]
    fn test_values_outside_range_do_not_count() {
        let mut sheet = people();
        sheet.set_cell_value("E6", "note").unwrap();
        sheet.set_cell_value("B7", 4).unwrap();

        let iter =
            TableRowIterator::new(&sheet, TableSource::detect(), TableOptions::default()).unwrap();
        assert_eq!(iter.count(), 3);
    }

    #[test]
    fn test_predicate_runs_first() {
        let sheet = people();
        let options = TableOptions::default().with_stop_in_row(|row| {
            row.get_by_label("name")
                .map(|value| value == &CellValue::string("bob"))
                .unwrap_or(false)
        });

        let iter = TableRowIterator::new(&sheet, TableSource::detect(), options).unwrap();
        let names: Vec<String> = iter
            .map(|row| row.get_by_label("name").unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["ann".to_string()]);
    }

    #[test]
    fn test_explicit_range_without_header() {
        let sheet = people();
        let source = TableSource::at(ColumnRange::single(2), 2);
        let options = TableOptions {
            header: false,
            ..TableOptions::default()
        };

        let iter = TableRowIterator::new(&sheet, source, options).unwrap();
        assert_eq!(iter.labels(), &["C".to_string()]);
        assert_eq!(iter.first_data_row(), 2);
        assert_eq!(iter.count(), 3);
    }

    #[test]
    fn test_iterator_is_fused() {
        let sheet = people();
        let mut iter =
            TableRowIterator::new(&sheet, TableSource::detect(), TableOptions::default()).unwrap();
        assert_eq!(iter.by_ref().count(), 3);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }
}
