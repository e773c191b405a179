//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use gridtable::{materialize, MaterializeOptions, Table, TableOptions, TableRowIterator, TableSource};
use gridtable_core::{CellError, CellValue, Error, Worksheet, MAX_COLS};

use crate::error::CsvResult;
use crate::options::CsvReadOptions;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read CSV file into a worksheet
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a worksheet
    ///
    /// Record `n` becomes sheet row `n` (0-based), starting in column A. Empty
    /// fields leave their cell unpopulated.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);

        let mut worksheet = Worksheet::new(options.sheet_name.as_str());
        let mut record_count = 0u32;

        for (row_idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row = u32::try_from(row_idx)
                .map_err(|_| Error::RowOutOfBounds(u32::MAX, gridtable_core::MAX_ROWS - 1))?;

            for (col, field) in record.iter().enumerate() {
                let col = u16::try_from(col)
                    .map_err(|_| Error::ColumnOutOfBounds(u32::MAX, MAX_COLS - 1))?;
                let value = if options.auto_detect_types {
                    Self::detect_type(field)
                } else if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::string(field)
                };

                worksheet.set_cell_value_at(row, col, value)?;
            }
            record_count = row + 1;
        }

        log::debug!(
            "read {} CSV records into '{}' ({} cells)",
            record_count,
            worksheet.name(),
            worksheet.cell_count()
        );
        Ok(worksheet)
    }

    /// Read CSV and extract one table from it
    pub fn read_table<R: Read>(
        reader: R,
        options: &CsvReadOptions,
        source: TableSource,
        table_options: TableOptions,
        materialize_options: MaterializeOptions,
    ) -> CsvResult<Table> {
        let worksheet = Self::read(reader, options)?;
        let rows = TableRowIterator::new(&worksheet, source, table_options)?;
        Ok(materialize(rows, materialize_options))
    }

    /// Detect the type of a field value
    ///
    /// Matching ignores surrounding whitespace; a field that stays a string
    /// is kept as written.
    fn detect_type(field: &str) -> CellValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        // Try boolean
        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }

        // Try error literal
        if trimmed.starts_with('#') {
            if let Some(error) = CellError::parse(trimmed) {
                return CellValue::Error(error);
            }
        }

        // Try number; "inf" and "NaN" stay strings
        if trimmed.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(n) = trimmed.parse::<i64>() {
                return CellValue::Int(n);
            }
            if let Ok(n) = trimmed.parse::<f64>() {
                if n.is_finite() {
                    return CellValue::Float(n);
                }
            }

            // Try date and time
            if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
                return CellValue::Date(d);
            }
            if let Ok(t) = NaiveTime::parse_from_str(trimmed, "%H:%M:%S") {
                return CellValue::Time(t);
            }
            for format in DATETIME_FORMATS {
                if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                    return CellValue::DateTime(dt);
                }
            }
        }

        // Default to string
        CellValue::string(field)
    }
}
