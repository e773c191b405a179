//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use gridtable::Table;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a table to a CSV file
    pub fn write_table_file<P: AsRef<Path>>(
        table: &Table,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write_table(table, file, options)
    }

    /// Write a table to a writer
    ///
    /// Missing values become empty fields.
    pub fn write_table<W: Write>(
        table: &Table,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
            LineTerminator::CR => csv::Terminator::Any(b'\r'),
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(false)
            .from_writer(writer);

        if options.write_header {
            csv_writer.write_record(table.labels())?;
        }

        for row in table.rows() {
            csv_writer.write_record(row.iter().map(|value| value.to_string()))?;
        }

        csv_writer.flush()?;
        log::debug!(
            "wrote {} rows x {} columns as CSV",
            table.row_count(),
            table.column_count()
        );
        Ok(())
    }
}
