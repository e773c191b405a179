//! # gridtable-csv
//!
//! CSV ingestion and table export for gridtable.
//!
//! [`CsvReader`] loads every CSV record into a worksheet row, so the table
//! layer decides where the header and data are. [`CsvWriter`] writes a
//! materialized table back out.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
