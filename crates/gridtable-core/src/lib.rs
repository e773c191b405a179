//! # gridtable-core
//!
//! Core data structures for the gridtable library.
//!
//! This crate provides the sheet model that table extraction reads from:
//! - [`CellValue`] - Decoded cell values, with [`CellValue::Empty`] as the missing marker
//! - [`CellAddress`] - Cell addressing and column-letter conversion
//! - [`Worksheet`] - Sparse cell storage with an ordered row sequence
//! - [`SheetRow`] - A read-only view of one row of a worksheet
//!
//! ## Example
//!
//! ```rust
//! use gridtable_core::{CellValue, Worksheet};
//!
//! let mut sheet = Worksheet::new("Sheet1");
//!
//! // Using string addresses
//! sheet.set_cell_value("A1", "Hello").unwrap();
//! sheet.set_cell_value("B1", 42).unwrap();
//!
//! // Or using row/column indices (0-based)
//! sheet.set_cell_value_at(1, 0, CellValue::string("World")).unwrap();
//!
//! let row = sheet.row(0);
//! assert_eq!(row.columns().collect::<Vec<_>>(), vec![0, 1]);
//! assert_eq!(row.value(1), &CellValue::Int(42));
//! assert!(row.value(7).is_empty());
//! ```

pub mod cell;
pub mod error;
pub mod row;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellData, CellError, CellValue, SharedString, ValueKind};
pub use error::{Error, Result};
pub use row::{Row, Rows, SheetRow};
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;
