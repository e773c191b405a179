//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The decoded value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1") and column-letter conversion
//! - [`CellData`] - A stored cell: value plus format index

mod address;
mod storage;
mod value;

pub use address::CellAddress;
pub use storage::{CellData, CellStorage};
pub use value::{CellError, CellValue, SharedString, ValueKind};
