//! Prelude module - common imports for gridtable users
//!
//! ```rust
//! use gridtable::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellAddress,
    CellValue,
    // Table types
    Column,
    ColumnRange,
    ElementType,
    MaterializeOptions,
    Table,
    // Error types
    TableError,
    TableOptions,
    TableResult,
    TableRow,
    TableRowIterator,
    TableSource,
    ValueKind,
    Worksheet,
    // Extension traits
    WorksheetTableExt,
};
