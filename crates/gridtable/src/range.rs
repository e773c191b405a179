//! Physical column ranges

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use gridtable_core::CellAddress;

use crate::error::{TableError, TableResult};

/// An inclusive range of physical columns (0-based), `start <= stop`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRange {
    start: u16,
    stop: u16,
}

impl ColumnRange {
    /// Create a column range, failing when `start > stop`
    pub fn new(start: u16, stop: u16) -> TableResult<Self> {
        if start > stop {
            return Err(TableError::InvalidColumnRange { start, stop });
        }
        Ok(Self { start, stop })
    }

    /// A range covering a single column
    pub fn single(col: u16) -> Self {
        Self {
            start: col,
            stop: col,
        }
    }

    /// Parse `"B:D"` or a single column `"C"`
    ///
    /// # Examples
    /// ```
    /// use gridtable::ColumnRange;
    ///
    /// let range = ColumnRange::parse("B:D").unwrap();
    /// assert_eq!((range.start(), range.stop()), (1, 3));
    /// assert_eq!(range.len(), 3);
    /// ```
    pub fn parse(s: &str) -> TableResult<Self> {
        match s.split_once(':') {
            Some((start, stop)) => Self::new(
                CellAddress::letters_to_column(start)?,
                CellAddress::letters_to_column(stop)?,
            ),
            None => Ok(Self::single(CellAddress::letters_to_column(s)?)),
        }
    }

    /// First column
    pub fn start(&self) -> u16 {
        self.start
    }

    /// Last column (inclusive)
    pub fn stop(&self) -> u16 {
        self.stop
    }

    /// Number of columns in the range
    pub fn len(&self) -> usize {
        (self.stop - self.start) as usize + 1
    }

    /// Always false: a range holds at least one column
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if a physical column lies inside the range
    pub fn contains(&self, col: u16) -> bool {
        (self.start..=self.stop).contains(&col)
    }

    /// Physical columns in ascending order
    pub fn columns(&self) -> RangeInclusive<u16> {
        self.start..=self.stop
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            CellAddress::column_to_letters(self.start),
            CellAddress::column_to_letters(self.stop)
        )
    }
}

impl FromStr for ColumnRange {
    type Err = TableError;

    fn from_str(s: &str) -> TableResult<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_reversed_range() {
        assert!(ColumnRange::new(2, 2).is_ok());
        assert!(matches!(
            ColumnRange::new(3, 1),
            Err(TableError::InvalidColumnRange { start: 3, stop: 1 })
        ));
    }

    #[test]
    fn test_parse() {
        let range = ColumnRange::parse("b:AA").unwrap();
        assert_eq!(range.start(), 1);
        assert_eq!(range.stop(), 26);
        assert_eq!(range.len(), 26);
        assert_eq!(range.to_string(), "B:AA");

        let single: ColumnRange = "C".parse().unwrap();
        assert_eq!(single, ColumnRange::single(2));
        assert_eq!(single.len(), 1);

        assert!(ColumnRange::parse("D:B").is_err());
        assert!(matches!(ColumnRange::parse("1:2"), Err(TableError::Core(_))));
    }

    #[test]
    fn test_contains_and_columns() {
        let range = ColumnRange::new(4, 6).unwrap();
        assert!(range.contains(4));
        assert!(range.contains(6));
        assert!(!range.contains(7));
        assert_eq!(range.columns().collect::<Vec<_>>(), vec![4, 5, 6]);
    }
}
