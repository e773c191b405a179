//! Table column index: ordinal ↔ label ↔ physical column

use ahash::AHashMap;
use gridtable_core::{CellAddress, SheetRow};

use crate::error::{TableError, TableResult};
use crate::range::ColumnRange;

/// Maps 1-based table-column ordinals to labels and physical columns
///
/// Built once per table and shared (read-only) by the row iterator and every
/// row it produces.
#[derive(Debug, Clone)]
pub struct Index {
    columns: ColumnRange,
    labels: Vec<String>,
    column_map: Vec<u16>,
    lookup: AHashMap<String, usize>,
}

impl Index {
    /// Build an index from explicit labels, one per column of `columns`
    pub fn new(columns: ColumnRange, labels: Vec<String>) -> TableResult<Self> {
        if labels.len() != columns.len() {
            return Err(TableError::LabelCountMismatch {
                expected: columns.len(),
                actual: labels.len(),
            });
        }

        let mut lookup = AHashMap::with_capacity(labels.len());
        for (position, label) in labels.iter().enumerate() {
            if lookup.insert(label.clone(), position + 1).is_some() {
                return Err(TableError::DuplicateColumnLabel(label.clone()));
            }
        }

        Ok(Self {
            columns,
            labels,
            column_map: columns.columns().collect(),
            lookup,
        })
    }

    /// Build an index from the header row's values across `columns`
    ///
    /// Every header cell must hold a value; a blank string is a valid label.
    /// With `normalize` set, labels are rewritten by [`normalize_label`].
    pub fn from_header(
        header: &SheetRow<'_>,
        columns: ColumnRange,
        normalize: bool,
    ) -> TableResult<Self> {
        let labels = columns
            .columns()
            .map(|col| {
                let value = header.value(col);
                if value.is_empty() {
                    return Err(TableError::InvalidHeader {
                        address: CellAddress::new(header.index(), col).to_a1_string(),
                    });
                }
                let text = value.to_string();
                Ok(if normalize { normalize_label(&text) } else { text })
            })
            .collect::<TableResult<Vec<_>>>()?;

        Self::new(columns, labels)
    }

    /// Build an index labelled by column letters ("B", "C", ...)
    pub fn from_column_letters(columns: ColumnRange) -> Self {
        let labels = columns
            .columns()
            .map(CellAddress::column_to_letters)
            .collect();
        Self {
            columns,
            lookup: columns
                .columns()
                .enumerate()
                .map(|(position, col)| (CellAddress::column_to_letters(col), position + 1))
                .collect(),
            labels,
            column_map: columns.columns().collect(),
        }
    }

    /// Physical column range covered by the index
    pub fn columns(&self) -> ColumnRange {
        self.columns
    }

    /// Number of table columns
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false: an index covers at least one column
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in ordinal order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Physical columns in ordinal order
    pub fn column_map(&self) -> &[u16] {
        &self.column_map
    }

    /// Label of a 1-based ordinal
    pub fn label(&self, ordinal: usize) -> Option<&str> {
        let position = ordinal.checked_sub(1)?;
        self.labels.get(position).map(String::as_str)
    }

    /// Physical column of a 1-based ordinal
    pub fn physical_column(&self, ordinal: usize) -> Option<u16> {
        let position = ordinal.checked_sub(1)?;
        self.column_map.get(position).copied()
    }

    /// 1-based ordinal of a label
    pub fn ordinal(&self, label: &str) -> Option<usize> {
        self.lookup.get(label).copied()
    }
}

impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels && self.column_map == other.column_map
    }
}

/// Rewrite a header value into identifier form
///
/// Characters other than ASCII letters, digits and `_` become `_`, and a
/// leading digit gets a `_` prefix.
///
/// ```
/// use gridtable::normalize_label;
///
/// assert_eq!(normalize_label("Unit Price ($)"), "Unit_Price____");
/// assert_eq!(normalize_label("2024"), "_2024");
/// ```
pub fn normalize_label(label: &str) -> String {
    let mut normalized: String = label
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    match normalized.chars().next() {
        None => normalized.push('_'),
        Some(c) if c.is_ascii_digit() => normalized.insert(0, '_'),
        Some(_) => {}
    }
    normalized
}
