//! Materialized table columns and element-type inference

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use gridtable_core::{CellError, CellValue, SharedString, ValueKind};

/// Element type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// Unconstrained: mixed kinds, or no non-missing value at all
    Any,
    /// Every value has this kind and none is missing
    Required(ValueKind),
    /// Every non-missing value has this kind and at least one is missing
    Nullable(ValueKind),
}

impl ElementType {
    /// The concrete kind, if the column has one
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            ElementType::Any => None,
            ElementType::Required(kind) | ElementType::Nullable(kind) => Some(*kind),
        }
    }

    /// Check if the type admits missing values
    pub fn is_nullable(&self) -> bool {
        !matches!(self, ElementType::Required(_))
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Any => f.write_str("any"),
            ElementType::Required(kind) => write!(f, "{}", kind),
            ElementType::Nullable(kind) => write!(f, "{}?", kind),
        }
    }
}

/// Infer the narrowest element type covering `values`
///
/// ```
/// use gridtable::{infer_element_type, CellValue, ElementType, ValueKind};
///
/// let values = [CellValue::Int(1), CellValue::Empty, CellValue::Int(3)];
/// assert_eq!(infer_element_type(&values), ElementType::Nullable(ValueKind::Int));
///
/// let mixed = [CellValue::Int(1), CellValue::string("x")];
/// assert_eq!(infer_element_type(&mixed), ElementType::Any);
/// ```
pub fn infer_element_type(values: &[CellValue]) -> ElementType {
    let mut kind = None;
    let mut missing = false;

    for value in values {
        match (value.kind(), kind) {
            (None, _) => missing = true,
            (Some(found), None) => kind = Some(found),
            (Some(found), Some(seen)) if found != seen => return ElementType::Any,
            _ => {}
        }
    }

    match kind {
        None => ElementType::Any,
        Some(kind) if missing => ElementType::Nullable(kind),
        Some(kind) => ElementType::Required(kind),
    }
}

/// Typed column storage: dense when no value is missing
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValues<T> {
    Required(Vec<T>),
    Nullable(Vec<Option<T>>),
}

impl<T> TypedValues<T> {
    fn collect(values: Vec<CellValue>, nullable: bool, extract: fn(CellValue) -> Option<T>) -> Self {
        if nullable {
            TypedValues::Nullable(values.into_iter().map(extract).collect())
        } else {
            TypedValues::Required(values.into_iter().filter_map(extract).collect())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TypedValues::Required(values) => values.len(),
            TypedValues::Nullable(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at a 0-based position; `None` when missing or out of range
    pub fn get(&self, position: usize) -> Option<&T> {
        match self {
            TypedValues::Required(values) => values.get(position),
            TypedValues::Nullable(values) => values.get(position).and_then(Option::as_ref),
        }
    }
}

/// One materialized column
///
/// Without type inference every column is [`Column::Values`]. With it, a
/// column whose values share one kind is stored as a typed vector.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Values(Vec<CellValue>),
    Boolean(TypedValues<bool>),
    Int(TypedValues<i64>),
    Float(TypedValues<f64>),
    String(TypedValues<SharedString>),
    Error(TypedValues<CellError>),
    Date(TypedValues<NaiveDate>),
    Time(TypedValues<NaiveTime>),
    DateTime(TypedValues<NaiveDateTime>),
}

impl Column {
    /// Reify `values` into the narrowest column type
    pub fn infer(values: Vec<CellValue>) -> Self {
        let element_type = infer_element_type(&values);
        let Some(kind) = element_type.kind() else {
            return Column::Values(values);
        };
        let nullable = element_type.is_nullable();

        match kind {
            ValueKind::Boolean => Column::Boolean(TypedValues::collect(values, nullable, |v| {
                match v {
                    CellValue::Boolean(b) => Some(b),
                    _ => None,
                }
            })),
            ValueKind::Int => Column::Int(TypedValues::collect(values, nullable, |v| match v {
                CellValue::Int(n) => Some(n),
                _ => None,
            })),
            ValueKind::Float => Column::Float(TypedValues::collect(values, nullable, |v| match v {
                CellValue::Float(n) => Some(n),
                _ => None,
            })),
            ValueKind::String => Column::String(TypedValues::collect(values, nullable, |v| {
                match v {
                    CellValue::String(s) => Some(s),
                    _ => None,
                }
            })),
            ValueKind::Error => Column::Error(TypedValues::collect(values, nullable, |v| match v {
                CellValue::Error(e) => Some(e),
                _ => None,
            })),
            ValueKind::Date => Column::Date(TypedValues::collect(values, nullable, |v| match v {
                CellValue::Date(d) => Some(d),
                _ => None,
            })),
            ValueKind::Time => Column::Time(TypedValues::collect(values, nullable, |v| match v {
                CellValue::Time(t) => Some(t),
                _ => None,
            })),
            ValueKind::DateTime => {
                Column::DateTime(TypedValues::collect(values, nullable, |v| match v {
                    CellValue::DateTime(dt) => Some(dt),
                    _ => None,
                }))
            }
        }
    }

    /// Number of values
    pub fn len(&self) -> usize {
        match self {
            Column::Values(values) => values.len(),
            Column::Boolean(values) => values.len(),
            Column::Int(values) => values.len(),
            Column::Float(values) => values.len(),
            Column::String(values) => values.len(),
            Column::Error(values) => values.len(),
            Column::Date(values) => values.len(),
            Column::Time(values) => values.len(),
            Column::DateTime(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The column's element type
    ///
    /// Uninferred columns report [`ElementType::Any`].
    pub fn element_type(&self) -> ElementType {
        fn typed<T>(values: &TypedValues<T>, kind: ValueKind) -> ElementType {
            match values {
                TypedValues::Required(_) => ElementType::Required(kind),
                TypedValues::Nullable(_) => ElementType::Nullable(kind),
            }
        }

        match self {
            Column::Values(_) => ElementType::Any,
            Column::Boolean(values) => typed(values, ValueKind::Boolean),
            Column::Int(values) => typed(values, ValueKind::Int),
            Column::Float(values) => typed(values, ValueKind::Float),
            Column::String(values) => typed(values, ValueKind::String),
            Column::Error(values) => typed(values, ValueKind::Error),
            Column::Date(values) => typed(values, ValueKind::Date),
            Column::Time(values) => typed(values, ValueKind::Time),
            Column::DateTime(values) => typed(values, ValueKind::DateTime),
        }
    }

    /// Value at a 0-based position as a cell value
    ///
    /// Missing entries come back as [`CellValue::Empty`]; `None` means the
    /// position is out of range.
    pub fn value(&self, position: usize) -> Option<CellValue> {
        if position >= self.len() {
            return None;
        }
        let value = match self {
            Column::Values(values) => values[position].clone(),
            Column::Boolean(values) => values.get(position).copied().into(),
            Column::Int(values) => values.get(position).copied().into(),
            Column::Float(values) => values.get(position).copied().into(),
            Column::String(values) => values
                .get(position)
                .cloned()
                .map_or(CellValue::Empty, CellValue::String),
            Column::Error(values) => values.get(position).copied().into(),
            Column::Date(values) => values.get(position).copied().into(),
            Column::Time(values) => values.get(position).copied().into(),
            Column::DateTime(values) => values.get(position).copied().into(),
        };
        Some(value)
    }
}
