//! End-to-end tests for locating, iterating and materializing tables

use gridtable::prelude::*;
use gridtable::{TypedValues, WorksheetTableExt};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Sheet with a header at row 3 (B:D), three data rows, a blank row and a
/// trailing data row below it.
fn orders() -> Worksheet {
    let mut sheet = Worksheet::new("Orders");
    sheet.set_cell_value("A1", "Quarterly orders").unwrap();

    sheet.set_cell_value("B3", "id").unwrap();
    sheet.set_cell_value("C3", "customer").unwrap();
    sheet.set_cell_value("D3", "amount").unwrap();

    sheet.set_cell_value("B4", 1).unwrap();
    sheet.set_cell_value("C4", "acme").unwrap();
    sheet.set_cell_value("D4", 10.5).unwrap();

    sheet.set_cell_value("B5", 2).unwrap();
    sheet.set_cell_value("C5", "globex").unwrap();

    sheet.set_cell_value("B6", 3).unwrap();
    sheet.set_cell_value("C6", "initech").unwrap();
    sheet.set_cell_value("D6", 7.25).unwrap();

    // Row 7 is blank; row 8 continues the data
    sheet.set_row_height(6, Some(4.0));
    sheet.set_cell_value("B8", 4).unwrap();
    sheet.set_cell_value("C8", "umbrella").unwrap();
    sheet.set_cell_value("D8", 1.0).unwrap();
    sheet
}

fn keep_going() -> TableOptions {
    TableOptions {
        stop_on_empty_row: false,
        ..TableOptions::default()
    }
}

/// Explicit column range with the first row given
#[test]
fn test_explicit_columns_and_first_row() {
    let sheet = orders();
    let source = TableSource::at(ColumnRange::parse("B:D").unwrap(), 2);

    let rows: Vec<_> = sheet
        .table_rows(source, TableOptions::default())
        .unwrap()
        .map(|row| row.sheet_row_number())
        .collect();
    assert_eq!(rows, vec![3, 4, 5]);
}

/// Explicit column range; the first row comes from the first data in column B
#[test]
fn test_explicit_columns_find_first_row() {
    let sheet = orders();
    let iter = sheet
        .table_rows(
            TableSource::columns(ColumnRange::parse("B:D").unwrap()),
            TableOptions::default(),
        )
        .unwrap();

    assert_eq!(iter.location().first_row, 2);
    assert_eq!(
        iter.labels(),
        &["id".to_string(), "customer".to_string(), "amount".to_string()]
    );
}

/// Detection skips the title row because it lies above `min_row`
#[test]
fn test_detect_matches_explicit() {
    let sheet = orders();

    let title = sheet.locate_table(None).unwrap();
    assert_eq!(title.to_string(), "A1");

    let location = sheet.locate_table(Some(1)).unwrap();
    assert_eq!(location.first_row, 2);
    assert_eq!(location.columns, ColumnRange::parse("B:D").unwrap());

    let detected = sheet
        .table(
            TableSource::detect_from(1),
            TableOptions::default(),
            MaterializeOptions::default(),
        )
        .unwrap();
    let explicit = sheet
        .table(
            TableSource::at(location.columns, location.first_row),
            TableOptions::default(),
            MaterializeOptions::default(),
        )
        .unwrap();
    assert_eq!(detected, explicit);
}

/// A blank row ends the table when stopping on empty rows
#[test]
fn test_stop_on_empty_row() {
    let sheet = orders();
    let table = sheet
        .table(
            TableSource::detect_from(1),
            TableOptions::default(),
            MaterializeOptions::default(),
        )
        .unwrap();

    assert_eq!(table.row_count(), 3);
    assert_eq!(
        table.column("customer"),
        Some(&Column::Values(vec![
            CellValue::string("acme"),
            CellValue::string("globex"),
            CellValue::string("initech"),
        ]))
    );
}

/// Without stopping, every present row is read and blank ones are dropped
#[test]
fn test_keep_going_drops_blank_rows() {
    let sheet = orders();

    let ordinals: Vec<(usize, u32)> = sheet
        .table_rows(TableSource::detect_from(1), keep_going())
        .unwrap()
        .map(|row| (row.ordinal(), row.sheet_row_number()))
        .collect();
    assert_eq!(ordinals, vec![(1, 3), (2, 4), (3, 5), (4, 6), (5, 7)]);

    let table = sheet
        .table(
            TableSource::detect_from(1),
            keep_going(),
            MaterializeOptions::default(),
        )
        .unwrap();
    assert_eq!(table.row_count(), 4);
    assert_eq!(
        table.row(3),
        Some(vec![
            CellValue::Int(4),
            CellValue::string("umbrella"),
            CellValue::Float(1.0),
        ])
    );

    let kept = sheet
        .table(
            TableSource::detect_from(1),
            keep_going(),
            MaterializeOptions {
                keep_empty_rows: true,
                ..MaterializeOptions::default()
            },
        )
        .unwrap();
    assert_eq!(kept.row_count(), 5);
    assert_eq!(
        kept.row(3),
        Some(vec![CellValue::Empty, CellValue::Empty, CellValue::Empty])
    );
}

/// Column types are inferred per column
#[test]
fn test_type_inference() {
    let sheet = orders();
    let table = sheet
        .table(
            TableSource::detect_from(1),
            keep_going(),
            MaterializeOptions {
                infer_types: true,
                ..MaterializeOptions::default()
            },
        )
        .unwrap();

    assert_eq!(
        table.element_types(),
        vec![
            ElementType::Required(ValueKind::Int),
            ElementType::Required(ValueKind::String),
            ElementType::Nullable(ValueKind::Float),
        ]
    );
    assert_eq!(
        table.column("id"),
        Some(&Column::Int(TypedValues::Required(vec![1, 2, 3, 4])))
    );
    assert_eq!(
        table.column_at(3),
        Some(&Column::Float(TypedValues::Nullable(vec![
            Some(10.5),
            None,
            Some(7.25),
            Some(1.0),
        ])))
    );
}

/// Mixed kinds stay unconstrained
#[test]
fn test_mixed_column_is_unconstrained() {
    let sheet = Worksheet::from_rows(
        "Mixed",
        vec![
            vec![CellValue::string("v")],
            vec![CellValue::Int(1)],
            vec![CellValue::string("x")],
            vec![CellValue::Int(3)],
        ],
    )
    .unwrap();

    let table = sheet
        .table(
            TableSource::detect(),
            TableOptions::default(),
            MaterializeOptions {
                infer_types: true,
                ..MaterializeOptions::default()
            },
        )
        .unwrap();
    assert_eq!(table.element_types(), vec![ElementType::Any]);
}

/// Materializing twice gives identical tables
#[test]
fn test_materialize_is_idempotent() {
    let sheet = orders();
    let options = MaterializeOptions {
        infer_types: true,
        keep_empty_rows: false,
    };

    let first = sheet
        .table(TableSource::detect_from(1), keep_going(), options)
        .unwrap();
    let second = sheet
        .table(TableSource::detect_from(1), keep_going(), options)
        .unwrap();
    assert_eq!(first, second);

    let iter = sheet
        .table_rows(TableSource::detect_from(1), keep_going())
        .unwrap();
    let replay = iter.clone();
    assert_eq!(
        gridtable::materialize(iter, options),
        gridtable::materialize(replay, options)
    );
}

/// The stop predicate ends the table at the first matching row
#[test]
fn test_stop_predicate() {
    let sheet = orders();
    let options = keep_going().with_stop_in_row(|row| {
        matches!(row.get_by_label("id"), Ok(CellValue::Int(id)) if *id >= 3)
    });

    let ids: Vec<String> = sheet
        .table_rows(TableSource::detect_from(1), options)
        .unwrap()
        .map(|row| row.get(1).unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);
}

/// The stop predicate also sees the blank row that the empty-row rule then rejects
#[test]
fn test_stop_predicate_sees_blank_row() {
    let sheet = orders();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let options = TableOptions::default().with_stop_in_row(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
        false
    });

    let rows = sheet
        .table_rows(TableSource::detect_from(1), options)
        .unwrap()
        .count();
    assert_eq!(rows, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

/// Explicit labels replace the header, which is still skipped
#[test]
fn test_explicit_labels() {
    let sheet = orders();
    let options = TableOptions::default().with_labels(["key", "who", "total"]);

    let mut iter = sheet.table_rows(TableSource::detect_from(1), options).unwrap();
    assert_eq!(iter.first_data_row(), 3);

    let first = iter.next().unwrap();
    assert_eq!(first.get_by_label("who").unwrap(), &CellValue::string("acme"));
    assert!(matches!(
        first.get_by_label("customer"),
        Err(TableError::InvalidColumnLabel(_))
    ));

    let wrong_count = TableOptions::default().with_labels(["only"]);
    assert!(matches!(
        sheet.table_rows(TableSource::detect_from(1), wrong_count),
        Err(TableError::LabelCountMismatch {
            expected: 3,
            actual: 1
        })
    ));
}

/// Without a header the labels are column letters and data starts at once
#[test]
fn test_headerless_table() {
    let sheet = orders();
    let options = TableOptions {
        header: false,
        ..TableOptions::default()
    };

    let table = sheet
        .table(
            TableSource::at(ColumnRange::parse("B:C").unwrap(), 3),
            options,
            MaterializeOptions::default(),
        )
        .unwrap();
    assert_eq!(table.labels(), &["B".to_string(), "C".to_string()]);
    assert_eq!(table.row_count(), 3);
}

/// Header cells must all hold a value
#[test]
fn test_invalid_header() {
    let mut sheet = orders();
    sheet.set_cell_value("C3", CellValue::Empty).unwrap();

    let err = sheet
        .table_rows(
            TableSource::at(ColumnRange::parse("B:D").unwrap(), 2),
            TableOptions::default(),
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "Header cell C3 is empty");
}

/// Normalized labels are usable for lookup
#[test]
fn test_normalized_labels() {
    let mut sheet = Worksheet::new("Prices");
    sheet.set_cell_value("A1", "Unit Price").unwrap();
    sheet.set_cell_value("B1", 2024).unwrap();
    sheet.set_cell_value("A2", 9.5).unwrap();
    sheet.set_cell_value("B2", true).unwrap();

    let options = TableOptions {
        normalize_labels: true,
        ..TableOptions::default()
    };
    let row = sheet
        .table_rows(TableSource::detect(), options)
        .unwrap()
        .next()
        .unwrap();
    assert_eq!(row.labels(), &["Unit_Price".to_string(), "_2024".to_string()]);
    assert_eq!(row.get_by_label("_2024").unwrap(), &CellValue::Boolean(true));
}

/// An empty sheet has no table
#[test]
fn test_table_not_found() {
    let sheet = Worksheet::new("Empty");
    assert!(matches!(
        sheet.table_rows(TableSource::detect(), TableOptions::default()),
        Err(TableError::TableNotFound)
    ));
    assert!(matches!(
        sheet.table_rows(
            TableSource::columns(ColumnRange::single(0)),
            TableOptions::default()
        ),
        Err(TableError::ColumnHasNoData { column: 0 })
    ));
}

/// Iterators over a shared sheet run on other threads
#[test]
fn test_iterators_across_threads() {
    let sheet = orders();

    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = [true, false]
            .into_iter()
            .map(|stop| {
                let sheet = &sheet;
                scope.spawn(move || {
                    let options = TableOptions {
                        stop_on_empty_row: stop,
                        ..TableOptions::default()
                    };
                    sheet
                        .table_rows(TableSource::detect_from(1), options)
                        .unwrap()
                        .count()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(counts, vec![3, 5]);
}
