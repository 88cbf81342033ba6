//! Tests for labstock-model types.

use chrono::NaiveDate;
use labstock_model::{
    AggregateCell, CellStatus, Component, ExpiryStatus, InventoryRecord, MatrixRow, StatusCounts,
    StatusMatrix, parse_iso_date,
};

#[test]
fn status_counts_collect_from_iterator() {
    let counts: StatusCounts = [
        ExpiryStatus::Ok,
        ExpiryStatus::Expired,
        ExpiryStatus::Ok,
        ExpiryStatus::ExpiringSoon,
    ]
    .into_iter()
    .collect();
    assert_eq!(counts.ok, 2);
    assert_eq!(counts.expired, 1);
    assert_eq!(counts.expiring_soon, 1);
    assert_eq!(counts.total(), 4);
    assert_eq!(counts.get(ExpiryStatus::Ok), 2);
}

#[test]
fn matrix_row_cell_lookup() {
    let row = MatrixRow {
        test_type: "HDL".to_string(),
        reagent: AggregateCell::MISSING,
        calibrator: AggregateCell {
            status: CellStatus::ExpiringSoon,
            quantity: 5,
        },
        qc: AggregateCell::default(),
    };
    assert_eq!(row.cell(Component::Calibrator).map(|c| c.quantity), Some(5));
    assert!(row.cell(Component::Other).is_none());
    assert!(row.cell(Component::Qc).is_some_and(|c| c.status.is_missing()));

    let matrix = StatusMatrix { rows: vec![row] };
    assert_eq!(matrix.len(), 1);
    assert!(matrix.row("HDL").is_some());
    assert!(matrix.row("hdl").is_none());
}

#[test]
fn record_serializes_with_canonical_names() {
    let record = InventoryRecord::new(Some("TSH"), Some("TSH Reagent"))
        .with_quantity(3)
        .with_expiry(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    let json = serde_json::to_value(&record).expect("serialize record");
    assert_eq!(json["type"], "TSH");
    assert_eq!(json["expiry_date"], "2025-03-01");
    assert_eq!(json["status"], "ok");
}

#[test]
fn parse_iso_date_is_strict() {
    assert_eq!(
        parse_iso_date("2024-02-29").unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    );
    assert!(parse_iso_date("29/02/2024").is_err());
}
