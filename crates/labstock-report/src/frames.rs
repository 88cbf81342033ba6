//! Report tables as Polars DataFrames.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use anyhow::{Context, Result};
use labstock_model::{
    AggregateCell, CanonicalField, Component, ExpiryStatus, InventoryRecord, StatusCounts,
    StatusMatrix,
};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};

/// Columns of the updated inventory export.
pub const INVENTORY_COLUMNS: [&str; 7] = [
    "platform",
    "type",
    "item",
    "cat_no",
    "quantity",
    "expiry_date",
    "status",
];

/// Columns of the expiring-soon export.
pub const EXPIRING_COLUMNS: [&str; 3] = ["item", "cat_no", "quantity"];

/// Columns of the status counts export.
pub const STATUS_COUNT_COLUMNS: [&str; 4] = ["type", "expired", "expiring_soon", "ok"];

fn text_column(name: &str, values: Vec<Option<String>>) -> Column {
    Series::new(name.into(), values).into()
}

fn count_column(name: &str, values: Vec<u64>) -> Column {
    Series::new(name.into(), values).into()
}

/// Canonical columns plus `status`, one row per record in the given order.
///
/// An empty record slice still yields every column.
pub fn inventory_frame(records: &[InventoryRecord]) -> Result<DataFrame> {
    let mut columns = canonical_columns(records);
    columns.push(text_column(
        "status",
        records
            .iter()
            .map(|record| Some(record.status.as_str().to_string()))
            .collect(),
    ));
    DataFrame::new(columns).context("build inventory frame")
}

fn canonical_columns(records: &[InventoryRecord]) -> Vec<Column> {
    CanonicalField::ALL
        .into_iter()
        .map(|field| match field {
            CanonicalField::Quantity => count_column(
                field.as_str(),
                records.iter().map(|record| record.quantity).collect(),
            ),
            _ => text_column(
                field.as_str(),
                records.iter().map(|record| text_value(record, field)).collect(),
            ),
        })
        .collect()
}

fn text_value(record: &InventoryRecord, field: CanonicalField) -> Option<String> {
    match field {
        CanonicalField::Platform => record.platform.clone(),
        CanonicalField::Type => record.test_type.clone(),
        CanonicalField::Item => record.item.clone(),
        CanonicalField::CatNo => record.cat_no.clone(),
        CanonicalField::Quantity => Some(record.quantity.to_string()),
        CanonicalField::ExpiryDate => record
            .expiry_date
            .map(|date| date.format("%Y-%m-%d").to_string()),
    }
}

/// `expiring_soon` records grouped by `(item, cat_no)` with summed quantity.
///
/// Groups are ordered by item then catalog number, nulls last. Records
/// with a null item or catalog number form their own group.
pub fn expiring_soon_frame(records: &[InventoryRecord]) -> Result<DataFrame> {
    let mut groups: BTreeMap<(Option<&str>, Option<&str>), u64> = BTreeMap::new();
    for record in records
        .iter()
        .filter(|record| record.status == ExpiryStatus::ExpiringSoon)
    {
        let total = groups
            .entry((record.item.as_deref(), record.cat_no.as_deref()))
            .or_default();
        *total = total.saturating_add(record.quantity);
    }
    let mut rows: Vec<((Option<&str>, Option<&str>), u64)> = groups.into_iter().collect();
    rows.sort_by(|((item_a, cat_a), _), ((item_b, cat_b), _)| {
        nulls_last(*item_a, *item_b).then_with(|| nulls_last(*cat_a, *cat_b))
    });

    DataFrame::new(vec![
        text_column(
            "item",
            rows.iter().map(|((item, _), _)| item.map(str::to_string)).collect(),
        ),
        text_column(
            "cat_no",
            rows.iter().map(|((_, cat_no), _)| cat_no.map(str::to_string)).collect(),
        ),
        count_column("quantity", rows.iter().map(|(_, quantity)| *quantity).collect()),
    ])
    .context("build expiring-soon frame")
}

fn nulls_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The status matrix with its seven report columns.
///
/// Status cells hold one of `ok`, `expiring_soon`, `expired`, `missing`.
pub fn matrix_frame(matrix: &StatusMatrix) -> Result<DataFrame> {
    let rows = &matrix.rows;
    let mut columns = vec![text_column(
        StatusMatrix::COLUMNS[0],
        rows.iter().map(|row| Some(row.test_type.clone())).collect(),
    )];
    for component in Component::MATRIX {
        let cells: Vec<AggregateCell> = rows
            .iter()
            .map(|row| row.cell(component).copied().unwrap_or_default())
            .collect();
        columns.push(text_column(
            &format!("{}_status", component.label()),
            cells
                .iter()
                .map(|cell| Some(cell.status.as_str().to_string()))
                .collect(),
        ));
        columns.push(count_column(
            &format!("{}_qty", component.label()),
            cells.iter().map(|cell| cell.quantity).collect(),
        ));
    }
    DataFrame::new(columns).context("build status matrix frame")
}

/// Status counts for charts: an overall row (null `type`) followed by one
/// row per type in key order.
pub fn status_counts_frame(
    overall: StatusCounts,
    by_type: &BTreeMap<String, StatusCounts>,
) -> Result<DataFrame> {
    let mut types: Vec<Option<String>> = vec![None];
    let mut counts: Vec<StatusCounts> = vec![overall];
    for (test_type, type_counts) in by_type {
        types.push(Some(test_type.clone()));
        counts.push(*type_counts);
    }
    let bucket = |status: ExpiryStatus| -> Vec<u64> {
        counts
            .iter()
            .map(|entry| entry.get(status) as u64)
            .collect()
    };
    DataFrame::new(vec![
        text_column("type", types),
        count_column("expired", bucket(ExpiryStatus::Expired)),
        count_column("expiring_soon", bucket(ExpiryStatus::ExpiringSoon)),
        count_column("ok", bucket(ExpiryStatus::Ok)),
    ])
    .context("build status counts frame")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use labstock_ingest::{cell_string, column_names};

    use super::*;

    fn expiring(item: Option<&str>, cat_no: Option<&str>, quantity: u64) -> InventoryRecord {
        let mut record = InventoryRecord::new(Some("TSH"), item).with_quantity(quantity);
        if let Some(cat_no) = cat_no {
            record = record.with_cat_no(cat_no);
        }
        record.status = ExpiryStatus::ExpiringSoon;
        record
    }

    #[test]
    fn empty_input_keeps_canonical_columns() {
        let df = inventory_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(column_names(&df), INVENTORY_COLUMNS);
    }

    #[test]
    fn inventory_frame_renders_dates_and_status() {
        let mut record = InventoryRecord::new(Some("HDL"), Some("HDL Calibrator"))
            .with_cat_no("08P22")
            .with_quantity(5)
            .with_expiry(NaiveDate::from_ymd_opt(2024, 3, 25).unwrap());
        record.status = ExpiryStatus::ExpiringSoon;
        let df = inventory_frame(&[record]).unwrap();
        assert_eq!(cell_string(&df, "cat_no", 0).as_deref(), Some("08P22"));
        assert_eq!(cell_string(&df, "expiry_date", 0).as_deref(), Some("2024-03-25"));
        assert_eq!(cell_string(&df, "status", 0).as_deref(), Some("expiring_soon"));
        assert_eq!(cell_string(&df, "quantity", 0).as_deref(), Some("5"));
        assert_eq!(cell_string(&df, "platform", 0), None);
    }

    #[test]
    fn expiring_soon_groups_by_item_and_catalog() {
        let mut ok = expiring(Some("TSH Reagent"), Some("A1"), 100);
        ok.status = ExpiryStatus::Ok;
        let records = vec![
            expiring(Some("TSH Reagent"), Some("A1"), 2),
            expiring(None, Some("Z9"), 1),
            expiring(Some("TSH Reagent"), Some("A1"), 3),
            expiring(Some("TSH Reagent"), None, 4),
            expiring(Some("Glucose Reagent"), Some("B2"), 6),
            ok,
        ];
        let df = expiring_soon_frame(&records).unwrap();
        assert_eq!(column_names(&df), EXPIRING_COLUMNS);
        assert_eq!(df.height(), 4);
        let items: Vec<Option<String>> = (0..4).map(|idx| cell_string(&df, "item", idx)).collect();
        assert_eq!(
            items,
            [
                Some("Glucose Reagent".to_string()),
                Some("TSH Reagent".to_string()),
                Some("TSH Reagent".to_string()),
                None,
            ]
        );
        assert_eq!(cell_string(&df, "quantity", 1).as_deref(), Some("5"));
        assert_eq!(cell_string(&df, "cat_no", 2), None);
    }

    #[test]
    fn status_counts_start_with_overall_row() {
        let mut by_type = BTreeMap::new();
        by_type.insert(
            "TSH".to_string(),
            StatusCounts {
                expired: 1,
                expiring_soon: 0,
                ok: 2,
            },
        );
        let overall = StatusCounts {
            expired: 1,
            expiring_soon: 0,
            ok: 3,
        };
        let df = status_counts_frame(overall, &by_type).unwrap();
        assert_eq!(column_names(&df), STATUS_COUNT_COLUMNS);
        assert_eq!(df.height(), 2);
        assert_eq!(cell_string(&df, "type", 0), None);
        assert_eq!(cell_string(&df, "ok", 0).as_deref(), Some("3"));
        assert_eq!(cell_string(&df, "type", 1).as_deref(), Some("TSH"));
    }
}
