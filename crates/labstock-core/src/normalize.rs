//! Source frame to canonical record normalization.
//!
//! Every coercion here degrades instead of failing: a blank or non-numeric
//! quantity becomes 0, an unreadable expiry date becomes "never expires",
//! and a field with no usable source column is null on every row.

use labstock_ingest::{cell_string, column_names, parse_f64};
use labstock_map::ColumnMapping;
use labstock_model::{CanonicalField, ExpiryStatus, InventoryRecord};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, trace, warn};

use crate::dates::parse_expiry_date;

/// Raw cell text for one row, keyed by canonical field.
///
/// Used for rows entered by hand as well as rows read from a frame, so both
/// go through the same coercions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub platform: Option<String>,
    #[serde(rename = "type")]
    pub test_type: Option<String>,
    pub item: Option<String>,
    pub cat_no: Option<String>,
    pub quantity: Option<String>,
    pub expiry_date: Option<String>,
}

impl RawRecord {
    pub fn field_mut(&mut self, field: CanonicalField) -> &mut Option<String> {
        match field {
            CanonicalField::Platform => &mut self.platform,
            CanonicalField::Type => &mut self.test_type,
            CanonicalField::Item => &mut self.item,
            CanonicalField::CatNo => &mut self.cat_no,
            CanonicalField::Quantity => &mut self.quantity,
            CanonicalField::ExpiryDate => &mut self.expiry_date,
        }
    }
}

/// Coerces a raw quantity: non-numeric or missing is 0, negatives clamp to
/// 0 and fractions are truncated.
pub fn coerce_quantity(raw: Option<&str>) -> u64 {
    match raw.and_then(parse_f64) {
        // `as` saturates at u64::MAX.
        Some(value) if value > 0.0 => value.trunc() as u64,
        _ => 0,
    }
}

/// Builds a record from raw text. The status is left as `ok`; classify
/// before use.
pub fn normalize_raw(raw: &RawRecord) -> InventoryRecord {
    let quantity = coerce_quantity(raw.quantity.as_deref());
    let expiry_date = raw.expiry_date.as_deref().and_then(parse_expiry_date);
    if let Some(value) = raw.expiry_date.as_deref()
        && expiry_date.is_none()
        && !value.trim().is_empty()
    {
        trace!(value = %value, "unreadable expiry date treated as no expiry");
    }
    InventoryRecord {
        platform: clean(raw.platform.as_deref()),
        test_type: clean(raw.test_type.as_deref()),
        item: clean(raw.item.as_deref()),
        cat_no: clean(raw.cat_no.as_deref()),
        quantity,
        expiry_date,
        status: ExpiryStatus::Ok,
    }
}

/// Normalizes every row of `df` through `mapping`.
///
/// Mapped columns that are not present in the frame are logged and treated
/// like unmapped fields.
pub fn normalize_frame(df: &DataFrame, mapping: &ColumnMapping) -> Vec<InventoryRecord> {
    let span = info_span!("normalize", row_count = df.height());
    let _guard = span.enter();

    let columns = column_names(df);
    for (field, column) in mapping.dangling_fields(&columns) {
        warn!(
            field = %field,
            column = %column,
            "mapped column not found in source; field will be null"
        );
    }
    let sources: Vec<(CanonicalField, Option<&str>)> = CanonicalField::ALL
        .into_iter()
        .map(|field| {
            let source = mapping
                .source(field)
                .filter(|column| columns.iter().any(|c| c.as_str() == *column));
            (field, source)
        })
        .collect();
    for (field, source) in &sources {
        if source.is_none() {
            debug!(field = %field, "canonical field has no source column");
        }
    }

    let records: Vec<InventoryRecord> = (0..df.height())
        .map(|idx| {
            let mut raw = RawRecord::default();
            for (field, source) in &sources {
                if let Some(column) = source {
                    *raw.field_mut(*field) = cell_string(df, column, idx);
                }
            }
            normalize_raw(&raw)
        })
        .collect();

    info!(
        record_count = records.len(),
        zero_quantity = records.iter().filter(|r| r.quantity == 0).count(),
        no_expiry = records.iter().filter(|r| r.expiry_date.is_none()).count(),
        "records normalized"
    );
    records
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use labstock_ingest::frame_from_rows;

    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn quantity_coercion() {
        assert_eq!(coerce_quantity(Some("12")), 12);
        assert_eq!(coerce_quantity(Some(" 7.9 ")), 7);
        assert_eq!(coerce_quantity(Some("-3")), 0);
        assert_eq!(coerce_quantity(Some("two")), 0);
        assert_eq!(coerce_quantity(Some("")), 0);
        assert_eq!(coerce_quantity(None), 0);
    }

    #[test]
    fn raw_record_trims_and_parses() {
        let raw = RawRecord {
            test_type: Some("  HDL ".to_string()),
            item: Some("HDL Calibrator".to_string()),
            cat_no: Some("   ".to_string()),
            quantity: Some("5".to_string()),
            expiry_date: Some("2024-03-25".to_string()),
            ..RawRecord::default()
        };
        let record = normalize_raw(&raw);
        assert_eq!(record.test_type.as_deref(), Some("HDL"));
        assert_eq!(record.cat_no, None);
        assert_eq!(record.quantity, 5);
        assert_eq!(record.expiry_date, NaiveDate::from_ymd_opt(2024, 3, 25));
    }

    #[test]
    fn unreadable_date_means_no_expiry() {
        let raw = RawRecord {
            expiry_date: Some("soon".to_string()),
            ..RawRecord::default()
        };
        assert_eq!(normalize_raw(&raw).expiry_date, None);
    }

    #[test]
    fn frame_rows_follow_mapping() {
        let df = frame_from_rows(
            &strings(&["Category", "Description", "Qty"]),
            &[
                strings(&["Glucose ", "Glucose Reagent", "4"]),
                strings(&["TSH", "TSH Control", "n/a"]),
            ],
        )
        .unwrap();
        let mut mapping = ColumnMapping::default();
        mapping.set(CanonicalField::Type, "Category");
        mapping.set(CanonicalField::Item, "Description");
        mapping.set(CanonicalField::Quantity, "Qty");
        mapping.set(CanonicalField::ExpiryDate, "Expiry");

        let records = normalize_frame(&df, &mapping);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].test_type.as_deref(), Some("Glucose"));
        assert_eq!(records[0].quantity, 4);
        assert_eq!(records[1].quantity, 0);
        assert!(records.iter().all(|r| r.expiry_date.is_none() && r.platform.is_none()));
    }
}
