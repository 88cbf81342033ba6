//! Headline metrics, chart counts and display ordering.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use labstock_model::{ExpiryStatus, InventoryRecord, InventorySummary, StatusCounts};

/// Distinct items, total quantity and expired/expiring-soon record counts.
pub fn summarize(records: &[InventoryRecord]) -> InventorySummary {
    let distinct_items: BTreeSet<&str> = records
        .iter()
        .filter_map(|record| record.item.as_deref())
        .collect();
    let counts = status_counts(records);
    InventorySummary {
        distinct_items: distinct_items.len(),
        total_quantity: records
            .iter()
            .fold(0u64, |acc, record| acc.saturating_add(record.quantity)),
        expired: counts.expired,
        expiring_soon: counts.expiring_soon,
    }
}

/// Record counts per status over all records.
pub fn status_counts(records: &[InventoryRecord]) -> StatusCounts {
    records.iter().map(|record| record.status).collect()
}

/// Record counts per status for each non-null type, ordered by type.
///
/// Every type reports all three buckets, zero-filled.
pub fn status_counts_by_type(records: &[InventoryRecord]) -> BTreeMap<String, StatusCounts> {
    let mut by_type: BTreeMap<String, StatusCounts> = BTreeMap::new();
    for record in records {
        if let Some(test_type) = record.test_type.as_deref() {
            by_type
                .entry(test_type.to_string())
                .or_default()
                .record(record.status);
        }
    }
    by_type
}

/// Indices of records with the given status, in input order.
pub fn with_status(records: &[InventoryRecord], status: ExpiryStatus) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.status == status)
        .map(|(idx, _)| idx)
        .collect()
}

/// Stable sort by (platform, type, item) ascending, nulls last.
pub fn sort_for_display(records: &mut [InventoryRecord]) {
    records.sort_by(|a, b| {
        nulls_last(a.platform.as_deref(), b.platform.as_deref())
            .then_with(|| nulls_last(a.test_type.as_deref(), b.test_type.as_deref()))
            .then_with(|| nulls_last(a.item.as_deref(), b.item.as_deref()))
    });
}

fn nulls_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
