//! Worst-of status and quantity reduction.

use labstock_model::{AggregateCell, CellStatus, ExpiryStatus, InventoryRecord};

/// Reduces records to one cell: summed quantity and worst status.
///
/// No deduplication by item or catalog number is done. An empty input is
/// [`AggregateCell::MISSING`].
pub fn aggregate<'a, I>(records: I) -> AggregateCell
where
    I: IntoIterator<Item = &'a InventoryRecord>,
{
    let mut worst: Option<ExpiryStatus> = None;
    let mut quantity: u64 = 0;
    for record in records {
        quantity = quantity.saturating_add(record.quantity);
        worst = Some(match worst {
            Some(current) => current.worst(record.status),
            None => record.status,
        });
    }
    match worst {
        Some(status) => AggregateCell {
            status: CellStatus::from(status),
            quantity,
        },
        None => AggregateCell::MISSING,
    }
}
