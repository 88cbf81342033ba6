//! Inventory data model.
//!
//! Records, derived statuses and the aggregate shapes produced by the
//! reporting engine. This crate holds no logic beyond small accessors.

pub mod component;
pub mod error;
pub mod field;
pub mod matrix;
pub mod record;
pub mod status;
pub mod summary;

pub use component::Component;
pub use error::{ModelError, Result};
pub use field::CanonicalField;
pub use matrix::{AggregateCell, MatrixRow, StatusMatrix};
pub use record::{InventoryRecord, NULL_TYPE_KEY};
pub use status::{CellStatus, ExpiryStatus};
pub use summary::{InventorySummary, StatusCounts};

/// Parses a strict `YYYY-MM-DD` date as used on the command line.
pub fn parse_iso_date(value: &str) -> Result<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ModelError::InvalidDate {
            value: value.to_string(),
        }
    })
}
