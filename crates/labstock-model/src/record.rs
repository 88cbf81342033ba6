//! Normalized inventory record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::ExpiryStatus;

/// Grouping key used for records without a type.
pub const NULL_TYPE_KEY: &str = "nan";

/// One row of inventory after schema normalization.
///
/// `status` is derived from `expiry_date` and a reference date; it is never
/// read from the source and must be recomputed after any edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Site or instrument identifier.
    pub platform: Option<String>,
    /// Test/assay category, trimmed.
    #[serde(rename = "type")]
    pub test_type: Option<String>,
    /// Human-readable description.
    pub item: Option<String>,
    /// Catalog number; not unique.
    pub cat_no: Option<String>,
    pub quantity: u64,
    /// `None` means the item never expires.
    pub expiry_date: Option<NaiveDate>,
    pub status: ExpiryStatus,
}

impl InventoryRecord {
    /// Creates a record with the given type and item and no other values.
    pub fn new(test_type: Option<&str>, item: Option<&str>) -> Self {
        Self {
            platform: None,
            test_type: test_type.map(str::to_string),
            item: item.map(str::to_string),
            cat_no: None,
            quantity: 0,
            expiry_date: None,
            status: ExpiryStatus::Ok,
        }
    }

    #[must_use]
    pub fn with_platform(mut self, platform: &str) -> Self {
        self.platform = Some(platform.to_string());
        self
    }

    #[must_use]
    pub fn with_cat_no(mut self, cat_no: &str) -> Self {
        self.cat_no = Some(cat_no.to_string());
        self
    }

    #[must_use]
    pub fn with_quantity(mut self, quantity: u64) -> Self {
        self.quantity = quantity;
        self
    }

    #[must_use]
    pub fn with_expiry(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    /// Returns the key used by group maps and the matrix row set.
    ///
    /// Missing types map to the literal `"nan"`.
    pub fn type_key(&self) -> &str {
        self.test_type.as_deref().unwrap_or(NULL_TYPE_KEY)
    }
}
