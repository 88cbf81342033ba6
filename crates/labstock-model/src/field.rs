//! Canonical inventory schema fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six canonical input columns every source table is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Platform,
    #[serde(rename = "type")]
    Type,
    Item,
    CatNo,
    Quantity,
    ExpiryDate,
}

impl CanonicalField {
    /// All canonical fields in export column order.
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::Platform,
        CanonicalField::Type,
        CanonicalField::Item,
        CanonicalField::CatNo,
        CanonicalField::Quantity,
        CanonicalField::ExpiryDate,
    ];

    /// Returns the canonical column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Platform => "platform",
            CanonicalField::Type => "type",
            CanonicalField::Item => "item",
            CanonicalField::CatNo => "cat_no",
            CanonicalField::Quantity => "quantity",
            CanonicalField::ExpiryDate => "expiry_date",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = String;

    /// Parses a canonical column name (case-insensitive, `-` accepted for `_`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        CanonicalField::ALL
            .into_iter()
            .find(|field| field.as_str() == normalized)
            .ok_or_else(|| format!("Unknown canonical field: {s}"))
    }
}
