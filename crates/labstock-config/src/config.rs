//! Configuration document types.
//!
//! Every section carries `#[serde(default)]`, so a file only needs the
//! sections it changes. Column candidates, component keywords and the
//! expiry window default to the built-in values; group maps and exclusions
//! default to empty.

use std::collections::BTreeMap;

use labstock_model::CanonicalField;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Complete operator configuration, immutable for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InventoryConfig {
    pub expiry: ExpiryPolicy,
    pub columns: ColumnCandidates,
    pub components: ComponentKeywords,
    pub groups: GroupMaps,
    pub exclusions: Exclusions,
}

impl InventoryConfig {
    /// Checks entries that would silently never match.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEntry`] for blank keywords, map keys or
    /// values with surrounding whitespace, and types mapped onto themselves.
    pub fn validate(&self) -> Result<()> {
        for field in CanonicalField::ALL {
            for candidate in self.columns.candidates(field) {
                if candidate.trim().is_empty() {
                    return Err(ConfigError::invalid(
                        "columns",
                        field.as_str(),
                        "blank column candidate",
                    ));
                }
            }
        }
        for (name, keywords) in [
            ("reagent", &self.components.reagent),
            ("calibrator", &self.components.calibrator),
            ("qc", &self.components.qc),
        ] {
            if keywords.iter().any(|keyword| keyword.trim().is_empty()) {
                return Err(ConfigError::invalid(
                    "components",
                    name,
                    "blank component keyword",
                ));
            }
        }
        validate_group("groups.calibrator", &self.groups.calibrator)?;
        validate_group("groups.qc", &self.groups.qc)?;
        Ok(())
    }
}

fn validate_group(section: &'static str, map: &BTreeMap<String, String>) -> Result<()> {
    for (key, pooled) in map {
        if key.trim().is_empty() || key.trim() != key {
            return Err(ConfigError::invalid(
                section,
                key,
                "keys must be non-empty and trimmed",
            ));
        }
        if pooled.trim().is_empty() || pooled.trim() != pooled {
            return Err(ConfigError::invalid(
                section,
                key,
                "pooled type must be non-empty and trimmed",
            ));
        }
        if key == pooled {
            return Err(ConfigError::invalid(
                section,
                key,
                "type cannot be pooled into itself",
            ));
        }
    }
    Ok(())
}

/// Expiry warning window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpiryPolicy {
    /// Records expiring within this many days (inclusive) are `expiring_soon`.
    pub warning_days: u32,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self { warning_days: 30 }
    }
}

/// Ranked source column name candidates per canonical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnCandidates {
    pub platform: Vec<String>,
    #[serde(rename = "type")]
    pub test_type: Vec<String>,
    pub item: Vec<String>,
    pub cat_no: Vec<String>,
    pub quantity: Vec<String>,
    pub expiry_date: Vec<String>,
}

impl ColumnCandidates {
    pub fn candidates(&self, field: CanonicalField) -> &[String] {
        match field {
            CanonicalField::Platform => &self.platform,
            CanonicalField::Type => &self.test_type,
            CanonicalField::Item => &self.item,
            CanonicalField::CatNo => &self.cat_no,
            CanonicalField::Quantity => &self.quantity,
            CanonicalField::ExpiryDate => &self.expiry_date,
        }
    }
}

impl Default for ColumnCandidates {
    fn default() -> Self {
        Self {
            platform: strings(&["platform", "site"]),
            test_type: strings(&["type", "category"]),
            item: strings(&["item", "description", "item_description"]),
            cat_no: strings(&["cat_no", "catalog", "catalog_number"]),
            quantity: strings(&["quantity", "qty"]),
            expiry_date: strings(&["expiry", "expiration", "exp_date"]),
        }
    }
}

/// Case-insensitive substrings that classify an item description.
///
/// Checked in order reagent, calibrator, qc; the first hit wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentKeywords {
    pub reagent: Vec<String>,
    pub calibrator: Vec<String>,
    pub qc: Vec<String>,
}

impl Default for ComponentKeywords {
    fn default() -> Self {
        Self {
            reagent: strings(&["reagent"]),
            calibrator: strings(&["calibrator", "calib"]),
            qc: strings(&["qc", "control"]),
        }
    }
}

/// How records of a pooled type are selected for a referencing type's cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PooledRecords {
    /// Every record of the pooled type counts, whatever its item text says.
    #[default]
    Whole,
    /// Only pooled records classified as the cell's component count.
    SameComponent,
}

/// Many-to-one maps from a test type to its shared pooled type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupMaps {
    pub pooled_records: PooledRecords,
    pub calibrator: BTreeMap<String, String>,
    pub qc: BTreeMap<String, String>,
}

/// Types that never get their own matrix row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Exclusions {
    pub types: Vec<String>,
}

impl Exclusions {
    /// Compares trimmed values case-insensitively.
    pub fn is_excluded(&self, test_type: &str) -> bool {
        let needle = test_type.trim().to_lowercase();
        self.types
            .iter()
            .any(|excluded| excluded.trim().to_lowercase() == needle)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
