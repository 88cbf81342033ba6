//! Expiry status enumerations.
//!
//! [`ExpiryStatus`] is the per-record lifecycle label derived from an expiry
//! date. [`CellStatus`] extends it with `Missing` for aggregate cells that
//! have no contributing record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a single inventory record.
///
/// Variants are declared in severity order so that `Ord` gives the
/// worst-of ordering used by aggregation: `Ok < ExpiringSoon < Expired`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// No expiry date, or expiry beyond the warning window.
    #[default]
    Ok,
    /// Expiry falls within the warning window (inclusive on both ends).
    ExpiringSoon,
    /// Expiry date is before the reference date.
    Expired,
}

impl ExpiryStatus {
    /// All record statuses in chart order (worst first).
    pub const CHART_ORDER: [ExpiryStatus; 3] = [
        ExpiryStatus::Expired,
        ExpiryStatus::ExpiringSoon,
        ExpiryStatus::Ok,
    ];

    /// Returns the literal token used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Ok => "ok",
            ExpiryStatus::ExpiringSoon => "expiring_soon",
            ExpiryStatus::Expired => "expired",
        }
    }

    /// Returns the more severe of two statuses.
    #[must_use]
    pub fn worst(self, other: ExpiryStatus) -> ExpiryStatus {
        self.max(other)
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpiryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ok" => Ok(ExpiryStatus::Ok),
            "expiring_soon" => Ok(ExpiryStatus::ExpiringSoon),
            "expired" => Ok(ExpiryStatus::Expired),
            _ => Err(format!("Unknown expiry status: {s}")),
        }
    }
}

/// Status of an aggregate (type, component) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    Ok,
    ExpiringSoon,
    Expired,
    /// No record contributed to the cell.
    Missing,
}

impl CellStatus {
    /// Returns the literal token used in the status matrix.
    pub fn as_str(&self) -> &'static str {
        match self {
            CellStatus::Ok => "ok",
            CellStatus::ExpiringSoon => "expiring_soon",
            CellStatus::Expired => "expired",
            CellStatus::Missing => "missing",
        }
    }

    /// Returns true when no record contributed to the cell.
    pub fn is_missing(&self) -> bool {
        matches!(self, CellStatus::Missing)
    }
}

impl From<ExpiryStatus> for CellStatus {
    fn from(status: ExpiryStatus) -> Self {
        match status {
            ExpiryStatus::Ok => CellStatus::Ok,
            ExpiryStatus::ExpiringSoon => CellStatus::ExpiringSoon,
            ExpiryStatus::Expired => CellStatus::Expired,
        }
    }
}

impl fmt::Display for CellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
