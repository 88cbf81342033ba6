//! Headline metrics and per-status counts.

use serde::{Deserialize, Serialize};

use crate::status::ExpiryStatus;

/// Record counts per expiry status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub expired: usize,
    pub expiring_soon: usize,
    pub ok: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: ExpiryStatus) {
        match status {
            ExpiryStatus::Expired => self.expired += 1,
            ExpiryStatus::ExpiringSoon => self.expiring_soon += 1,
            ExpiryStatus::Ok => self.ok += 1,
        }
    }

    pub fn get(&self, status: ExpiryStatus) -> usize {
        match status {
            ExpiryStatus::Expired => self.expired,
            ExpiryStatus::ExpiringSoon => self.expiring_soon,
            ExpiryStatus::Ok => self.ok,
        }
    }

    pub fn total(&self) -> usize {
        self.expired + self.expiring_soon + self.ok
    }
}

impl FromIterator<ExpiryStatus> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = ExpiryStatus>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for status in iter {
            counts.record(status);
        }
        counts
    }
}

/// Dashboard headline metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    /// Distinct non-null item descriptions.
    pub distinct_items: usize,
    pub total_quantity: u64,
    pub expired: usize,
    pub expiring_soon: usize,
}
