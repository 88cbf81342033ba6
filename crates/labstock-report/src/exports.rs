//! Export bundle written at the end of a report run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use labstock_core::InventorySession;
use polars::prelude::DataFrame;
use tracing::info;

use crate::frames::{expiring_soon_frame, inventory_frame, matrix_frame, status_counts_frame};
use crate::writer::write_csv;

/// Updated inventory, one row per record.
pub const INVENTORY_FILE: &str = "inventory_updated.csv";
/// Expiring-soon list grouped by item and catalog number.
pub const EXPIRING_FILE: &str = "expiring_items.csv";
pub const MATRIX_FILE: &str = "status_matrix.csv";
pub const STATUS_COUNTS_FILE: &str = "status_counts.csv";

/// All export tables of one session, built but not yet written.
#[derive(Debug, Clone)]
pub struct ReportTables {
    pub inventory: DataFrame,
    pub expiring_soon: DataFrame,
    pub matrix: DataFrame,
    pub status_counts: DataFrame,
}

impl ReportTables {
    /// Builds every export table from the session's current records.
    pub fn from_session(session: &InventorySession<'_>) -> Result<Self> {
        let records = session.records();
        Ok(Self {
            inventory: inventory_frame(records)?,
            expiring_soon: expiring_soon_frame(records)?,
            matrix: matrix_frame(&session.matrix())?,
            status_counts: status_counts_frame(
                session.status_counts(),
                &session.status_counts_by_type(),
            )?,
        })
    }

    /// Tables paired with their file names, in write order.
    pub fn named(&self) -> [(&'static str, &DataFrame); 4] {
        [
            (INVENTORY_FILE, &self.inventory),
            (EXPIRING_FILE, &self.expiring_soon),
            (MATRIX_FILE, &self.matrix),
            (STATUS_COUNTS_FILE, &self.status_counts),
        ]
    }

    /// Writes every table into `output_dir`, creating it if needed.
    pub fn write_all(&self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("create {}", output_dir.display()))?;
        let mut outputs = Vec::with_capacity(4);
        for (name, df) in self.named() {
            let path = output_dir.join(name);
            write_csv(df, &path)?;
            info!(path = %path.display(), rows = df.height(), "export written");
            outputs.push(path);
        }
        Ok(outputs)
    }
}
