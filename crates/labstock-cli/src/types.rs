use std::path::PathBuf;

use chrono::NaiveDate;
use labstock_core::DataQualityReport;
use labstock_map::ColumnMapping;
use labstock_model::{
    CanonicalField, InventoryRecord, InventorySummary, StatusCounts, StatusMatrix,
};
use serde::Serialize;

/// Outcome of `labstock report`.
#[derive(Debug, Serialize)]
pub struct ReportResult {
    pub input: PathBuf,
    pub today: NaiveDate,
    pub records: usize,
    pub edits_applied: usize,
    /// Records after edits, in display order. Row `n` of `--edit` is index `n - 1`.
    pub inventory: Vec<InventoryRecord>,
    pub summary: InventorySummary,
    pub status_counts: StatusCounts,
    pub matrix: StatusMatrix,
    /// Target directory, also set on a dry run.
    pub output_dir: PathBuf,
    /// Files written, empty on a dry run.
    pub outputs: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Outcome of `labstock columns`.
#[derive(Debug, Serialize)]
pub struct ColumnsResult {
    pub input: PathBuf,
    pub columns: Vec<String>,
    pub mapping: ColumnMapping,
    pub missing_fields: Vec<CanonicalField>,
    pub unmapped_columns: Vec<String>,
}

/// Outcome of `labstock check`.
#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub input: PathBuf,
    pub today: NaiveDate,
    pub records: usize,
    pub matrix: StatusMatrix,
    pub report: DataQualityReport,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.report.is_clean()
    }
}
