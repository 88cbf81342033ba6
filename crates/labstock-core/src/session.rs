//! Session-scoped inventory snapshot.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use labstock_config::InventoryConfig;
use labstock_map::ColumnMapping;
use labstock_model::{ExpiryStatus, InventoryRecord, InventorySummary, StatusCounts, StatusMatrix};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::classify::StatusClassifier;
use crate::diagnostics::DataQualityReport;
use crate::edit::{EditChange, RecordEdit};
use crate::error::{CoreError, Result};
use crate::matrix::MatrixBuilder;
use crate::normalize::{RawRecord, normalize_frame, normalize_raw};
use crate::summary;

/// One user's inventory snapshot with its configuration and reference date.
///
/// Records are kept in display order. Every mutation reclassifies all
/// records, so derived views never see a stale status. Nothing here is
/// shared between sessions.
#[derive(Debug, Clone)]
pub struct InventorySession<'a> {
    config: &'a InventoryConfig,
    classifier: StatusClassifier,
    today: NaiveDate,
    records: Vec<InventoryRecord>,
}

impl<'a> InventorySession<'a> {
    /// Creates a session from normalized records.
    pub fn new(
        config: &'a InventoryConfig,
        mut records: Vec<InventoryRecord>,
        today: NaiveDate,
    ) -> Self {
        summary::sort_for_display(&mut records);
        let mut session = Self {
            config,
            classifier: StatusClassifier::new(config.expiry.warning_days),
            today,
            records,
        };
        session.reclassify();
        session
    }

    /// Normalizes `df` through `mapping` and opens a session on the result.
    pub fn from_frame(
        config: &'a InventoryConfig,
        df: &DataFrame,
        mapping: &ColumnMapping,
        today: NaiveDate,
    ) -> Self {
        Self::new(config, normalize_frame(df, mapping), today)
    }

    pub fn config(&self) -> &InventoryConfig {
        self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Records in display order.
    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Applies a batch of edits, then reclassifies every record.
    ///
    /// The batch is checked before anything changes: if one edit addresses a
    /// row that does not exist, no edit is applied.
    pub fn apply_edits(&mut self, edits: &[RecordEdit]) -> Result<()> {
        let len = self.records.len();
        if let Some(edit) = edits.iter().find(|edit| edit.row == 0 || edit.row > len) {
            return Err(CoreError::RowOutOfRange { row: edit.row, len });
        }
        for edit in edits {
            let record = &mut self.records[edit.row - 1];
            match edit.change {
                EditChange::Quantity(quantity) => record.quantity = quantity,
                EditChange::ExpiryDate(date) => record.expiry_date = date,
            }
            debug!(row = edit.row, change = ?edit.change, "edit applied");
        }
        self.reclassify();
        info!(edits = edits.len(), "edits applied");
        Ok(())
    }

    /// Normalizes and appends rows after the existing ones.
    pub fn append(&mut self, rows: &[RawRecord]) {
        self.records.extend(rows.iter().map(normalize_raw));
        self.reclassify();
        info!(appended = rows.len(), record_count = self.records.len(), "rows appended");
    }

    pub fn matrix(&self) -> StatusMatrix {
        MatrixBuilder::new(self.config).build(&self.records)
    }

    pub fn summary(&self) -> InventorySummary {
        summary::summarize(&self.records)
    }

    pub fn status_counts(&self) -> StatusCounts {
        summary::status_counts(&self.records)
    }

    pub fn status_counts_by_type(&self) -> BTreeMap<String, StatusCounts> {
        summary::status_counts_by_type(&self.records)
    }

    /// Records currently `expiring_soon`, in display order.
    pub fn expiring_soon(&self) -> Vec<&InventoryRecord> {
        summary::with_status(&self.records, ExpiryStatus::ExpiringSoon)
            .into_iter()
            .map(|idx| &self.records[idx])
            .collect()
    }

    /// Checks `matrix`, built by [`Self::matrix`] on the current records.
    pub fn diagnostics(&self, matrix: &StatusMatrix) -> DataQualityReport {
        DataQualityReport::analyze(&self.records, matrix, self.config)
    }

    fn reclassify(&mut self) {
        self.classifier.classify_all(&mut self.records, self.today);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use labstock_model::CellStatus;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn records() -> Vec<InventoryRecord> {
        vec![
            InventoryRecord::new(Some("TSH"), Some("TSH Reagent"))
                .with_platform("B")
                .with_quantity(2)
                .with_expiry(today() + Duration::days(90)),
            InventoryRecord::new(Some("Glucose"), Some("Glucose Reagent"))
                .with_platform("A")
                .with_quantity(4),
        ]
    }

    #[test]
    fn new_session_sorts_and_classifies() {
        let config = InventoryConfig::default();
        let session = InventorySession::new(&config, records(), today());
        assert_eq!(session.records()[0].test_type.as_deref(), Some("Glucose"));
        assert!(session.records().iter().all(|r| r.status == ExpiryStatus::Ok));
    }

    #[test]
    fn edits_reclassify_before_views() {
        let config = InventoryConfig::default();
        let mut session = InventorySession::new(&config, records(), today());
        session
            .apply_edits(&[
                RecordEdit::expiry_date(2, Some(today() - Duration::days(1))),
                RecordEdit::quantity(2, 9),
            ])
            .unwrap();

        let tsh = &session.records()[1];
        assert_eq!(tsh.quantity, 9);
        assert_eq!(tsh.status, ExpiryStatus::Expired);
        let row = session.matrix().row("TSH").cloned().unwrap();
        assert_eq!(row.reagent.status, CellStatus::Expired);
        assert_eq!(row.reagent.quantity, 9);
    }

    #[test]
    fn out_of_range_batch_changes_nothing() {
        let config = InventoryConfig::default();
        let mut session = InventorySession::new(&config, records(), today());
        let err = session
            .apply_edits(&[RecordEdit::quantity(1, 50), RecordEdit::quantity(3, 1)])
            .unwrap_err();
        assert_eq!(err, CoreError::RowOutOfRange { row: 3, len: 2 });
        assert_eq!(session.records()[0].quantity, 4);
    }

    #[test]
    fn appended_rows_are_normalized_and_classified() {
        let config = InventoryConfig::default();
        let mut session = InventorySession::new(&config, records(), today());
        session.append(&[RawRecord {
            test_type: Some(" HDL ".to_string()),
            item: Some("HDL Calibrator".to_string()),
            quantity: Some("5".to_string()),
            expiry_date: Some("2024-03-25".to_string()),
            ..RawRecord::default()
        }]);
        assert_eq!(session.len(), 3);
        let appended = &session.records()[2];
        assert_eq!(appended.test_type.as_deref(), Some("HDL"));
        assert_eq!(appended.status, ExpiryStatus::ExpiringSoon);
        assert_eq!(session.expiring_soon().len(), 1);
    }

    #[test]
    fn diagnostics_read_the_supplied_matrix() {
        let config = InventoryConfig::default();
        let session = InventorySession::new(&config, records(), today());
        let matrix = session.matrix();
        let report = session.diagnostics(&matrix);
        assert_eq!(report.report_types, matrix.len());
        assert_eq!(report.gaps.len(), 4);

        let report = session.diagnostics(&StatusMatrix::default());
        assert_eq!(report.report_types, 0);
        assert!(report.gaps.is_empty());
    }
}
