//! Expiry status classification.

use chrono::{Duration, Local, NaiveDate};
use labstock_model::{ExpiryStatus, InventoryRecord};
use tracing::debug;

/// Default expiry warning window in days.
pub const DEFAULT_WARNING_DAYS: u32 = 30;

/// Today's local calendar date, with no time-of-day component.
pub fn reference_date() -> NaiveDate {
    Local::now().date_naive()
}

/// Classifies an expiry date with the default 30-day window.
///
/// - no date: `ok`
/// - `date < today`: `expired`
/// - `today <= date <= today + 30 days`: `expiring_soon`
/// - later: `ok`
pub fn classify(expiry_date: Option<NaiveDate>, today: NaiveDate) -> ExpiryStatus {
    classify_with_window(expiry_date, today, DEFAULT_WARNING_DAYS)
}

/// Classifies an expiry date against a `warning_days` window (inclusive).
pub fn classify_with_window(
    expiry_date: Option<NaiveDate>,
    today: NaiveDate,
    warning_days: u32,
) -> ExpiryStatus {
    let Some(date) = expiry_date else {
        return ExpiryStatus::Ok;
    };
    if date < today {
        return ExpiryStatus::Expired;
    }
    match today.checked_add_signed(Duration::days(i64::from(warning_days))) {
        Some(horizon) if date > horizon => ExpiryStatus::Ok,
        _ => ExpiryStatus::ExpiringSoon,
    }
}

/// Classifier bound to a warning window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusClassifier {
    warning_days: u32,
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_WARNING_DAYS)
    }
}

impl StatusClassifier {
    pub fn new(warning_days: u32) -> Self {
        Self { warning_days }
    }

    pub fn warning_days(&self) -> u32 {
        self.warning_days
    }

    pub fn classify(&self, expiry_date: Option<NaiveDate>, today: NaiveDate) -> ExpiryStatus {
        classify_with_window(expiry_date, today, self.warning_days)
    }

    /// Recomputes `status` on every record. Prior statuses are ignored.
    pub fn classify_all(&self, records: &mut [InventoryRecord], today: NaiveDate) {
        for record in records.iter_mut() {
            record.status = self.classify(record.expiry_date, today);
        }
        debug!(
            records = records.len(),
            today = %today,
            warning_days = self.warning_days,
            "statuses recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_expiry_date;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn offset(days: i64) -> Option<NaiveDate> {
        Some(today() + Duration::days(days))
    }

    #[test]
    fn boundaries() {
        assert_eq!(classify(None, today()), ExpiryStatus::Ok);
        assert_eq!(classify(offset(-1), today()), ExpiryStatus::Expired);
        assert_eq!(classify(offset(0), today()), ExpiryStatus::ExpiringSoon);
        assert_eq!(classify(offset(30), today()), ExpiryStatus::ExpiringSoon);
        assert_eq!(classify(offset(31), today()), ExpiryStatus::Ok);
        assert_eq!(classify(offset(-400), today()), ExpiryStatus::Expired);
    }

    #[test]
    fn short_year_dates_classify_against_window() {
        let status = |raw: &str| classify(parse_expiry_date(raw), today());
        assert_eq!(status("3/14/24"), ExpiryStatus::Expired);
        assert_eq!(status("3/15/24"), ExpiryStatus::ExpiringSoon);
        assert_eq!(status("4/14/24"), ExpiryStatus::ExpiringSoon);
        assert_eq!(status("4/15/24"), ExpiryStatus::Ok);
        assert_eq!(status("14-Apr-24"), ExpiryStatus::ExpiringSoon);
    }

    #[test]
    fn custom_window() {
        let classifier = StatusClassifier::new(7);
        assert_eq!(classifier.classify(offset(7), today()), ExpiryStatus::ExpiringSoon);
        assert_eq!(classifier.classify(offset(8), today()), ExpiryStatus::Ok);
        let zero = StatusClassifier::new(0);
        assert_eq!(zero.classify(offset(0), today()), ExpiryStatus::ExpiringSoon);
        assert_eq!(zero.classify(offset(1), today()), ExpiryStatus::Ok);
    }

    #[test]
    fn classify_all_overwrites_stale_status() {
        let mut records = vec![
            InventoryRecord::new(Some("TSH"), Some("TSH Reagent")),
            InventoryRecord::new(Some("TSH"), Some("TSH Calibrator")),
        ];
        records[0].status = ExpiryStatus::Expired;
        records[1].expiry_date = offset(3);
        StatusClassifier::default().classify_all(&mut records, today());
        assert_eq!(records[0].status, ExpiryStatus::Ok);
        assert_eq!(records[1].status, ExpiryStatus::ExpiringSoon);
    }
}
