//! Column detection against ranked candidate names.

use labstock_config::ColumnCandidates;
use labstock_model::CanonicalField;
use tracing::debug;

use crate::mapping::{ColumnMapping, MatchKind};

/// Finds the source column for one canonical field.
///
/// Candidates are tried in rank order for an exact case-insensitive match
/// first. Only when no candidate matches exactly is a substring pass made:
/// again in rank order, the first column (in source order) whose lowercase
/// name contains the lowercase candidate wins.
pub fn find_column(columns: &[String], candidates: &[String]) -> Option<(String, MatchKind)> {
    for candidate in candidates {
        let wanted = candidate.to_lowercase();
        if let Some(column) = columns.iter().find(|c| c.to_lowercase() == wanted) {
            return Some((column.clone(), MatchKind::Exact));
        }
    }
    for candidate in candidates {
        let wanted = candidate.to_lowercase();
        if let Some(column) = columns.iter().find(|c| c.to_lowercase().contains(&wanted)) {
            return Some((column.clone(), MatchKind::Substring));
        }
    }
    None
}

/// Detects a source column for every canonical field.
///
/// The result is advisory: callers may override entries before the
/// mapping is used for normalization. Fields with no match stay unmapped
/// and normalize to nulls.
pub fn detect_columns(columns: &[String], candidates: &ColumnCandidates) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();
    for field in CanonicalField::ALL {
        match find_column(columns, candidates.candidates(field)) {
            Some((column, kind)) => {
                debug!(field = %field, column = %column, kind = ?kind, "detected column");
                mapping.set_detected(field, column, kind);
            }
            None => debug!(field = %field, "no source column detected"),
        }
    }
    mapping
}
