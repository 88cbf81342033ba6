//! Data-quality checks of group maps against the live type vocabulary.
//!
//! Group map lookups fail silently: a typo in a map key just
//! leaves a `missing` cell. This module makes those misses visible. It
//! only reports; nothing here changes how cells are resolved.

use std::collections::{BTreeMap, BTreeSet};

use labstock_config::InventoryConfig;
use labstock_model::{Component, InventoryRecord, StatusMatrix};
use rapidfuzz::distance::jaro_winkler;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::groups::GroupResolver;

/// Minimum Jaro-Winkler similarity for a near-miss suggestion.
pub const NEAR_MISS_THRESHOLD: f64 = 0.85;

/// Why a matrix cell has no contributing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum GapReason {
    /// Reagent cell without a direct record.
    NoDirectRecords,
    /// No direct record and no group map entry.
    Unmapped,
    /// Mapped to a pooled type that does not occur in the data.
    PooledTypeAbsent { pooled: String },
    /// Pooled type exists but none of its records has the cell's component.
    PooledTypeEmpty { pooled: String },
}

/// One `missing` cell of the status matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellGap {
    #[serde(rename = "type")]
    pub test_type: String,
    pub component: Component,
    #[serde(flatten)]
    pub reason: GapReason,
}

/// A group map key that never occurs as a data type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedKey {
    pub component: Component,
    pub key: String,
    pub pooled: String,
}

/// Likely spelling mismatch between configuration and data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearMiss {
    pub component: Component,
    /// Name as written in the configuration.
    pub configured: String,
    /// Closest type present in the data.
    pub data_type: String,
    pub similarity: f64,
}

/// Findings of one diagnostics pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataQualityReport {
    /// Distinct types present in the data, including excluded ones.
    pub data_types: usize,
    /// Types with a matrix row.
    pub report_types: usize,
    pub gaps: Vec<CellGap>,
    pub unused_keys: Vec<UnusedKey>,
    /// Pooled types referenced by a group map but absent from the data.
    pub absent_pooled_types: Vec<String>,
    pub near_misses: Vec<NearMiss>,
}

impl DataQualityReport {
    /// Checks `matrix` and the group maps against `records`.
    ///
    /// `matrix` must have been built from the same records and config.
    pub fn analyze(
        records: &[InventoryRecord],
        matrix: &StatusMatrix,
        config: &InventoryConfig,
    ) -> Self {
        let data_types: BTreeSet<&str> = records.iter().map(InventoryRecord::type_key).collect();
        let resolver = GroupResolver::new(&config.groups);

        let mut gaps = Vec::new();
        for row in &matrix.rows {
            for component in Component::MATRIX {
                let missing = row.cell(component).is_some_and(|cell| cell.status.is_missing());
                if !missing {
                    continue;
                }
                let reason = match resolver.pooled_type(component, &row.test_type) {
                    None if component == Component::Reagent => GapReason::NoDirectRecords,
                    None => GapReason::Unmapped,
                    Some(pooled) if data_types.contains(pooled) => {
                        GapReason::PooledTypeEmpty {
                            pooled: pooled.to_string(),
                        }
                    }
                    Some(pooled) => GapReason::PooledTypeAbsent {
                        pooled: pooled.to_string(),
                    },
                };
                gaps.push(CellGap {
                    test_type: row.test_type.clone(),
                    component,
                    reason,
                });
            }
        }

        let mut unused_keys = Vec::new();
        let mut absent_pooled: BTreeMap<&str, Component> = BTreeMap::new();
        let mut near_misses = Vec::new();
        for (component, map) in [
            (Component::Calibrator, &config.groups.calibrator),
            (Component::Qc, &config.groups.qc),
        ] {
            let unmatched: Vec<&str> = matrix
                .rows
                .iter()
                .map(|row| row.test_type.as_str())
                .filter(|test_type| !map.contains_key(*test_type))
                .collect();
            for (key, pooled) in map {
                if !data_types.contains(key.as_str()) {
                    unused_keys.push(UnusedKey {
                        component,
                        key: key.clone(),
                        pooled: pooled.clone(),
                    });
                    near_misses.extend(closest(component, key, unmatched.iter().copied()));
                }
                if !data_types.contains(pooled.as_str()) {
                    absent_pooled.entry(pooled.as_str()).or_insert(component);
                }
            }
        }
        let absent_pooled_types: Vec<String> =
            absent_pooled.keys().map(|pooled| (*pooled).to_string()).collect();
        for (pooled, component) in absent_pooled {
            near_misses.extend(closest(component, pooled, data_types.iter().copied()));
        }

        let report = Self {
            data_types: data_types.len(),
            report_types: matrix.len(),
            gaps,
            unused_keys,
            absent_pooled_types,
            near_misses,
        };
        report.log();
        report
    }

    /// True when no cell is missing and every map key is used.
    pub fn is_clean(&self) -> bool {
        self.gaps.is_empty() && self.unused_keys.is_empty()
    }

    /// Gaps for one component, in row order.
    pub fn gaps_for(&self, component: Component) -> impl Iterator<Item = &CellGap> {
        self.gaps.iter().filter(move |gap| gap.component == component)
    }

    fn log(&self) {
        info!(
            data_types = self.data_types,
            report_types = self.report_types,
            gaps = self.gaps.len(),
            unused_keys = self.unused_keys.len(),
            "data quality checked"
        );
        for key in &self.unused_keys {
            warn!(component = %key.component, key = %key.key, "group map key not found in data");
        }
        for pooled in &self.absent_pooled_types {
            warn!(pooled = %pooled, "pooled type not found in data");
        }
        for miss in &self.near_misses {
            warn!(
                configured = %miss.configured,
                data_type = %miss.data_type,
                similarity = miss.similarity,
                "possible spelling mismatch"
            );
        }
    }
}

/// Best candidate at or above [`NEAR_MISS_THRESHOLD`], compared
/// case-insensitively.
fn closest<'a>(
    component: Component,
    configured: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<NearMiss> {
    let wanted = configured.to_lowercase();
    candidates
        .map(|candidate| {
            let score = jaro_winkler::similarity(wanted.chars(), candidate.to_lowercase().chars());
            (candidate, score)
        })
        .filter(|(_, score)| *score >= NEAR_MISS_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, similarity)| NearMiss {
            component,
            configured: configured.to_string(),
            data_type: candidate.to_string(),
            similarity,
        })
}
