//! Type x component status matrix.

use std::collections::{BTreeMap, BTreeSet};

use labstock_config::{InventoryConfig, PooledRecords};
use labstock_model::{AggregateCell, Component, InventoryRecord, MatrixRow, StatusMatrix};
use tracing::{debug, info, info_span};

use crate::aggregate::aggregate;
use crate::component::ComponentClassifier;
use crate::groups::GroupResolver;

/// Builds the status matrix from classified records.
///
/// The matrix is recomputed from scratch on every call; records must
/// already carry a current status.
#[derive(Debug, Clone)]
pub struct MatrixBuilder<'a> {
    config: &'a InventoryConfig,
    classifier: ComponentClassifier,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(config: &'a InventoryConfig) -> Self {
        Self {
            config,
            classifier: ComponentClassifier::new(&config.components),
        }
    }

    pub fn build(&self, records: &[InventoryRecord]) -> StatusMatrix {
        let span = info_span!("build_matrix", record_count = records.len());
        let _guard = span.enter();

        let index = RecordIndex::new(records, &self.classifier);
        let resolver = GroupResolver::new(&self.config.groups);

        let row_types: BTreeSet<&str> = index
            .by_type
            .keys()
            .copied()
            .filter(|test_type| !self.config.exclusions.is_excluded(test_type))
            .collect();

        let rows: Vec<MatrixRow> = row_types
            .into_iter()
            .map(|test_type| MatrixRow {
                test_type: test_type.to_string(),
                reagent: self.cell(&index, &resolver, Component::Reagent, test_type),
                calibrator: self.cell(&index, &resolver, Component::Calibrator, test_type),
                qc: self.cell(&index, &resolver, Component::Qc, test_type),
            })
            .collect();

        info!(
            type_count = index.by_type.len(),
            row_count = rows.len(),
            "status matrix built"
        );
        StatusMatrix { rows }
    }

    fn cell(
        &self,
        index: &RecordIndex<'_>,
        resolver: &GroupResolver<'_>,
        component: Component,
        test_type: &str,
    ) -> AggregateCell {
        let members = self.contributing(index, resolver, component, test_type);
        let cell = aggregate(members.iter().map(|&idx| &index.records[idx]));
        debug!(
            test_type = %test_type,
            component = %component,
            records = members.len(),
            status = %cell.status,
            quantity = cell.quantity,
            "cell aggregated"
        );
        cell
    }

    fn contributing(
        &self,
        index: &RecordIndex<'_>,
        resolver: &GroupResolver<'_>,
        component: Component,
        test_type: &str,
    ) -> BTreeSet<usize> {
        let mut members: BTreeSet<usize> = index
            .of_type(test_type)
            .iter()
            .copied()
            .filter(|&idx| index.components[idx] == component)
            .collect();

        if let Some(pooled) = resolver.pooled_type(component, test_type) {
            let policy = self.config.groups.pooled_records;
            members.extend(index.of_type(pooled).iter().copied().filter(|&idx| {
                policy == PooledRecords::Whole || index.components[idx] == component
            }));
        }
        members
    }
}

/// Convenience wrapper over [`MatrixBuilder`].
pub fn build_matrix(records: &[InventoryRecord], config: &InventoryConfig) -> StatusMatrix {
    MatrixBuilder::new(config).build(records)
}

struct RecordIndex<'r> {
    records: &'r [InventoryRecord],
    components: Vec<Component>,
    by_type: BTreeMap<&'r str, Vec<usize>>,
}

impl<'r> RecordIndex<'r> {
    fn new(records: &'r [InventoryRecord], classifier: &ComponentClassifier) -> Self {
        let components = records
            .iter()
            .map(|record| classifier.classify(record.item.as_deref()))
            .collect();
        let mut by_type: BTreeMap<&'r str, Vec<usize>> = BTreeMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_type.entry(record.type_key()).or_default().push(idx);
        }
        Self {
            records,
            components,
            by_type,
        }
    }

    fn of_type(&self, test_type: &str) -> &[usize] {
        self.by_type
            .get(test_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
