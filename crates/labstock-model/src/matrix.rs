//! Aggregated per-type status matrix.

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::status::CellStatus;

/// Worst status and summed quantity of the records behind one
/// (type, component) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateCell {
    pub status: CellStatus,
    pub quantity: u64,
}

impl AggregateCell {
    /// Cell with no contributing record.
    pub const MISSING: AggregateCell = AggregateCell {
        status: CellStatus::Missing,
        quantity: 0,
    };
}

impl Default for AggregateCell {
    fn default() -> Self {
        Self::MISSING
    }
}

/// One report row of the status matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixRow {
    #[serde(rename = "type")]
    pub test_type: String,
    pub reagent: AggregateCell,
    pub calibrator: AggregateCell,
    pub qc: AggregateCell,
}

impl MatrixRow {
    /// Returns the cell for a matrix component. `Other` has no column.
    pub fn cell(&self, component: Component) -> Option<&AggregateCell> {
        match component {
            Component::Reagent => Some(&self.reagent),
            Component::Calibrator => Some(&self.calibrator),
            Component::Qc => Some(&self.qc),
            Component::Other => None,
        }
    }
}

/// Type x component table, rows ordered by type (ordinal).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMatrix {
    pub rows: Vec<MatrixRow>,
}

impl StatusMatrix {
    /// Column headers of the rendered matrix.
    pub const COLUMNS: [&'static str; 7] = [
        "Type",
        "Reagent_status",
        "Reagent_qty",
        "Calibrator_status",
        "Calibrator_qty",
        "QC_status",
        "QC_qty",
    ];

    pub fn row(&self, test_type: &str) -> Option<&MatrixRow> {
        self.rows.iter().find(|row| row.test_type == test_type)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
