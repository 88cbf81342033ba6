//! Functional role of a record within a test type's workflow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Component kind derived from the free-text item description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Reagent,
    Calibrator,
    Qc,
    Other,
}

impl Component {
    /// Components that get a column in the status matrix.
    pub const MATRIX: [Component; 3] = [Component::Reagent, Component::Calibrator, Component::Qc];

    /// Returns the column prefix used in the status matrix.
    pub fn label(&self) -> &'static str {
        match self {
            Component::Reagent => "Reagent",
            Component::Calibrator => "Calibrator",
            Component::Qc => "QC",
            Component::Other => "Other",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
