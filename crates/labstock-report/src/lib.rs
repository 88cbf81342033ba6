//! Report tables and exports for lab inventory sessions.
//!
//! - **Inventory**: canonical columns plus derived status
//! - **Expiring soon**: grouped by item and catalog number
//! - **Status matrix**: per-type Reagent/Calibrator/QC cells
//! - **Status counts**: overall and per-type chart data
//!
//! Tables are built as Polars DataFrames and written as CSV.

mod exports;
mod frames;
mod writer;

pub use exports::{
    EXPIRING_FILE, INVENTORY_FILE, MATRIX_FILE, ReportTables, STATUS_COUNTS_FILE,
};
pub use frames::{
    EXPIRING_COLUMNS, INVENTORY_COLUMNS, STATUS_COUNT_COLUMNS, expiring_soon_frame,
    inventory_frame, matrix_frame, status_counts_frame,
};
pub use writer::{frame_to_csv_string, write_csv};
