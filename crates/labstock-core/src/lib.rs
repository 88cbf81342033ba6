//! Status derivation and grouped aggregation for lab inventory.
//!
//! # Pipeline
//!
//! 1. [`normalize_frame`] turns a source frame into [`InventoryRecord`]s
//!    using a column mapping from `labstock-map`.
//! 2. [`StatusClassifier`] derives each record's expiry status from a
//!    reference date.
//! 3. [`MatrixBuilder`] classifies items into components, resolves pooled
//!    calibrator/QC types through [`GroupResolver`], and reduces every
//!    (type, component) cell with [`aggregate`].
//!
//! [`InventorySession`] wraps these steps for one snapshot and reruns
//! classification after every edit.
//!
//! [`InventoryRecord`]: labstock_model::InventoryRecord

pub mod aggregate;
pub mod classify;
pub mod component;
pub mod dates;
pub mod diagnostics;
pub mod edit;
pub mod error;
pub mod groups;
pub mod matrix;
pub mod normalize;
pub mod session;
pub mod summary;

pub use aggregate::aggregate;
pub use classify::{
    DEFAULT_WARNING_DAYS, StatusClassifier, classify, classify_with_window, reference_date,
};
pub use component::ComponentClassifier;
pub use dates::parse_expiry_date;
pub use diagnostics::{
    CellGap, DataQualityReport, GapReason, NEAR_MISS_THRESHOLD, NearMiss, UnusedKey,
};
pub use edit::{EditChange, RecordEdit};
pub use error::{CoreError, Result};
pub use groups::GroupResolver;
pub use matrix::{MatrixBuilder, build_matrix};
pub use normalize::{RawRecord, coerce_quantity, normalize_frame, normalize_raw};
pub use session::InventorySession;
pub use summary::{sort_for_display, status_counts, status_counts_by_type, summarize};
