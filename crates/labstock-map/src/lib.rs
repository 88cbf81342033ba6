#![deny(unsafe_code)]

//! Source column detection for inventory tables.
//!
//! Maps arbitrary spreadsheet headers onto the canonical inventory schema
//! using operator-maintained candidate lists. Detection never fails: a field
//! with no matching column is simply left unmapped.

mod detect;
mod error;
mod mapping;

pub use detect::{detect_columns, find_column};
pub use error::MappingError;
pub use mapping::{ColumnMapping, MappedColumn, MatchKind};
