//! Error types for mapping operations.

use std::fmt;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Override names a field that is not part of the canonical schema.
    UnknownField(String),
    /// Override is not of the form `field=column`.
    InvalidOverride(String),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(field) => write!(
                f,
                "Unknown field '{field}' (expected one of platform, type, item, cat_no, quantity, expiry_date)"
            ),
            Self::InvalidOverride(raw) => {
                write!(f, "Invalid mapping override '{raw}' (expected FIELD=COLUMN)")
            }
        }
    }
}

impl std::error::Error for MappingError {}
