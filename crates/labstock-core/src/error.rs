//! Error types for session edits.

use thiserror::Error;

/// Errors raised while editing an inventory session.
///
/// Malformed inventory data never produces one of these; only caller input
/// that cannot be applied does.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Edit expression could not be parsed.
    #[error("invalid edit '{input}': {reason}")]
    InvalidEdit { input: String, reason: String },

    /// Edit addressed a row that does not exist (rows are 1-based).
    #[error("row {row} is out of range (inventory has {len} rows)")]
    RowOutOfRange { row: usize, len: usize },
}

impl CoreError {
    pub(crate) fn invalid_edit(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidEdit {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = CoreError::RowOutOfRange { row: 9, len: 3 };
        assert_eq!(err.to_string(), "row 9 is out of range (inventory has 3 rows)");
        let err = CoreError::invalid_edit("x", "missing ':'");
        assert_eq!(err.to_string(), "invalid edit 'x': missing ':'");
    }
}
