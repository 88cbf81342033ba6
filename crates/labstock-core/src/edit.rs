//! Row edits.

use std::str::FromStr;

use chrono::NaiveDate;
use labstock_model::CanonicalField;
use serde::{Deserialize, Serialize};

use crate::dates::parse_expiry_date;
use crate::error::CoreError;

/// New value for an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "field", content = "value")]
pub enum EditChange {
    Quantity(u64),
    /// `None` clears the date (never expires).
    ExpiryDate(Option<NaiveDate>),
}

/// One edit addressed to a row by its 1-based display position.
///
/// Parses from `ROW:FIELD=VALUE`, e.g. `3:quantity=12` or
/// `7:expiry_date=2025-01-31`. An empty expiry value clears the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEdit {
    pub row: usize,
    pub change: EditChange,
}

impl RecordEdit {
    pub fn quantity(row: usize, quantity: u64) -> Self {
        Self {
            row,
            change: EditChange::Quantity(quantity),
        }
    }

    pub fn expiry_date(row: usize, expiry_date: Option<NaiveDate>) -> Self {
        Self {
            row,
            change: EditChange::ExpiryDate(expiry_date),
        }
    }
}

impl FromStr for RecordEdit {
    type Err = CoreError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (row, assignment) = input
            .split_once(':')
            .ok_or_else(|| CoreError::invalid_edit(input, "expected ROW:FIELD=VALUE"))?;
        let row: usize = row
            .trim()
            .parse()
            .ok()
            .filter(|row| *row > 0)
            .ok_or_else(|| CoreError::invalid_edit(input, "row must be a positive integer"))?;
        let (field, value) = assignment
            .split_once('=')
            .ok_or_else(|| CoreError::invalid_edit(input, "expected FIELD=VALUE after ':'"))?;
        let field: CanonicalField = field.parse().map_err(|_| {
            CoreError::invalid_edit(input, format!("unknown field '{}'", field.trim()))
        })?;
        let value = value.trim();

        let change = match field {
            CanonicalField::Quantity => {
                let quantity = value.parse::<u64>().map_err(|_| {
                    CoreError::invalid_edit(input, "quantity must be a non-negative integer")
                })?;
                EditChange::Quantity(quantity)
            }
            CanonicalField::ExpiryDate if value.is_empty() => EditChange::ExpiryDate(None),
            CanonicalField::ExpiryDate => {
                let date = parse_expiry_date(value)
                    .ok_or_else(|| CoreError::invalid_edit(input, "unreadable expiry date"))?;
                EditChange::ExpiryDate(Some(date))
            }
            other => {
                return Err(CoreError::invalid_edit(
                    input,
                    format!("field '{other}' is not editable (quantity, expiry_date)"),
                ));
            }
        };
        Ok(Self { row, change })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quantity_and_expiry_edits() {
        assert_eq!("3:quantity=12".parse(), Ok(RecordEdit::quantity(3, 12)));
        assert_eq!(
            " 7 : expiry-date = 2025-01-31 ".parse(),
            Ok(RecordEdit::expiry_date(7, NaiveDate::from_ymd_opt(2025, 1, 31)))
        );
        assert_eq!("2:expiry_date=".parse(), Ok(RecordEdit::expiry_date(2, None)));
    }

    #[test]
    fn rejects_malformed_edits() {
        for input in [
            "quantity=3",
            "0:quantity=3",
            "x:quantity=3",
            "1:quantity",
            "1:quantity=-2",
            "1:quantity=2.5",
            "1:lot=4",
            "1:item=Glucose Reagent",
            "1:expiry_date=someday",
        ] {
            let result: Result<RecordEdit, _> = input.parse();
            assert!(
                matches!(result, Err(CoreError::InvalidEdit { .. })),
                "accepted: {input}"
            );
        }
    }
}
