//! Canonical field to source column mapping.

use std::collections::{BTreeMap, BTreeSet};

use labstock_model::CanonicalField;
use serde::{Deserialize, Serialize};

use crate::error::MappingError;

/// How a mapping entry was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Case-insensitive equality with a candidate name.
    Exact,
    /// A candidate name occurs inside the column name.
    Substring,
    /// Set explicitly by the operator.
    Override,
}

/// One mapped field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedColumn {
    pub column: String,
    pub kind: MatchKind,
}

/// Source column chosen for each canonical field.
///
/// Fields without an entry are absent from the source and normalize to
/// nulls. Several fields may point at the same source column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    entries: BTreeMap<CanonicalField, MappedColumn>,
}

impl ColumnMapping {
    /// Source column for `field`, if mapped.
    pub fn source(&self, field: CanonicalField) -> Option<&str> {
        self.entries.get(&field).map(|entry| entry.column.as_str())
    }

    pub fn entry(&self, field: CanonicalField) -> Option<&MappedColumn> {
        self.entries.get(&field)
    }

    pub(crate) fn set_detected(&mut self, field: CanonicalField, column: String, kind: MatchKind) {
        self.entries.insert(field, MappedColumn { column, kind });
    }

    /// Maps `field` to `column`, replacing any detected entry.
    pub fn set(&mut self, field: CanonicalField, column: impl Into<String>) {
        self.entries.insert(
            field,
            MappedColumn {
                column: column.into(),
                kind: MatchKind::Override,
            },
        );
    }

    /// Marks `field` as absent from the source.
    pub fn clear(&mut self, field: CanonicalField) {
        self.entries.remove(&field);
    }

    /// Applies `FIELD=COLUMN` overrides in order. `FIELD=` clears the field.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] for malformed overrides or unknown fields;
    /// the mapping is left unchanged in that case.
    pub fn apply_overrides<S: AsRef<str>>(&mut self, overrides: &[S]) -> Result<(), MappingError> {
        let mut parsed = Vec::with_capacity(overrides.len());
        for raw in overrides {
            parsed.push(parse_override(raw.as_ref())?);
        }
        for (field, column) in parsed {
            match column {
                Some(column) => self.set(field, column),
                None => self.clear(field),
            }
        }
        Ok(())
    }

    /// Canonical fields with no source column.
    pub fn missing_fields(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| !self.entries.contains_key(field))
            .collect()
    }

    /// Mapped fields whose source column does not exist in `columns`.
    ///
    /// These behave like missing fields during normalization.
    pub fn dangling_fields(&self, columns: &[String]) -> Vec<(CanonicalField, String)> {
        self.entries
            .iter()
            .filter(|(_, entry)| !columns.contains(&entry.column))
            .map(|(field, entry)| (*field, entry.column.clone()))
            .collect()
    }

    /// Source columns not used by any canonical field, in source order.
    pub fn unmapped_columns(&self, columns: &[String]) -> Vec<String> {
        let used: BTreeSet<&str> = self
            .entries
            .values()
            .map(|entry| entry.column.as_str())
            .collect();
        columns
            .iter()
            .filter(|column| !used.contains(column.as_str()))
            .cloned()
            .collect()
    }
}

fn parse_override(raw: &str) -> Result<(CanonicalField, Option<String>), MappingError> {
    let (field, column) = raw
        .split_once('=')
        .ok_or_else(|| MappingError::InvalidOverride(raw.to_string()))?;
    let field: CanonicalField = field
        .parse()
        .map_err(|_| MappingError::UnknownField(field.trim().to_string()))?;
    let column = column.trim();
    if column.is_empty() {
        Ok((field, None))
    } else {
        Ok((field, Some(column.to_string())))
    }
}
