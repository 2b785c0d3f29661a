//! Chore definition and raw catalog record.
//!
//! # Responsibility
//! - Define the canonical chore record used by scheduling.
//! - Define the loosely-typed row shape handed over by catalog readers.
//!
//! # Invariants
//! - `frequency_days > 0`.
//! - `weight` is finite and `> 0`.
//! - `dedicated_owner`, when present, is a non-empty trimmed identifier.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable chore identifier (its catalog name).
pub type ChoreName = String;

/// Participant identifier as written in catalogs and configuration.
pub type ParticipantId = String;

/// Validated chore definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chore {
    /// Unique catalog name.
    pub name: ChoreName,
    /// Minimum number of days between two completions.
    pub frequency_days: u32,
    /// Owner that always takes this chore when it is due.
    pub dedicated_owner: Option<ParticipantId>,
    /// Relative effort, only used for load balancing.
    pub weight: f64,
}

impl Chore {
    /// Returns whether this chore bypasses load balancing.
    pub fn is_dedicated(&self) -> bool {
        self.dedicated_owner.is_some()
    }
}

/// One cell value as produced by a catalog reader.
///
/// Readers keep the source type so validation can reject, for example, a
/// fractional frequency instead of silently rounding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Display for RawValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "\"{value}\""),
        }
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Unvalidated catalog record.
///
/// Field names follow the spreadsheet column headers (`Chore`, `Frequency`,
/// `Dedicated`, `Weight`). `None` means the field was absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawChoreRow {
    #[serde(rename = "Chore", default)]
    pub chore: Option<String>,
    #[serde(rename = "Frequency", default)]
    pub frequency: Option<RawValue>,
    #[serde(rename = "Dedicated", default)]
    pub dedicated: Option<String>,
    #[serde(rename = "Weight", default)]
    pub weight: Option<RawValue>,
}

impl RawChoreRow {
    /// Builds a fully populated row; mostly useful for tests and fixtures.
    pub fn new(
        chore: impl Into<String>,
        frequency: impl Into<RawValue>,
        dedicated: impl Into<String>,
        weight: impl Into<RawValue>,
    ) -> Self {
        Self {
            chore: Some(chore.into()),
            frequency: Some(frequency.into()),
            dedicated: Some(dedicated.into()),
            weight: Some(weight.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RawChoreRow, RawValue};

    #[test]
    fn raw_row_keeps_source_types() {
        let row = RawChoreRow::new("Dishes", 7_i64, "", 1.5_f64);
        assert_eq!(row.frequency, Some(RawValue::Integer(7)));
        assert_eq!(row.weight, Some(RawValue::Float(1.5)));
        assert_eq!(row.dedicated.as_deref(), Some(""));
    }

    #[test]
    fn raw_value_display_quotes_text() {
        assert_eq!(RawValue::from("weekly").to_string(), "\"weekly\"");
        assert_eq!(RawValue::Integer(-3).to_string(), "-3");
    }
}
