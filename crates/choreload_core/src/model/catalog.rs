//! Validated chore catalog.
//!
//! # Responsibility
//! - Turn raw catalog rows into validated `Chore` records.
//! - Expose a read-only, ordered view for the scheduler.
//!
//! # Invariants
//! - Loading is all-or-nothing: one bad row fails the whole catalog.
//! - Catalog order equals input row order.
//! - No mutation after construction.

use crate::model::chore::{Chore, RawChoreRow, RawValue};
use log::debug;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog validation errors. `row` is 1-based in input order.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A required field is absent (or the chore name is blank).
    Schema { row: usize, field: &'static str },
    DuplicateChore { row: usize, name: String },
    /// The name carries a control character such as a newline or tab.
    InvalidName { row: usize, name: String },
    InvalidFrequency {
        row: usize,
        chore: String,
        value: RawValue,
    },
    InvalidWeight {
        row: usize,
        chore: String,
        value: RawValue,
    },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schema { row, field } => {
                write!(f, "catalog row {row} lacks required field `{field}`")
            }
            Self::DuplicateChore { row, name } => {
                write!(f, "catalog row {row} repeats chore name `{name}`")
            }
            Self::InvalidName { row, name } => write!(
                f,
                "catalog row {row}: chore name {name:?} contains a control character"
            ),
            Self::InvalidFrequency { row, chore, value } => write!(
                f,
                "catalog row {row} (`{chore}`): frequency must be a positive integer, got {value}"
            ),
            Self::InvalidWeight { row, chore, value } => write!(
                f,
                "catalog row {row} (`{chore}`): weight must be a positive number, got {value}"
            ),
        }
    }
}

impl Error for CatalogError {}

/// Immutable, ordered set of chore definitions for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoreCatalog {
    chores: Vec<Chore>,
    index: HashMap<String, usize>,
}

impl ChoreCatalog {
    /// Builds a catalog from raw rows.
    ///
    /// # Errors
    /// - `Schema` when `Chore`, `Frequency`, `Dedicated` or `Weight` is absent.
    /// - `InvalidName` when the name contains a control character.
    /// - `DuplicateChore` when a trimmed name repeats.
    /// - `InvalidFrequency` unless the frequency is an integer `> 0`.
    /// - `InvalidWeight` unless the weight is a finite number `> 0`.
    pub fn load<I>(rows: I) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = RawChoreRow>,
    {
        let mut chores = Vec::new();
        let mut index = HashMap::new();

        for (offset, raw) in rows.into_iter().enumerate() {
            let row = offset + 1;
            let chore = validate_row(row, raw)?;
            if index.contains_key(&chore.name) {
                return Err(CatalogError::DuplicateChore {
                    row,
                    name: chore.name,
                });
            }
            index.insert(chore.name.clone(), chores.len());
            chores.push(chore);
        }

        debug!(
            "event=catalog_load module=catalog status=ok chores={}",
            chores.len()
        );
        Ok(Self { chores, index })
    }

    /// Iterates chores in catalog order. Call again to restart.
    pub fn all_chores(&self) -> std::slice::Iter<'_, Chore> {
        self.chores.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Chore> {
        self.index.get(name).map(|&position| &self.chores[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.chores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chores.is_empty()
    }
}

fn validate_row(row: usize, raw: RawChoreRow) -> CatalogResult<Chore> {
    let name = raw
        .chore
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(CatalogError::Schema {
            row,
            field: "Chore",
        })?
        .to_string();
    if name.chars().any(char::is_control) {
        return Err(CatalogError::InvalidName { row, name });
    }
    let frequency = raw.frequency.ok_or(CatalogError::Schema {
        row,
        field: "Frequency",
    })?;
    let dedicated = raw.dedicated.ok_or(CatalogError::Schema {
        row,
        field: "Dedicated",
    })?;
    let weight = raw.weight.ok_or(CatalogError::Schema {
        row,
        field: "Weight",
    })?;

    let frequency_days = match frequency {
        RawValue::Integer(value) if value > 0 => {
            u32::try_from(value).map_err(|_| CatalogError::InvalidFrequency {
                row,
                chore: name.clone(),
                value: RawValue::Integer(value),
            })?
        }
        other => {
            return Err(CatalogError::InvalidFrequency {
                row,
                chore: name,
                value: other,
            })
        }
    };

    let weight = match weight {
        RawValue::Integer(value) if value > 0 => value as f64,
        RawValue::Float(value) if value.is_finite() && value > 0.0 => value,
        other => {
            return Err(CatalogError::InvalidWeight {
                row,
                chore: name,
                value: other,
            })
        }
    };

    let dedicated_owner = Some(dedicated.trim())
        .filter(|owner| !owner.is_empty())
        .map(str::to_string);

    Ok(Chore {
        name,
        frequency_days,
        dedicated_owner,
        weight,
    })
}
