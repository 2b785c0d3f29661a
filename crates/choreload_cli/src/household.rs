//! Household directory layout and configuration files.
//!
//! # Responsibility
//! - Locate the single chore catalog file in a household directory.
//! - Read `household.toml` and the catalog into core input types.
//!
//! # Invariants
//! - Exactly one `chores*.toml` file may exist per household directory.
//! - A missing `household.toml` yields defaults; a malformed one is an error.

use anyhow::{bail, Context, Result};
use choreload_core::{ChoreCatalog, RawChoreRow, DEFAULT_PERIOD_DAYS};
use clap::ValueEnum;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "household.toml";
const CATALOG_FILE_PATTERN: &str = r"^chores.*\.toml$";

/// Counter persistence backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Plain-text `overdue.log`, one `chore,days` per line.
    #[default]
    Text,
    /// `overdue.sqlite3` with run history.
    Sqlite,
}

/// Contents of `household.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HouseholdConfig {
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default = "default_period_days")]
    pub period_days: u32,
    #[serde(default)]
    pub store: StoreKind,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            participants: Vec::new(),
            period_days: DEFAULT_PERIOD_DAYS,
            store: StoreKind::default(),
            log_level: None,
        }
    }
}

fn default_period_days() -> u32 {
    DEFAULT_PERIOD_DAYS
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "chore")]
    chores: Vec<RawChoreRow>,
}

/// Reads `household.toml` from `dir`, falling back to defaults when absent.
pub fn load_config(dir: &Path) -> Result<HouseholdConfig> {
    let path = dir.join(CONFIG_FILE_NAME);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::debug!(
                "event=config_missing module=cli status=ok path={}",
                path.display()
            );
            return Ok(HouseholdConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()))
        }
    };
    toml::from_str(&content).with_context(|| format!("invalid {}", path.display()))
}

/// Finds the one catalog file in `dir`.
pub fn find_catalog(dir: &Path) -> Result<PathBuf> {
    let pattern = Regex::new(CATALOG_FILE_PATTERN).context("invalid catalog file pattern")?;
    let mut matches = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))? {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        let name = entry.file_name();
        if name.to_str().is_some_and(|name| pattern.is_match(name)) && entry.path().is_file() {
            matches.push(entry.path());
        }
    }
    matches.sort();

    match matches.len() {
        0 => bail!(
            "no chore catalog found in {} (file names must start with `chores` and end in `.toml`)",
            dir.display()
        ),
        1 => Ok(matches.remove(0)),
        _ => bail!(
            "several chore catalogs found in {}: {}",
            dir.display(),
            matches
                .iter()
                .filter_map(|path| path.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Reads and validates a catalog file.
pub fn load_catalog(path: &Path) -> Result<ChoreCatalog> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_catalog(&content).with_context(|| format!("invalid chore catalog {}", path.display()))
}

fn parse_catalog(content: &str) -> Result<ChoreCatalog> {
    let file: CatalogFile = toml::from_str(content)?;
    Ok(ChoreCatalog::load(file.chores)?)
}
