//! Registry of named mortality tables
//!
//! The registry is built once at startup (before the first calculation) and
//! passed by shared reference into every pricing call; it is never mutated
//! afterwards. This replaces any notion of ambient process-wide table state
//! with an explicit init-once object.

use super::loader::load_mortality_table;
use super::MortalityTable;
use crate::error::PricingError;
use std::collections::HashMap;
use std::path::Path;

/// Fallback table used when a policy does not name one
pub const DEFAULT_TABLE: &str = "male";

/// Immutable lookup of mortality tables keyed by lowercase name
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: HashMap<String, MortalityTable>,
}

impl TableRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table under a name. Keys are lowercased so that lookup is
    /// case-insensitive. Intended for startup only.
    pub fn insert(&mut self, name: impl Into<String>, table: MortalityTable) {
        self.tables.insert(name.into().to_lowercase(), table);
    }

    /// Build a registry by loading every `.csv` file in a directory; the
    /// file stem becomes the table name.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, PricingError> {
        let mut registry = Self::new();

        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let table = load_mortality_table(&path)?;
            log::info!(
                "loaded mortality table '{}' ({} ages)",
                name.to_lowercase(),
                table.len()
            );
            registry.insert(name, table);
        }

        if registry.is_empty() {
            log::warn!("no mortality tables found in {}", dir.as_ref().display());
        }

        Ok(registry)
    }

    /// Resolve a table by name. The empty string falls back to the default
    /// table; unknown names are an error.
    pub fn resolve(&self, name: &str) -> Result<&MortalityTable, PricingError> {
        let key = if name.is_empty() {
            DEFAULT_TABLE.to_string()
        } else {
            name.to_lowercase()
        };
        self.tables
            .get(&key)
            .ok_or(PricingError::UnknownTable { name: key })
    }

    /// Sorted list of registered table names
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the registry holds no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
