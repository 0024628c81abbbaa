//! Resolution of `(name, version)` to shared symbol tables.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::shared::SharedSymbolTable;
use crate::table::SymbolTable;

/// A registry of shared symbol tables.
///
/// Higher-level crates resolve import declarations through this trait so
/// they do not depend on how tables are stored or fetched.
pub trait Catalog: Send + Sync + fmt::Debug {
    /// The table registered as `(name, version)`, or, failing that, the
    /// best available version of `name`.
    ///
    /// Callers must compare the returned table's version with the one they
    /// asked for.
    fn get_table(&self, name: &str, version: u32) -> Option<Arc<SharedSymbolTable>>;
}

/// In-memory catalog keyed by name, then version.
///
/// Without an exact match, `get_table` answers with the highest registered
/// version of the name.
#[derive(Default)]
pub struct SimpleCatalog {
    tables: RwLock<FxHashMap<String, BTreeMap<u32, Arc<SharedSymbolTable>>>>,
}

impl SimpleCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, returning the one it replaces.
    pub fn put_table(&self, table: Arc<SharedSymbolTable>) -> Option<Arc<SharedSymbolTable>> {
        let name = table.name().unwrap_or_default().to_owned();
        let version = table.version();
        self.tables.write().entry(name).or_default().insert(version, table)
    }

    /// Remove the table registered as exactly `(name, version)`.
    pub fn remove_table(&self, name: &str, version: u32) -> Option<Arc<SharedSymbolTable>> {
        let mut tables = self.tables.write();
        let versions = tables.get_mut(name)?;
        let removed = versions.remove(&version);
        if versions.is_empty() {
            tables.remove(name);
        }
        removed
    }

    /// The highest registered version of `name`.
    pub fn get_latest(&self, name: &str) -> Option<Arc<SharedSymbolTable>> {
        let tables = self.tables.read();
        tables.get(name)?.values().next_back().cloned()
    }

    /// Number of registered tables across all names and versions.
    pub fn len(&self) -> usize {
        self.tables.read().values().map(BTreeMap::len).sum()
    }

    /// Whether no table is registered.
    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}

impl Catalog for SimpleCatalog {
    fn get_table(&self, name: &str, version: u32) -> Option<Arc<SharedSymbolTable>> {
        let tables = self.tables.read();
        let versions = tables.get(name)?;
        versions
            .get(&version)
            .or_else(|| versions.values().next_back())
            .cloned()
    }
}

impl fmt::Debug for SimpleCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.read();
        let mut entries: Vec<(&str, u32)> = tables
            .iter()
            .flat_map(|(name, versions)| versions.keys().map(move |v| (name.as_str(), *v)))
            .collect();
        entries.sort_unstable();
        f.debug_struct("SimpleCatalog").field("tables", &entries).finish()
    }
}
