//! Composition of imported tables into one flat id space.
//!
//! Entries are laid out back to back: the system table takes ids
//! `1..=system.max_id`, each import then takes its full *declared* range in
//! order. An import whose text is partly unknown still occupies its whole
//! range, so the layout matches every other reader of the same stream.

use std::fmt;
use std::sync::Arc;

use ion_symbols::{Sid, SymbolTable, SymbolToken, TableKind};

use crate::error::{Result, SymtabError};

/// One composed table and the number of ids that precede it.
#[derive(Clone)]
struct ImportEntry {
    table: Arc<dyn SymbolTable>,
    base: u32,
}

/// Immutable, ordered composition `[system, import1, import2, ...]`.
#[derive(Clone)]
pub struct ImportsComposer {
    entries: Vec<ImportEntry>,
    max_id: u32,
}

impl ImportsComposer {
    /// Compose `imports` behind a system table.
    ///
    /// If the first import is a system table it is used; otherwise
    /// `default_system` is prepended. Any later system table, and any local
    /// table, is rejected.
    ///
    /// # Errors
    /// `InvalidImportKind` for a misplaced table; `SidOverflow` if the
    /// composed ids do not fit in a `u32` with room for a local symbol.
    pub fn new(default_system: Arc<dyn SymbolTable>, imports: &[Arc<dyn SymbolTable>]) -> Result<Self> {
        let (system, rest, first_position) = match imports.split_first() {
            Some((first, rest)) if first.kind() == TableKind::System => (Arc::clone(first), rest, 1),
            _ => (default_system, imports, 0),
        };
        if system.kind() != TableKind::System {
            return Err(SymtabError::InvalidImportKind {
                position: 0,
                kind: system.kind(),
            });
        }

        let mut tables = Vec::with_capacity(rest.len() + 1);
        tables.push(system);
        for (position, table) in (first_position..).zip(rest) {
            let kind = table.kind();
            if kind == TableKind::System || !kind.is_shared() {
                return Err(SymtabError::InvalidImportKind { position, kind });
            }
            tables.push(Arc::clone(table));
        }

        let composer = Self::from_tables(tables)?;
        tracing::debug!(
            imports = composer.entries.len() - 1,
            max_id = composer.max_id,
            "composed imports"
        );
        Ok(composer)
    }

    /// Lay the tables out back to back. The total must leave room for at
    /// least one local sid.
    fn from_tables(tables: Vec<Arc<dyn SymbolTable>>) -> Result<Self> {
        let mut base = 0u32;
        let mut entries = Vec::with_capacity(tables.len());
        for table in tables {
            let next = base.checked_add(table.max_id()).ok_or(SymtabError::SidOverflow)?;
            entries.push(ImportEntry { base, table });
            base = next;
        }
        if base == u32::MAX {
            return Err(SymtabError::SidOverflow);
        }
        Ok(ImportsComposer {
            entries,
            max_id: base,
        })
    }

    /// Total number of ids covered by the system table and all imports.
    #[inline]
    pub fn max_id(&self) -> u32 {
        self.max_id
    }

    /// The system table every composition starts with.
    pub fn system_symbol_table(&self) -> &Arc<dyn SymbolTable> {
        &self.entries[0].table
    }

    /// The imports after the system table, in declared order.
    pub fn imported_tables(&self) -> impl ExactSizeIterator<Item = &Arc<dyn SymbolTable>> + '_ {
        self.entries[1..].iter().map(|entry| &entry.table)
    }

    /// Number of ids preceding entry `index` (0 is the system table).
    pub fn base_of(&self, index: usize) -> Option<u32> {
        self.entries.get(index).map(|entry| entry.base)
    }

    /// Number of entries, system table included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the system table is always present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry owning `sid` and the sid relative to that entry's table.
    fn locate(&self, sid: Sid) -> Option<(&ImportEntry, Sid)> {
        if sid.raw() > self.max_id {
            return None;
        }
        // Last entry whose range starts below `sid`; empty entries share a
        // base with their successor and are skipped by this.
        let index = self.entries.partition_point(|entry| entry.base < sid.raw());
        let entry = self.entries.get(index.checked_sub(1)?)?;
        Some((entry, Sid::new(sid.raw() - entry.base)?))
    }

    /// The real text of `sid`, if the owning import knows it.
    pub fn find_known_symbol(&self, sid: Sid) -> Option<Arc<str>> {
        let (entry, local) = self.locate(sid)?;
        entry.table.find_known_symbol(local)
    }

    /// The sid of `text`; earlier entries shadow later ones.
    pub fn find_symbol(&self, text: &str) -> Option<Sid> {
        self.entries.iter().find_map(|entry| {
            let local = entry.table.find_symbol(text)?;
            if local.raw() > entry.table.max_id() {
                return None;
            }
            local.checked_add(entry.base)
        })
    }

    /// Like `find_symbol`, carrying the owning table's copy of the text.
    pub fn find(&self, text: &str) -> Option<SymbolToken> {
        let sid = self.find_symbol(text)?;
        Some(SymbolToken::new(self.find_known_symbol(sid), sid))
    }

    /// Whether both compositions hold the very same table objects in the
    /// same order.
    pub fn equal_imports(&self, other: &ImportsComposer) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| Arc::ptr_eq(&a.table, &b.table))
    }

    /// No-op; compositions are immutable.
    pub fn make_read_only(&self) {}

    /// Always true.
    pub fn is_read_only(&self) -> bool {
        true
    }
}

impl fmt::Debug for ImportsComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| {
                (
                    entry.table.name().unwrap_or_default(),
                    entry.table.version(),
                    entry.base,
                    entry.table.max_id(),
                )
            }))
            .finish()
    }
}
