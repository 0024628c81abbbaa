//! Named, versioned, immutable symbol tables.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::sid::Sid;
use crate::table::{SymbolTable, TableKind};

/// An immutable symbol table identified by `(name, version)`.
///
/// Symbols are numbered from 1 in declaration order. A slot may be a gap
/// (no text); duplicate texts are allowed and `find_symbol` returns the
/// lowest sid.
pub struct SharedSymbolTable {
    kind: TableKind,
    name: String,
    version: u32,
    symbols: Vec<Option<Arc<str>>>,
    by_text: FxHashMap<Arc<str>, Sid>,
    ion_version_id: Option<&'static str>,
}

impl SharedSymbolTable {
    /// Create a shared table. Empty strings become gaps; a version below 1
    /// is treated as 1.
    pub fn new<I, S>(name: impl Into<String>, version: u32, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_gaps(name, version, symbols.into_iter().map(Some))
    }

    /// Create a shared table whose symbol list may contain explicit gaps.
    pub fn with_gaps<I, S>(name: impl Into<String>, version: u32, symbols: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        Self::build(TableKind::Shared, name.into(), version, symbols, None)
    }

    /// Create the system table of a format version.
    pub(crate) fn system<I, S>(
        name: &str,
        version: u32,
        ion_version_id: &'static str,
        symbols: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(
            TableKind::System,
            name.to_owned(),
            version,
            symbols.into_iter().map(Some),
            Some(ion_version_id),
        )
    }

    fn build<I, S>(
        kind: TableKind,
        name: String,
        version: u32,
        symbols: I,
        ion_version_id: Option<&'static str>,
    ) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let symbols: Vec<Option<Arc<str>>> = symbols
            .into_iter()
            .map(|text| text.filter(|t| !t.as_ref().is_empty()).map(|t| Arc::from(t.as_ref())))
            .collect();

        let mut by_text = FxHashMap::default();
        for (sid, text) in (1..).filter_map(Sid::new).zip(&symbols) {
            if let Some(text) = text {
                // Keep the lowest sid for duplicate texts.
                by_text.entry(Arc::clone(text)).or_insert(sid);
            }
        }

        SharedSymbolTable {
            kind,
            name,
            version: version.max(1),
            symbols,
            by_text,
            ion_version_id,
        }
    }

    /// The declared symbols in sid order, gaps as `None`.
    pub fn symbols(&self) -> impl ExactSizeIterator<Item = Option<&str>> + '_ {
        self.symbols.iter().map(Option::as_deref)
    }
}

impl SymbolTable for SharedSymbolTable {
    fn kind(&self) -> TableKind {
        self.kind
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn max_id(&self) -> u32 {
        u32::try_from(self.symbols.len()).unwrap_or(u32::MAX)
    }

    fn find_known_symbol(&self, sid: Sid) -> Option<Arc<str>> {
        self.symbols.get(sid.index()).cloned().flatten()
    }

    fn find_symbol(&self, text: &str) -> Option<Sid> {
        self.by_text.get(text).copied()
    }

    fn ion_version_id(&self) -> Option<&str> {
        self.ion_version_id
    }
}

impl fmt::Debug for SharedSymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSymbolTable")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("version", &self.version)
            .field("max_id", &self.max_id())
            .finish()
    }
}

#[cfg(test)]
mod tests;
