//! Stand-ins for imports that cannot be satisfied exactly.
//!
//! An import declaration names `(name, version, max_id)`. When the catalog has
//! no table with that exact identity and size, the import still has to occupy
//! exactly `max_id` ids in the composed id space, so a substitute is built:
//! it answers from the closest real table for the ids that table defines and
//! has no text for the rest.

use std::fmt;
use std::sync::Arc;

use crate::shared::SharedSymbolTable;
use crate::sid::Sid;
use crate::table::{SymbolTable, TableKind};

/// A shared table with a declared `(version, max_id)` that may differ from
/// the real table it wraps.
pub struct SubstituteSymbolTable {
    name: String,
    version: u32,
    max_id: u32,
    original: Option<Arc<SharedSymbolTable>>,
}

impl SubstituteSymbolTable {
    /// A substitute with no real table behind it; no sid has text.
    pub fn unresolved(name: impl Into<String>, version: u32, max_id: u32) -> Self {
        SubstituteSymbolTable {
            name: name.into(),
            version: version.max(1),
            max_id,
            original: None,
        }
    }

    /// A substitute over the closest match found in the catalog.
    pub fn wrapping(original: Arc<SharedSymbolTable>, version: u32, max_id: u32) -> Self {
        SubstituteSymbolTable {
            name: original.name().unwrap_or_default().to_owned(),
            version: version.max(1),
            max_id,
            original: Some(original),
        }
    }

    /// The real table this substitute delegates to, if any.
    pub fn original(&self) -> Option<&Arc<SharedSymbolTable>> {
        self.original.as_ref()
    }
}

impl SymbolTable for SubstituteSymbolTable {
    fn kind(&self) -> TableKind {
        TableKind::Substitute
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn max_id(&self) -> u32 {
        self.max_id
    }

    fn find_known_symbol(&self, sid: Sid) -> Option<Arc<str>> {
        if sid.raw() > self.max_id {
            return None;
        }
        self.original.as_ref()?.find_known_symbol(sid)
    }

    fn find_symbol(&self, text: &str) -> Option<Sid> {
        self.original
            .as_ref()?
            .find_symbol(text)
            .filter(|sid| sid.raw() <= self.max_id)
    }
}

impl fmt::Debug for SubstituteSymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubstituteSymbolTable")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("max_id", &self.max_id)
            .field("original", &self.original)
            .finish()
    }
}
