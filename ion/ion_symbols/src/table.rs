//! The interface shared by every symbol table kind.

use std::fmt;
use std::sync::Arc;

use crate::sid::Sid;
use crate::token::SymbolToken;

/// The role a symbol table plays in the layered namespace.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableKind {
    /// The built-in table of the format version.
    System,
    /// A named, versioned table importable by reference.
    Shared,
    /// A stand-in for a shared table that could not be resolved exactly.
    Substitute,
    /// The mutable, per-stream table.
    Local,
}

impl TableKind {
    /// Whether tables of this kind are immutable and carry a name and version.
    #[inline]
    pub const fn is_shared(self) -> bool {
        !matches!(self, TableKind::Local)
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TableKind::System => "system",
            TableKind::Shared => "shared",
            TableKind::Substitute => "substitute",
            TableKind::Local => "local",
        })
    }
}

/// A mapping between symbol text and symbol ids.
///
/// Sids passed to and returned from a table are relative to that table: a
/// shared table always numbers its own symbols from 1. Local tables number
/// their symbols in the flat id space of their imports.
///
/// # Thread Safety
/// Implementors must be safe to share across threads. Immutable tables need
/// no locking; local tables guard their state internally.
pub trait SymbolTable: Send + Sync + fmt::Debug {
    /// The role of this table.
    fn kind(&self) -> TableKind;

    /// The table name; `None` for local tables.
    fn name(&self) -> Option<&str>;

    /// The table version; 0 for local tables.
    fn version(&self) -> u32;

    /// The highest sid this table defines.
    fn max_id(&self) -> u32;

    /// The real text of `sid`, if this table knows it.
    fn find_known_symbol(&self, sid: Sid) -> Option<Arc<str>>;

    /// The lowest sid declared with `text`, if any. Empty text has no sid,
    /// so `find_symbol("")` is `None` and never an error.
    fn find_symbol(&self, text: &str) -> Option<Sid>;

    /// The token for `text`, carrying the table's own copy of the text.
    fn find(&self, text: &str) -> Option<SymbolToken> {
        let sid = self.find_symbol(text)?;
        Some(SymbolToken::new(self.find_known_symbol(sid), sid))
    }

    /// The token for `sid` if it lies within `1..=max_id`.
    ///
    /// Inside the range the token's text is `None` for slots whose text is
    /// not known.
    fn symbol(&self, sid: Sid) -> Option<SymbolToken> {
        (sid.raw() <= self.max_id()).then(|| SymbolToken::new(self.find_known_symbol(sid), sid))
    }

    /// Whether the table rejects further mutation.
    fn is_read_only(&self) -> bool {
        true
    }

    /// The version marker symbol of the format version this table belongs to.
    fn ion_version_id(&self) -> Option<&str> {
        None
    }
}
