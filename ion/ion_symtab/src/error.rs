//! Symbol table errors.

use std::fmt;

use ion_symbols::{Sid, TableKind};
use thiserror::Error;

/// Which half of a UTF-16 surrogate pair is out of place.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SurrogateDefect {
    /// A low surrogate with no high surrogate before it.
    UnpairedTrailing,
    /// A high surrogate not followed by a low surrogate.
    UnmatchedLeading,
}

impl fmt::Display for SurrogateDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SurrogateDefect::UnpairedTrailing => "unpaired trailing",
            SurrogateDefect::UnmatchedLeading => "unmatched leading",
        })
    }
}

/// Error raised by symbol table operations.
///
/// Every variant is reported to the immediate caller; nothing is retried.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SymtabError {
    #[error("symbols must contain 1 or more characters")]
    EmptySymbolText,

    #[error("{defect} surrogate in symbol name at position {position}")]
    InvalidSymbolText {
        position: usize,
        defect: SurrogateDefect,
    },

    #[error("symbol table is read-only")]
    FrozenTable,

    #[error("cannot redefine ${sid} from {existing:?} to {requested:?}")]
    SymbolRedefinition {
        sid: Sid,
        existing: String,
        requested: String,
    },

    #[error(
        "import of shared table {name:?} lacks a valid max_id field, but an exact match was not found in the catalog{}",
        .found_version.map(|v| format!(" (found version {v})")).unwrap_or_default()
    )]
    UnresolvableImport {
        name: String,
        version: u32,
        found_version: Option<u32>,
    },

    #[error("symbol table image is bound to a different element factory")]
    WrongDocumentFactory,

    #[error("symbol ids exceed the 32-bit range")]
    SidOverflow,

    #[error("import {position} is a {kind} table; only the first import may be a system table and local tables cannot be imported")]
    InvalidImportKind { position: usize, kind: TableKind },
}

/// Result alias for symbol table operations.
pub type Result<T, E = SymtabError> = std::result::Result<T, E>;
