//! Ion Symtab - import composition and local symbol tables
//!
//! This crate builds the mutable half of the symbol table subsystem on top of
//! `ion_symbols`:
//! - `ImportsComposer` lays the system table and imports out in one flat id
//!   space
//! - `LocalSymbolTable` interns new symbols after the imported range, with an
//!   optional struct image kept in sync
//! - `LocalSymbolTable::from_reader` / `from_image` read the
//!   `$ion_symbol_table::{imports:[...], symbols:[...]}` form
//! - `SymtabConfig` carries the catalog, imports and image factory used to
//!   create tables
//!
//! # Sid layout
//!
//! ```text
//! 1 ..= 9          system symbols
//! 10 ..            each import's declared range, in order
//! max_id(imports)+1 ..   local symbols
//! ```
//!
//! The layout follows declared ranges, not the number of symbols actually
//! known, so it matches every other reader of the same stream.

mod composer;
mod config;
mod error;
mod local;
mod parse;
mod text;

use std::sync::Once;

pub use composer::ImportsComposer;
pub use config::SymtabConfig;
pub use error::{Result, SurrogateDefect, SymtabError};
pub use local::LocalSymbolTable;
pub use text::validate_utf16;

pub use ion_symbols::{Sid, SymbolTable, SymbolToken, TableKind};

/// Starting length of a local table's name array.
pub const DEFAULT_CAPACITY: usize = 16;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=ion_symtab=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
