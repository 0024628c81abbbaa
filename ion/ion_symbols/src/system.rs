//! The Ion 1.0 system symbol table.
//!
//! The system symbols occupy sids 1 through 9 of every Ion 1.0 stream, in the
//! order given by [`SYSTEM_SYMBOLS`].

use std::sync::{Arc, OnceLock};

use crate::shared::SharedSymbolTable;
use crate::sid::Sid;

/// Name of the system table, reserved: imports may not use it.
pub const ION: &str = "$ion";
/// Version marker of Ion 1.0.
pub const ION_1_0: &str = "$ion_1_0";
/// Annotation marking a local symbol table image.
pub const ION_SYMBOL_TABLE: &str = "$ion_symbol_table";
/// Field naming an imported table.
pub const NAME: &str = "name";
/// Field giving an imported table's version.
pub const VERSION: &str = "version";
/// Field listing a local table's imports.
pub const IMPORTS: &str = "imports";
/// Field listing a local table's declared symbols.
pub const SYMBOLS: &str = "symbols";
/// Field giving an imported table's declared max id.
pub const MAX_ID: &str = "max_id";
/// Annotation marking a shared symbol table image.
pub const ION_SHARED_SYMBOL_TABLE: &str = "$ion_shared_symbol_table";

/// The system symbols in sid order.
pub const SYSTEM_SYMBOLS: [&str; 9] = [
    ION,
    ION_1_0,
    ION_SYMBOL_TABLE,
    NAME,
    VERSION,
    IMPORTS,
    SYMBOLS,
    MAX_ID,
    ION_SHARED_SYMBOL_TABLE,
];

/// Highest sid of the Ion 1.0 system table.
pub const SYSTEM_MAX_ID: u32 = 9;

/// Sid of `$ion_symbol_table`.
pub const ION_SYMBOL_TABLE_SID: Sid = Sid::after(2);

static SYSTEM_TABLE: OnceLock<Arc<SharedSymbolTable>> = OnceLock::new();

/// The process-wide Ion 1.0 system table.
pub fn system_symbol_table() -> Arc<SharedSymbolTable> {
    Arc::clone(
        SYSTEM_TABLE.get_or_init(|| Arc::new(SharedSymbolTable::system(ION, 1, ION_1_0, SYSTEM_SYMBOLS))),
    )
}

#[cfg(test)]
mod tests;
