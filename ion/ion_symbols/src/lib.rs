//! Ion Symbols - the immutable half of the symbol table subsystem
//!
//! This crate contains the leaf types every symbol table is built from:
//! - `Sid` for symbol ids (never zero, "unknown" is `None`)
//! - `SymbolToken` for resolved (text, sid) pairs
//! - The `SymbolTable` trait shared by every table kind
//! - The Ion 1.0 system table
//! - Named, versioned shared tables and their substitutes
//! - The `Catalog` that resolves `(name, version)` to a shared table
//!
//! # Design Philosophy
//!
//! - **Immutable after construction**: shared, system and substitute tables
//!   are safe to read from any thread without locking.
//! - **Cheap text handles**: symbol text is stored as `Arc<str>` so tokens
//!   can be handed out without copying.
//! - **No sentinels**: every lookup that can miss returns `Option`.

/// Compile-time assertion that a type has a specific size.
///
/// Used to keep `Option<Sid>` the size of a bare `u32`.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod catalog;
mod shared;
mod sid;
mod substitute;
pub mod system;
mod table;
mod token;

pub use catalog::{Catalog, SimpleCatalog};
pub use shared::SharedSymbolTable;
pub use sid::{unknown_symbol_name, Sid};
pub use substitute::SubstituteSymbolTable;
pub use system::system_symbol_table;
pub use table::{SymbolTable, TableKind};
pub use token::SymbolToken;
