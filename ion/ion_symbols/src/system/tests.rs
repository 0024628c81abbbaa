use super::*;
use crate::table::{SymbolTable, TableKind};

#[test]
fn test_system_table_layout() {
    let system = system_symbol_table();

    assert_eq!(system.kind(), TableKind::System);
    assert_eq!(system.name(), Some(ION));
    assert_eq!(system.version(), 1);
    assert_eq!(system.max_id(), SYSTEM_MAX_ID);
    assert_eq!(system.ion_version_id(), Some(ION_1_0));

    assert_eq!(system.find_symbol(ION_SYMBOL_TABLE), Some(ION_SYMBOL_TABLE_SID));
    assert_eq!(system.find_symbol(MAX_ID).map(Sid::raw), Some(8));
    assert_eq!(
        system.find_known_symbol(Sid::after(8)).as_deref(),
        Some(ION_SHARED_SYMBOL_TABLE)
    );
}

#[test]
fn test_system_table_is_a_singleton() {
    assert!(Arc::ptr_eq(&system_symbol_table(), &system_symbol_table()));
}
