use super::*;
use ion_symbols::{SharedSymbolTable, SimpleCatalog, TableKind};
use pretty_assertions::assert_eq;

fn fred() -> Arc<dyn SymbolTable> {
    Arc::new(SharedSymbolTable::new("fred", 1, ["fred_1", "fred_2"]))
}

#[test]
fn test_defaults() {
    let config = SymtabConfig::new();
    assert_eq!(config.system().kind(), TableKind::System);
    assert!(config.catalog().is_none());
    assert!(config.imports().is_empty());
    assert!(config.image_factory().is_none());
    assert_eq!(config.initial_capacity(), 16);
}

#[test]
fn test_new_local_table_uses_imports() {
    let config = SymtabConfig::new().with_imports([fred()]);
    let table = config.new_local_table().unwrap();

    assert_eq!(table.imported_max_id(), 11);
    assert_eq!(table.intern("ginger").unwrap().sid().raw(), 12);
}

#[test]
fn test_tables_share_import_objects() {
    let config = SymtabConfig::new().with_imports([fred()]).freeze();
    let one = config.new_local_table().unwrap();
    let two = config.new_local_table().unwrap();
    assert!(one.extends(&two));
}

#[test]
fn test_clone_is_independent() {
    let base = SymtabConfig::new().with_initial_capacity(4);
    let changed = base.clone().with_imports([fred()]).with_initial_capacity(0);

    assert!(base.imports().is_empty());
    assert_eq!(base.initial_capacity(), 4);
    assert_eq!(changed.imports().len(), 1);
    assert_eq!(changed.initial_capacity(), 1);
}

#[test]
fn test_rejects_local_import() {
    let local: Arc<dyn SymbolTable> = Arc::new(SymtabConfig::new().new_local_table().unwrap());
    let config = SymtabConfig::new().with_imports([local]);
    assert_eq!(
        config.new_local_table().err(),
        Some(crate::SymtabError::InvalidImportKind {
            position: 0,
            kind: TableKind::Local,
        })
    );
}

#[test]
fn test_factory_is_passed_to_tables() {
    let factory = ElementFactory::new();
    let config = SymtabConfig::new()
        .with_catalog(Arc::new(SimpleCatalog::new()))
        .with_image_factory(Arc::clone(&factory));
    let table = config.new_local_table().unwrap();

    assert!(config.catalog().is_some());
    assert!(table.image(&factory).is_ok());
}
