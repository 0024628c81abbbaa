use super::*;
use ion_element::Element;
use ion_symbols::{system_symbol_table, Sid, SharedSymbolTable, SimpleCatalog, TableKind};
use pretty_assertions::assert_eq;

fn sid(raw: u32) -> Sid {
    Sid::after(raw - 1)
}

fn import(name: &str, version: i64, max_id: Option<i64>) -> Element {
    let mut fields = vec![("name", Element::string(name)), ("version", Element::int(version))];
    if let Some(max_id) = max_id {
        fields.push(("max_id", Element::int(max_id)));
    }
    Element::structure(fields)
}

fn declaration(imports: Vec<Element>, symbols: Vec<Element>) -> Element {
    Element::structure([("imports", Element::list(imports)), ("symbols", Element::list(symbols))])
        .with_annotation("$ion_symbol_table")
}

fn catalog() -> Arc<SimpleCatalog> {
    let catalog = SimpleCatalog::new();
    catalog.put_table(Arc::new(SharedSymbolTable::new("fred", 1, ["fred_1", "fred_2"])));
    catalog.put_table(Arc::new(SharedSymbolTable::new("barney", 2, ["b1", "b2", "b3"])));
    Arc::new(catalog)
}

fn config() -> SymtabConfig {
    SymtabConfig::new().with_catalog(catalog())
}

fn parse(element: &Element) -> Result<LocalSymbolTable> {
    let mut reader = ElementReader::new(element);
    LocalSymbolTable::from_reader(&config(), &mut reader)
}

#[test]
fn test_field_lookup() {
    assert_eq!(SymtabField::of(Some("imports")), SymtabField::Imports);
    assert_eq!(SymtabField::of(Some("symbols")), SymtabField::Symbols);
    assert_eq!(SymtabField::of(Some("max_id")), SymtabField::Other);
    assert_eq!(SymtabField::of(None), SymtabField::Other);
}

#[test]
fn test_exact_import_and_local_symbols() {
    let element = declaration(
        vec![import("fred", 1, Some(2))],
        vec![Element::string("ginger")],
    );
    let table = parse(&element).unwrap();

    assert_eq!(table.first_local_sid(), sid(12));
    assert_eq!(table.find_symbol("ginger"), Some(sid(12)));
    assert_eq!(table.find_known_symbol(sid(10)).as_deref(), Some("fred_1"));
    assert_eq!(table.max_id(), 12);
    assert_eq!(table.imported_tables().next().map(|t| t.kind()), Some(TableKind::Shared));
}

#[test]
fn test_import_without_max_id_uses_catalog() {
    let element = declaration(vec![import("barney", 2, None)], vec![]);
    let table = parse(&element).unwrap();
    assert_eq!(table.imported_max_id(), 12);
}

#[test]
fn test_import_without_max_id_requires_exact_version() {
    let element = declaration(vec![import("barney", 1, None)], vec![]);
    assert_eq!(
        parse(&element).err(),
        Some(SymtabError::UnresolvableImport {
            name: "barney".to_owned(),
            version: 1,
            found_version: Some(2),
        })
    );

    let element = declaration(vec![import("wilma", 1, None)], vec![]);
    let err = parse(&element).err();
    assert_eq!(
        err.as_ref().map(ToString::to_string).as_deref(),
        Some(
            "import of shared table \"wilma\" lacks a valid max_id field, but an exact match was not found in the catalog"
        )
    );
}

#[test]
fn test_unknown_import_becomes_unresolved_substitute() {
    let element = declaration(vec![import("wilma", 3, Some(4))], vec![Element::string("x")]);
    let table = parse(&element).unwrap();

    let wilma = table.imported_tables().next().map(Arc::clone).unwrap();
    assert_eq!(wilma.kind(), TableKind::Substitute);
    assert_eq!(wilma.version(), 3);
    assert_eq!(table.find_known_symbol(sid(10)), None);
    assert_eq!(table.find_symbol("x"), Some(sid(14)));
}

#[test]
fn test_mismatched_import_wraps_catalog_table() {
    let element = declaration(vec![import("barney", 1, Some(5))], vec![]);
    let table = parse(&element).unwrap();

    assert_eq!(table.imported_max_id(), 14);
    assert_eq!(table.find_known_symbol(sid(10)).as_deref(), Some("b1"));
    assert_eq!(table.find_known_symbol(sid(12)).as_deref(), Some("b3"));
    assert_eq!(table.find_known_symbol(sid(13)), None);
    assert_eq!(table.find_symbol("b3"), Some(sid(12)));
}

#[test]
fn test_exact_catalog_table_is_shared_by_identity() {
    let catalog = catalog();
    let config = SymtabConfig::new().with_catalog(Arc::clone(&catalog) as Arc<dyn Catalog>);
    let element = declaration(vec![import("fred", 1, Some(2))], vec![]);
    let table = LocalSymbolTable::from_reader(&config, &mut ElementReader::new(&element)).unwrap();

    let fred: Arc<dyn SymbolTable> = catalog.get_table("fred", 1).unwrap();
    assert!(Arc::ptr_eq(table.imported_tables().next().unwrap(), &fred));
}

#[test]
fn test_bad_import_clauses_are_skipped() {
    let element = declaration(
        vec![
            Element::structure([("version", Element::int(1))]),
            import("", 1, Some(2)),
            import("$ion", 1, Some(9)),
            Element::structure([("name", Element::int(7)), ("max_id", Element::int(2))]),
            Element::string("not a struct"),
            Element::null(),
            import("fred", 1, Some(2)),
        ],
        vec![],
    );
    let table = parse(&element).unwrap();
    assert_eq!(table.imported_tables().len(), 1);
    assert_eq!(table.imported_max_id(), 11);
}

#[test]
fn test_version_and_max_id_normalization() {
    let element = declaration(vec![import("fred", 0, Some(-3)), import("wilma", -1, Some(2))], vec![]);
    let table = parse(&element).unwrap();

    let versions: Vec<u32> = table.imported_tables().map(|t| t.version()).collect();
    assert_eq!(versions, vec![1, 1]);
    assert_eq!(table.imported_max_id(), 13);
}

#[test]
fn test_symbol_gaps() {
    let element = declaration(
        vec![],
        vec![
            Element::string("a"),
            Element::string(""),
            Element::int(5),
            Element::null(),
            Element::string("b"),
        ],
    );
    let table = parse(&element).unwrap();

    assert_eq!(table.local_symbol_count(), 5);
    assert_eq!(table.find_symbol("b"), Some(sid(14)));
    assert_eq!(table.find_known_symbol(sid(11)), None);
}

#[test]
fn test_non_list_fields_are_empty() {
    let element = Element::structure([("imports", Element::int(1)), ("symbols", Element::string("a"))]);
    let table = parse(&element).unwrap();
    assert_eq!(table.imported_tables().len(), 0);
    assert_eq!(table.local_symbol_count(), 0);
}

#[test]
fn test_null_and_open_content_fields_are_ignored() {
    let element = Element::structure([
        ("symbols", Element::null()),
        ("open", Element::list([Element::string("nope")])),
        ("symbols", Element::list([Element::string("a")])),
    ]);
    let table = parse(&element).unwrap();
    assert_eq!(table.declared_symbols(), vec![Some(Arc::from("a"))]);
}

#[test]
fn test_first_field_wins() {
    let element = Element::structure([
        ("symbols", Element::list([Element::string("a")])),
        ("imports", Element::list([import("fred", 1, Some(2))])),
        ("symbols", Element::list([Element::string("b"), Element::string("c")])),
        ("imports", Element::list([import("wilma", 1, None)])),
    ]);
    let table = parse(&element).unwrap();

    assert_eq!(table.declared_symbols(), vec![Some(Arc::from("a"))]);
    assert_eq!(table.imported_max_id(), 11);
}

#[test]
fn test_without_catalog() {
    let config = SymtabConfig::new();
    let element = declaration(vec![import("fred", 1, Some(2))], vec![]);
    let table = LocalSymbolTable::from_reader(&config, &mut ElementReader::new(&element)).unwrap();
    assert_eq!(table.imported_tables().next().map(|t| t.kind()), Some(TableKind::Substitute));

    let element = declaration(vec![import("fred", 1, None)], vec![]);
    assert!(matches!(
        LocalSymbolTable::from_reader(&config, &mut ElementReader::new(&element)),
        Err(SymtabError::UnresolvableImport { found_version: None, .. })
    ));
}

#[test]
fn test_reader_already_on_struct() {
    let element = declaration(vec![], vec![Element::string("a")]);
    let mut reader = ElementReader::new(&element);
    assert_eq!(reader.next(), Some(ValueKind::Struct));

    let table = LocalSymbolTable::from_reader(&config(), &mut reader).unwrap();
    assert_eq!(table.local_symbol_count(), 1);
    assert_eq!(reader.depth(), 0);
    assert_eq!(reader.next(), None);
}

#[test]
fn test_non_struct_value_yields_empty_table() {
    let element = Element::list([Element::string("a")]);
    let table = parse(&element).unwrap();
    assert_eq!(table.max_id(), 9);
}

#[test]
fn test_from_image_normalizes_and_syncs() {
    let factory = ElementFactory::new();
    let node = factory.share(Element::structure([
        ("symbols", Element::list([Element::string("a"), Element::int(1)])),
        ("imports", Element::list([import("fred", 1, Some(2))])),
    ]));
    let table = LocalSymbolTable::from_image(&config(), &factory, &node).unwrap();

    assert_eq!(
        node.lock().to_string(),
        r#"{imports:[{name:"fred",version:1,max_id:2}],symbols:["a",null]}"#
    );
    table.intern("b").unwrap();
    assert_eq!(
        node.lock().to_string(),
        r#"{imports:[{name:"fred",version:1,max_id:2}],symbols:["a",null,"b"]}"#
    );
    assert!(Arc::ptr_eq(&table.image(&factory).unwrap(), &node));
}

#[test]
fn test_system_table_comes_from_config() {
    let element = declaration(vec![], vec![]);
    let table = parse(&element).unwrap();
    let system: Arc<dyn SymbolTable> = system_symbol_table();
    assert_eq!(table.system_symbol_table().max_id(), system.max_id());
    assert_eq!(table.ion_version_id(), Some("$ion_1_0"));
}

#[test]
fn test_oversized_import_range_is_rejected() {
    let element = declaration(vec![import("big", 1, Some(5_000_000_000))], vec![]);
    assert_eq!(parse(&element).err(), Some(SymtabError::SidOverflow));
}
