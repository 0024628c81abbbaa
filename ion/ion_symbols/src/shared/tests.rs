use super::*;
use pretty_assertions::assert_eq;

fn sid(raw: u32) -> Sid {
    Sid::after(raw - 1)
}

#[test]
fn test_shared_lookup_both_ways() {
    let fred = SharedSymbolTable::new("fred", 1, ["fred_1", "fred_2"]);

    assert_eq!(fred.kind(), TableKind::Shared);
    assert_eq!(fred.name(), Some("fred"));
    assert_eq!(fred.version(), 1);
    assert_eq!(fred.max_id(), 2);

    assert_eq!(fred.find_known_symbol(sid(2)).as_deref(), Some("fred_2"));
    assert_eq!(fred.find_known_symbol(sid(3)), None);
    assert_eq!(fred.find_symbol("fred_1"), Some(sid(1)));
    assert_eq!(fred.find_symbol("ginger"), None);
}

#[test]
fn test_shared_duplicates_resolve_to_lowest_sid() {
    let table = SharedSymbolTable::new("dup", 1, ["a", "b", "a"]);
    assert_eq!(table.max_id(), 3);
    assert_eq!(table.find_symbol("a"), Some(sid(1)));
    assert_eq!(table.find_known_symbol(sid(3)).as_deref(), Some("a"));
}

#[test]
fn test_shared_gaps_occupy_ids() {
    let table = SharedSymbolTable::with_gaps("gappy", 2, [Some("a"), None, Some(""), Some("d")]);
    assert_eq!(table.max_id(), 4);
    assert_eq!(table.find_known_symbol(sid(2)), None);
    assert_eq!(table.find_known_symbol(sid(3)), None);
    assert_eq!(table.find_symbol("d"), Some(sid(4)));
    assert_eq!(
        table.symbols().collect::<Vec<_>>(),
        vec![Some("a"), None, None, Some("d")]
    );
}

#[test]
fn test_shared_symbol_token_range() {
    let fred = SharedSymbolTable::new("fred", 1, ["fred_1"]);
    assert_eq!(fred.symbol(sid(1)).and_then(|t| t.text().map(str::to_owned)), Some("fred_1".to_owned()));
    assert_eq!(fred.symbol(sid(2)), None);
}

#[test]
fn test_shared_version_floor() {
    let table = SharedSymbolTable::new("v0", 0, ["x"]);
    assert_eq!(table.version(), 1);
    assert!(table.is_read_only());
    assert_eq!(table.ion_version_id(), None);
}
