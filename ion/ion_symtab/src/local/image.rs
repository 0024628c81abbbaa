//! Building and patching the struct image of a local table.

use ion_element::{Element, ElementFactory, ValueKind};
use ion_symbols::system::{IMPORTS, ION_SYMBOL_TABLE, MAX_ID, NAME, SYMBOLS, VERSION};

use super::names::LocalNames;
use crate::composer::ImportsComposer;

/// Build an image of the full table state.
pub(super) fn build_image(factory: &ElementFactory, imports: &ImportsComposer, names: &LocalNames) -> Element {
    let mut image = factory.new_struct().with_annotation(ION_SYMBOL_TABLE);

    if imports.len() > 1 {
        let mut list = factory.new_list();
        for table in imports.imported_tables() {
            let mut import = factory.new_struct();
            import.add(NAME, factory.new_string(table.name().unwrap_or_default()));
            import.add(VERSION, factory.new_int(i64::from(table.version())));
            import.add(MAX_ID, factory.new_int(i64::from(table.max_id())));
            list.push(import);
        }
        image.add(IMPORTS, list);
    }

    if names.count() > 0 {
        image.add(SYMBOLS, symbol_list(factory, names));
    }
    image
}

/// Replace the `symbols` field of `image` with exactly the loaded names.
pub(super) fn normalize_symbols(image: &mut Element, factory: &ElementFactory, names: &LocalNames) {
    image.remove_all(SYMBOLS);
    if names.count() > 0 {
        image.add(SYMBOLS, symbol_list(factory, names));
    }
}

/// Mirror a single slot write into `image`.
///
/// Non-list `symbols` fields are dropped and a list is created if none is
/// left. The name lands at `offset`, padding with nulls when the list is
/// shorter.
pub(super) fn record_symbol(image: &mut Element, factory: &ElementFactory, offset: usize, text: Option<&str>) {
    let Some(fields) = image.as_struct_mut() else {
        return;
    };
    fields.retain(|(name, value)| name != SYMBOLS || value.kind() == ValueKind::List);
    if !fields.iter().any(|(name, _)| name == SYMBOLS) {
        fields.push((SYMBOLS.to_owned(), factory.new_list()));
    }
    let Some(items) = fields
        .iter_mut()
        .find(|(name, _)| name == SYMBOLS)
        .and_then(|(_, list)| list.as_list_mut())
    else {
        return;
    };

    let node = text.map_or_else(|| factory.new_null(), |text| factory.new_string(text));
    if let Some(slot) = items.get_mut(offset) {
        *slot = node;
    } else {
        items.resize_with(offset, || factory.new_null());
        items.push(node);
    }
}

fn symbol_list(factory: &ElementFactory, names: &LocalNames) -> Element {
    let mut list = factory.new_list();
    for name in names.iter() {
        list.push(name.map_or_else(|| factory.new_null(), |text| factory.new_string(text)));
    }
    list
}
