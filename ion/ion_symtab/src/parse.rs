//! Reading a local symbol table from its struct form.
//!
//! The struct's fields are read in a single pass in any order. Only
//! `imports` and `symbols` mean anything; every other field is open content
//! and ignored. When a field appears twice the first one wins.

use std::sync::Arc;

use ion_element::{Element, ElementFactory, ElementReader, SharedElement, StructuredReader, ValueKind};
use ion_symbols::system::{IMPORTS, ION, MAX_ID, NAME, SYMBOLS, VERSION};
use ion_symbols::{Catalog, SubstituteSymbolTable, SymbolTable};
use tracing::field;

use crate::composer::ImportsComposer;
use crate::config::SymtabConfig;
use crate::error::{Result, SymtabError};
use crate::local::LocalSymbolTable;

/// Fields of a symbol table struct.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SymtabField {
    Imports,
    Symbols,
    Other,
}

impl SymtabField {
    fn of(name: Option<&str>) -> Self {
        match name {
            Some(IMPORTS) => SymtabField::Imports,
            Some(SYMBOLS) => SymtabField::Symbols,
            _ => SymtabField::Other,
        }
    }
}

/// Resolved contents of a symbol table struct.
#[derive(Default)]
pub(crate) struct Declaration {
    pub(crate) imports: Vec<Arc<dyn SymbolTable>>,
    pub(crate) symbols: Vec<Option<Arc<str>>>,
}

/// Read the struct the reader is on, or the next value if it is not on one.
///
/// Leaves the reader positioned after the struct.
pub(crate) fn read_declaration<R>(reader: &mut R, catalog: Option<&dyn Catalog>) -> Result<Declaration>
where
    R: StructuredReader + ?Sized,
{
    if reader.kind() != Some(ValueKind::Struct) {
        reader.next();
    }
    let mut declaration = Declaration::default();
    if reader.kind() != Some(ValueKind::Struct) || !reader.step_in() {
        return Ok(declaration);
    }

    let mut seen_imports = false;
    let mut seen_symbols = false;
    while reader.next().is_some() {
        if reader.is_null() {
            continue;
        }
        match SymtabField::of(reader.field_name()) {
            SymtabField::Imports if seen_imports => {
                tracing::debug!("ignoring repeated imports field");
            }
            SymtabField::Imports => {
                seen_imports = true;
                declaration.imports = read_imports(reader, catalog)?;
            }
            SymtabField::Symbols if seen_symbols => {
                tracing::debug!("ignoring repeated symbols field");
            }
            SymtabField::Symbols => {
                seen_symbols = true;
                declaration.symbols = read_symbols(reader);
            }
            SymtabField::Other => {}
        }
    }
    reader.step_out();
    Ok(declaration)
}

fn read_symbols<R>(reader: &mut R) -> Vec<Option<Arc<str>>>
where
    R: StructuredReader + ?Sized,
{
    let mut symbols = Vec::new();
    if reader.kind() != Some(ValueKind::List) || !reader.step_in() {
        return symbols;
    }
    while reader.next().is_some() {
        symbols.push(reader.string_value().filter(|text| !text.is_empty()).map(Arc::from));
    }
    reader.step_out();
    symbols
}

fn read_imports<R>(reader: &mut R, catalog: Option<&dyn Catalog>) -> Result<Vec<Arc<dyn SymbolTable>>>
where
    R: StructuredReader + ?Sized,
{
    let mut imports = Vec::new();
    if reader.kind() != Some(ValueKind::List) || !reader.step_in() {
        return Ok(imports);
    }
    while let Some(kind) = reader.next() {
        if kind != ValueKind::Struct {
            continue;
        }
        if let Some(table) = read_import(reader, catalog)? {
            imports.push(table);
        }
    }
    reader.step_out();
    Ok(imports)
}

/// Resolve one `{name, version, max_id}` struct against the catalog.
///
/// Returns `None` for a clause without a usable name.
fn read_import<R>(reader: &mut R, catalog: Option<&dyn Catalog>) -> Result<Option<Arc<dyn SymbolTable>>>
where
    R: StructuredReader + ?Sized,
{
    let mut name = None;
    let mut version = None;
    let mut max_id = None;
    reader.step_in();
    while reader.next().is_some() {
        match reader.field_name() {
            Some(NAME) => {
                if let Some(text) = reader.string_value() {
                    name = Some(text.to_owned());
                }
            }
            Some(VERSION) => {
                if let Some(value) = reader.int_value() {
                    version = Some(value);
                }
            }
            Some(MAX_ID) => {
                if let Some(value) = reader.int_value() {
                    max_id = Some(value);
                }
            }
            _ => {}
        }
    }
    reader.step_out();

    let Some(name) = name.filter(|name| !name.is_empty() && name != ION) else {
        tracing::debug!("skipping import without a usable name");
        return Ok(None);
    };
    let version = version
        .and_then(|v| u32::try_from(v).ok())
        .filter(|&v| v >= 1)
        .unwrap_or(1);
    let max_id = max_id
        .filter(|&m| m >= 0)
        .map(|m| u32::try_from(m).unwrap_or(u32::MAX));

    let found = catalog.and_then(|catalog| catalog.get_table(&name, version));
    let table: Arc<dyn SymbolTable> = match (max_id, found) {
        (None, Some(table)) if table.version() == version => table,
        (None, found) => {
            return Err(SymtabError::UnresolvableImport {
                name,
                version,
                found_version: found.map(|table| table.version()),
            });
        }
        (Some(max_id), Some(table)) if table.version() == version && table.max_id() == max_id => table,
        (Some(max_id), Some(table)) => {
            tracing::debug!(
                name = %name,
                version,
                max_id,
                found_version = table.version(),
                found_max_id = table.max_id(),
                "import does not match catalog; using substitute"
            );
            Arc::new(SubstituteSymbolTable::wrapping(table, version, max_id))
        }
        (Some(max_id), None) => {
            tracing::debug!(name = %name, version, max_id, "import not in catalog; using substitute");
            Arc::new(SubstituteSymbolTable::unresolved(name, version, max_id))
        }
    };
    Ok(Some(table))
}

fn read_image(image: &Element, catalog: Option<&dyn Catalog>) -> Result<Declaration> {
    let mut reader = ElementReader::new(image);
    read_declaration(&mut reader, catalog)
}

impl LocalSymbolTable {
    /// Read a local table from the struct the reader is on (or the next
    /// value).
    ///
    /// The table gets the config's image factory but no image until one is
    /// requested.
    ///
    /// # Errors
    /// `UnresolvableImport` for an import without `max_id` that has no exact
    /// match in the catalog.
    #[tracing::instrument(level = "debug", skip_all, fields(imports = field::Empty, symbols = field::Empty))]
    pub fn from_reader<R>(config: &SymtabConfig, reader: &mut R) -> Result<Self>
    where
        R: StructuredReader + ?Sized,
    {
        let declaration = read_declaration(reader, config.catalog())?;
        Self::from_declaration(config, config.image_factory().cloned(), declaration)
    }

    /// Read a local table from `image` and keep `image` in sync with it.
    ///
    /// The node's `symbols` field is rewritten to the loaded names, with
    /// `null` for gaps.
    #[tracing::instrument(level = "debug", skip_all, fields(imports = field::Empty, symbols = field::Empty))]
    pub fn from_image(config: &SymtabConfig, factory: &Arc<ElementFactory>, image: &SharedElement) -> Result<Self> {
        let declaration = read_image(&image.lock(), config.catalog())?;
        let table = Self::from_declaration(config, Some(Arc::clone(factory)), declaration)?;
        table.bind_image(Arc::clone(image));
        Ok(table)
    }

    fn from_declaration(
        config: &SymtabConfig,
        image_factory: Option<Arc<ElementFactory>>,
        declaration: Declaration,
    ) -> Result<Self> {
        let span = tracing::Span::current();
        span.record("imports", declaration.imports.len());
        span.record("symbols", declaration.symbols.len());

        let imports = ImportsComposer::new(Arc::clone(config.system()), &declaration.imports)?;
        let table = LocalSymbolTable::with_capacity(imports, config.initial_capacity(), image_factory);
        table.load_symbols(declaration.symbols)?;
        Ok(table)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
