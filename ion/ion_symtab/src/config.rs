//! Configuration for creating local symbol tables.

use std::sync::Arc;

use ion_element::ElementFactory;
use ion_symbols::{system_symbol_table, Catalog, SymbolTable};

use crate::composer::ImportsComposer;
use crate::error::Result;
use crate::local::LocalSymbolTable;
use crate::DEFAULT_CAPACITY;

/// Everything a writer or reader needs to create local symbol tables.
///
/// Built with the `with_*` methods. `Clone` gives an independent copy;
/// [`freeze`](Self::freeze) gives a shareable, immutable one.
#[derive(Clone, Debug)]
pub struct SymtabConfig {
    system: Arc<dyn SymbolTable>,
    catalog: Option<Arc<dyn Catalog>>,
    imports: Vec<Arc<dyn SymbolTable>>,
    image_factory: Option<Arc<ElementFactory>>,
    initial_capacity: usize,
}

impl Default for SymtabConfig {
    fn default() -> Self {
        SymtabConfig {
            system: system_symbol_table(),
            catalog: None,
            imports: Vec::new(),
            image_factory: None,
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl SymtabConfig {
    /// Ion 1.0 system table, no catalog, no imports.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_system_table(mut self, system: Arc<dyn SymbolTable>) -> Self {
        self.system = system;
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<dyn Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Shared tables every new local table imports, in order.
    #[must_use]
    pub fn with_imports(mut self, imports: impl IntoIterator<Item = Arc<dyn SymbolTable>>) -> Self {
        self.imports = imports.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_image_factory(mut self, factory: Arc<ElementFactory>) -> Self {
        self.image_factory = Some(factory);
        self
    }

    /// Starting length of the local name array. Clamped to at least 1.
    #[must_use]
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity.max(1);
        self
    }

    pub fn system(&self) -> &Arc<dyn SymbolTable> {
        &self.system
    }

    pub fn catalog(&self) -> Option<&dyn Catalog> {
        self.catalog.as_deref()
    }

    /// A copy of the configured imports.
    pub fn imports(&self) -> Vec<Arc<dyn SymbolTable>> {
        self.imports.clone()
    }

    pub fn image_factory(&self) -> Option<&Arc<ElementFactory>> {
        self.image_factory.as_ref()
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Make this configuration immutable and shareable.
    pub fn freeze(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Create an empty local table over the configured imports.
    ///
    /// # Errors
    /// `InvalidImportKind` if the imports hold a local table or a system
    /// table anywhere but first.
    pub fn new_local_table(&self) -> Result<LocalSymbolTable> {
        let imports = ImportsComposer::new(Arc::clone(&self.system), &self.imports)?;
        Ok(LocalSymbolTable::with_capacity(
            imports,
            self.initial_capacity,
            self.image_factory.clone(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
