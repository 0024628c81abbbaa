//! The mutable, per-stream local symbol table.
//!
//! A local table layers newly interned symbols on top of an
//! [`ImportsComposer`]. Local sids start right after the composed range and
//! are assigned in increasing order.
//!
//! # Thread Safety
//! All mutable state sits behind one `parking_lot::Mutex`. When the table is
//! bound to a struct image, the image is patched while that lock is held, so
//! the image and the table never disagree. The image lock is always taken
//! after the table lock.

mod image;
mod names;

use std::fmt;
use std::sync::Arc;

use ion_element::{ElementFactory, SharedElement};
use ion_symbols::{Sid, SymbolTable, SymbolToken, TableKind};
use parking_lot::{Mutex, MutexGuard};
use rustc_hash::FxHashMap;

use self::names::{LocalNames, PutOutcome};
use crate::composer::ImportsComposer;
use crate::error::{Result, SymtabError};
use crate::text::decode_utf16;
use crate::DEFAULT_CAPACITY;

/// State guarded by the table lock.
struct LocalState {
    names: LocalNames,
    /// Text to the lowest local sid it was declared at.
    by_text: FxHashMap<Arc<str>, Sid>,
    read_only: bool,
    image: Option<SharedElement>,
}

/// Mutable symbol table combining imports with locally interned symbols.
///
/// Lifecycle is one-way: the table accepts new symbols until
/// [`make_read_only`](Self::make_read_only) is called, after which only
/// lookups succeed.
pub struct LocalSymbolTable {
    imports: ImportsComposer,
    first_local_sid: Sid,
    image_factory: Option<Arc<ElementFactory>>,
    state: Mutex<LocalState>,
}

impl LocalSymbolTable {
    /// Create an empty local table over `imports`.
    pub fn new(imports: ImportsComposer) -> Self {
        Self::with_capacity(imports, DEFAULT_CAPACITY, None)
    }

    /// Create an empty local table with a starting name capacity and an
    /// optional factory its image will be built with.
    pub fn with_capacity(
        imports: ImportsComposer,
        initial_capacity: usize,
        image_factory: Option<Arc<ElementFactory>>,
    ) -> Self {
        let first_local_sid = Sid::after(imports.max_id());
        LocalSymbolTable {
            imports,
            first_local_sid,
            image_factory,
            state: Mutex::new(LocalState {
                names: LocalNames::with_capacity(initial_capacity),
                by_text: FxHashMap::default(),
                read_only: false,
                image: None,
            }),
        }
    }

    /// Load declared names in order, starting at the first local sid.
    pub(crate) fn load_symbols<I>(&self, symbols: I) -> Result<()>
    where
        I: IntoIterator<Item = Option<Arc<str>>>,
    {
        let mut state = self.state.lock();
        for (offset, text) in symbols.into_iter().enumerate() {
            self.put_symbol(&mut state, offset, text)?;
        }
        Ok(())
    }

    /// Bind an existing node as this table's image.
    ///
    /// The node's `symbols` field is rewritten to the names already loaded.
    pub(crate) fn bind_image(&self, node: SharedElement) {
        let mut state = self.state.lock();
        if let Some(factory) = &self.image_factory {
            image::normalize_symbols(&mut node.lock(), factory, &state.names);
        }
        state.image = Some(node);
    }

    /// Intern `text`, returning its existing token if already known.
    ///
    /// # Errors
    /// `EmptySymbolText` for `""`; `FrozenTable` if `text` is new and the
    /// table is read-only; `SidOverflow` once the last `u32` sid is taken.
    pub fn intern(&self, text: &str) -> Result<SymbolToken> {
        if text.is_empty() {
            return Err(SymtabError::EmptySymbolText);
        }
        if let Some(token) = self.imports.find(text) {
            return Ok(token);
        }

        let mut state = self.state.lock();
        if let Some((known, &sid)) = state.by_text.get_key_value(text) {
            return Ok(SymbolToken::new(Some(Arc::clone(known)), sid));
        }
        if state.read_only {
            return Err(SymtabError::FrozenTable);
        }

        let offset = state.names.count();
        let sid = self.sid_at(offset)?;
        let text: Arc<str> = Arc::from(text);
        self.put_symbol(&mut state, offset, Some(Arc::clone(&text)))?;
        tracing::debug!(
            sid = sid.raw(),
            symbol = &*text,
            capacity = state.names.capacity(),
            "interned symbol"
        );
        Ok(SymbolToken::new(Some(text), sid))
    }

    /// Validate and decode UTF-16 text, then intern it.
    ///
    /// # Errors
    /// `InvalidSymbolText` for an unpaired surrogate, otherwise as
    /// [`intern`](Self::intern).
    pub fn intern_utf16(&self, units: &[u16]) -> Result<SymbolToken> {
        let text = decode_utf16(units)?;
        self.intern(&text)
    }

    /// The sid of local slot `offset`.
    fn sid_at(&self, offset: usize) -> Result<Sid> {
        u32::try_from(offset)
            .ok()
            .and_then(|offset| self.first_local_sid.checked_add(offset))
            .ok_or(SymtabError::SidOverflow)
    }

    fn put_symbol(&self, state: &mut LocalState, offset: usize, text: Option<Arc<str>>) -> Result<()> {
        if state.read_only {
            return Err(SymtabError::FrozenTable);
        }
        let sid = self.sid_at(offset)?;
        match state.names.put(offset, text.clone()) {
            Err(existing) => Err(SymtabError::SymbolRedefinition {
                sid,
                existing: existing.to_string(),
                requested: text.as_deref().unwrap_or_default().to_owned(),
            }),
            Ok(PutOutcome::Unchanged) => Ok(()),
            Ok(PutOutcome::Stored) => {
                if let Some(text) = &text {
                    state.by_text.entry(Arc::clone(text)).or_insert(sid);
                }
                if let (Some(node), Some(factory)) = (&state.image, &self.image_factory) {
                    image::record_symbol(&mut node.lock(), factory, offset, text.as_deref());
                }
                Ok(())
            }
        }
    }

    /// The token for `text`, or `None` if it has no sid.
    ///
    /// Empty text is never a symbol, so `find("")` is `None` rather than an
    /// error.
    pub fn find(&self, text: &str) -> Option<SymbolToken> {
        if text.is_empty() {
            return None;
        }
        if let Some(token) = self.imports.find(text) {
            return Some(token);
        }
        let state = self.state.lock();
        let (known, &sid) = state.by_text.get_key_value(text)?;
        Some(SymbolToken::new(Some(Arc::clone(known)), sid))
    }

    /// The highest sid covered by the imports.
    #[inline]
    pub fn imported_max_id(&self) -> u32 {
        self.imports.max_id()
    }

    /// The sid the first local symbol gets.
    #[inline]
    pub fn first_local_sid(&self) -> Sid {
        self.first_local_sid
    }

    /// Highest assigned local offset + 1, gaps included.
    pub fn local_symbol_count(&self) -> usize {
        self.state.lock().names.count()
    }

    /// Snapshot of the local names in sid order, gaps as `None`.
    pub fn declared_symbols(&self) -> Vec<Option<Arc<str>>> {
        self.state.lock().names.iter().map(|name| name.cloned()).collect()
    }

    /// The imports this table was created over.
    pub fn imports(&self) -> &ImportsComposer {
        &self.imports
    }

    /// The system table the imports start with.
    pub fn system_symbol_table(&self) -> &Arc<dyn SymbolTable> {
        self.imports.system_symbol_table()
    }

    /// The imports after the system table, in declared order.
    pub fn imported_tables(&self) -> impl ExactSizeIterator<Item = &Arc<dyn SymbolTable>> + '_ {
        self.imports.imported_tables()
    }

    /// Freeze the table. Idempotent.
    pub fn make_read_only(&self) {
        let mut state = self.state.lock();
        if !state.read_only {
            state.read_only = true;
            tracing::debug!(local_symbols = state.names.count(), "symbol table frozen");
        }
    }

    /// Whether `self` holds every symbol of `other` at the same sid.
    ///
    /// Both tables must share the very same imports, and `other`'s local
    /// names must be a prefix of `self`'s.
    pub fn extends(&self, other: &LocalSymbolTable) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if !self.imports.equal_imports(&other.imports) {
            return false;
        }

        let (mine, theirs) = self.lock_pair(other);
        let count = theirs.names.count();
        if count == 0 {
            return true;
        }
        if mine.names.count() < count {
            return false;
        }
        // A divergent tail is the common mismatch; check it first.
        let last = count - 1;
        if mine.names.get(last) != theirs.names.get(last) {
            return false;
        }
        (0..last).all(|offset| mine.names.get(offset) == theirs.names.get(offset))
    }

    /// Lock both tables in address order.
    fn lock_pair<'a>(
        &'a self,
        other: &'a LocalSymbolTable,
    ) -> (MutexGuard<'a, LocalState>, MutexGuard<'a, LocalState>) {
        if std::ptr::from_ref(self) < std::ptr::from_ref(other) {
            let mine = self.state.lock();
            (mine, other.state.lock())
        } else {
            let theirs = other.state.lock();
            (self.state.lock(), theirs)
        }
    }

    /// The struct image of this table, built on first use.
    ///
    /// # Errors
    /// `WrongDocumentFactory` if the table has no factory or `factory` is
    /// not the one it was created with.
    pub fn image(&self, factory: &Arc<ElementFactory>) -> Result<SharedElement> {
        let bound = self
            .image_factory
            .as_ref()
            .filter(|bound| ElementFactory::same(bound, factory))
            .ok_or(SymtabError::WrongDocumentFactory)?;

        let mut state = self.state.lock();
        if let Some(node) = &state.image {
            return Ok(Arc::clone(node));
        }
        let node = bound.share(image::build_image(bound, &self.imports, &state.names));
        state.image = Some(Arc::clone(&node));
        tracing::debug!(
            factory = bound.id(),
            local_symbols = state.names.count(),
            "materialized symbol table image"
        );
        Ok(node)
    }
}

impl SymbolTable for LocalSymbolTable {
    fn kind(&self) -> TableKind {
        TableKind::Local
    }

    fn name(&self) -> Option<&str> {
        None
    }

    fn version(&self) -> u32 {
        0
    }

    fn max_id(&self) -> u32 {
        let count = u32::try_from(self.local_symbol_count()).unwrap_or(u32::MAX);
        self.imports.max_id().saturating_add(count)
    }

    fn find_known_symbol(&self, sid: Sid) -> Option<Arc<str>> {
        match sid.offset_from(self.first_local_sid) {
            None => self.imports.find_known_symbol(sid),
            Some(offset) => self.state.lock().names.text(offset).cloned(),
        }
    }

    fn find_symbol(&self, text: &str) -> Option<Sid> {
        if text.is_empty() {
            return None;
        }
        self.imports
            .find_symbol(text)
            .or_else(|| self.state.lock().by_text.get(text).copied())
    }

    fn find(&self, text: &str) -> Option<SymbolToken> {
        LocalSymbolTable::find(self, text)
    }

    fn is_read_only(&self) -> bool {
        self.state.lock().read_only
    }

    fn ion_version_id(&self) -> Option<&str> {
        self.imports.system_symbol_table().ion_version_id()
    }
}

impl fmt::Debug for LocalSymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSymbolTable")
            .field("imports", &self.imports)
            .field("first_local_sid", &self.first_local_sid)
            .field("image_factory", &self.image_factory)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for LocalSymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(LocalSymbolTable max_id::{})", self.max_id())
    }
}
