//! Sparse, growable storage for local symbol names.

use std::sync::Arc;

/// One local slot: either a known name or a gap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LocalName {
    Known(Arc<str>),
    Unknown,
}

impl LocalName {
    pub(crate) fn text(&self) -> Option<&Arc<str>> {
        match self {
            LocalName::Known(text) => Some(text),
            LocalName::Unknown => None,
        }
    }
}

/// Result of writing a slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum PutOutcome {
    /// The slot or the logical count changed.
    Stored,
    /// Nothing changed.
    Unchanged,
}

/// Local names indexed by offset from the first local sid.
///
/// The backing array grows by doubling from `initial_capacity`; `count` is
/// the highest written offset + 1, independent of the allocated length.
pub(crate) struct LocalNames {
    slots: Vec<LocalName>,
    count: usize,
    initial_capacity: usize,
}

impl LocalNames {
    pub(crate) fn with_capacity(initial_capacity: usize) -> Self {
        LocalNames {
            slots: Vec::new(),
            count: 0,
            initial_capacity: initial_capacity.max(1),
        }
    }

    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// Allocated length of the backing array.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn get(&self, offset: usize) -> Option<&LocalName> {
        self.slots[..self.count].get(offset)
    }

    pub(crate) fn text(&self, offset: usize) -> Option<&Arc<str>> {
        self.get(offset)?.text()
    }

    /// Names in offset order, gaps as `None`.
    pub(crate) fn iter(&self) -> impl ExactSizeIterator<Item = Option<&Arc<str>>> + '_ {
        self.slots[..self.count].iter().map(LocalName::text)
    }

    /// Write `text` at `offset`.
    ///
    /// Filling a gap or extending the count stores; writing the same name
    /// again, or a gap over a known name, leaves the slot alone. Writing a
    /// different name over a known one fails with the existing name.
    pub(crate) fn put(&mut self, offset: usize, text: Option<Arc<str>>) -> Result<PutOutcome, Arc<str>> {
        let grows = offset >= self.count;
        let slot = self.slot_mut(offset);
        if let LocalName::Known(existing) = &*slot {
            return match text {
                Some(text) if *existing != text => Err(Arc::clone(existing)),
                _ => Ok(PutOutcome::Unchanged),
            };
        }
        match text {
            Some(text) => *slot = LocalName::Known(text),
            None if !grows => return Ok(PutOutcome::Unchanged),
            None => {}
        }
        if grows {
            self.count = offset + 1;
        }
        Ok(PutOutcome::Stored)
    }

    fn slot_mut(&mut self, offset: usize) -> &mut LocalName {
        if offset >= self.slots.len() {
            let mut len = if self.slots.is_empty() {
                self.initial_capacity
            } else {
                self.slots.len().saturating_mul(2)
            };
            while len <= offset {
                len = len.saturating_mul(2);
            }
            self.slots.resize(len, LocalName::Unknown);
        }
        &mut self.slots[offset]
    }
}
