//! Symbol identifiers.
//!
//! A sid is a positive 32-bit integer. Zero is never a valid sid, which lets
//! `Option<Sid>` stand in for the "unknown symbol" sentinel at no cost.

use std::fmt;
use std::num::NonZeroU32;

/// Symbol id.
///
/// Ids `1..=system_max_id` belong to the system table, followed by the
/// declared range of each import, followed by local symbols.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Sid(NonZeroU32);

crate::static_assert_size!(Option<Sid>, 4);

impl Sid {
    /// The lowest valid sid.
    pub const MIN: Sid = Sid(NonZeroU32::MIN);

    /// The highest representable sid.
    pub const MAX: Sid = Sid(NonZeroU32::MAX);

    /// Create from a raw value, `None` for zero.
    #[inline]
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(raw) => Some(Sid(raw)),
            None => None,
        }
    }

    /// The first sid after a range of `max_id` ids, saturating at `Sid::MAX`.
    #[inline]
    pub const fn after(max_id: u32) -> Self {
        Sid(NonZeroU32::MIN.saturating_add(max_id))
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0.get()
    }

    /// Zero-based position of this sid within a table whose ids start at 1.
    #[inline]
    pub const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// Offset of this sid from `base`, or `None` if it lies below `base`.
    #[inline]
    pub const fn offset_from(self, base: Sid) -> Option<usize> {
        match self.raw().checked_sub(base.raw()) {
            Some(offset) => Some(offset as usize),
            None => None,
        }
    }

    /// `self + n`, or `None` on overflow.
    #[inline]
    pub fn checked_add(self, n: u32) -> Option<Self> {
        self.0.checked_add(n).map(Sid)
    }
}

impl fmt::Debug for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sid({})", self.raw())
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

impl From<Sid> for u32 {
    fn from(sid: Sid) -> u32 {
        sid.raw()
    }
}

/// Placeholder text for a symbol whose text is not known, of the form `$NNN`.
pub fn unknown_symbol_name(sid: Sid) -> String {
    format!("${sid}")
}
