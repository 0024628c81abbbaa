//! Resolved symbol tokens.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::sid::{unknown_symbol_name, Sid};

/// An immutable (text, sid) pair.
///
/// The text is `None` when the sid is known but its text is not, as for the
/// placeholder slots of a substitute table or a gap in a local table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolToken {
    text: Option<Arc<str>>,
    sid: Sid,
}

impl SymbolToken {
    /// Create a token from optional text.
    #[inline]
    pub fn new(text: Option<Arc<str>>, sid: Sid) -> Self {
        SymbolToken { text, sid }
    }

    /// Create a token with known text.
    #[inline]
    pub fn known(text: impl Into<Arc<str>>, sid: Sid) -> Self {
        SymbolToken {
            text: Some(text.into()),
            sid,
        }
    }

    /// Create a token whose text is unknown.
    #[inline]
    pub fn unknown(sid: Sid) -> Self {
        SymbolToken { text: None, sid }
    }

    /// The symbol text, if known.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The shared handle to the symbol text, if known.
    #[inline]
    pub fn text_handle(&self) -> Option<&Arc<str>> {
        self.text.as_ref()
    }

    /// The symbol id.
    #[inline]
    pub const fn sid(&self) -> Sid {
        self.sid
    }

    /// The text, or the `$NNN` placeholder when the text is unknown.
    pub fn text_or_placeholder(&self) -> Cow<'_, str> {
        match &self.text {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(unknown_symbol_name(self.sid)),
        }
    }
}

impl fmt::Display for SymbolToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text_or_placeholder())
    }
}
