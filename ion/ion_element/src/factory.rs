//! Node builder with identity.
//!
//! A symbol table image belongs to the document it was built for, so a table
//! remembers which factory built its image and refuses to hand the image to
//! any other. Identity is the `Arc` allocation: two factories are the same
//! only if they are the same `Arc`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::element::{Element, Value};

/// A node that may be shared between its owner and a symbol table that keeps
/// it in sync.
pub type SharedElement = Arc<Mutex<Element>>;

static NEXT_FACTORY_ID: AtomicU64 = AtomicU64::new(1);

/// Builder for the nodes of one document.
pub struct ElementFactory {
    id: u64,
}

impl ElementFactory {
    /// Create a new factory. Each call yields a distinct identity.
    pub fn new() -> Arc<Self> {
        Arc::new(ElementFactory {
            id: NEXT_FACTORY_ID.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Diagnostic id of this factory.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether two handles refer to the same factory.
    pub fn same(a: &Arc<Self>, b: &Arc<Self>) -> bool {
        Arc::ptr_eq(a, b)
    }

    pub fn new_struct(&self) -> Element {
        Element::new(Value::Struct(Vec::new()))
    }

    pub fn new_list(&self) -> Element {
        Element::new(Value::List(Vec::new()))
    }

    pub fn new_string(&self, text: &str) -> Element {
        Element::string(text)
    }

    pub fn new_int(&self, value: i64) -> Element {
        Element::int(value)
    }

    pub fn new_null(&self) -> Element {
        Element::null()
    }

    /// Wrap a node so it can be shared and mutated in place.
    pub fn share(&self, element: Element) -> SharedElement {
        Arc::new(Mutex::new(element))
    }
}

impl fmt::Debug for ElementFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementFactory({})", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_identity() {
        let a = ElementFactory::new();
        let b = ElementFactory::new();
        assert!(ElementFactory::same(&a, &Arc::clone(&a)));
        assert!(!ElementFactory::same(&a, &b));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_factory_builds_empty_containers() {
        let f = ElementFactory::new();
        assert_eq!(f.new_struct().as_struct().map(<[_]>::len), Some(0));
        assert_eq!(f.new_list().as_list().map(<[_]>::len), Some(0));
        assert_eq!(f.new_string("a").as_str(), Some("a"));
        assert_eq!(f.new_int(7).as_int(), Some(7));
        assert!(f.new_null().is_null());
    }

    #[test]
    fn test_shared_node_is_mutable_in_place() {
        let f = ElementFactory::new();
        let node = f.share(f.new_list());
        let alias = Arc::clone(&node);
        alias.lock().push(f.new_int(1));
        assert_eq!(node.lock().as_list().map(<[_]>::len), Some(1));
    }
}
