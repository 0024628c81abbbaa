//! Ion Element - a minimal in-memory tree of Ion values
//!
//! Symbol tables only need a small slice of the Ion data model to describe
//! themselves: annotated structs, lists, strings, ints and nulls. This crate
//! provides that slice:
//! - `Element` / `Value` for the tree itself
//! - `ElementFactory`, the node builder a table image is bound to
//! - `StructuredReader`, the pull interface tables are parsed through, and
//!   `ElementReader`, its implementation over an `Element` tree
//! - Compact single-line Ion text rendering via `Display`

mod element;
mod factory;
mod reader;
mod text;

pub use element::{Element, Value, ValueKind};
pub use factory::{ElementFactory, SharedElement};
pub use reader::{ElementReader, StructuredReader};
