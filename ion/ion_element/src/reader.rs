//! Pull-based reading of structured values.
//!
//! The reader is positioned *before* its first value. `next` advances to the
//! following value at the current depth and reports its kind, or `None` at
//! the end of the container. `step_in` descends into the current container,
//! `step_out` returns to the parent, positioned after the container.

use crate::element::{Element, Value, ValueKind};

/// Pull interface over a stream or tree of Ion values.
pub trait StructuredReader {
    /// Advance to the next value at the current depth.
    fn next(&mut self) -> Option<ValueKind>;

    /// Descend into the current list or struct. Returns false, without
    /// moving, if the current value is not a container.
    fn step_in(&mut self) -> bool;

    /// Leave the current container. No-op at top level.
    fn step_out(&mut self);

    /// Kind of the current value, if positioned on one.
    fn kind(&self) -> Option<ValueKind>;

    /// Field name of the current value when inside a struct.
    fn field_name(&self) -> Option<&str>;

    /// Annotations of the current value.
    fn annotations(&self) -> &[String];

    /// Whether the current value is null.
    fn is_null(&self) -> bool {
        matches!(self.kind(), Some(ValueKind::Null))
    }

    /// Text of the current value if it is a string.
    fn string_value(&self) -> Option<&str>;

    /// The current value if it is an int.
    fn int_value(&self) -> Option<i64>;
}

#[derive(Clone, Copy)]
enum Children<'a> {
    Top(&'a Element),
    List(&'a [Element]),
    Struct(&'a [(String, Element)]),
}

impl<'a> Children<'a> {
    fn get(self, index: usize) -> Option<(Option<&'a str>, &'a Element)> {
        match self {
            Children::Top(element) => (index == 0).then_some((None, element)),
            Children::List(items) => items.get(index).map(|item| (None, item)),
            Children::Struct(fields) => fields
                .get(index)
                .map(|(name, value)| (Some(name.as_str()), value)),
        }
    }
}

struct Frame<'a> {
    children: Children<'a>,
    next: usize,
    current: Option<(Option<&'a str>, &'a Element)>,
}

impl<'a> Frame<'a> {
    fn new(children: Children<'a>) -> Self {
        Frame {
            children,
            next: 0,
            current: None,
        }
    }
}

/// Reader over an in-memory `Element` tree.
pub struct ElementReader<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> ElementReader<'a> {
    /// A reader positioned before `root`.
    pub fn new(root: &'a Element) -> Self {
        ElementReader {
            stack: vec![Frame::new(Children::Top(root))],
        }
    }

    /// Current nesting depth; 0 at top level.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    fn current(&self) -> Option<(Option<&'a str>, &'a Element)> {
        self.stack.last()?.current
    }

    fn current_element(&self) -> Option<&'a Element> {
        self.current().map(|(_, element)| element)
    }
}

impl StructuredReader for ElementReader<'_> {
    fn next(&mut self) -> Option<ValueKind> {
        let frame = self.stack.last_mut()?;
        frame.current = frame.children.get(frame.next);
        if frame.current.is_some() {
            frame.next += 1;
        }
        frame.current.map(|(_, element)| element.kind())
    }

    fn step_in(&mut self) -> bool {
        let children = match self.current_element().map(Element::value) {
            Some(Value::List(items)) => Children::List(items),
            Some(Value::Struct(fields)) => Children::Struct(fields),
            _ => return false,
        };
        self.stack.push(Frame::new(children));
        true
    }

    fn step_out(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    fn kind(&self) -> Option<ValueKind> {
        self.current_element().map(Element::kind)
    }

    fn field_name(&self) -> Option<&str> {
        self.current()?.0
    }

    fn annotations(&self) -> &[String] {
        self.current_element()
            .map(Element::annotations)
            .unwrap_or_default()
    }

    fn string_value(&self) -> Option<&str> {
        self.current_element()?.as_str()
    }

    fn int_value(&self) -> Option<i64> {
        self.current_element()?.as_int()
    }
}
