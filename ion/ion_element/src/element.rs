//! Tree nodes.

/// The type of a value, as reported by a reader.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    String,
    Symbol,
    List,
    Struct,
}

/// The content of a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
    Symbol(String),
    List(Vec<Element>),
    /// Fields in insertion order; names may repeat.
    Struct(Vec<(String, Element)>),
}

impl Value {
    /// The kind of this value.
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::String(_) => ValueKind::String,
            Value::Symbol(_) => ValueKind::Symbol,
            Value::List(_) => ValueKind::List,
            Value::Struct(_) => ValueKind::Struct,
        }
    }
}

/// A value with its annotations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    annotations: Vec<String>,
    value: Value,
}

impl Element {
    /// Create an unannotated element.
    pub fn new(value: Value) -> Self {
        Element {
            annotations: Vec::new(),
            value,
        }
    }

    pub fn null() -> Self {
        Self::new(Value::Null)
    }

    pub fn int(value: i64) -> Self {
        Self::new(Value::Int(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(Value::String(value.into()))
    }

    pub fn symbol(value: impl Into<String>) -> Self {
        Self::new(Value::Symbol(value.into()))
    }

    pub fn list(items: impl IntoIterator<Item = Element>) -> Self {
        Self::new(Value::List(items.into_iter().collect()))
    }

    pub fn structure<K: Into<String>>(fields: impl IntoIterator<Item = (K, Element)>) -> Self {
        Self::new(Value::Struct(
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Append an annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn annotations(&self) -> &[String] {
        &self.annotations
    }

    pub fn has_annotation(&self, annotation: &str) -> bool {
        self.annotations.iter().any(|a| a == annotation)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, Value::Null)
    }

    /// The text of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Element]> {
        match &self.value {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Element>> {
        match &mut self.value {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&[(String, Element)]> {
        match &self.value {
            Value::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_struct_mut(&mut self) -> Option<&mut Vec<(String, Element)>> {
        match &mut self.value {
            Value::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// The first field named `name` of a struct.
    pub fn get(&self, name: &str) -> Option<&Element> {
        self.as_struct()?
            .iter()
            .find_map(|(field, value)| (field == name).then_some(value))
    }

    /// Append a field to a struct. Returns false if this is not a struct.
    pub fn add(&mut self, name: impl Into<String>, value: Element) -> bool {
        match self.as_struct_mut() {
            Some(fields) => {
                fields.push((name.into(), value));
                true
            }
            None => false,
        }
    }

    /// Replace every field named `name` with a single one holding `value`.
    pub fn put(&mut self, name: &str, value: Element) -> bool {
        self.remove_all(name);
        self.add(name, value)
    }

    /// Remove every field named `name`, returning how many were removed.
    pub fn remove_all(&mut self, name: &str) -> usize {
        let Some(fields) = self.as_struct_mut() else {
            return 0;
        };
        let before = fields.len();
        fields.retain(|(field, _)| field != name);
        before - fields.len()
    }

    /// Append an item to a list. Returns false if this is not a list.
    pub fn push(&mut self, item: Element) -> bool {
        match self.as_list_mut() {
            Some(items) => {
                items.push(item);
                true
            }
            None => false,
        }
    }
}
