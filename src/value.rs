//! Tree types produced by the builder
//!
//! Markup nests without bound, so the operations that walk a whole tree
//! (dropping it, [`Value::depth`] and `Display`) keep their own work list on
//! the heap instead of recursing. The derived `Clone`, `PartialEq` and `Debug`
//! impls and `Serialize` still recurse once per nesting level.

use indexmap::map::{Iter, Keys, Values};
use indexmap::IndexMap;
use std::fmt;
use std::ops::Index;

/// A node of the output tree
///
/// Elements and the document root are objects, attribute and text leaves are
/// strings, and arrays only appear where sibling elements share a name.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Attribute value or text content
    String(String),
    /// Repeated sibling elements, in document order
    Array(Array),
    /// Element (attributes, children and text, keyed by name)
    Object(Object),
}

impl Default for Value {
    fn default() -> Self {
        Self::Object(Object::new())
    }
}

impl Value {
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Text or attribute content, if this is a leaf
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Repeated siblings, if the slot was promoted to an array
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Element contents, if this is an element
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Looks up `key` if this is an object
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Nesting depth of objects below this value; a leaf or empty object is 0
    ///
    /// Arrays of repeated elements do not add a level of their own.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0)];
        while let Some((value, level)) = pending.pop() {
            match value {
                Self::String(_) => {}
                Self::Array(arr) => pending.extend(arr.iter().map(|item| (item, level))),
                Self::Object(obj) => {
                    for child in obj.values().filter(|v| !v.is_string()) {
                        deepest = deepest.max(level + 1);
                        pending.push((child, level + 1));
                    }
                }
            }
        }
        deepest
    }

    /// Move this value's children into `pending`, leaving it a shallow shell
    fn detach_children(&mut self, pending: &mut Vec<Self>) {
        match self {
            Self::String(_) => {}
            Self::Array(arr) => pending.append(&mut arr.0),
            Self::Object(obj) => pending.extend(std::mem::take(&mut obj.0).into_values()),
        }
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut value) = pending.pop() {
            value.detach_children(&mut pending);
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Self::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

/// Pending output of the `Display` walk
enum Piece<'a> {
    Value(&'a Value),
    Key(&'a str),
    Punct(&'static str),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Piece::Value(self)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Punct(p) => f.write_str(p)?,
                Piece::Key(key) => {
                    write_quoted(f, key)?;
                    f.write_str(": ")?;
                }
                Piece::Value(Self::String(s)) => write_quoted(f, s)?,
                Piece::Value(Self::Array(arr)) => {
                    f.write_str("[")?;
                    pending.push(Piece::Punct("]"));
                    for (i, item) in arr.iter().enumerate().rev() {
                        pending.push(Piece::Value(item));
                        if i > 0 {
                            pending.push(Piece::Punct(", "));
                        }
                    }
                }
                Piece::Value(Self::Object(obj)) => {
                    f.write_str("{")?;
                    pending.push(Piece::Punct("}"));
                    for (i, (key, val)) in obj.iter().enumerate().rev() {
                        pending.push(Piece::Value(val));
                        pending.push(Piece::Key(key));
                        if i > 0 {
                            pending.push(Piece::Punct(", "));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04x}", u32::from(c))?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

/// Element contents keyed by attribute, child or text key, in document order
///
/// Equality ignores key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object(pub(crate) IndexMap<String, Value>);

impl Object {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Set `key`, replacing (and returning) whatever was there
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> Keys<'_, String, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> Values<'_, String, Value> {
        self.0.values()
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Adds `child` under `name`, turning the slot into an array once the
    /// name repeats
    pub fn append(&mut self, name: String, child: Value) {
        match self.0.get_mut(&name) {
            None => {
                self.0.insert(name, child);
            }
            Some(Value::Array(siblings)) => siblings.push(child),
            Some(existing) => {
                let first = std::mem::replace(existing, Value::Array(Array::new()));
                *existing = Value::Array(Array(vec![first, child]));
            }
        }
    }
}

impl Index<&str> for Object {
    type Output = Value;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, key: &str) -> &Self::Output {
        &self.0[key]
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Sibling elements sharing one name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array(pub(crate) Vec<Value>);

impl Array {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.0.push(value.into());
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }
}

impl Index<usize> for Array {
    type Output = Value;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(feature = "serde")]
mod ser {
    use super::{Array, Object, Value};
    use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::String(s) => serializer.serialize_str(s),
                Self::Array(arr) => arr.serialize(serializer),
                Self::Object(obj) => obj.serialize(serializer),
            }
        }
    }

    impl Serialize for Array {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for item in self {
                seq.serialize_element(item)?;
            }
            seq.end()
        }
    }

    impl Serialize for Object {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}
