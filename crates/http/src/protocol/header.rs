//! Ordered, name-unique header collection shared by requests and responses.
//!
//! Header names are compared byte for byte: `Host` and `host` are two distinct
//! headers. Adding a header whose name is already present replaces the value
//! in place, so the position of the first insertion is kept; a new name is
//! appended at the end. The wire order produced by the encoders is exactly the
//! insertion order of this collection.

use std::fmt;

/// A single `name: value` header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    name: String,
    value: String,
}

impl HeaderField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Formats the field the way it appears on the wire, without the line ending.
impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Ordered header collection with unique, case-sensitive names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    fields: Vec<HeaderField>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, replacing the value of an existing header with the same name.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(HeaderField::new(name, value));
    }

    /// Same as [`HeaderSet::add`] for an already built field.
    pub fn insert(&mut self, field: HeaderField) {
        match self.fields.iter_mut().find(|existing| existing.name == field.name) {
            Some(existing) => existing.value = field.value,
            None => self.fields.push(field),
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field.name == name)
    }

    /// Returns the value of `name`, or an empty string when the header is absent.
    ///
    /// An absent header and a header with an empty value look the same here;
    /// use [`HeaderSet::get_opt`] when the difference matters.
    pub fn get(&self, name: &str) -> &str {
        self.get_opt(name).unwrap_or("")
    }

    pub fn get_opt(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|field| field.name == name).map(HeaderField::value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HeaderField> {
        self.fields.iter()
    }

    /// Header lines (`name: value`) in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.fields.iter().map(HeaderField::to_string)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a HeaderSet {
    type Item = &'a HeaderField;
    type IntoIter = std::slice::Iter<'a, HeaderField>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderSet
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = HeaderSet::new();
        for (name, value) in iter {
            headers.add(name, value);
        }
        headers
    }
}
