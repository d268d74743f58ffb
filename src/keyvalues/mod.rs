//! Ordered multimap in the shape of Valve's KeyValues format.
//!
//! KeyValues sections allow the same key several times, and the Updater
//! plugin relies on it: a manifest lists every file under its category key,
//! so `"Plugin"` usually appears many times in one section. [`KeyValues`]
//! therefore keeps an ordered list of `(key, node)` pairs, and
//! [`KeyValues::append`] never replaces an existing entry.

mod writer;

pub use writer::{escape, to_string, write};

/// A value in a [`KeyValues`] section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Quoted string value
    Value(String),
    /// Nested section
    Section(KeyValues),
}

impl Node {
    /// The string value, if this is not a section.
    #[must_use]
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v),
            Self::Section(_) => None,
        }
    }

    /// The nested section, if this is one.
    #[must_use]
    pub const fn as_section(&self) -> Option<&KeyValues> {
        match self {
            Self::Section(s) => Some(s),
            Self::Value(_) => None,
        }
    }
}

/// Ordered sequence of `(key, node)` entries with duplicate keys allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValues {
    entries: Vec<(String, Node)>,
}

impl KeyValues {
    /// Create an empty section.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a string value under `key`, after any existing entries.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), Node::Value(value.into())));
    }

    /// Append a nested section under `key`.
    pub fn append_section(&mut self, key: impl Into<String>, section: Self) {
        self.entries.push((key.into(), Node::Section(section)));
    }

    /// First section stored under `key`, appending an empty one if there is
    /// none.
    pub fn section_mut(&mut self, key: &str) -> &mut Self {
        let pos = self
            .entries
            .iter()
            .position(|(k, node)| k == key && matches!(node, Node::Section(_)));

        let pos = pos.unwrap_or_else(|| {
            self.entries.push((key.to_string(), Node::Section(Self::new())));
            self.entries.len() - 1
        });

        match &mut self.entries[pos].1 {
            Node::Section(section) => section,
            Node::Value(_) => unreachable!("position matched a section"),
        }
    }

    /// First node stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.get_all(key).next()
    }

    /// Every node stored under `key`, in insertion order.
    pub fn get_all<'a, 'k>(
        &'a self,
        key: &'k str,
    ) -> impl Iterator<Item = &'a Node> + use<'a, 'k> {
        self.entries
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, node)| node)
    }

    /// Every string value stored under `key`, in insertion order.
    pub fn values<'a, 'k>(
        &'a self,
        key: &'k str,
    ) -> impl Iterator<Item = &'a str> + use<'a, 'k> {
        self.get_all(key).filter_map(Node::as_value)
    }

    /// First section stored under `key`.
    #[must_use]
    pub fn section(&self, key: &str) -> Option<&Self> {
        self.get_all(key).find_map(Node::as_section)
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, node)| (k.as_str(), node))
    }

    /// Number of entries, counting duplicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the section has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for KeyValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut kv = Self::new();
        for (k, v) in iter {
            kv.append(k, v);
        }
        kv
    }
}

impl<K, V> Extend<(K, V)> for KeyValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.append(k, v);
        }
    }
}
