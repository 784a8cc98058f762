//! The use mapping artifact.
//!
//! A [`UseMapping`] is the finished product of a mapping operation: logical
//! name → normalized relative path, with keys unique and kept in insertion
//! order. Insertion order is what the manifest serializes, so the JSON a
//! caller reads back lists entries exactly as the resolver produced them.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Mapping from logical name to normalized relative file path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UseMapping {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl UseMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. The key must not already be present; collision
    /// resolution happens in the resolver, before insertion.
    pub fn insert(&mut self, name: String, path: String) {
        debug_assert!(!self.index.contains_key(&name));
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, path));
    }

    /// Whether a logical name is already taken.
    pub fn contains_key(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up the path registered under a logical name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&position| self.entries[position].1.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the mapping holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, path)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_str()))
    }
}

impl Serialize for UseMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, path) in &self.entries {
            map.serialize_entry(name, path)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UseMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UseMappingVisitor;

        impl<'de> Visitor<'de> for UseMappingVisitor {
            type Value = UseMapping;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of logical names to relative paths")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut mapping = UseMapping::new();
                while let Some((name, path)) = access.next_entry::<String, String>()? {
                    if !mapping.contains_key(&name) {
                        mapping.insert(name, path);
                    }
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(UseMappingVisitor)
    }
}
