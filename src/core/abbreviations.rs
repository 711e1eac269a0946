// File: src/core/abbreviations.rs
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Abbreviation -> canonical description, keyed case-insensitively.
///
/// Entries keep the order they were read in; seeding walks them in that
/// order. Immutable once built: a reload produces a new table rather than
/// editing this one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl AbbreviationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys are trimmed and lowercased. When two keys fold to the same
    /// abbreviation the first one seen keeps its description.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::new();
        for (key, description) in pairs {
            table.push_if_absent(key.as_ref(), description.into());
        }
        table
    }

    fn push_if_absent(&mut self, key: &str, description: String) {
        let key = fold_key(key);
        if key.is_empty() || self.index.contains_key(&key) {
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, description));
    }

    pub fn get(&self, abbreviation: &str) -> Option<&str> {
        self.index
            .get(&fold_key(abbreviation))
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains(&self, abbreviation: &str) -> bool {
        self.get(abbreviation).is_some()
    }

    /// Entries in the order they were first read.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn fold_key(key: &str) -> String {
    key.trim().to_lowercase()
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for AbbreviationTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl Serialize for AbbreviationTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, description) in &self.entries {
            map.serialize_entry(key, description)?;
        }
        map.end()
    }
}

// Reads the map entry by entry so file order survives, which a `BTreeMap`
// or `HashMap` round trip would lose.
struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = AbbreviationTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of abbreviation to description")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = AbbreviationTable::new();
        while let Some((key, description)) = access.next_entry::<String, String>()? {
            table.push_if_absent(&key, description);
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for AbbreviationTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor)
    }
}
