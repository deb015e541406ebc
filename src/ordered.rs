//! Map entries that keep repeated keys
//!
//! serde's map impls keep the last value of a repeated key. A contract
//! never declares the same name twice, so maps read from contract sources go
//! through [`Entries`] first and repeats surface as errors.

use indexmap::map::Entry as IndexEntry;
use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, Error as _, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::btree_map::Entry as BTreeEntry;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Map entries in source order, repeated keys included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entries<K, V>(pub Vec<(K, V)>);

impl<K, V> Default for Entries<K, V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<K, V> Entries<K, V> {
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.0.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.0.iter().map(|(key, value)| (key, value))
    }
}

impl<'de, K, V> Deserialize<'de> for Entries<K, V>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

struct EntriesVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for EntriesVisitor<K, V>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = Entries<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry()? {
            entries.push(entry);
        }
        Ok(Entries(entries))
    }
}

impl<K: Serialize, V: Serialize> Serialize for Entries<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// `deserialize_with` for an [`IndexMap`] that fails on a repeated key
pub fn unique_index_map<'de, D, K, V>(deserializer: D) -> Result<IndexMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Eq + Hash + fmt::Display,
    V: Deserialize<'de>,
{
    let Entries(entries) = Entries::deserialize(deserializer)?;
    let mut map = IndexMap::with_capacity(entries.len());
    for (key, value) in entries {
        match map.entry(key) {
            IndexEntry::Occupied(entry) => {
                return Err(D::Error::custom(format_args!("duplicate key '{}'", entry.key())))
            }
            IndexEntry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }
    Ok(map)
}

/// `deserialize_with` for a [`BTreeMap`] that fails on a repeated key
pub fn unique_btree_map<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Ord + fmt::Display,
    V: Deserialize<'de>,
{
    let Entries(entries) = Entries::deserialize(deserializer)?;
    let mut map = BTreeMap::new();
    for (key, value) in entries {
        match map.entry(key) {
            BTreeEntry::Occupied(entry) => {
                return Err(D::Error::custom(format_args!("duplicate key '{}'", entry.key())))
            }
            BTreeEntry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }
    Ok(map)
}
