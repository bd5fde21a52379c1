//! Canonical immutable containers emitted by the structural combinators.
//!
//! Each container fixes an equality contract that downstream code relies on
//! for deduplication and memoization:
//!
//! - [`Tuple`]: ordered; equal when lengths and every position match.
//! - [`Group`]: unordered; equal as multisets (order ignored, multiplicity
//!   and length respected).
//! - [`Record`]: keyed, unordered; equal when key sets and per-key values
//!   match, regardless of insertion order.
//! - [`Dict`]: keyed, ordered; key insertion order is part of equality.
//!
//! Independently constructed containers with equal content always compare
//! equal. None of them expose mutation.

use std::collections::HashMap;

use crate::value::Value;

/// Ordered, fixed-length sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tuple(Vec<Value>);

impl Tuple {
    pub fn new(items: Vec<Value>) -> Self {
        Self(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

impl FromIterator<Value> for Tuple {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Unordered sequence with multiset equality.
///
/// Elements keep the order they were built in for iteration, but that order
/// does not take part in equality.
#[derive(Debug, Clone, Default)]
pub struct Group(Vec<Value>);

impl Group {
    pub fn new(items: Vec<Value>) -> Self {
        Self(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Number of elements equal to `value`.
    pub fn count(&self, value: &Value) -> usize {
        self.0.iter().filter(|item| *item == value).count()
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        if self.0.len() != other.0.len() {
            return false;
        }
        // Pair every element with a distinct, not yet claimed equal element.
        let mut claimed = vec![false; other.0.len()];
        for item in &self.0 {
            let mut found = false;
            for (index, candidate) in other.0.iter().enumerate() {
                if !claimed[index] && candidate == item {
                    claimed[index] = true;
                    found = true;
                    break;
                }
            }
            if !found {
                return false;
            }
        }
        true
    }
}

impl FromIterator<Value> for Group {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Collapse duplicate keys: the first occurrence keeps its position, the
/// last occurrence supplies the value.
fn dedup_entries<K, V, I>(entries: I) -> Vec<(String, Value)>
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut deduped: Vec<(String, Value)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for (key, value) in entries {
        let key = key.into();
        let value = value.into();
        match positions.get(&key) {
            Some(&position) => deduped[position].1 = value,
            None => {
                positions.insert(key.clone(), deduped.len());
                deduped.push((key, value));
            }
        }
    }
    deduped
}

fn lookup<'a>(entries: &'a [(String, Value)], key: &str) -> Option<&'a Value> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

/// Keyed record whose equality ignores insertion order.
///
/// Entries are stored sorted by key, so the stored form is canonical.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record(Vec<(String, Value)>);

impl Record {
    pub fn new<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut entries: Vec<(String, Value)> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        // Stable, so within a run of equal keys the last one is the latest.
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        let mut sorted: Vec<(String, Value)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            if let Some((last, slot)) = sorted.last_mut() {
                if *last == key {
                    *slot = value;
                    continue;
                }
            }
            sorted.push((key, value));
        }
        Self(sorted)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|position| &self.0[position].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in canonical (sorted) order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn entries(&self) -> &[(String, Value)] {
        &self.0
    }
}

/// Keyed dictionary whose equality includes key insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dict(Vec<(String, Value)>);

impl Dict {
    pub fn new<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self(dedup_entries(entries))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        lookup(&self.0, key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn entries(&self) -> &[(String, Value)] {
        &self.0
    }
}
