//! Raw keyed input.

use std::collections::HashMap;

use super::Value;

/// An insertion-ordered map of string keys to values.
///
/// This is the shape raw payloads arrive in. It may carry a nominal class
/// name, which the `class` option of [`object`](crate::object) checks.
#[derive(Debug, Clone, Default)]
pub struct Object {
    class: Option<String>,
    entries: Vec<(String, Value)>,
    // key -> position in `entries`
    index: HashMap<String, usize>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag the object with a nominal class name.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Insert or replace an entry. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && self.entries == other.entries
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = Self::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut object: Object = [("a", 1), ("b", 2)].into_iter().collect();
        let previous = object.insert("a", 10);

        assert_eq!(previous, Some(Value::from(1)));
        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(object.get("a"), Some(&Value::from(10)));
    }

    #[test]
    fn test_many_duplicate_keys() {
        let object: Object = (0..20_000)
            .map(|n| (format!("k{}", n % 10_000), n))
            .collect();

        assert_eq!(object.len(), 10_000);
        assert_eq!(object.keys().next(), Some("k0"));
        assert_eq!(object.get("k0"), Some(&Value::from(10_000)));
        assert_eq!(object.get("k9999"), Some(&Value::from(19_999)));
        assert!(!object.contains_key("k10000"));
    }

    #[test]
    fn test_class_tag() {
        let object = Object::new().with_class("Point");
        assert_eq!(object.class(), Some("Point"));
        assert_eq!(Object::new().class(), None);
    }
}
