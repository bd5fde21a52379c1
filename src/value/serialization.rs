//! Interop between [`Value`] and `serde_json`.
//!
//! Conversion from JSON is lossless. Conversion back is lossy where JSON has
//! no representation: undefined and non-finite numbers become `null`,
//! symbols and functions become descriptive strings, dates become RFC 3339
//! text, and groups and records keep their canonical order.

use super::{Object, Value, format_date};
use serde::{Serialize, Serializer};
use serde_json::{Map, Number};

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Object>(),
            ),
        }
    }
}

fn entries_to_json<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>) -> serde_json::Value {
    let map: Map<String, serde_json::Value> = entries
        .filter(|(_, v)| !v.is_undefined())
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect();
    serde_json::Value::Object(map)
}

/// Whole numbers are written without a fraction so `1` stays `1`.
fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        return serde_json::Value::Number((n as i64).into());
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

impl Value {
    /// Convert to a `serde_json::Value`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Undefined | Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => number_to_json(*n),
            Self::BigInt(n) => match i64::try_from(*n) {
                Ok(small) => serde_json::Value::Number(small.into()),
                Err(_) => serde_json::Value::String(n.to_string()),
            },
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Symbol(symbol) => serde_json::Value::String(symbol.to_string()),
            Self::Function(function) => serde_json::Value::String(function.to_string()),
            Self::Date(date) => serde_json::Value::String(format_date(date)),
            Self::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Tuple(tuple) => {
                serde_json::Value::Array(tuple.iter().map(Value::to_json).collect())
            }
            Self::Group(group) => {
                serde_json::Value::Array(group.iter().map(Value::to_json).collect())
            }
            Self::Object(object) => entries_to_json(object.entries().iter().map(|(k, v)| (k, v))),
            Self::Record(record) => entries_to_json(record.entries().iter().map(|(k, v)| (k, v))),
            Self::Dict(dict) => entries_to_json(dict.entries().iter().map(|(k, v)| (k, v))),
        }
    }

    /// Parse JSON text into a value.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<serde_json::Value>(text).map(Value::from)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::{Record, Tuple};
    use serde_json::json;

    #[test]
    fn test_json_conversion_preserves_shape() {
        let value = Value::from(json!({"name": "Ada", "tags": ["x", 1, true, null]}));

        assert_eq!(value.get("name"), Some(&Value::from("Ada")));
        let tags = value.get("tags").and_then(Value::as_sequence).unwrap();
        assert_eq!(tags.len(), 4);
        assert_eq!(tags[1], Value::from(1));
        assert_eq!(tags[3], Value::Null);
    }

    #[test]
    fn test_to_json_is_lossy_for_non_json_kinds() {
        assert_eq!(Value::Undefined.to_json(), json!(null));
        assert_eq!(Value::sentinel().to_json(), json!(null));
        assert_eq!(Value::BigInt(12).to_json(), json!(12));
        assert_eq!(Value::BigInt(i128::MAX).to_json(), json!(i128::MAX.to_string()));
    }

    #[test]
    fn test_canonical_containers_serialize() {
        let record = Record::new([("b".to_string(), Value::from(2)), ("a".to_string(), Value::from(1))]);
        let tuple = Tuple::new(vec![Value::from("x"), Value::Record(record)]);

        let serialized = serde_json::to_string(&Value::Tuple(tuple)).unwrap();
        assert_eq!(serialized, r#"["x",{"a":1,"b":2}]"#);
    }

    #[test]
    fn test_undefined_entries_are_skipped() {
        let value = Value::object([("kept", Value::from(1)), ("gone", Value::Undefined)]);
        assert_eq!(value.to_json(), json!({"kept": 1}));
    }

    #[test]
    fn test_from_json_str() {
        assert_eq!(Value::from_json_str("[1]").unwrap(), Value::array([1]));
        assert!(Value::from_json_str("{").is_err());
    }
}
