//! Dynamic values accepted and produced by schema mappers.
//!
//! [`Value`] is a closed union over every kind the primitives understand.
//! Raw input arrives as [`Value::Array`] / [`Value::Object`] (typically
//! converted from `serde_json`), and structural combinators emit the
//! canonical containers from [`crate::canonical`].

mod callable;
mod object;
mod serialization;

pub use callable::{Function, Symbol};
pub use object::Object;

use crate::canonical::{Dict, Group, Record, Tuple};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// A dynamically shaped value.
///
/// Equality is value equality with one deliberate hole: `Number(NaN)` is not
/// equal to itself, which is what makes the [`parse`](crate::parse) sentinel
/// distinguishable from every successful result.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent: a missing field, a missing position, or an erased value.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    Symbol(Symbol),
    Function(Function),
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    Object(Object),
    Tuple(Tuple),
    Group(Group),
    Record(Record),
    Dict(Dict),
}

/// Runtime kind of a [`Value`], used in type-mismatch messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Null,
    Boolean,
    Number,
    BigInt,
    String,
    Symbol,
    Function,
    Date,
    Array,
    Object,
    Tuple,
    Group,
    Record,
    Dict,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::BigInt => "bigint",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::Function => "function",
            Self::Date => "date",
            Self::Array => "array",
            Self::Object => "object",
            Self::Tuple => "tuple",
            Self::Group => "group",
            Self::Record => "record",
            Self::Dict => "dict",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// The value [`parse`](crate::parse) returns on failure.
    pub fn sentinel() -> Self {
        Self::Number(f64::NAN)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Undefined => ValueKind::Undefined,
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::BigInt(_) => ValueKind::BigInt,
            Self::String(_) => ValueKind::String,
            Self::Symbol(_) => ValueKind::Symbol,
            Self::Function(_) => ValueKind::Function,
            Self::Date(_) => ValueKind::Date,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Tuple(_) => ValueKind::Tuple,
            Self::Group(_) => ValueKind::Group,
            Self::Record(_) => ValueKind::Record,
            Self::Dict(_) => ValueKind::Dict,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for the NaN number, which is what a failed `parse` returns.
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Self::Number(n) if n.is_nan())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Elements of any sequence-shaped value: arrays, tuples and groups.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            Self::Tuple(tuple) => Some(tuple.as_slice()),
            Self::Group(group) => Some(group.as_slice()),
            _ => None,
        }
    }

    /// Entries of any keyed value: objects, records and dicts.
    pub fn as_entries(&self) -> Option<&[(String, Value)]> {
        match self {
            Self::Object(object) => Some(object.entries()),
            Self::Record(record) => Some(record.entries()),
            Self::Dict(dict) => Some(dict.entries()),
            _ => None,
        }
    }

    /// Look up a key on a keyed value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_entries()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Build a raw object from key/value pairs.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Object(entries.into_iter().collect())
    }

    /// Build a raw array.
    pub fn array<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

/// Render a number the way diagnostic messages expect: `1`, `2.5`, `NaN`,
/// `Infinity`.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

pub(crate) fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::BigInt(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Symbol(symbol) => write!(f, "{symbol}"),
            Self::Function(function) => write!(f, "{function}"),
            Self::Date(date) => f.write_str(&format_date(date)),
            Self::Array(_)
            | Self::Object(_)
            | Self::Tuple(_)
            | Self::Group(_)
            | Self::Record(_)
            | Self::Dict(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i128> for Value {
    fn from(value: i128) -> Self {
        Self::BigInt(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl From<Symbol> for Value {
    fn from(value: Symbol) -> Self {
        Self::Symbol(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Self::Function(value)
    }
}

impl From<Tuple> for Value {
    fn from(value: Tuple) -> Self {
        Self::Tuple(value)
    }
}

impl From<Group> for Value {
    fn from(value: Group) -> Self {
        Self::Group(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl From<Dict> for Value {
    fn from(value: Dict) -> Self {
        Self::Dict(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
