//! Structural combinators over positional and keyed input.
//!
//! Positional combinators read `Array`, `Tuple` or `Group` input and emit a
//! [`Tuple`](crate::Tuple) or [`Group`](crate::Group). Keyed combinators
//! read `Object`, `Record` or `Dict` input and emit a
//! [`Record`](crate::Record) or [`Dict`](crate::Dict).
//!
//! | Variant | Positions / keys validated | Extra input |
//! |---|---|---|
//! | lenient | every schema entry, absent input read as undefined | passed through |
//! | `s_` strict | every input entry | cardinality or extra-key error |
//! | `x_` exclusive | every schema entry (`x_dict`: schema keys present in input) | dropped |
//! | `n_` n-ary | every element against one schema | n/a |

mod keyed;
mod positional;

pub use keyed::{dict, n_dict, n_record, record, s_dict, s_record, x_dict, x_record};
pub use positional::{group, n_group, n_tuple, s_group, s_tuple, tuple, x_group, x_tuple};

use std::collections::HashMap;

use crate::canonical::{Dict, Group, Record, Tuple};
use crate::error::{ValidationError, ValidationResult};
use crate::mapper::Mapper;
use crate::path::Path;
use crate::value::Value;

/// Named child schemas of a keyed combinator, in declaration order.
#[derive(Clone)]
struct Fields {
    fields: Vec<(String, Mapper)>,
    index: HashMap<String, usize>,
}

impl Fields {
    fn new<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Mapper)>,
    {
        let mut collected = Self {
            fields: Vec::new(),
            index: HashMap::new(),
        };
        for (key, mapper) in fields {
            let key = key.into();
            match collected.index.get(&key) {
                Some(&position) => collected.fields[position].1 = mapper,
                None => {
                    collected.index.insert(key.clone(), collected.fields.len());
                    collected.fields.push((key, mapper));
                }
            }
        }
        collected
    }

    fn get(&self, key: &str) -> Option<&Mapper> {
        self.index.get(key).map(|&position| &self.fields[position].1)
    }

    fn len(&self) -> usize {
        self.fields.len()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &Mapper)> {
        self.fields.iter().map(|(k, m)| (k.as_str(), m))
    }
}

/// Which canonical sequence a positional combinator emits.
#[derive(Clone, Copy)]
enum Sequence {
    Tuple,
    Group,
}

impl Sequence {
    fn build(self, items: Vec<Value>) -> Value {
        match self {
            Self::Tuple => Value::Tuple(Tuple::new(items)),
            Self::Group => Value::Group(Group::new(items)),
        }
    }
}

/// Which canonical keyed container a keyed combinator emits.
#[derive(Clone, Copy)]
enum Keyed {
    Record,
    Dict,
}

impl Keyed {
    /// Entries whose value is undefined are left out.
    fn build(self, entries: Vec<(String, Value)>) -> Value {
        let entries = entries.into_iter().filter(|(_, v)| !v.is_undefined());
        match self {
            Self::Record => Value::Record(Record::new(entries)),
            Self::Dict => Value::Dict(Dict::new(entries)),
        }
    }
}

/// Borrow the elements of positional input. Undefined reads as empty when
/// `absent_as_empty` is set.
fn items<'a>(value: &'a Value, path: &Path, absent_as_empty: bool) -> ValidationResult<&'a [Value]> {
    if absent_as_empty && value.is_undefined() {
        return Ok(&[]);
    }
    value
        .as_sequence()
        .ok_or_else(|| ValidationError::type_mismatch("array", value.kind().name(), path))
}

/// Borrow the entries of keyed input.
fn entries<'a>(value: &'a Value, path: &Path) -> ValidationResult<&'a [(String, Value)]> {
    value
        .as_entries()
        .ok_or_else(|| ValidationError::type_mismatch("object", value.kind().name(), path))
}

/// Read non-sequence input as a one-element sequence.
fn coerce_items(value: &Value) -> Vec<Value> {
    match value.as_sequence() {
        Some(items) => items.to_vec(),
        None => vec![value.clone()],
    }
}
