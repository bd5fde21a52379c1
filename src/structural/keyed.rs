//! Record and dict combinators.

use std::collections::{HashMap, HashSet};

use super::{Fields, Keyed, coerce_items, entries};
use crate::error::{ConfigResult, ValidationError, ValidationResult};
use crate::mapper::Mapper;
use crate::options::{NaryOptions, validate_bounds};
use crate::path::Path;
use crate::value::Value;

type Entries = Vec<(String, Value)>;

/// Input keys in input order, validated when declared; then declared keys
/// missing from the input, validated against undefined.
fn lenient(fields: &Fields, input: &[(String, Value)], path: &Path) -> ValidationResult<Entries> {
    let mut output = Vec::with_capacity(input.len().max(fields.len()));
    let present: HashSet<&str> = input.iter().map(|(k, _)| k.as_str()).collect();
    for (key, item) in input {
        let item = match fields.get(key) {
            Some(schema) => schema.apply(item, &path.key(key))?,
            None => item.clone(),
        };
        output.push((key.clone(), item));
    }
    for (key, schema) in fields.iter() {
        if !present.contains(key) {
            output.push((key.to_string(), schema.apply(&Value::Undefined, &path.key(key))?));
        }
    }
    Ok(output)
}

/// Every input key must be declared. Declared keys missing from the input
/// are only caught by the count check.
fn strict(fields: &Fields, input: &[(String, Value)], path: &Path) -> ValidationResult<Entries> {
    if fields.len() > input.len() {
        return Err(ValidationError::Cardinality {
            expected: fields.len(),
            actual: input.len(),
            path: path.to_string(),
        });
    }
    input
        .iter()
        .map(|(key, item)| match fields.get(key) {
            Some(schema) => Ok((key.clone(), schema.apply(item, &path.key(key))?)),
            None => Err(ValidationError::ExtraKey {
                key: key.clone(),
                path: path.key(key).to_string(),
            }),
        })
        .collect()
}

/// Declared keys only, in declaration order.
fn exclusive_by_schema(fields: &Fields, input: &[(String, Value)], path: &Path) -> ValidationResult<Entries> {
    let missing = Value::Undefined;
    let lookup: HashMap<&str, &Value> = input.iter().map(|(k, v)| (k.as_str(), v)).collect();
    fields
        .iter()
        .map(|(key, schema)| {
            let item = lookup.get(key).copied().unwrap_or(&missing);
            Ok((key.to_string(), schema.apply(item, &path.key(key))?))
        })
        .collect()
}

/// Declared keys present in the input, in input order. Declared keys the
/// input lacks are omitted without being validated.
fn exclusive_by_input(fields: &Fields, input: &[(String, Value)], path: &Path) -> ValidationResult<Entries> {
    input
        .iter()
        .filter_map(|(key, item)| fields.get(key).map(|schema| (key, item, schema)))
        .map(|(key, item, schema)| Ok((key.clone(), schema.apply(item, &path.key(key))?)))
        .collect()
}

type Policy = fn(&Fields, &[(String, Value)], &Path) -> ValidationResult<Entries>;

fn keyed(fields: Fields, policy: Policy, output: Keyed) -> Mapper {
    Mapper::new(move |value, path| {
        let input = entries(value, path)?;
        Ok(output.build(policy(&fields, input, path)?))
    })
}

fn n_ary(fields: Fields, options: NaryOptions, kind: &'static str, output: Keyed) -> ConfigResult<Mapper> {
    validate_bounds(kind, options.min, options.max)?;

    Ok(Mapper::new(move |value, path| {
        let elements = coerce_items(value);
        if let Some(max) = options.max {
            if elements.len() > max {
                return Err(ValidationError::AtMost {
                    max,
                    actual: elements.len(),
                    path: path.to_string(),
                });
            }
        }
        if let Some(min) = options.min {
            if elements.len() < min {
                return Err(ValidationError::AtLeast {
                    min,
                    actual: elements.len(),
                    path: path.to_string(),
                });
            }
        }

        let validated = elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                let path = path.index(index);
                let input = entries(element, &path)?;
                Ok(output.build(lenient(&fields, input, &path)?))
            })
            .collect::<ValidationResult<Vec<_>>>()?;
        Ok(Value::Tuple(validated.into_iter().collect()))
    }))
}

/// Validate declared keys, reading absent ones as undefined; undeclared
/// keys pass through. Emits an order-insensitive [`Record`](crate::Record).
pub fn record<K, I>(fields: I) -> Mapper
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Mapper)>,
{
    keyed(Fields::new(fields), lenient, Keyed::Record)
}

/// Like [`record`], emitting an order-sensitive [`Dict`](crate::Dict).
pub fn dict<K, I>(fields: I) -> Mapper
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Mapper)>,
{
    keyed(Fields::new(fields), lenient, Keyed::Dict)
}

/// Reject undeclared keys and inputs with fewer entries than declared keys.
pub fn s_record<K, I>(fields: I) -> Mapper
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Mapper)>,
{
    keyed(Fields::new(fields), strict, Keyed::Record)
}

/// Like [`s_record`], emitting a [`Dict`](crate::Dict) in input order.
pub fn s_dict<K, I>(fields: I) -> Mapper
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Mapper)>,
{
    keyed(Fields::new(fields), strict, Keyed::Dict)
}

/// Validate every declared key, absent ones as undefined; drop the rest.
pub fn x_record<K, I>(fields: I) -> Mapper
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Mapper)>,
{
    keyed(Fields::new(fields), exclusive_by_schema, Keyed::Record)
}

/// Keep only declared keys the input actually has, in input order.
///
/// Unlike [`x_record`], a declared key missing from the input is omitted
/// rather than validated against undefined.
pub fn x_dict<K, I>(fields: I) -> Mapper
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Mapper)>,
{
    keyed(Fields::new(fields), exclusive_by_input, Keyed::Dict)
}

/// Validate a sequence of records, each with the [`record`] rules.
///
/// Non-sequence input is read as one element. `max` is checked before
/// `min`, both before any element is validated. Emits a tuple of records.
pub fn n_record<K, I>(fields: I, options: NaryOptions) -> ConfigResult<Mapper>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Mapper)>,
{
    n_ary(Fields::new(fields), options, "nRecord", Keyed::Record)
}

/// Like [`n_record`], emitting a tuple of dicts.
pub fn n_dict<K, I>(fields: I, options: NaryOptions) -> ConfigResult<Mapper>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Mapper)>,
{
    n_ary(Fields::new(fields), options, "nDict", Keyed::Dict)
}
