//! Tuple and group combinators.

use super::{Sequence, coerce_items, items};
use crate::error::{ValidationError, ValidationResult};
use crate::mapper::Mapper;
use crate::path::Path;
use crate::value::Value;

fn lenient(schemas: &[Mapper], input: &[Value], path: &Path) -> ValidationResult<Vec<Value>> {
    let missing = Value::Undefined;
    (0..schemas.len().max(input.len()))
        .map(|index| {
            let item = input.get(index).unwrap_or(&missing);
            match schemas.get(index) {
                Some(schema) => schema.apply(item, &path.index(index)),
                None => Ok(item.clone()),
            }
        })
        .collect()
}

fn strict(schemas: &[Mapper], input: &[Value], path: &Path) -> ValidationResult<Vec<Value>> {
    if input.len() != schemas.len() {
        return Err(ValidationError::Cardinality {
            expected: schemas.len(),
            actual: input.len(),
            path: path.to_string(),
        });
    }
    schemas
        .iter()
        .zip(input)
        .enumerate()
        .map(|(index, (schema, item))| schema.apply(item, &path.index(index)))
        .collect()
}

fn exclusive(schemas: &[Mapper], input: &[Value], path: &Path) -> ValidationResult<Vec<Value>> {
    let missing = Value::Undefined;
    schemas
        .iter()
        .enumerate()
        .map(|(index, schema)| schema.apply(input.get(index).unwrap_or(&missing), &path.index(index)))
        .collect()
}

type Policy = fn(&[Mapper], &[Value], &Path) -> ValidationResult<Vec<Value>>;

fn positional<I>(schemas: I, policy: Policy, absent_as_empty: bool, output: Sequence) -> Mapper
where
    I: IntoIterator<Item = Mapper>,
{
    let schemas: Vec<Mapper> = schemas.into_iter().collect();
    Mapper::new(move |value, path| {
        let input = items(value, path, absent_as_empty)?;
        Ok(output.build(policy(&schemas, input, path)?))
    })
}

fn n_ary(schema: Mapper, output: Sequence) -> Mapper {
    Mapper::new(move |value, path| {
        let validated = coerce_items(value)
            .iter()
            .enumerate()
            .map(|(index, item)| schema.apply(item, &path.index(index)))
            .collect::<ValidationResult<Vec<_>>>()?;
        Ok(output.build(validated))
    })
}

/// Validate each position against its schema; extra positions pass through.
pub fn tuple<I: IntoIterator<Item = Mapper>>(schemas: I) -> Mapper {
    positional(schemas, lenient, true, Sequence::Tuple)
}

/// Like [`tuple`], emitting an order-insensitive [`Group`](crate::Group).
pub fn group<I: IntoIterator<Item = Mapper>>(schemas: I) -> Mapper {
    positional(schemas, lenient, true, Sequence::Group)
}

/// Require exactly one input element per schema.
pub fn s_tuple<I: IntoIterator<Item = Mapper>>(schemas: I) -> Mapper {
    positional(schemas, strict, false, Sequence::Tuple)
}

/// Like [`s_tuple`], emitting a [`Group`](crate::Group).
pub fn s_group<I: IntoIterator<Item = Mapper>>(schemas: I) -> Mapper {
    positional(schemas, strict, false, Sequence::Group)
}

/// Validate only the schema's positions; extra input is dropped.
pub fn x_tuple<I: IntoIterator<Item = Mapper>>(schemas: I) -> Mapper {
    positional(schemas, exclusive, true, Sequence::Tuple)
}

/// Like [`x_tuple`], emitting a [`Group`](crate::Group).
pub fn x_group<I: IntoIterator<Item = Mapper>>(schemas: I) -> Mapper {
    positional(schemas, exclusive, true, Sequence::Group)
}

/// Validate every element with `schema`. Non-sequence input, undefined
/// included, is read as a single element.
pub fn n_tuple(schema: Mapper) -> Mapper {
    n_ary(schema, Sequence::Tuple)
}

/// Like [`n_tuple`], emitting a [`Group`](crate::Group).
pub fn n_group(schema: Mapper) -> Mapper {
    n_ary(schema, Sequence::Group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::{Group, Tuple};
    use crate::options::{NumberOptions, StringOptions};
    use crate::primitives::{number, string};

    fn num() -> Mapper {
        number(NumberOptions::default()).unwrap()
    }

    fn text() -> Mapper {
        string(StringOptions::default()).unwrap()
    }

    fn tuple_of(items: Vec<Value>) -> Value {
        Value::Tuple(Tuple::new(items))
    }

    #[test]
    fn test_tuple_passes_extras_through() {
        let schema = tuple([num(), text()]);
        let input = Value::array([Value::from(1), Value::from("a"), Value::from(true)]);
        assert_eq!(
            schema.validate(&input).unwrap(),
            tuple_of(vec![Value::from(1), Value::from("a"), Value::from(true)])
        );
    }

    #[test]
    fn test_tuple_validates_missing_positions_as_undefined() {
        let schema = tuple([num(), text()]);
        assert_eq!(
            schema.validate(&Value::array([1])).unwrap_err().to_string(),
            "Expected string, got undefined at root[1]"
        );
    }

    #[test]
    fn test_strict_tuple_cardinality() {
        let schema = s_tuple([num(), num()]);
        assert!(schema.validate(&Value::array([1, 2])).is_ok());
        assert_eq!(
            schema.validate(&Value::array([1, 2, 3])).unwrap_err().to_string(),
            "Expected 2 elements, got 3 elements at root."
        );
        assert!(schema.validate(&Value::Undefined).is_err());
    }

    #[test]
    fn test_exclusive_tuple_drops_extras() {
        let schema = x_tuple([num()]);
        assert_eq!(
            schema.validate(&Value::array([1, 2, 3])).unwrap(),
            tuple_of(vec![Value::from(1)])
        );
    }

    #[test]
    fn test_group_is_order_insensitive() {
        let schema = group([num(), num()]);
        let a = schema.validate(&Value::array([1, 2])).unwrap();
        let b = schema.validate(&Value::array([2, 1])).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Value::Group(Group::new(vec![Value::from(2), Value::from(1)])));
    }

    #[test]
    fn test_n_tuple_coerces_scalars() {
        let schema = n_tuple(num());
        assert_eq!(schema.validate(&Value::from(4)).unwrap(), tuple_of(vec![Value::from(4)]));
        assert_eq!(
            schema.validate(&Value::array([1, 2])).unwrap(),
            tuple_of(vec![Value::from(1), Value::from(2)])
        );
        assert_eq!(
            schema.validate(&Value::array([Value::from(1), Value::from("x")]))
                .unwrap_err()
                .to_string(),
            "Expected number, got string at root[1]"
        );
    }

    #[test]
    fn test_canonical_input_round_trips() {
        let schema = tuple([num(), text()]);
        let first = schema.validate(&Value::array([Value::from(1), Value::from("a")])).unwrap();
        assert_eq!(schema.validate(&first).unwrap(), first);
    }
}
