//! Exact-kind and exact-value validators.

use super::{apply_map, run_check};
use crate::error::{ConfigResult, ValidationError};
use crate::mapper::Mapper;
use crate::options::{BasicOptions, OneOfOptions, OverwriteOptions, reject_empty_choices};
use crate::value::{Value, ValueKind};

fn basic(kind: &'static str, expected: Option<ValueKind>, options: BasicOptions) -> ConfigResult<Mapper> {
    let presence = options.presence();
    presence.validate(kind)?;

    Ok(Mapper::new(move |value, path| {
        if let Some(early) = presence.resolve(value) {
            return Ok(early);
        }
        if let Some(expected) = expected {
            if value.kind() != expected {
                return Err(ValidationError::type_mismatch(
                    expected.name(),
                    value.kind().name(),
                    path,
                ));
            }
        }
        run_check(&options.check, value, path)?;
        Ok(apply_map(&options.map, value.clone()))
    }))
}

/// Validate a function value.
pub fn function(options: BasicOptions) -> ConfigResult<Mapper> {
    basic("function", Some(ValueKind::Function), options)
}

/// Validate a symbol.
pub fn symbol(options: BasicOptions) -> ConfigResult<Mapper> {
    basic("symbol", Some(ValueKind::Symbol), options)
}

/// Validate null.
pub fn null(options: BasicOptions) -> ConfigResult<Mapper> {
    basic("null", Some(ValueKind::Null), options)
}

/// Validate undefined, as produced by a missing field or position.
pub fn undefined(options: BasicOptions) -> ConfigResult<Mapper> {
    basic("undefined", Some(ValueKind::Undefined), options)
}

/// Accept any value, running only presence, `check` and `map`.
pub fn value(options: BasicOptions) -> ConfigResult<Mapper> {
    basic("value", None, options)
}

/// Accept exactly `expected`.
pub fn literal(expected: impl Into<Value>) -> Mapper {
    let expected = expected.into();
    Mapper::new(move |value, path| {
        if *value == expected {
            Ok(value.clone())
        } else {
            Err(ValidationError::Literal {
                expected: expected.to_string(),
                value: value.to_string(),
                path: path.to_string(),
            })
        }
    })
}

/// Ignore the input and return a fixed value, passed through `map`.
pub fn overwrite(options: OverwriteOptions) -> Mapper {
    Mapper::new(move |_, _| Ok(apply_map(&options.map, options.value.clone())))
}

/// Accept any value equal to one of `choices`.
pub fn one_of<I, V>(choices: I, options: OneOfOptions) -> ConfigResult<Mapper>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let choices: Vec<Value> = choices.into_iter().map(Into::into).collect();
    if choices.is_empty() {
        reject_empty_choices()?;
    }

    Ok(Mapper::new(move |value, path| {
        if !choices.contains(value) {
            return Err(ValidationError::OneOf {
                choices: Value::Array(choices.clone()).to_string(),
                value: value.to_string(),
                path: path.to_string(),
            });
        }
        Ok(apply_map(&options.map, value.clone()))
    }))
}

/// Always produce [`Value::Undefined`]. Keyed combinators omit the field.
pub fn drop() -> Mapper {
    Mapper::new(|_, _| Ok(Value::Undefined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::options::{Check, Transform};
    use crate::value::{Function, Symbol};

    #[test]
    fn test_exact_kinds() {
        let function = function(BasicOptions::default()).unwrap();
        assert!(function.validate(&Value::from(Function::new("noop", |_| Value::Undefined))).is_ok());
        assert!(function.validate(&Value::from("noop")).is_err());

        let symbol = symbol(BasicOptions::default()).unwrap();
        assert!(symbol.validate(&Value::from(Symbol::new("id"))).is_ok());

        let null = null(BasicOptions::default()).unwrap();
        assert_eq!(null.validate(&Value::Null).unwrap(), Value::Null);
        assert_eq!(
            null.validate(&Value::Undefined).unwrap_err().to_string(),
            "Expected null, got undefined at root"
        );

        let undefined = undefined(BasicOptions::default()).unwrap();
        assert!(undefined.validate(&Value::Undefined).is_ok());
        assert!(undefined.validate(&Value::Null).is_err());
    }

    #[test]
    fn test_value_passes_anything_through_check() {
        let schema = value(BasicOptions {
            check: Some(Check::new(|v| !v.is_null())),
            ..Default::default()
        })
        .unwrap();
        assert!(schema.validate(&Value::from(1)).is_ok());
        assert!(schema.validate(&Value::object([("a", 1)])).is_ok());
        assert!(schema.validate(&Value::Null).is_err());
    }

    #[test]
    fn test_literal() {
        let schema = literal("on");
        assert_eq!(schema.validate(&Value::from("on")).unwrap(), Value::from("on"));
        assert_eq!(
            schema.validate(&Value::from("off")).unwrap_err().to_string(),
            "Expected literal on, got off at root"
        );
        assert!(literal(f64::NAN).validate(&Value::sentinel()).is_err());
    }

    #[test]
    fn test_overwrite_ignores_input() {
        let schema = overwrite(OverwriteOptions {
            value: Value::from(1),
            map: Some(Transform::new(|v| Value::from(v.as_f64().map(|n| n + 1.0)))),
        });
        assert_eq!(schema.validate(&Value::from("anything")).unwrap(), Value::from(2));
    }

    #[test]
    fn test_one_of() {
        let schema = one_of(["red", "green"], OneOfOptions::default()).unwrap();
        assert!(schema.validate(&Value::from("green")).is_ok());
        assert_eq!(
            schema.validate(&Value::from("blue")).unwrap_err().to_string(),
            r#"Expected oneOf ["red","green"], got blue at root"#
        );
        assert_eq!(
            one_of(Vec::<Value>::new(), OneOfOptions::default()).unwrap_err(),
            ConfigError::EmptyChoices
        );
    }

    #[test]
    fn test_drop() {
        assert_eq!(drop().validate(&Value::from(5)).unwrap(), Value::Undefined);
    }
}
