//! Array, object and date validators.

use super::{apply_map, run_check};
use crate::error::{ConfigResult, ValidationError};
use crate::mapper::Mapper;
use crate::options::{ArrayOptions, DateOptions, ObjectOptions, validate_bounds};
use crate::value::{Object, Value, format_date};

/// Validate a raw array.
///
/// `min` / `max` bound the element count. `each` is applied to every
/// element of the mapped array and requires `map` (if any) to return an
/// array.
pub fn array(options: ArrayOptions) -> ConfigResult<Mapper> {
    let presence = options.presence();
    presence.validate("array")?;
    validate_bounds("array", options.min, options.max)?;

    Ok(Mapper::new(move |value, path| {
        if let Some(early) = presence.resolve(value) {
            return Ok(early);
        }
        let Value::Array(items) = value else {
            return Err(ValidationError::type_mismatch(
                "array",
                value.kind().name(),
                path,
            ));
        };
        run_check(&options.check, value, path)?;
        if let Some(max) = options.max {
            if items.len() > max {
                return Err(ValidationError::Max {
                    limit: max.to_string(),
                    value: items.len().to_string(),
                    path: path.to_string(),
                });
            }
        }
        if let Some(min) = options.min {
            if items.len() < min {
                return Err(ValidationError::Min {
                    limit: min.to_string(),
                    value: items.len().to_string(),
                    path: path.to_string(),
                });
            }
        }

        let mapped = apply_map(&options.map, value.clone());
        match (&options.each, mapped) {
            (None, mapped) => Ok(mapped),
            (Some(each), Value::Array(items)) => Ok(Value::Array(
                items.into_iter().map(|item| each.apply(item)).collect(),
            )),
            (Some(_), other) => Err(ValidationError::NotAggregate {
                expected: "array",
                actual: other.kind().name().to_string(),
                path: path.to_string(),
            }),
        }
    }))
}

/// Validate a raw object, optionally of a given nominal class.
///
/// Only [`Value::Object`] passes; arrays, dates and canonical containers do
/// not.
pub fn object(options: ObjectOptions) -> ConfigResult<Mapper> {
    let presence = options.presence();
    presence.validate("object")?;

    Ok(Mapper::new(move |value, path| {
        if let Some(early) = presence.resolve(value) {
            return Ok(early);
        }
        let Value::Object(object) = value else {
            return Err(ValidationError::type_mismatch(
                "object",
                value.kind().name(),
                path,
            ));
        };
        run_check(&options.check, value, path)?;
        if let Some(class) = &options.class {
            if object.class() != Some(class.as_str()) {
                return Err(ValidationError::Class {
                    expected: class.clone(),
                    actual: object.class().unwrap_or("Object").to_string(),
                    path: path.to_string(),
                });
            }
        }

        let mapped = apply_map(&options.map, value.clone());
        match (&options.each, mapped) {
            (None, mapped) => Ok(mapped),
            (Some(each), Value::Object(object)) => {
                let mut rebuilt = match object.class() {
                    Some(class) => Object::new().with_class(class),
                    None => Object::new(),
                };
                for (key, item) in object {
                    let (key, item) = each.apply(key, item);
                    rebuilt.insert(key, item);
                }
                Ok(Value::Object(rebuilt))
            }
            (Some(_), other) => Err(ValidationError::NotAggregate {
                expected: "object",
                actual: other.kind().name().to_string(),
                path: path.to_string(),
            }),
        }
    }))
}

/// Validate a date instant. `min` / `max` are inclusive instant bounds.
pub fn date(options: DateOptions) -> ConfigResult<Mapper> {
    let presence = options.presence();
    presence.validate("date")?;
    validate_bounds("date", options.min, options.max)?;

    Ok(Mapper::new(move |value, path| {
        if let Some(early) = presence.resolve(value) {
            return Ok(early);
        }
        let Value::Date(instant) = value else {
            return Err(ValidationError::type_mismatch(
                "date",
                value.kind().name(),
                path,
            ));
        };
        run_check(&options.check, value, path)?;
        if let Some(max) = options.max {
            if max < *instant {
                return Err(ValidationError::Max {
                    limit: format_date(&max),
                    value: format_date(instant),
                    path: path.to_string(),
                });
            }
        }
        if let Some(min) = options.min {
            if min > *instant {
                return Err(ValidationError::Min {
                    limit: format_date(&min),
                    value: format_date(instant),
                    path: path.to_string(),
                });
            }
        }
        Ok(apply_map(&options.map, value.clone()))
    }))
}
