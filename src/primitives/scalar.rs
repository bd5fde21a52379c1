//! Boolean, number (and its refinements) and bigint validators.

use super::{apply_map, run_check};
use crate::error::{ConfigResult, ValidationError};
use crate::mapper::Mapper;
use crate::options::{BigIntOptions, BooleanOptions, NumberOptions, validate_bounds, validate_f64_bounds};
use crate::value::{Value, format_number};

/// Validate a boolean.
pub fn boolean(options: BooleanOptions) -> ConfigResult<Mapper> {
    let presence = options.presence();
    presence.validate("boolean")?;

    Ok(Mapper::new(move |value, path| {
        if let Some(early) = presence.resolve(value) {
            return Ok(early);
        }
        if !matches!(value, Value::Bool(_)) {
            return Err(ValidationError::type_mismatch(
                "boolean",
                value.kind().name(),
                path,
            ));
        }
        run_check(&options.check, value, path)?;
        Ok(apply_map(&options.map, value.clone()))
    }))
}

/// A built-in numeric predicate layered on top of [`number`].
#[derive(Clone, Copy)]
struct Refinement {
    name: &'static str,
    test: fn(f64) -> bool,
}

const INTEGER: Refinement = Refinement {
    name: "integer",
    test: |n| n.is_finite() && n.fract() == 0.0,
};

const FLOAT: Refinement = Refinement {
    name: "finite number",
    test: f64::is_finite,
};

const NAN: Refinement = Refinement {
    name: "NaN",
    test: f64::is_nan,
};

const INFINITY: Refinement = Refinement {
    name: "Infinity",
    test: f64::is_infinite,
};

fn refined_number(
    kind: &'static str,
    refinement: Option<Refinement>,
    options: NumberOptions,
) -> ConfigResult<Mapper> {
    let presence = options.presence();
    presence.validate(kind)?;
    validate_f64_bounds(kind, options.min, options.max)?;

    Ok(Mapper::new(move |value, path| {
        if let Some(early) = presence.resolve(value) {
            return Ok(early);
        }
        let Value::Number(n) = value else {
            return Err(ValidationError::type_mismatch(
                "number",
                value.kind().name(),
                path,
            ));
        };
        if let Some(refinement) = refinement {
            if !(refinement.test)(*n) {
                return Err(ValidationError::format(refinement.name, value, path));
            }
        }
        run_check(&options.check, value, path)?;
        if let Some(max) = options.max {
            if max < *n {
                return Err(ValidationError::Max {
                    limit: format_number(max),
                    value: format_number(*n),
                    path: path.to_string(),
                });
            }
        }
        if let Some(min) = options.min {
            if min > *n {
                return Err(ValidationError::Min {
                    limit: format_number(min),
                    value: format_number(*n),
                    path: path.to_string(),
                });
            }
        }
        Ok(apply_map(&options.map, value.clone()))
    }))
}

/// Validate any number, including NaN and the infinities.
pub fn number(options: NumberOptions) -> ConfigResult<Mapper> {
    refined_number("number", None, options)
}

/// Validate a whole number.
pub fn integer(options: NumberOptions) -> ConfigResult<Mapper> {
    refined_number("integer", Some(INTEGER), options)
}

/// Validate a finite number.
pub fn float(options: NumberOptions) -> ConfigResult<Mapper> {
    refined_number("float", Some(FLOAT), options)
}

/// Validate the not-a-number value specifically.
pub fn nan(options: NumberOptions) -> ConfigResult<Mapper> {
    refined_number("NaN", Some(NAN), options)
}

/// Validate positive or negative infinity.
pub fn infinity(options: NumberOptions) -> ConfigResult<Mapper> {
    refined_number("infinity", Some(INFINITY), options)
}

/// Validate a bigint.
pub fn bigint(options: BigIntOptions) -> ConfigResult<Mapper> {
    let presence = options.presence();
    presence.validate("bigint")?;
    validate_bounds("bigint", options.min, options.max)?;

    Ok(Mapper::new(move |value, path| {
        if let Some(early) = presence.resolve(value) {
            return Ok(early);
        }
        let Value::BigInt(n) = value else {
            return Err(ValidationError::type_mismatch(
                "bigint",
                value.kind().name(),
                path,
            ));
        };
        run_check(&options.check, value, path)?;
        if let Some(max) = options.max {
            if max < *n {
                return Err(ValidationError::Max {
                    limit: max.to_string(),
                    value: n.to_string(),
                    path: path.to_string(),
                });
            }
        }
        if let Some(min) = options.min {
            if min > *n {
                return Err(ValidationError::Min {
                    limit: min.to_string(),
                    value: n.to_string(),
                    path: path.to_string(),
                });
            }
        }
        Ok(apply_map(&options.map, value.clone()))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, ErrorKind};
    use crate::options::{Check, Transform};

    #[test]
    fn test_boolean_rejects_other_kinds() {
        let schema = boolean(BooleanOptions::default()).unwrap();
        assert_eq!(schema.validate(&Value::Bool(true)).unwrap(), Value::Bool(true));

        let error = schema.validate(&Value::from("not a boolean")).unwrap_err();
        assert_eq!(error.to_string(), "Expected boolean, got string at root");
        assert_eq!(error.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_check_runs_before_bounds() {
        let schema = number(NumberOptions {
            max: Some(10.0),
            check: Some(Check::number(|n| n != 11.0)),
            ..Default::default()
        })
        .unwrap();

        let error = schema.validate(&Value::from(11)).unwrap_err();
        assert!(matches!(error, ValidationError::Check { .. }));
        let error = schema.validate(&Value::from(12)).unwrap_err();
        assert!(matches!(error, ValidationError::Max { .. }));
    }

    #[test]
    fn test_bounds_messages() {
        let schema = number(NumberOptions {
            min: Some(1.0),
            max: Some(5.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            schema.validate(&Value::from(6)).unwrap_err().to_string(),
            "Expected max 5, got 6 at root"
        );
        assert_eq!(
            schema.validate(&Value::from(0.5)).unwrap_err().to_string(),
            "Expected min 1, got 0.5 at root"
        );
    }

    #[test]
    fn test_map_is_not_revalidated() {
        let schema = integer(NumberOptions {
            map: Some(Transform::new(|_| Value::from("mapped"))),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(schema.validate(&Value::from(3)).unwrap(), Value::from("mapped"));
    }

    #[test]
    fn test_refinements() {
        let integer = integer(NumberOptions::default()).unwrap();
        assert!(integer.validate(&Value::from(255)).is_ok());
        assert!(integer.validate(&Value::from(1.5)).is_err());
        assert!(integer.validate(&Value::from(f64::INFINITY)).is_err());

        let float = float(NumberOptions::default()).unwrap();
        assert!(float.validate(&Value::from(255.5)).is_ok());
        assert!(float.validate(&Value::sentinel()).is_err());

        let nan = nan(NumberOptions::default()).unwrap();
        assert!(nan.validate(&Value::sentinel()).unwrap().is_sentinel());
        assert!(nan.validate(&Value::from(10)).is_err());

        let infinity = infinity(NumberOptions::default()).unwrap();
        assert!(infinity.validate(&Value::from(f64::NEG_INFINITY)).is_ok());
        assert!(infinity.validate(&Value::sentinel()).is_err());
        assert!(infinity.validate(&Value::from(10)).is_err());
    }

    #[test]
    fn test_bigint_bounds() {
        let schema = bigint(BigIntOptions {
            max: Some(100),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(schema.validate(&Value::BigInt(7)).unwrap(), Value::BigInt(7));
        assert!(schema.validate(&Value::BigInt(101)).is_err());
        assert!(schema.validate(&Value::from(7)).is_err());
    }

    #[test]
    fn test_construction_rejects_bad_options() {
        let inverted = number(NumberOptions {
            min: Some(3.0),
            max: Some(1.0),
            ..Default::default()
        });
        assert!(matches!(inverted, Err(ConfigError::InvertedBounds { .. })));

        let stray_default = boolean(BooleanOptions {
            default: Value::Bool(true),
            ..Default::default()
        });
        assert!(matches!(
            stray_default,
            Err(ConfigError::DefaultWithoutOptional { kind: "boolean" })
        ));
    }
}
