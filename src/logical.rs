//! Logical combinators: alternation, conjunction, negation, async lifting.

use crate::error::{ValidationError, ValidationResult};
use crate::mapper::Mapper;
use crate::path::Path;
use crate::value::Value;
use log::trace;
use std::future::Future;

/// Return the first branch that accepts the value.
///
/// When every branch fails the error is an aggregate holding each branch's
/// failure in branch order.
pub fn or<I: IntoIterator<Item = Mapper>>(mappers: I) -> Mapper {
    let mappers: Vec<Mapper> = mappers.into_iter().collect();
    Mapper::new(move |value, path| {
        let mut errors = Vec::with_capacity(mappers.len());
        for (branch, mapper) in mappers.iter().enumerate() {
            match mapper.apply(value, path) {
                Ok(result) => return Ok(result),
                Err(error) => {
                    trace!("or branch {} failed at {}: {}", branch, path, error);
                    errors.push(error);
                }
            }
        }
        Err(ValidationError::aggregate(errors))
    })
}

/// Thread the value through every mapper in order.
///
/// A failing mapper leaves the value as it was, so the next mapper sees the
/// value from before the failure. All failures are reported together.
pub fn and<I: IntoIterator<Item = Mapper>>(mappers: I) -> Mapper {
    let mappers: Vec<Mapper> = mappers.into_iter().collect();
    Mapper::new(move |value, path| {
        let mut current = value.clone();
        let mut errors = Vec::new();
        for (step, mapper) in mappers.iter().enumerate() {
            match mapper.apply(&current, path) {
                Ok(next) => current = next,
                Err(error) => {
                    trace!("and step {} failed at {}: {}", step, path, error);
                    errors.push(error);
                }
            }
        }
        if errors.is_empty() {
            Ok(current)
        } else {
            Err(ValidationError::aggregate(errors))
        }
    })
}

/// Accept exactly the values `mapper` rejects. The input is returned
/// unchanged.
pub fn not(mapper: Mapper) -> Mapper {
    Mapper::new(move |value, path| match mapper.apply(value, path) {
        Ok(_) => {
            trace!("not: inner schema matched at {}", path);
            Err(ValidationError::NotMatched {
                path: path.to_string(),
            })
        }
        Err(_) => Ok(value.clone()),
    })
}

/// A mapper lifted over values that are still being produced.
#[derive(Debug, Clone)]
pub struct AsyncMapper {
    mapper: Mapper,
}

impl AsyncMapper {
    /// Await `input`, then validate the resolved value at `path`.
    ///
    /// A failed input is returned as is, without running the mapper.
    pub async fn apply<F>(&self, input: F, path: &Path) -> ValidationResult<Value>
    where
        F: Future<Output = ValidationResult<Value>>,
    {
        let value = input.await?;
        self.mapper.apply(&value, path)
    }

    /// Await `input` and validate it at the root path.
    pub async fn validate<F>(&self, input: F) -> ValidationResult<Value>
    where
        F: Future<Output = ValidationResult<Value>>,
    {
        self.apply(input, &Path::root()).await
    }

    /// The wrapped synchronous mapper.
    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }
}

/// Lift `mapper` to validate the output of a future.
pub fn async_val(mapper: Mapper) -> AsyncMapper {
    AsyncMapper { mapper }
}

/// `n` copies of `schema`, for homogeneous positional combinators.
pub fn repeat(n: usize, schema: &Mapper) -> Vec<Mapper> {
    vec![schema.clone(); n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::options::{BooleanOptions, NumberOptions, StringOptions, Transform};
    use crate::primitives::{boolean, number, string};
    use crate::structural::tuple;
    use std::sync::{Arc, Mutex};

    fn num() -> Mapper {
        number(NumberOptions::default()).unwrap()
    }

    fn text() -> Mapper {
        string(StringOptions::default()).unwrap()
    }

    #[test]
    fn test_or_first_success_wins() {
        let schema = or([boolean(BooleanOptions::default()).unwrap(), text()]);
        assert_eq!(schema.validate(&Value::Bool(true)).unwrap(), Value::Bool(true));
        assert_eq!(schema.validate(&Value::from("x")).unwrap(), Value::from("x"));

        let error = schema.validate(&Value::from(321)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Aggregate);
        assert_eq!(error.errors().len(), 2);
        assert_eq!(
            error.to_string(),
            "Expected boolean, got number at root, Expected string, got number at root"
        );
    }

    #[test]
    fn test_and_keeps_value_from_before_failure() {
        let double = number(NumberOptions {
            map: Some(Transform::new(|v| Value::from(v.as_f64().map(|n| n * 2.0)))),
            ..Default::default()
        })
        .unwrap();
        let seen = Arc::new(Mutex::new(None));
        let recorder = {
            let seen = Arc::clone(&seen);
            Mapper::new(move |value, _| {
                *seen.lock().unwrap() = Some(value.clone());
                Ok(value.clone())
            })
        };

        let schema = and([double, text(), recorder]);
        let error = schema.validate(&Value::from(2)).unwrap_err();
        assert_eq!(error.errors().len(), 1);
        assert_eq!(*seen.lock().unwrap(), Some(Value::from(4)));
    }

    #[test]
    fn test_and_success_threads_value() {
        let schema = and([
            num(),
            Mapper::new(|value, _| Ok(Value::from(value.as_f64().map(|n| n + 1.0)))),
        ]);
        assert_eq!(schema.validate(&Value::from(1)).unwrap(), Value::from(2));
    }

    #[test]
    fn test_not_returns_original_value() {
        let schema = not(num());
        assert_eq!(schema.validate(&Value::from("a")).unwrap(), Value::from("a"));
        assert_eq!(
            schema.validate(&Value::from(1)).unwrap_err().to_string(),
            "Expected root to NOT match."
        );
    }

    #[test]
    fn test_async_val_validates_after_resolution() {
        let schema = async_val(num());
        let ok = tokio_test::block_on(schema.validate(async { Ok::<_, ValidationError>(Value::from(3)) }));
        assert_eq!(ok.unwrap(), Value::from(3));

        let rejected = tokio_test::block_on(
            schema.validate(async { Err::<Value, _>(ValidationError::rejected("timed out", Path::root())) }),
        );
        assert_eq!(rejected.unwrap_err().kind(), ErrorKind::Rejected);
    }

    #[test]
    fn test_repeat_builds_homogeneous_tuple() {
        let schema = tuple(repeat(3, &num()));
        assert!(schema.validate(&Value::array([1, 2, 3])).is_ok());
        assert_eq!(
            schema.validate(&Value::array([1, 2])).unwrap_err().to_string(),
            "Expected number, got undefined at root[2]"
        );
    }
}
