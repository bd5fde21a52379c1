//! The schema mapper type and the total `parse` entry point.

use crate::error::{SchemaResult, ValidationResult};
use crate::path::Path;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

type MapFn = dyn Fn(&Value, &Path) -> ValidationResult<Value> + Send + Sync;

/// A validating, transforming function from one value to another.
///
/// Mappers are built once by the factory functions of this crate and can be
/// invoked any number of times, from any thread. They hold no state beyond
/// their captured options, so cloning is cheap and shares the same closure.
#[derive(Clone)]
pub struct Mapper {
    inner: Arc<MapFn>,
}

impl Mapper {
    /// Wrap a custom validation function so it composes with the built-in
    /// combinators.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Path) -> ValidationResult<Value> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Validate `value` located at `path`.
    pub fn apply(&self, value: &Value, path: &Path) -> ValidationResult<Value> {
        (self.inner)(value, path)
    }

    /// Validate `value` at the root path.
    pub fn validate(&self, value: &Value) -> ValidationResult<Value> {
        self.apply(value, &Path::root())
    }

    /// Parse JSON text and validate the result.
    pub fn validate_json(&self, text: &str) -> SchemaResult<Value> {
        let value = Value::from_json_str(text)?;
        Ok(self.validate(&value)?)
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Mapper(..)")
    }
}

/// Validate `value` with `schema`, returning the NaN sentinel on failure.
///
/// Never fails and never logs. Compare the result with
/// [`Value::is_sentinel`]; the sentinel is not equal to anything, including
/// itself.
pub fn parse(schema: &Mapper, value: &Value) -> Value {
    parse_with(schema, value, |_| {})
}

/// Like [`parse`], but reports the failure to `on_error` before returning the
/// sentinel.
pub fn parse_with<F>(schema: &Mapper, value: &Value, on_error: F) -> Value
where
    F: FnOnce(&crate::error::ValidationError),
{
    match schema.validate(value) {
        Ok(result) => result,
        Err(error) => {
            on_error(&error);
            Value::sentinel()
        }
    }
}
