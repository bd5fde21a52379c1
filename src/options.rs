//! Per-kind option structs shared by the primitive validators.
//!
//! Every struct derives `Default`, so callers set only the knobs they need:
//!
//! ```rust
//! use tuple_schema::{self as s, NumberOptions, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let port = s::integer(NumberOptions {
//!     min: Some(1.0),
//!     max: Some(65535.0),
//!     ..Default::default()
//! })?;
//! assert_eq!(port.validate(&Value::from(8080))?, Value::from(8080));
//! # Ok(())
//! # }
//! ```
//!
//! Options are checked when the mapper is built; inverted bounds, NaN bounds
//! and a `default` without `optional` are rejected with a [`ConfigError`].

use crate::error::{ConfigError, ConfigResult};
use crate::value::Value;
use chrono::{DateTime, Utc};
use log::debug;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Predicate run after the type check. Returning false fails validation.
#[derive(Clone)]
pub struct Check(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Check {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Predicate over numbers; any other kind fails.
    pub fn number<F>(predicate: F) -> Self
    where
        F: Fn(f64) -> bool + Send + Sync + 'static,
    {
        Self::new(move |value| matches!(value, Value::Number(n) if predicate(*n)))
    }

    /// Predicate over strings; any other kind fails.
    pub fn string<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::new(move |value| matches!(value, Value::String(s) if predicate(s)))
    }

    pub fn test(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Check(..)")
    }
}

/// Post-validation transform. Its output is not validated again.
#[derive(Clone)]
pub struct Transform(Arc<dyn Fn(Value) -> Value + Send + Sync>);

impl Transform {
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(transform))
    }

    pub fn apply(&self, value: Value) -> Value {
        (self.0)(value)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

/// Entry-wise transform for objects: receives and returns a `(key, value)`
/// pair.
#[derive(Clone)]
pub struct EntryTransform(Arc<dyn Fn(String, Value) -> (String, Value) + Send + Sync>);

impl EntryTransform {
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(String, Value) -> (String, Value) + Send + Sync + 'static,
    {
        Self(Arc::new(transform))
    }

    pub fn apply(&self, key: String, value: Value) -> (String, Value) {
        (self.0)(key, value)
    }
}

impl fmt::Debug for EntryTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EntryTransform(..)")
    }
}

/// Options for [`boolean`](crate::boolean).
#[derive(Debug, Clone, Default)]
pub struct BooleanOptions {
    pub optional: bool,
    pub default: Value,
    pub nullable: bool,
    pub check: Option<Check>,
    pub map: Option<Transform>,
}

/// Options for [`number`](crate::number) and its refinements
/// ([`integer`](crate::integer), [`float`](crate::float),
/// [`nan`](crate::nan), [`infinity`](crate::infinity)).
#[derive(Debug, Clone, Default)]
pub struct NumberOptions {
    pub optional: bool,
    pub default: Value,
    pub nullable: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub check: Option<Check>,
    pub map: Option<Transform>,
}

/// Options for [`bigint`](crate::bigint).
#[derive(Debug, Clone, Default)]
pub struct BigIntOptions {
    pub optional: bool,
    pub default: Value,
    pub nullable: bool,
    pub min: Option<i128>,
    pub max: Option<i128>,
    pub check: Option<Check>,
    pub map: Option<Transform>,
}

/// Options for [`string`](crate::string) and the format strings built on it.
///
/// `min` / `max` bound the length in characters.
#[derive(Debug, Clone, Default)]
pub struct StringOptions {
    pub optional: bool,
    pub default: Value,
    pub nullable: bool,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub infix: Option<String>,
    pub matches: Option<Regex>,
    pub no_match: Option<Regex>,
    pub check: Option<Check>,
    pub map: Option<Transform>,
}

/// Options for [`numeric_string`](crate::numeric_string).
///
/// `min` / `max` bound the parsed number, not the text length.
#[derive(Debug, Clone, Default)]
pub struct NumericStringOptions {
    pub optional: bool,
    pub default: Value,
    pub nullable: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub infix: Option<String>,
    pub matches: Option<Regex>,
    pub no_match: Option<Regex>,
    pub check: Option<Check>,
    pub map: Option<Transform>,
}

/// Options for [`date_string`](crate::date_string).
///
/// `min` / `max` bound the parsed instant, not the text length.
#[derive(Debug, Clone, Default)]
pub struct DateStringOptions {
    pub optional: bool,
    pub default: Value,
    pub nullable: bool,
    pub min: Option<DateTime<Utc>>,
    pub max: Option<DateTime<Utc>>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub infix: Option<String>,
    pub matches: Option<Regex>,
    pub no_match: Option<Regex>,
    pub check: Option<Check>,
    pub map: Option<Transform>,
}

/// Options for [`array`](crate::array). `min` / `max` bound the length.
#[derive(Debug, Clone, Default)]
pub struct ArrayOptions {
    pub optional: bool,
    pub default: Value,
    pub nullable: bool,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub check: Option<Check>,
    pub map: Option<Transform>,
    /// Applied to every element after `map`.
    pub each: Option<Transform>,
}

/// Options for [`object`](crate::object).
#[derive(Debug, Clone, Default)]
pub struct ObjectOptions {
    pub optional: bool,
    pub default: Value,
    pub nullable: bool,
    pub check: Option<Check>,
    /// Required nominal class name of the object.
    pub class: Option<String>,
    pub map: Option<Transform>,
    /// Applied to every entry after `map`.
    pub each: Option<EntryTransform>,
}

/// Options for [`date`](crate::date).
#[derive(Debug, Clone, Default)]
pub struct DateOptions {
    pub optional: bool,
    pub default: Value,
    pub nullable: bool,
    pub min: Option<DateTime<Utc>>,
    pub max: Option<DateTime<Utc>>,
    pub check: Option<Check>,
    pub map: Option<Transform>,
}

/// Options for kinds without range semantics: [`function`](crate::function),
/// [`symbol`](crate::symbol), [`null`](crate::null),
/// [`undefined`](crate::undefined) and [`value`](crate::value).
#[derive(Debug, Clone, Default)]
pub struct BasicOptions {
    pub optional: bool,
    pub default: Value,
    pub nullable: bool,
    pub check: Option<Check>,
    pub map: Option<Transform>,
}

/// Options for [`overwrite`](crate::overwrite).
#[derive(Debug, Clone, Default)]
pub struct OverwriteOptions {
    /// Value returned in place of the input.
    pub value: Value,
    pub map: Option<Transform>,
}

/// Options for [`one_of`](crate::one_of).
#[derive(Debug, Clone, Default)]
pub struct OneOfOptions {
    pub map: Option<Transform>,
}

/// Element-count bounds for [`n_record`](crate::n_record) and
/// [`n_dict`](crate::n_dict).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaryOptions {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

/// The optional/nullable short-circuit shared by every primitive.
#[derive(Debug, Clone)]
pub(crate) struct Presence {
    optional: bool,
    default: Value,
    nullable: bool,
}

impl Presence {
    pub(crate) fn new(optional: bool, default: &Value, nullable: bool) -> Self {
        Self {
            optional,
            default: default.clone(),
            nullable,
        }
    }

    /// Result to return without further checks, if the input is absent
    /// (and optional) or null (and nullable).
    pub(crate) fn resolve(&self, value: &Value) -> Option<Value> {
        if self.optional && value.is_undefined() {
            return Some(self.default.clone());
        }
        if self.nullable && value.is_null() {
            return Some(Value::Null);
        }
        None
    }

    pub(crate) fn validate(&self, kind: &'static str) -> ConfigResult<()> {
        if !self.optional && !self.default.is_undefined() {
            return reject(ConfigError::DefaultWithoutOptional { kind });
        }
        Ok(())
    }
}

macro_rules! impl_presence {
    ($($options:ty),+ $(,)?) => {
        $(
            impl $options {
                pub(crate) fn presence(&self) -> Presence {
                    Presence::new(self.optional, &self.default, self.nullable)
                }
            }
        )+
    };
}

impl_presence!(
    BooleanOptions,
    NumberOptions,
    BigIntOptions,
    StringOptions,
    NumericStringOptions,
    DateStringOptions,
    ArrayOptions,
    ObjectOptions,
    DateOptions,
    BasicOptions,
);

fn reject(error: ConfigError) -> ConfigResult<()> {
    debug!("Rejected schema options: {}", error);
    Err(error)
}

/// Reject `min > max` for any ordered bound type.
pub(crate) fn validate_bounds<T>(kind: &'static str, min: Option<T>, max: Option<T>) -> ConfigResult<()>
where
    T: PartialOrd + fmt::Display,
{
    match (min, max) {
        (Some(min), Some(max)) if min > max => reject(ConfigError::InvertedBounds {
            kind,
            min: min.to_string(),
            max: max.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Float bounds additionally reject NaN, which would silently never fire.
pub(crate) fn validate_f64_bounds(
    kind: &'static str,
    min: Option<f64>,
    max: Option<f64>,
) -> ConfigResult<()> {
    if min.is_some_and(f64::is_nan) {
        return reject(ConfigError::NanBound { kind, bound: "min" });
    }
    if max.is_some_and(f64::is_nan) {
        return reject(ConfigError::NanBound { kind, bound: "max" });
    }
    validate_bounds(kind, min, max)
}

pub(crate) fn reject_empty_choices() -> ConfigResult<()> {
    reject(ConfigError::EmptyChoices)
}

impl NumericStringOptions {
    /// The generic string rules that still apply once the numeric bounds
    /// have been checked against the parsed value.
    pub(crate) fn string_rules(&self) -> StringOptions {
        StringOptions {
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            infix: self.infix.clone(),
            matches: self.matches.clone(),
            no_match: self.no_match.clone(),
            check: self.check.clone(),
            map: self.map.clone(),
            ..Default::default()
        }
    }
}

impl DateStringOptions {
    pub(crate) fn string_rules(&self) -> StringOptions {
        StringOptions {
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            infix: self.infix.clone(),
            matches: self.matches.clone(),
            no_match: self.no_match.clone(),
            check: self.check.clone(),
            map: self.map.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_optional_wins_over_nullable() {
        let presence = Presence::new(true, &Value::from(5), true);
        assert_eq!(presence.resolve(&Value::Undefined), Some(Value::from(5)));
        assert_eq!(presence.resolve(&Value::Null), Some(Value::Null));
        assert_eq!(presence.resolve(&Value::from(1)), None);
    }

    #[test]
    fn test_presence_without_flags_never_short_circuits() {
        let presence = Presence::new(false, &Value::Undefined, false);
        assert_eq!(presence.resolve(&Value::Undefined), None);
        assert_eq!(presence.resolve(&Value::Null), None);
    }

    #[test]
    fn test_default_requires_optional() {
        let presence = Presence::new(false, &Value::from(1), false);
        assert_eq!(
            presence.validate("number"),
            Err(ConfigError::DefaultWithoutOptional { kind: "number" })
        );
    }

    #[test]
    fn test_inverted_and_nan_bounds() {
        assert!(validate_bounds("string", Some(5usize), Some(2usize)).is_err());
        assert!(validate_bounds("string", Some(2usize), Some(2usize)).is_ok());
        assert!(validate_f64_bounds("number", Some(f64::NAN), None).is_err());
        assert!(validate_f64_bounds("number", None, Some(1.0)).is_ok());
    }

    #[test]
    fn test_typed_checks_reject_other_kinds() {
        let positive = Check::number(|n| n > 0.0);
        assert!(positive.test(&Value::from(3)));
        assert!(!positive.test(&Value::from(-3)));
        assert!(!positive.test(&Value::from("3")));

        let short = Check::string(|s| s.len() < 4);
        assert!(short.test(&Value::from("abc")));
        assert!(!short.test(&Value::from(1)));
    }
}
