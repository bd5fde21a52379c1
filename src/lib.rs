//! Composable schema validation for dynamically-shaped input.
//!
//! Turns untrusted values (parsed JSON, API payloads, configuration) into
//! canonical, immutable, structurally comparable values while checking
//! shape and type constraints. Failures carry the path of the offending
//! value.
//!
//! # Core Components
//!
//! - [`Mapper`] - A validating function `(value, path) -> value`
//! - Primitives such as [`string`], [`integer`] and [`one_of`] - Leaf validators
//! - [`tuple`], [`record`], [`dict`] and friends - Structural combinators
//! - [`or`], [`and`], [`not`], [`async_val`] - Logical combinators
//! - [`parse`] - Total entry point returning a sentinel on failure
//!
//! # Quick Start
//!
//! ```rust
//! use tuple_schema::{self as s, NumberOptions, Record, StringOptions, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let user = s::record([
//!     ("name", s::string(StringOptions::default())?),
//!     ("age", s::integer(NumberOptions {
//!         min: Some(0.0),
//!         ..Default::default()
//!     })?),
//! ]);
//!
//! let input = Value::object([("age", Value::from(36)), ("name", Value::from("Ada"))]);
//! let expected = Record::new([("name", Value::from("Ada")), ("age", Value::from(36))]);
//! assert_eq!(user.validate(&input)?, Value::Record(expected));
//!
//! assert!(s::parse(&user, &Value::from("not a user")).is_sentinel());
//! # Ok(())
//! # }
//! ```

pub mod canonical;
pub mod error;
pub mod logical;
pub mod mapper;
pub mod options;
pub mod path;
pub mod primitives;
pub mod structural;
pub mod value;

// Re-export the factory namespace at the crate root
pub use logical::{AsyncMapper, and, async_val, not, or, repeat};
pub use mapper::{Mapper, parse, parse_with};
pub use primitives::{
    array, base64_string, bigint, boolean, date, date_string, drop, email_string, float, function,
    infinity, integer, json_string, literal, nan, null, number, numeric_string, object, one_of,
    overwrite, regex_string, string, symbol, undefined, url_string, uuid_string, value,
};
pub use structural::{
    dict, group, n_dict, n_group, n_record, n_tuple, record, s_dict, s_group, s_record, s_tuple,
    tuple, x_dict, x_group, x_record, x_tuple,
};

// Data model and configuration types
pub use canonical::{Dict, Group, Record, Tuple};
pub use error::{
    ConfigError, ConfigResult, ErrorKind, SchemaError, SchemaResult, ValidationError,
    ValidationResult,
};
pub use options::{
    ArrayOptions, BasicOptions, BigIntOptions, BooleanOptions, Check, DateOptions,
    DateStringOptions, EntryTransform, NaryOptions, NumberOptions, NumericStringOptions,
    ObjectOptions, OneOfOptions, OverwriteOptions, StringOptions, Transform,
};
pub use path::Path;
pub use value::{Function, Object, Symbol, Value, ValueKind};
