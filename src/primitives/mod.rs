//! Leaf validators, one factory per scalar kind.
//!
//! Every primitive runs its checks in the same order:
//!
//! 1. `optional` and absent input: return `default`, nothing else runs.
//! 2. `nullable` and null input: return null, nothing else runs.
//! 3. Kind check, naming the expected and actual kind.
//! 4. Built-in refinement for specialised kinds (integer, uuid, ...).
//! 5. The caller's `check` predicate.
//! 6. Range and pattern constraints: max, min, prefix, suffix, infix,
//!    match, no-match.
//! 7. `map`, whose output is not validated again.
//! 8. `each`, for arrays and objects only.

mod aggregate;
mod exact;
mod formats;
mod scalar;
mod string;

pub use aggregate::{array, date, object};
pub use exact::{drop, function, literal, null, one_of, overwrite, symbol, undefined, value};
pub use scalar::{bigint, boolean, float, infinity, integer, nan, number};
pub use string::{
    base64_string, date_string, email_string, json_string, numeric_string, regex_string, string,
    url_string, uuid_string,
};

use crate::error::{ValidationError, ValidationResult};
use crate::options::{Check, Transform};
use crate::path::Path;
use crate::value::Value;

fn run_check(check: &Option<Check>, value: &Value, path: &Path) -> ValidationResult<()> {
    match check {
        Some(check) if !check.test(value) => Err(ValidationError::check_failed(value, path)),
        _ => Ok(()),
    }
}

fn apply_map(map: &Option<Transform>, value: Value) -> Value {
    match map {
        Some(map) => map.apply(value),
        None => value,
    }
}
