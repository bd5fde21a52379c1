//! String validators and the format strings layered on them.

use super::formats::{self, StringFormat};
use super::{apply_map, run_check};
use crate::error::{ConfigResult, ValidationError, ValidationResult};
use crate::mapper::Mapper;
use crate::options::{
    DateStringOptions, NumericStringOptions, StringOptions, validate_bounds, validate_f64_bounds,
};
use crate::path::Path;
use crate::value::{Value, format_date, format_number};

/// Run the generic string rules against already type-checked text:
/// check, length, prefix, suffix, infix, match, no-match, then map.
fn apply_rules(rules: &StringOptions, value: &Value, text: &str, path: &Path) -> ValidationResult<Value> {
    run_check(&rules.check, value, path)?;

    let length = text.chars().count();
    if let Some(max) = rules.max {
        if length > max {
            return Err(ValidationError::MaxLength {
                limit: max,
                value: text.to_string(),
                path: path.to_string(),
            });
        }
    }
    if let Some(min) = rules.min {
        if length < min {
            return Err(ValidationError::MinLength {
                limit: min,
                value: text.to_string(),
                path: path.to_string(),
            });
        }
    }
    if let Some(prefix) = &rules.prefix {
        if !text.starts_with(prefix.as_str()) {
            return Err(ValidationError::Prefix {
                prefix: prefix.clone(),
                value: text.to_string(),
                path: path.to_string(),
            });
        }
    }
    if let Some(suffix) = &rules.suffix {
        if !text.ends_with(suffix.as_str()) {
            return Err(ValidationError::Suffix {
                suffix: suffix.clone(),
                value: text.to_string(),
                path: path.to_string(),
            });
        }
    }
    if let Some(infix) = &rules.infix {
        if !text.contains(infix.as_str()) {
            return Err(ValidationError::Infix {
                infix: infix.clone(),
                value: text.to_string(),
                path: path.to_string(),
            });
        }
    }
    if let Some(pattern) = &rules.matches {
        if !pattern.is_match(text) {
            return Err(ValidationError::Match {
                pattern: pattern.as_str().to_string(),
                value: text.to_string(),
                path: path.to_string(),
            });
        }
    }
    if let Some(pattern) = &rules.no_match {
        if pattern.is_match(text) {
            return Err(ValidationError::NoMatch {
                pattern: pattern.as_str().to_string(),
                value: text.to_string(),
                path: path.to_string(),
            });
        }
    }

    Ok(apply_map(&rules.map, value.clone()))
}

fn expect_string<'a>(value: &'a Value, path: &Path) -> ValidationResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::type_mismatch("string", value.kind().name(), path))
}

fn formatted_string(
    kind: &'static str,
    format: Option<StringFormat>,
    options: StringOptions,
) -> ConfigResult<Mapper> {
    let presence = options.presence();
    presence.validate(kind)?;
    validate_bounds(kind, options.min, options.max)?;

    Ok(Mapper::new(move |value, path| {
        if let Some(early) = presence.resolve(value) {
            return Ok(early);
        }
        let text = expect_string(value, path)?;
        if let Some(format) = format {
            if !(format.test)(text) {
                return Err(ValidationError::format(format.name, text, path));
            }
        }
        apply_rules(&options, value, text, path)
    }))
}

/// Validate a string. `min` / `max` bound its length in characters.
pub fn string(options: StringOptions) -> ConfigResult<Mapper> {
    formatted_string("string", None, options)
}

/// Validate a UUID-shaped string (8-4-4-4-12 alphanumerics, any case).
pub fn uuid_string(options: StringOptions) -> ConfigResult<Mapper> {
    formatted_string("uuidString", Some(formats::UUID), options)
}

/// Validate an absolute URL.
pub fn url_string(options: StringOptions) -> ConfigResult<Mapper> {
    formatted_string("urlString", Some(formats::URL), options)
}

/// Validate a single-`@` address with a dotted domain part.
pub fn email_string(options: StringOptions) -> ConfigResult<Mapper> {
    formatted_string("emailString", Some(formats::EMAIL), options)
}

/// Validate a non-empty string that compiles as a regular expression.
pub fn regex_string(options: StringOptions) -> ConfigResult<Mapper> {
    formatted_string("regexString", Some(formats::REGEX), options)
}

/// Validate standard, padded base64 that survives a decode/encode round trip.
pub fn base64_string(options: StringOptions) -> ConfigResult<Mapper> {
    formatted_string("base64String", Some(formats::BASE64), options)
}

/// Validate text that parses as JSON. The output stays a string.
pub fn json_string(options: StringOptions) -> ConfigResult<Mapper> {
    formatted_string("jsonString", Some(formats::JSON), options)
}

/// Validate a string holding a number.
///
/// `min` / `max` are compared against the parsed number; the remaining
/// string rules then run against the original text. The output is the
/// original string unless `map` converts it.
pub fn numeric_string(options: NumericStringOptions) -> ConfigResult<Mapper> {
    let presence = options.presence();
    presence.validate("numericString")?;
    validate_f64_bounds("numericString", options.min, options.max)?;
    let rules = options.string_rules();
    let (min, max) = (options.min, options.max);

    Ok(Mapper::new(move |value, path| {
        if let Some(early) = presence.resolve(value) {
            return Ok(early);
        }
        let text = expect_string(value, path)?;
        let number = formats::parse_numeric(text)
            .ok_or_else(|| ValidationError::format("numeric string", text, path))?;

        if let Some(max) = max {
            if max < number {
                return Err(ValidationError::Max {
                    limit: format_number(max),
                    value: text.to_string(),
                    path: path.to_string(),
                });
            }
        }
        if let Some(min) = min {
            if min > number {
                return Err(ValidationError::Min {
                    limit: format_number(min),
                    value: text.to_string(),
                    path: path.to_string(),
                });
            }
        }
        apply_rules(&rules, value, text, path)
    }))
}

/// Validate a string holding a date or date-time.
///
/// Accepts RFC 3339, RFC 2822, ISO dates and date-times without an offset
/// (read as UTC) and `MM/DD/YYYY`. `min` / `max` are compared as instants.
pub fn date_string(options: DateStringOptions) -> ConfigResult<Mapper> {
    let presence = options.presence();
    presence.validate("dateString")?;
    validate_bounds("dateString", options.min, options.max)?;
    let rules = options.string_rules();
    let (min, max) = (options.min, options.max);

    Ok(Mapper::new(move |value, path| {
        if let Some(early) = presence.resolve(value) {
            return Ok(early);
        }
        let text = expect_string(value, path)?;
        let instant = formats::parse_date(text)
            .ok_or_else(|| ValidationError::format("date string", text, path))?;

        if let Some(max) = max {
            if max < instant {
                return Err(ValidationError::Max {
                    limit: format_date(&max),
                    value: text.to_string(),
                    path: path.to_string(),
                });
            }
        }
        if let Some(min) = min {
            if min > instant {
                return Err(ValidationError::Min {
                    limit: format_date(&min),
                    value: text.to_string(),
                    path: path.to_string(),
                });
            }
        }
        apply_rules(&rules, value, text, path)
    }))
}
