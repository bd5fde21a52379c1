//! Text format rules used by the string specialisations.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9]{8}-[a-z0-9]{4}-[a-z0-9]{4}-[a-z0-9]{4}-[a-z0-9]{12}$").unwrap()
});

/// A named predicate over string content.
#[derive(Clone, Copy)]
pub(super) struct StringFormat {
    pub(super) name: &'static str,
    pub(super) test: fn(&str) -> bool,
}

pub(super) const UUID: StringFormat = StringFormat {
    name: "uuid",
    test: is_uuid,
};

pub(super) const URL: StringFormat = StringFormat {
    name: "url",
    test: is_url,
};

pub(super) const EMAIL: StringFormat = StringFormat {
    name: "email",
    test: is_email,
};

pub(super) const REGEX: StringFormat = StringFormat {
    name: "regex",
    test: is_regex,
};

pub(super) const BASE64: StringFormat = StringFormat {
    name: "base64",
    test: is_base64,
};

pub(super) const JSON: StringFormat = StringFormat {
    name: "json",
    test: is_json,
};

/// Shape check only; version and variant bits are not inspected.
fn is_uuid(text: &str) -> bool {
    UUID_REGEX.is_match(text)
}

fn is_url(text: &str) -> bool {
    url::Url::parse(text).is_ok()
}

fn is_email(text: &str) -> bool {
    let Some(at) = text.find('@') else {
        return false;
    };
    if at == 0 || text[at + 1..].contains('@') {
        return false;
    }
    // First dot after the '@'; the top-level part must be at least two chars.
    match text[at..].find('.') {
        Some(offset) => text.len() - (at + offset) > 2,
        None => false,
    }
}

fn is_regex(text: &str) -> bool {
    !text.is_empty() && Regex::new(text).is_ok()
}

fn is_base64(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    match STANDARD.decode(text) {
        Ok(bytes) => STANDARD.encode(bytes) == text,
        Err(_) => false,
    }
}

fn is_json(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text).is_ok()
}

/// Parse numeric literal text: decimal with optional sign and exponent,
/// `Infinity`, and unsigned `0x` / `0o` / `0b` integers. Surrounding
/// whitespace is ignored; blank text is not a number.
pub(super) fn parse_numeric(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    // Rust's float parser also accepts "inf" and "nan"; numeric text does not.
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    text.parse::<f64>().ok()
}

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];

/// Parse date text into an instant. Text without an offset is read as UTC.
pub(super) fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Some(date) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(date.and_utc());
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}
