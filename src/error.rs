//! Error types for schema construction and validation.
//!
//! Validation failures are ordinary values: every mapper returns a
//! [`ValidationResult`], and the logical combinators inspect those results
//! instead of unwinding. Construction-time mistakes in option structs are
//! reported separately through [`ConfigError`].

/// Umbrella error for callers that both build schemas and validate input.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Input did not satisfy the schema
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Schema options were rejected at construction time
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input text was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Broad classes of validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The value had the wrong runtime kind.
    TypeMismatch,
    /// A range, pattern, format or predicate constraint was violated.
    Constraint,
    /// Element or key count outside the required bounds.
    Cardinality,
    /// A strict keyed combinator received a key it does not declare.
    ExtraKey,
    /// Several failures collected by `or` / `and`.
    Aggregate,
    /// An awaited input never produced a value.
    Rejected,
}

/// A failure produced while validating a value.
///
/// All variants except [`ValidationError::Aggregate`] carry the path of the
/// offending value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The value had the wrong runtime kind
    #[error("Expected {expected}, got {actual} at {path}")]
    Type {
        expected: String,
        actual: String,
        path: String,
    },

    /// A caller-supplied `check` predicate returned false
    #[error("Validation failed! got {value} at {path}")]
    Check { value: String, path: String },

    /// A built-in refinement (integer, uuid, email, ...) rejected the value
    #[error("Expected {format}, got {value} at {path}")]
    Format {
        format: &'static str,
        value: String,
        path: String,
    },

    /// Numeric, date or count value above `max`
    #[error("Expected max {limit}, got {value} at {path}")]
    Max {
        limit: String,
        value: String,
        path: String,
    },

    /// Numeric, date or count value below `min`
    #[error("Expected min {limit}, got {value} at {path}")]
    Min {
        limit: String,
        value: String,
        path: String,
    },

    /// String longer than `max` characters
    #[error("Expected max length {limit}, got \"{value}\" at {path}")]
    MaxLength {
        limit: usize,
        value: String,
        path: String,
    },

    /// String shorter than `min` characters
    #[error("Expected min length {limit}, got \"{value}\" at {path}")]
    MinLength {
        limit: usize,
        value: String,
        path: String,
    },

    /// String does not start with the required prefix
    #[error("Expected prefix {prefix}, got \"{value}\" at {path}")]
    Prefix {
        prefix: String,
        value: String,
        path: String,
    },

    /// String does not end with the required suffix
    #[error("Expected suffix {suffix}, got \"{value}\" at {path}")]
    Suffix {
        suffix: String,
        value: String,
        path: String,
    },

    /// String does not contain the required substring
    #[error("Expected infix {infix}, got \"{value}\" at {path}")]
    Infix {
        infix: String,
        value: String,
        path: String,
    },

    /// String does not match the `matches` pattern
    #[error("Expected string to match /{pattern}/, got \"{value}\" at {path}")]
    Match {
        pattern: String,
        value: String,
        path: String,
    },

    /// String matches the `no_match` pattern
    #[error("Expected string NOT to match /{pattern}/, got \"{value}\" at {path}")]
    NoMatch {
        pattern: String,
        value: String,
        path: String,
    },

    /// Object carries a different class name
    #[error("Expected object of class {expected}, got object of class {actual} at {path}")]
    Class {
        expected: String,
        actual: String,
        path: String,
    },

    /// Value differs from the expected literal
    #[error("Expected literal {expected}, got {value} at {path}")]
    Literal {
        expected: String,
        value: String,
        path: String,
    },

    /// Value equals none of the allowed choices
    #[error("Expected oneOf {choices}, got {value} at {path}")]
    OneOf {
        choices: String,
        value: String,
        path: String,
    },

    /// Positional input of the wrong length, or too few keyed entries
    #[error("Expected {expected} elements, got {actual} elements at {path}.")]
    Cardinality {
        expected: usize,
        actual: usize,
        path: String,
    },

    /// More n-ary elements than `max`
    #[error("Expected AT MOST {max} entries, got {actual} at {path}")]
    AtMost {
        max: usize,
        actual: usize,
        path: String,
    },

    /// Fewer n-ary elements than `min`
    #[error("Expected AT LEAST {min} entries, got {actual} at {path}")]
    AtLeast {
        min: usize,
        actual: usize,
        path: String,
    },

    /// Undeclared key in strict keyed input
    #[error("Extra key \"{key}\" not found in schema at {path}")]
    ExtraKey { key: String, path: String },

    /// The schema wrapped by `not` accepted the value
    #[error("Expected {path} to NOT match.")]
    NotMatched { path: String },

    /// `each` was configured but `map` produced something that is not iterable
    #[error("Expected {expected} after map, got {actual} at {path}")]
    NotAggregate {
        expected: &'static str,
        actual: String,
        path: String,
    },

    /// The future handed to an async mapper resolved to an error
    #[error("Awaited value was rejected: {message} at {path}")]
    Rejected { message: String, path: String },

    /// Failures collected by `or` (every branch) or `and` (every failed step)
    #[error("{message}")]
    Aggregate {
        message: String,
        errors: Vec<ValidationError>,
    },
}

/// Option structs that cannot describe a meaningful schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `min` is greater than `max`
    #[error("{kind}: min {min} is greater than max {max}")]
    InvertedBounds {
        kind: &'static str,
        min: String,
        max: String,
    },

    /// A numeric bound is NaN
    #[error("{kind}: {bound} bound must not be NaN")]
    NanBound {
        kind: &'static str,
        bound: &'static str,
    },

    /// `default` set without `optional`
    #[error("{kind}: a default value requires optional to be set")]
    DefaultWithoutOptional { kind: &'static str },

    /// `one_of` with no choices
    #[error("oneOf requires at least one literal")]
    EmptyChoices,
}

impl ValidationError {
    /// Build a [`ValidationError::Type`].
    pub fn type_mismatch(
        expected: impl Into<String>,
        actual: impl Into<String>,
        path: impl ToString,
    ) -> Self {
        Self::Type {
            expected: expected.into(),
            actual: actual.into(),
            path: path.to_string(),
        }
    }

    /// Build a [`ValidationError::Check`].
    pub fn check_failed(value: impl ToString, path: impl ToString) -> Self {
        Self::Check {
            value: value.to_string(),
            path: path.to_string(),
        }
    }

    /// Build a [`ValidationError::Format`].
    pub fn format(format: &'static str, value: impl ToString, path: impl ToString) -> Self {
        Self::Format {
            format,
            value: value.to_string(),
            path: path.to_string(),
        }
    }

    /// Build a [`ValidationError::Rejected`].
    pub fn rejected(message: impl Into<String>, path: impl ToString) -> Self {
        Self::Rejected {
            message: message.into(),
            path: path.to_string(),
        }
    }

    /// Wrap several failures, joining their messages with `", "`.
    pub fn aggregate(errors: Vec<ValidationError>) -> Self {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::Aggregate { message, errors }
    }

    /// The failure class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Type { .. } | Self::NotAggregate { .. } => ErrorKind::TypeMismatch,
            Self::Cardinality { .. } | Self::AtMost { .. } | Self::AtLeast { .. } => {
                ErrorKind::Cardinality
            }
            Self::ExtraKey { .. } => ErrorKind::ExtraKey,
            Self::Aggregate { .. } => ErrorKind::Aggregate,
            Self::Rejected { .. } => ErrorKind::Rejected,
            _ => ErrorKind::Constraint,
        }
    }

    /// Nested failures of an aggregate; empty for every other variant.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Aggregate { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Location of the offending value, if the error has one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Aggregate { .. } => None,
            Self::Type { path, .. }
            | Self::Check { path, .. }
            | Self::Format { path, .. }
            | Self::Max { path, .. }
            | Self::Min { path, .. }
            | Self::MaxLength { path, .. }
            | Self::MinLength { path, .. }
            | Self::Prefix { path, .. }
            | Self::Suffix { path, .. }
            | Self::Infix { path, .. }
            | Self::Match { path, .. }
            | Self::NoMatch { path, .. }
            | Self::Class { path, .. }
            | Self::Literal { path, .. }
            | Self::OneOf { path, .. }
            | Self::Cardinality { path, .. }
            | Self::AtMost { path, .. }
            | Self::AtLeast { path, .. }
            | Self::ExtraKey { path, .. }
            | Self::NotMatched { path }
            | Self::NotAggregate { path, .. }
            | Self::Rejected { path, .. } => Some(path),
        }
    }
}

// Result type aliases for convenience
pub type SchemaResult<T> = Result<T, SchemaError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
