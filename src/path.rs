//! Diagnostic locations within nested input.

use std::fmt;

/// Location of the value currently being validated, rendered as
/// `root[0][name]`.
///
/// Paths only feed error messages; they never change a validation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(String);

impl Path {
    /// The default root label used when a mapper is invoked without a path.
    pub const ROOT: &'static str = "root";

    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    /// A root path with a caller-chosen label, e.g. the name of a payload.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Child path for a positional element.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    /// Child path for a keyed entry.
    pub fn key(&self, key: &str) -> Self {
        Self(format!("{}[{}]", self.0, key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
