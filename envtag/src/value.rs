//! Typed values produced by conversion

use std::fmt;
use std::time::Duration;

use crate::duration::format_duration;

/// A converted field value.
///
/// Conversion yields `Option<Value>`: `None` means the source had nothing for
/// the key, which is distinct from any zero value below.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text, passed through unchanged
    String(String),
    /// Any primitive integer, widened so every Rust integer type fits
    Int(i128),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Span of time
    Duration(Duration),
    /// Sequence, mapping or struct decoded through YAML
    Structured(serde_yaml::Value),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Duration(d) => f.write_str(&format_duration(*d)),
            // compact JSON, one line
            Self::Structured(v) => match serde_json::to_string(v) {
                Ok(json) => f.write_str(&json),
                Err(_) => write!(f, "{v:?}"),
            },
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}
