//! Error types for tag-directed environment configuration

use crate::value::Value;
use crate::var::Field;

/// A raw string that could not become a value of the target type.
///
/// Only [`ConversionError::UnsupportedType`] lets automatic decoding fall back
/// from type-based to kind-based conversion. Every other variant is final.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The text is not valid for the target (bad integer, boolean, duration...).
    #[error("could not convert value \"{value}\" into {target} type")]
    Malformed {
        /// Raw text that failed to convert
        value: String,
        /// Description of the target (`int`, `bool`, `duration`...)
        target: String,
    },

    /// No type-based parser is registered for the target type name.
    #[error("could not convert value \"{value}\": unsupported type {type_name}")]
    UnsupportedType {
        /// Raw text that failed to convert
        value: String,
        /// Nominal name of the target type
        type_name: String,
    },

    /// Kind-based conversion does not handle the target's kind.
    #[error("could not convert value \"{value}\": unsupported kind {kind}")]
    UnsupportedKind {
        /// Raw text that failed to convert
        value: String,
        /// Structural kind of the target type
        kind: String,
    },

    /// The `decode` directive named an unknown strategy.
    #[error("unsupported decode strategy \"{0}\"")]
    UnsupportedDecode(String),

    /// The structured (YAML) decoder rejected the text.
    #[error("could not convert value \"{value}\" with yaml decoder; kind: {kind}; type: {type_name}: {message}")]
    Yaml {
        /// Raw text that failed to convert
        value: String,
        /// Structural kind of the target type
        kind: String,
        /// Nominal name of the target type
        type_name: String,
        /// Message reported by the decoder
        message: String,
    },
}

impl ConversionError {
    pub(crate) fn malformed(value: &str, target: impl Into<String>) -> Self {
        Self::Malformed {
            value: value.to_string(),
            target: target.into(),
        }
    }
}

/// Errors that can occur while resolving a field from its tag and the lookup source.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnvError {
    /// A raw value, a `default`, or an `options` element failed to convert.
    #[error("{key}: {source}")]
    Conversion {
        /// Lookup key of the field
        key: String,
        /// Underlying conversion failure
        #[source]
        source: ConversionError,
    },

    /// A `required` field had no value in the lookup source.
    #[error("{key} required")]
    Required {
        /// Lookup key of the field
        key: String,
    },

    /// The resolved value is not one of the declared `options`.
    #[error("{key}=\"{value}\" not in allowed options: {}", format_options(.options))]
    NotAllowed {
        /// Lookup key of the field
        key: String,
        /// Resolved value that was rejected
        value: Value,
        /// Values permitted by the `options` directive
        options: Vec<Value>,
    },

    /// A resolved value could not be handed out as the requested Rust type.
    #[error("{key} does not hold a value of type {type_name}")]
    Mismatch {
        /// Lookup key of the field
        key: String,
        /// Rust type that was requested
        type_name: String,
    },
}

impl EnvError {
    pub(crate) fn conversion(key: impl Into<String>, source: ConversionError) -> Self {
        Self::Conversion {
            key: key.into(),
            source,
        }
    }

    /// Lookup key of the field the error belongs to.
    pub fn key(&self) -> &str {
        match self {
            Self::Conversion { key, .. }
            | Self::Required { key }
            | Self::NotAllowed { key, .. }
            | Self::Mismatch { key, .. } => key,
        }
    }
}

/// An [`EnvError`] together with the field descriptor it was raised for.
///
/// Returned by [`Field::parse`] and [`Field::resolve`]. For parse failures the
/// descriptor holds every directive applied before the failing one.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{error}")]
pub struct FieldError {
    field: Box<Field>,
    error: EnvError,
}

impl FieldError {
    pub(crate) fn new(field: Field, error: EnvError) -> Self {
        Self {
            field: Box::new(field),
            error,
        }
    }

    /// Descriptor of the field that failed.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// The underlying error.
    pub fn error(&self) -> &EnvError {
        &self.error
    }

    pub fn into_error(self) -> EnvError {
        self.error
    }

    pub fn into_parts(self) -> (Field, EnvError) {
        (*self.field, self.error)
    }
}

impl From<FieldError> for EnvError {
    fn from(err: FieldError) -> Self {
        err.error
    }
}

fn format_options(options: &[Value]) -> String {
    let items: Vec<String> = options.iter().map(Value::to_string).collect();
    format!("[{}]", items.join(" "))
}
