//! Conversion of raw strings into typed values
//!
//! [`convert`] dispatches on the field's [`DecodeStrategy`]:
//!
//! - `Auto` tries type-based conversion, falling back to kind-based conversion
//!   only when the type name has no registered parser
//! - `Kind` converts on the structural [`Kind`] of the target
//! - `Type` converts on the nominal type name
//! - `Yaml` runs the target's YAML decoder

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::duration::parse_duration;
use crate::error::ConversionError;
use crate::target::{fits_f32, Kind, TargetType};
use crate::value::Value;

/// Which conversion path turns a raw string into a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// Type-based conversion with kind-based fallback (no `decode` directive)
    #[default]
    Auto,
    /// `decode=kind`
    Kind,
    /// `decode=type`
    Type,
    /// `decode=yaml`
    Yaml,
}

impl FromStr for DecodeStrategy {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::Auto),
            "kind" => Ok(Self::Kind),
            "type" => Ok(Self::Type),
            "yaml" => Ok(Self::Yaml),
            other => Err(ConversionError::UnsupportedDecode(other.to_string())),
        }
    }
}

impl fmt::Display for DecodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::Auto => "",
            Self::Kind => "kind",
            Self::Type => "type",
            Self::Yaml => "yaml",
        };
        f.write_str(token)
    }
}

/// Convert `raw` into a value of `target` using `decode`.
///
/// An empty `raw` is absent, not an error: the result is `Ok(None)` whatever
/// the strategy.
pub fn convert(
    target: &TargetType,
    raw: &str,
    decode: DecodeStrategy,
) -> Result<Option<Value>, ConversionError> {
    if raw.is_empty() {
        return Ok(None);
    }

    let value = match decode {
        DecodeStrategy::Auto => match convert_with_type(target, raw) {
            Err(ConversionError::UnsupportedType { .. }) => convert_with_kind(target, raw),
            result => result,
        },
        DecodeStrategy::Kind => convert_with_kind(target, raw),
        DecodeStrategy::Type => convert_with_type(target, raw),
        DecodeStrategy::Yaml => convert_with_yaml(target, raw),
    }?;

    Ok(Some(value))
}

/// Convert on the structural kind of `target`.
pub fn convert_with_kind(target: &TargetType, raw: &str) -> Result<Value, ConversionError> {
    match target.kind() {
        Kind::String => Ok(Value::String(raw.to_string())),
        Kind::Int { min, max } => parse_int(raw, min, max),
        Kind::Float { bits } => parse_float(raw, bits),
        Kind::Bool => parse_bool(raw),
        // sequences and mappings are written as YAML (JSON parses too)
        Kind::Sequence | Kind::Mapping => convert_with_yaml(target, raw),
        kind @ Kind::Struct => Err(ConversionError::UnsupportedKind {
            value: raw.to_string(),
            kind: kind.to_string(),
        }),
    }
}

type TypeParser = fn(&str) -> Result<Value, ConversionError>;

fn duration_parser(raw: &str) -> Result<Value, ConversionError> {
    parse_duration(raw).map(Value::Duration)
}

/// Parser registered for a nominal type name.
fn type_parser(type_name: &str) -> Option<TypeParser> {
    let registry: [(&str, TypeParser); 1] = [(
        std::any::type_name::<Duration>(),
        duration_parser as TypeParser,
    )];
    registry
        .into_iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, parser)| parser)
}

/// Convert on the nominal type name of `target`.
///
/// Types without a registered parser fail with
/// [`ConversionError::UnsupportedType`].
pub fn convert_with_type(target: &TargetType, raw: &str) -> Result<Value, ConversionError> {
    match type_parser(target.name()) {
        Some(parser) => parser(raw),
        None => Err(ConversionError::UnsupportedType {
            value: raw.to_string(),
            type_name: target.name().to_string(),
        }),
    }
}

/// Convert with the YAML decoder of `target`.
pub fn convert_with_yaml(target: &TargetType, raw: &str) -> Result<Value, ConversionError> {
    target.decode_yaml(raw).map_err(|e| {
        tracing::debug!(type_name = target.name(), error = %e, "yaml decode failed");
        ConversionError::Yaml {
            value: raw.to_string(),
            kind: target.kind().to_string(),
            type_name: target.name().to_string(),
            message: e.to_string(),
        }
    })
}

fn parse_int(raw: &str, min: i128, max: i128) -> Result<Value, ConversionError> {
    raw.parse::<i128>()
        .ok()
        .filter(|n| (min..=max).contains(n))
        .map(Value::Int)
        .ok_or_else(|| ConversionError::malformed(raw, "int"))
}

fn parse_float(raw: &str, bits: u32) -> Result<Value, ConversionError> {
    raw.parse::<f64>()
        .ok()
        .filter(|n| bits != 32 || fits_f32(*n))
        .map(Value::Float)
        .ok_or_else(|| ConversionError::malformed(raw, "float"))
}

fn parse_bool(raw: &str) -> Result<Value, ConversionError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(Value::Bool(true)),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(Value::Bool(false)),
        _ => Err(ConversionError::malformed(raw, "bool")),
    }
}
