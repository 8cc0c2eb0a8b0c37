//! Runtime descriptors of the Rust types a field can be converted into

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::duration::parse_duration;
use crate::value::Value;

/// Structural category of a target type.
///
/// Kind-based conversion dispatches on this, independent of the type's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Text
    String,
    /// Integer restricted to the inclusive range of the concrete Rust type
    Int {
        /// Smallest accepted value
        min: i128,
        /// Largest accepted value
        max: i128,
    },
    /// Floating point number of the given width in bits (32 or 64)
    Float {
        /// Width of the concrete Rust float type
        bits: u32,
    },
    /// Boolean
    Bool,
    /// List, decoded as YAML
    Sequence,
    /// Key/value map, decoded as YAML
    Mapping,
    /// Any other composite type; only the YAML decoder handles it
    Struct,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Int { .. } => "int",
            Self::Float { .. } => "float",
            Self::Bool => "bool",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Struct => "struct",
        };
        f.write_str(name)
    }
}

/// Descriptor of a field's target type, built from a Rust type with [`TargetType::of`].
#[derive(Clone, Copy)]
pub struct TargetType {
    name: &'static str,
    kind: Kind,
    zero: fn() -> Value,
    yaml: fn(&str) -> Result<Value, serde_yaml::Error>,
}

impl TargetType {
    /// Describe the Rust type `T`.
    pub fn of<T: EnvType>() -> Self {
        Self {
            name: T::type_name(),
            kind: T::kind(),
            zero: T::zero,
            yaml: T::decode_yaml,
        }
    }

    /// Nominal type name, used for type-based conversion.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Structural kind, used for kind-based conversion.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The type's zero or empty value.
    pub fn zero(&self) -> Value {
        (self.zero)()
    }

    /// Run the YAML decoder for this type against `raw`.
    pub fn decode_yaml(&self, raw: &str) -> Result<Value, serde_yaml::Error> {
        (self.yaml)(raw)
    }
}

impl fmt::Debug for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetType")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// A Rust type that a field can be resolved into.
///
/// Implemented for strings, booleans, primitive integers and floats,
/// [`Duration`], `Vec<T>`, `HashMap<K, V>`, `BTreeMap<K, V>`, and [`Yaml<T>`]
/// for user-defined structured types.
pub trait EnvType: Sized {
    /// Structural kind of the type.
    fn kind() -> Kind;

    /// Nominal name of the type.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Value used when the source has nothing and no default is declared.
    fn zero() -> Value;

    /// Decode YAML (or JSON) text into a value of this type.
    fn decode_yaml(raw: &str) -> Result<Value, serde_yaml::Error>;

    /// Take a resolved value back out as `Self`.
    ///
    /// Returns `None` when the value does not fit the type.
    fn from_value(value: Value) -> Option<Self>;
}

impl EnvType for String {
    fn kind() -> Kind {
        Kind::String
    }

    fn zero() -> Value {
        Value::String(String::new())
    }

    fn decode_yaml(raw: &str) -> Result<Value, serde_yaml::Error> {
        serde_yaml::from_str::<String>(raw).map(Value::String)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl EnvType for bool {
    fn kind() -> Kind {
        Kind::Bool
    }

    fn zero() -> Value {
        Value::Bool(false)
    }

    fn decode_yaml(raw: &str) -> Result<Value, serde_yaml::Error> {
        serde_yaml::from_str::<bool>(raw).map(Value::Bool)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

macro_rules! int_env_type {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvType for $ty {
                fn kind() -> Kind {
                    Kind::Int {
                        min: <$ty>::MIN as i128,
                        max: <$ty>::MAX as i128,
                    }
                }

                fn zero() -> Value {
                    Value::Int(0)
                }

                fn decode_yaml(raw: &str) -> Result<Value, serde_yaml::Error> {
                    serde_yaml::from_str::<$ty>(raw).map(|n| Value::Int(n as i128))
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::Int(n) => <$ty>::try_from(n).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

int_env_type!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl EnvType for f64 {
    fn kind() -> Kind {
        Kind::Float { bits: 64 }
    }

    fn zero() -> Value {
        Value::Float(0.0)
    }

    fn decode_yaml(raw: &str) -> Result<Value, serde_yaml::Error> {
        serde_yaml::from_str::<f64>(raw).map(Value::Float)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(n) => Some(n),
            _ => None,
        }
    }
}

impl EnvType for f32 {
    fn kind() -> Kind {
        Kind::Float { bits: 32 }
    }

    fn zero() -> Value {
        Value::Float(0.0)
    }

    fn decode_yaml(raw: &str) -> Result<Value, serde_yaml::Error> {
        use serde::de::Error as _;

        let n = serde_yaml::from_str::<f64>(raw)?;
        if !fits_f32(n) {
            return Err(serde_yaml::Error::custom(format!("{n} is out of range for f32")));
        }
        Ok(Value::Float(n))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(n) if fits_f32(n) => Some(n as f32),
            _ => None,
        }
    }
}

/// Whether `n` converts to `f32` without becoming infinite.
pub(crate) fn fits_f32(n: f64) -> bool {
    !n.is_finite() || n.abs() <= f64::from(f32::MAX)
}

impl EnvType for Duration {
    fn kind() -> Kind {
        Kind::Struct
    }

    fn zero() -> Value {
        Value::Duration(Duration::ZERO)
    }

    fn decode_yaml(raw: &str) -> Result<Value, serde_yaml::Error> {
        use serde::de::Error as _;

        // plain scalars read like the type-based parser: "1h30m", or an integer of nanoseconds
        match serde_yaml::from_str::<serde_yaml::Value>(raw)? {
            serde_yaml::Value::String(text) => parse_duration(&text)
                .map(Value::Duration)
                .map_err(serde_yaml::Error::custom),
            serde_yaml::Value::Number(n) => n
                .as_u64()
                .map(|nanos| Value::Duration(Duration::from_nanos(nanos)))
                .ok_or_else(|| serde_yaml::Error::custom(format!("invalid duration {n}"))),
            other => serde_yaml::from_value::<Duration>(other).map(Value::Duration),
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Duration(d) => Some(d),
            _ => None,
        }
    }
}

/// Decode into `T`, then keep the normalized YAML tree.
fn decode_structured<T>(raw: &str) -> Result<Value, serde_yaml::Error>
where
    T: DeserializeOwned + Serialize,
{
    let typed: T = serde_yaml::from_str(raw)?;
    serde_yaml::to_value(typed).map(Value::Structured)
}

fn structured_from_value<T: DeserializeOwned>(value: Value) -> Option<T> {
    match value {
        Value::Structured(tree) => serde_yaml::from_value(tree).ok(),
        _ => None,
    }
}

impl<T> EnvType for Vec<T>
where
    T: DeserializeOwned + Serialize,
{
    fn kind() -> Kind {
        Kind::Sequence
    }

    fn zero() -> Value {
        Value::Structured(serde_yaml::Value::Sequence(Vec::new()))
    }

    fn decode_yaml(raw: &str) -> Result<Value, serde_yaml::Error> {
        decode_structured::<Self>(raw)
    }

    fn from_value(value: Value) -> Option<Self> {
        structured_from_value(value)
    }
}

impl<K, V> EnvType for HashMap<K, V>
where
    K: DeserializeOwned + Serialize + Eq + Hash,
    V: DeserializeOwned + Serialize,
{
    fn kind() -> Kind {
        Kind::Mapping
    }

    fn zero() -> Value {
        Value::Structured(serde_yaml::Value::Mapping(serde_yaml::Mapping::new()))
    }

    fn decode_yaml(raw: &str) -> Result<Value, serde_yaml::Error> {
        decode_structured::<Self>(raw)
    }

    fn from_value(value: Value) -> Option<Self> {
        structured_from_value(value)
    }
}

impl<K, V> EnvType for BTreeMap<K, V>
where
    K: DeserializeOwned + Serialize + Ord,
    V: DeserializeOwned + Serialize,
{
    fn kind() -> Kind {
        Kind::Mapping
    }

    fn zero() -> Value {
        Value::Structured(serde_yaml::Value::Mapping(serde_yaml::Mapping::new()))
    }

    fn decode_yaml(raw: &str) -> Result<Value, serde_yaml::Error> {
        decode_structured::<Self>(raw)
    }

    fn from_value(value: Value) -> Option<Self> {
        structured_from_value(value)
    }
}

/// Wrapper for user-defined structured types.
///
/// The wrapped type has kind [`Kind::Struct`], so it only converts with the
/// `decode=yaml` directive. Its zero value is `T::default()`.
///
/// ```rust
/// use envtag::{EnvTag, Yaml};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
/// struct Database {
///     host: String,
///     port: u16,
/// }
///
/// #[derive(EnvTag)]
/// struct Config {
///     #[env("decode=yaml")]
///     database: Yaml<Database>,
/// }
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::from_lookup(|_| Some("{host: db, port: 5432}".to_string()))?;
/// assert_eq!(config.database.port, 5432);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Yaml<T>(pub T);

impl<T> Yaml<T> {
    /// Unwrap the decoded value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Yaml<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> EnvType for Yaml<T>
where
    T: DeserializeOwned + Serialize + Default,
{
    fn kind() -> Kind {
        Kind::Struct
    }

    fn zero() -> Value {
        match serde_yaml::to_value(T::default()) {
            Ok(tree) => Value::Structured(tree),
            Err(e) => {
                tracing::debug!(
                    type_name = std::any::type_name::<T>(),
                    error = %e,
                    "default value does not serialize, zero value is null"
                );
                Value::Structured(serde_yaml::Value::Null)
            }
        }
    }

    fn decode_yaml(raw: &str) -> Result<Value, serde_yaml::Error> {
        decode_structured::<T>(raw)
    }

    fn from_value(value: Value) -> Option<Self> {
        structured_from_value(value).map(Yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_kinds_carry_range() {
        assert_eq!(
            TargetType::of::<u8>().kind(),
            Kind::Int { min: 0, max: 255 }
        );
        assert_eq!(
            TargetType::of::<i16>().kind(),
            Kind::Int {
                min: -32768,
                max: 32767
            }
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(TargetType::of::<String>().kind(), Kind::String);
        assert_eq!(TargetType::of::<bool>().kind(), Kind::Bool);
        assert_eq!(TargetType::of::<f64>().kind(), Kind::Float { bits: 64 });
        assert_eq!(TargetType::of::<f32>().kind(), Kind::Float { bits: 32 });
        assert_eq!(TargetType::of::<Vec<i64>>().kind(), Kind::Sequence);
        assert_eq!(
            TargetType::of::<HashMap<String, String>>().kind(),
            Kind::Mapping
        );
        assert_eq!(TargetType::of::<Duration>().kind(), Kind::Struct);
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(TargetType::of::<String>().zero(), Value::from(""));
        assert_eq!(TargetType::of::<i32>().zero(), Value::Int(0));
        assert_eq!(TargetType::of::<bool>().zero(), Value::Bool(false));
        assert_eq!(
            TargetType::of::<Duration>().zero(),
            Value::Duration(Duration::ZERO)
        );
        let empty = <Vec<String>>::from_value(TargetType::of::<Vec<String>>().zero()).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_decode_yaml_checks_element_type() {
        let target = TargetType::of::<Vec<i64>>();
        assert!(target.decode_yaml("[1, 2, 3]").is_ok());
        assert!(target.decode_yaml("[1, two, 3]").is_err());
    }

    #[test]
    fn test_from_value_checks_range() {
        assert_eq!(u8::from_value(Value::Int(255)), Some(255));
        assert_eq!(u8::from_value(Value::Int(256)), None);
        assert_eq!(u8::from_value(Value::from("1")), None);
    }

    #[test]
    fn test_duration_yaml_reads_duration_strings() {
        let target = TargetType::of::<Duration>();
        assert_eq!(
            target.decode_yaml("1h30m").unwrap(),
            Value::Duration(Duration::from_secs(90 * 60))
        );
        assert_eq!(
            target.decode_yaml("\"250ms\"").unwrap(),
            Value::Duration(Duration::from_millis(250))
        );
        assert_eq!(
            target.decode_yaml("1500").unwrap(),
            Value::Duration(Duration::from_nanos(1500))
        );
        assert!(target.decode_yaml("soon").is_err());
        assert!(target.decode_yaml("-5").is_err());
    }

    #[test]
    fn test_f32_rejects_values_beyond_range() {
        let target = TargetType::of::<f32>();
        assert!(target.decode_yaml("1e300").is_err());
        assert_eq!(target.decode_yaml("0.5").unwrap(), Value::Float(0.5));
        assert_eq!(f32::from_value(Value::Float(1e300)), None);
        assert_eq!(f32::from_value(Value::Float(0.5)), Some(0.5));
    }

    #[derive(Default, serde::Deserialize)]
    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not serializable"))
        }
    }

    #[test]
    fn test_yaml_zero_falls_back_to_null() {
        assert_eq!(
            TargetType::of::<Yaml<Unserializable>>().zero(),
            Value::Structured(serde_yaml::Value::Null)
        );
    }
}
