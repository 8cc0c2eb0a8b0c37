//! Support functions for code generated by `#[derive(EnvTag)]`

use crate::error::EnvError;
use crate::target::{EnvType, TargetType};
use crate::var::Var;

/// Resolve one struct field of type `T` from its tag.
///
/// Used by the derive macro for every field.
#[doc(hidden)]
pub fn resolve_field<T, F>(name: &str, tag: &str, lookup: &F) -> Result<T, EnvError>
where
    T: EnvType,
    F: Fn(&str) -> Option<String>,
{
    Var::resolve(name, TargetType::of::<T>(), tag, lookup)?.into_typed()
}

/// Read `key` from the process environment.
///
/// Unset variables and values that are not valid Unicode are both absent.
pub fn env_lookup(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => {
            tracing::debug!(key, "ignoring non-unicode environment value");
            None
        }
    }
}
