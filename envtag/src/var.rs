//! Field descriptors and value resolution
//!
//! A [`Field`] is built from a field's name, target type and tag. Resolving it
//! against a lookup function applies the `required`, `default` and `options`
//! policy and yields an immutable [`Var`].

use crate::convert::{convert, DecodeStrategy};
use crate::error::{EnvError, FieldError};
use crate::tag::Directives;
use crate::target::{EnvType, TargetType};
use crate::value::Value;

/// Normalized metadata of one configuration field, before resolution.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    key: String,
    target: TargetType,
    decode: DecodeStrategy,
    required: bool,
    default: Option<Value>,
    options: Vec<Value>,
}

impl Field {
    /// Build a field descriptor from its tag.
    ///
    /// Recognized directives are `key`, `required`, `decode`, `default` and
    /// `options`; anything else is ignored. `default` and every `options`
    /// element are converted here, with the field's `decode` strategy.
    ///
    /// # Errors
    ///
    /// - `decode` names an unknown strategy
    /// - `default` or an `options` element does not convert to the target type
    ///
    /// The error keeps the descriptor as far as it was built.
    pub fn parse(name: &str, target: TargetType, tag: &str) -> Result<Self, FieldError> {
        let mut field = Self {
            name: name.to_string(),
            key: name.to_uppercase(),
            target,
            decode: DecodeStrategy::Auto,
            required: false,
            default: None,
            options: Vec::new(),
        };

        match field.apply(tag) {
            Ok(()) => Ok(field),
            Err(error) => Err(FieldError::new(field, error)),
        }
    }

    fn apply(&mut self, tag: &str) -> Result<(), EnvError> {
        let mut directives = Directives::parse(tag);

        // default and options are converted with the decode strategy, so it goes first
        if let Some(decode) = directives.take("decode") {
            self.decode = decode
                .parse::<DecodeStrategy>()
                .map_err(|e| EnvError::conversion(&self.key, e))?;
        }
        if let Some(key) = directives.take("key") {
            self.key = key.to_uppercase();
        }

        for (directive, value) in directives {
            match directive {
                "required" => self.required = true,
                "default" => self.default = self.convert(value)?,
                "options" => {
                    let mut options = Vec::new();
                    for option in value.split(',') {
                        if let Some(option) = self.convert(option)? {
                            options.push(option);
                        }
                    }
                    self.options = options;
                }
                _ => tracing::trace!(field = %self.name, directive, "ignoring unknown directive"),
            }
        }

        Ok(())
    }

    fn convert(&self, raw: &str) -> Result<Option<Value>, EnvError> {
        convert(&self.target, raw, self.decode).map_err(|e| EnvError::conversion(&self.key, e))
    }

    /// Resolve the field against `lookup`.
    ///
    /// An absent key and a key set to the empty string are treated alike. A
    /// field with no value takes its default, else the type's zero value,
    /// unless it is `required`.
    ///
    /// # Errors
    ///
    /// - The looked-up text does not convert to the target type
    /// - The field is `required` and the lookup has no value
    /// - The final value is not one of the declared `options`
    ///
    /// The error keeps the descriptor.
    pub fn resolve<F>(self, lookup: F) -> Result<Var, FieldError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match self.resolve_value(lookup) {
            Ok(value) => Ok(Var { field: self, value }),
            Err(error) => Err(FieldError::new(self, error)),
        }
    }

    fn resolve_value<F>(&self, lookup: F) -> Result<Value, EnvError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let raw = lookup(&self.key).unwrap_or_default();

        let value = match self.convert(&raw)? {
            Some(value) => {
                tracing::debug!(key = %self.key, "resolved from lookup");
                value
            }
            None if self.required => {
                return Err(EnvError::Required {
                    key: self.key.clone(),
                });
            }
            None => match &self.default {
                Some(default) => {
                    tracing::debug!(key = %self.key, "resolved from default");
                    default.clone()
                }
                None => {
                    tracing::debug!(key = %self.key, "resolved to zero value");
                    self.target.zero()
                }
            },
        };

        if !self.options.is_empty() && !self.options.contains(&value) {
            return Err(EnvError::NotAllowed {
                key: self.key.clone(),
                value,
                options: self.options.clone(),
            });
        }

        Ok(value)
    }

    /// Name of the struct field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key used against the lookup source, always upper case.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Descriptor of the target type.
    pub fn target(&self) -> &TargetType {
        &self.target
    }

    /// Strategy from the `decode` directive.
    pub fn decode(&self) -> DecodeStrategy {
        self.decode
    }

    /// Whether the `required` directive was present.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Value from the `default` directive, already converted.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Values from the `options` directive, already converted.
    pub fn options(&self) -> &[Value] {
        &self.options
    }
}

/// A resolved field: its descriptor plus the final value.
#[derive(Debug, Clone)]
pub struct Var {
    field: Field,
    value: Value,
}

impl Var {
    /// Parse `tag` and resolve the field against `lookup` in one step.
    ///
    /// # Errors
    ///
    /// See [`Field::parse`] and [`Field::resolve`].
    pub fn resolve<F>(
        name: &str,
        target: TargetType,
        tag: &str,
        lookup: F,
    ) -> Result<Self, FieldError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        Field::parse(name, target, tag)?.resolve(lookup)
    }

    /// Descriptor the value was resolved from.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Lookup key of the field.
    pub fn key(&self) -> &str {
        &self.field.key
    }

    /// The resolved value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Take the resolved value out as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Mismatch`] if the value does not fit `T`.
    pub fn into_typed<T: EnvType>(self) -> Result<T, EnvError> {
        T::from_value(self.value).ok_or_else(|| EnvError::Mismatch {
            key: self.field.key,
            type_name: std::any::type_name::<T>().to_string(),
        })
    }
}
