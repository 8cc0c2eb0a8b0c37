//! Attribute parsing for `#[env("...")]` annotations.
//!
//! The attribute carries the field's tag string verbatim; the directives in it
//! are interpreted at runtime by `envtag`.

use syn::{Field, LitStr};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Tag string, with several `#[env(...)]` attributes joined by a space.
    pub tag: String,
}

impl FieldAttrs {
    /// Extract `#[env("...")]` attributes from a struct field.
    ///
    /// Attributes with other paths are left for other macros.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut parts = Vec::new();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            let tag: LitStr = attr.parse_args().map_err(|e| {
                syn::Error::new(
                    e.span(),
                    r#"expected a tag string, e.g. #[env("required default=8080")]"#,
                )
            })?;
            let tag = tag.value();
            if !tag.trim().is_empty() {
                parts.push(tag.trim().to_string());
            }
        }

        Ok(Self {
            tag: parts.join(" "),
        })
    }
}
