//! Derive macro implementation for envtag

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::FieldAttrs;

/// `EnvTag` derive macro
///
/// Implements `from_env()` and `from_lookup()` on structs with named fields.
/// Every field is resolved through `envtag` from its tag string; the lookup
/// key defaults to the field name in upper case.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[env("directives")]`: tag string, e.g. `#[env("required default=8080")]`
///
/// # Example
///
/// See the `envtag` crate documentation for usage examples.
#[proc_macro_derive(EnvTag, attributes(env))]
pub fn derive_envtag(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    // Struct name
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "EnvTag only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "EnvTag only supports structs",
            ));
        }
    };

    // Generate resolution code for each field
    let mut field_initializers = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;
        let attrs = FieldAttrs::from_field(field)?;

        // r#type resolves under TYPE
        let name = field_name.to_string();
        let name = name.trim_start_matches("r#");
        let tag = attrs.tag;

        field_initializers.push(quote! {
            #field_name: ::envtag::de::resolve_field::<#field_type, _>(#name, #tag, &lookup)?
        });
    }

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// Load configuration from environment variables
            ///
            /// # Errors
            ///
            /// - A required environment variable is not set
            /// - A value, default or option cannot be converted into the field type
            /// - A value is not among the field's allowed options
            pub fn from_env() -> ::envtag::anyhow::Result<Self> {
                Self::from_lookup(::envtag::env_lookup)
            }

            /// Load configuration from an arbitrary key/value lookup
            ///
            /// The lookup returns `None` (or an empty string) for absent keys.
            ///
            /// # Errors
            ///
            /// Same as `from_env()`.
            pub fn from_lookup<F>(lookup: F) -> ::envtag::anyhow::Result<Self>
            where
                F: Fn(&str) -> ::core::option::Option<::std::string::String>,
            {
                Ok(Self {
                    #(#field_initializers),*
                })
            }
        }
    })
}
