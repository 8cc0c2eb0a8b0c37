//! Tag-directed environment variable configuration
//!
//! `envtag` fills typed struct fields from environment variables (or any other
//! key/value lookup). Each field carries a small tag string that says how its
//! value is found, converted and checked:
//!
//! ```text
//! #[env("key=HTTP_PORT required decode=kind default=8080 options=80,8080")]
//! ```
//!
//! # Directives
//!
//! - `key=NAME`: look the value up under `NAME` instead of the uppercased field name
//! - `required`: fail if the lookup has no value
//! - `default=VALUE`: value used when the lookup has nothing
//! - `options=A,B,C`: the final value must be one of these
//! - `decode=kind|type|yaml`: force a conversion strategy
//!
//! Unknown directives are ignored. A variable set to the empty string counts
//! as unset.
//!
//! # Value Conversion
//!
//! Without a `decode` directive, a value is first converted by type name
//! (`std::time::Duration` reads `"1h30m"`, `"250ms"`), then by kind:
//! - Strings: passed through unchanged
//! - Integers and floats: `MAX_CONNECTIONS=42`, `RATIO=0.75`
//! - Booleans: `1`, `t`, `true`, `0`, `f`, `false` (any of `T`, `TRUE`, `True` too)
//! - `Vec<T>` and maps: YAML or JSON, `TAGS=[api, v2]`, `LIMITS={"cpu": 2}`
//!
//! User-defined types are wrapped in [`Yaml<T>`] and need `decode=yaml`.
//!
//! # Example
//!
//! ```rust
//! use envtag::EnvTag;
//! use std::time::Duration;
//!
//! #[derive(Debug, EnvTag)]
//! struct Config {
//!     #[env("required")]
//!     pub database_url: String,
//!
//!     #[env("default=8080")]
//!     pub port: u16,
//!
//!     #[env("default=30s")]
//!     pub timeout: Duration,
//!
//!     #[env("default=info options=debug,info,warn,error")]
//!     pub log_level: String,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("DATABASE_URL", "postgres://localhost/db");
//! #     let config = Config::from_env()?;
//! #     assert_eq!(config.database_url, "postgres://localhost/db");
//! #     assert_eq!(config.port, 8080);
//! #     assert_eq!(config.timeout, Duration::from_secs(30));
//! #     Ok(())
//! # }
//! ```
//!
//! # Runtime API
//!
//! The derive macro is a thin driver over [`Field`] and [`Var`], which can be
//! used directly with any lookup function:
//!
//! ```rust
//! use envtag::{TargetType, Value, Var};
//!
//! let var = Var::resolve("workers", TargetType::of::<i64>(), "default=5", |_| None).unwrap();
//! assert_eq!(var.value(), &Value::Int(5));
//! ```

pub mod convert;
#[doc(hidden)]
pub mod de;
pub mod duration;
pub mod tag;

mod error;
mod target;
mod value;
mod var;

pub use convert::{convert, DecodeStrategy};
pub use de::env_lookup;
pub use envtag_derive::EnvTag;
pub use error::{ConversionError, EnvError, FieldError};
pub use target::{EnvType, Kind, TargetType, Yaml};
pub use value::Value;
pub use var::{Field, Var};

// Re-export for macro-generated code
#[doc(hidden)]
pub use anyhow;
