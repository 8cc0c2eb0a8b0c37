//! Integration tests

use envtag::{EnvError, EnvTag, Yaml};
use serde::{Deserialize, Serialize};
use serial_test::serial;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::time::Duration;

#[derive(Debug, EnvTag)]
struct BasicConfig {
    #[env("required")]
    pub database_url: String,
    #[env("required")]
    pub api_key: String,
}

#[derive(Debug, EnvTag)]
struct ConfigWithDefaults {
    #[env("default=127.0.0.1:8080")]
    pub server_addr: String,

    #[env("default=10")]
    pub max_connections: u32,

    #[env("default=false")]
    pub debug_mode: bool,

    #[env("default=30s")]
    pub request_timeout: Duration,
}

#[derive(Debug, EnvTag)]
struct ConfigWithCustomKeys {
    #[env("key=DB_CONNECTION_STRING")]
    pub database_url: String,

    #[env("key=REDIS_URL")]
    pub cache_url: String,
}

#[derive(Debug, EnvTag)]
struct ConfigWithOptions {
    #[env("default=info options=debug,info,warn,error")]
    pub log_level: String,

    #[env("options=1,3,5 default=3")]
    pub replicas: u8,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, EnvTag)]
struct ComplexConfig {
    pub tags: Vec<String>,

    pub limits: HashMap<String, u32>,

    #[env("decode=yaml")]
    pub ports: Vec<u16>,

    #[env("decode=yaml")]
    pub database: Yaml<DatabaseConfig>,

    pub weights: BTreeMap<String, f64>,
}

#[derive(Debug, EnvTag)]
struct ConfigWithRawIdent {
    #[env("default=plain")]
    pub r#type: String,
}

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
#[serial]
fn test_basic_config() {
    env::set_var("DATABASE_URL", "postgres://localhost/test");
    env::set_var("API_KEY", "test_api_key");

    let config = BasicConfig::from_env().unwrap();
    assert_eq!(config.database_url, "postgres://localhost/test");
    assert_eq!(config.api_key, "test_api_key");

    env::remove_var("DATABASE_URL");
    env::remove_var("API_KEY");
}

#[test]
#[serial]
fn test_missing_required_field() {
    env::remove_var("DATABASE_URL");
    env::remove_var("API_KEY");

    let err = BasicConfig::from_env().unwrap_err();
    let err = err.downcast::<EnvError>().unwrap();
    assert_eq!(
        err,
        EnvError::Required {
            key: "DATABASE_URL".to_string()
        }
    );
}

#[test]
#[serial]
fn test_required_set_to_empty_is_missing() {
    env::set_var("DATABASE_URL", "");
    env::set_var("API_KEY", "key");

    let err = BasicConfig::from_env().unwrap_err();
    assert_eq!(err.to_string(), "DATABASE_URL required");

    env::remove_var("DATABASE_URL");
    env::remove_var("API_KEY");
}

#[test]
#[serial]
fn test_config_with_defaults() {
    env::remove_var("SERVER_ADDR");
    env::remove_var("MAX_CONNECTIONS");
    env::remove_var("DEBUG_MODE");
    env::remove_var("REQUEST_TIMEOUT");

    let config = ConfigWithDefaults::from_env().unwrap();
    assert_eq!(config.server_addr, "127.0.0.1:8080");
    assert_eq!(config.max_connections, 10);
    assert!(!config.debug_mode);
    assert_eq!(config.request_timeout, Duration::from_secs(30));
}

#[test]
#[serial]
fn test_config_override_defaults() {
    env::set_var("SERVER_ADDR", "0.0.0.0:9090");
    env::set_var("MAX_CONNECTIONS", "20");
    env::set_var("DEBUG_MODE", "true");
    env::set_var("REQUEST_TIMEOUT", "1h30m");

    let config = ConfigWithDefaults::from_env().unwrap();
    assert_eq!(config.server_addr, "0.0.0.0:9090");
    assert_eq!(config.max_connections, 20);
    assert!(config.debug_mode);
    assert_eq!(config.request_timeout, Duration::from_secs(90 * 60));

    env::remove_var("SERVER_ADDR");
    env::remove_var("MAX_CONNECTIONS");
    env::remove_var("DEBUG_MODE");
    env::remove_var("REQUEST_TIMEOUT");
}

#[test]
fn test_custom_keys() {
    let config = ConfigWithCustomKeys::from_lookup(lookup_from(&[
        ("DB_CONNECTION_STRING", "postgres://localhost/db"),
        ("REDIS_URL", "redis://localhost"),
        ("DATABASE_URL", "ignored"),
    ]))
    .unwrap();
    assert_eq!(config.database_url, "postgres://localhost/db");
    assert_eq!(config.cache_url, "redis://localhost");
}

#[test]
fn test_options_accept_listed_values() {
    let config = ConfigWithOptions::from_lookup(lookup_from(&[
        ("LOG_LEVEL", "warn"),
        ("REPLICAS", "5"),
    ]))
    .unwrap();
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.replicas, 5);
}

#[test]
fn test_options_defaults() {
    let config = ConfigWithOptions::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(config.log_level, "info");
    assert_eq!(config.replicas, 3);
}

#[test]
fn test_options_reject_unlisted_value() {
    let err = ConfigWithOptions::from_lookup(lookup_from(&[("LOG_LEVEL", "trace")])).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"LOG_LEVEL="trace" not in allowed options: [debug info warn error]"#
    );
}

#[test]
fn test_malformed_value_is_an_error() {
    let err = ConfigWithDefaults::from_lookup(lookup_from(&[("DEBUG_MODE", "maybe")])).unwrap_err();
    let err = err.downcast::<EnvError>().unwrap();
    assert!(matches!(err, EnvError::Conversion { ref key, .. } if key == "DEBUG_MODE"));
}

#[test]
fn test_out_of_range_integer_is_an_error() {
    let err = ConfigWithOptions::from_lookup(lookup_from(&[("REPLICAS", "300")])).unwrap_err();
    assert!(err.to_string().contains("REPLICAS"));
}

#[test]
fn test_complex_types() {
    let config = ComplexConfig::from_lookup(lookup_from(&[
        ("TAGS", r#"["production","api","v2"]"#),
        ("LIMITS", "cpu: 2\nmemory: 512\n"),
        ("PORTS", "[80, 443]"),
        ("DATABASE", "{host: localhost, port: 5432}"),
        ("WEIGHTS", r#"{"a": 0.5, "b": 1.5}"#),
    ]))
    .unwrap();

    assert_eq!(config.tags, vec!["production", "api", "v2"]);
    assert_eq!(config.limits["cpu"], 2);
    assert_eq!(config.limits["memory"], 512);
    assert_eq!(config.ports, vec![80, 443]);
    assert_eq!(
        config.database.into_inner(),
        DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            username: String::new(),
        }
    );
    assert_eq!(config.weights["b"], 1.5);
}

#[test]
fn test_complex_types_default_to_empty() {
    let config = ComplexConfig::from_lookup(lookup_from(&[])).unwrap();
    assert!(config.tags.is_empty());
    assert!(config.limits.is_empty());
    assert!(config.ports.is_empty());
    assert_eq!(*config.database, DatabaseConfig::default());
    assert!(config.weights.is_empty());
}

#[test]
fn test_structured_decode_error() {
    let err = ComplexConfig::from_lookup(lookup_from(&[("PORTS", "[80, https]")])).unwrap_err();
    assert!(err.to_string().contains("yaml"));
}

#[test]
fn test_raw_identifier_field() {
    let config = ConfigWithRawIdent::from_lookup(lookup_from(&[("TYPE", "fancy")])).unwrap();
    assert_eq!(config.r#type, "fancy");
}
