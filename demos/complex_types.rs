//! Example demonstrating sequences, mappings and structured values

use envtag::{EnvTag, Yaml};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Default, Serialize, Deserialize)]
struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
}

impl DatabaseConfig {
    fn connection_string(&self) -> String {
        format!("{}:{} (user: {})", self.host, self.port, self.username)
    }
}

#[derive(Debug, EnvTag)]
struct Config {
    // Sequence kind: YAML or JSON list
    pub tags: Vec<String>,

    // Mapping kind: YAML or JSON object
    pub environment_vars: HashMap<String, String>,

    // Struct kind only converts with the YAML decoder
    #[env("decode=yaml")]
    pub database: Yaml<DatabaseConfig>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("TAGS", r#"["production","api","v2"]"#);
    std::env::set_var("ENVIRONMENT_VARS", "LOG_LEVEL: debug\nTIMEOUT: '30'\n");
    std::env::set_var(
        "DATABASE",
        r#"{"host":"localhost","port":5432,"username":"admin"}"#,
    );

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Tags: {:?}", config.tags);
    println!("  Environment Variables: {:?}", config.environment_vars);
    println!("  Database: {}", config.database.connection_string());

    Ok(())
}
