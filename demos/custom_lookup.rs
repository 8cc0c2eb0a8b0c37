//! Example resolving fields from a custom key/value source

use envtag::{EnvTag, TargetType, Var};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, EnvTag)]
struct Config {
    #[env("required")]
    pub service_name: String,

    #[env("default=250ms")]
    pub poll_interval: Duration,
}

fn main() -> anyhow::Result<()> {
    let source: HashMap<&str, &str> =
        HashMap::from([("SERVICE_NAME", "billing"), ("POLL_INTERVAL", "2s")]);
    let lookup = |key: &str| source.get(key).map(|v| v.to_string());

    // Derived driver over a custom source
    let config = Config::from_lookup(lookup)?;
    println!("Configuration loaded: {config:?}");

    // Runtime API, one field at a time
    let var = Var::resolve("workers", TargetType::of::<u32>(), "default=4", lookup)?;
    println!("{} = {}", var.key(), var.value());

    Ok(())
}
