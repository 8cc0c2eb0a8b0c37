//! Example demonstrating allowed options and error reporting

use envtag::EnvTag;

#[derive(Debug, EnvTag)]
struct Config {
    #[env("default=info options=debug,info,warn,error")]
    pub log_level: String,

    #[env("key=APP_REPLICAS options=1,3,5 default=1")]
    pub replicas: u8,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("LOG_LEVEL", "warn");
    std::env::set_var("APP_REPLICAS", "3");

    let config = Config::from_env()?;
    println!("Configuration loaded: {config:?}");

    // A value outside the allowed options is rejected
    std::env::set_var("LOG_LEVEL", "verbose");
    match Config::from_env() {
        Ok(config) => println!("Unexpectedly accepted: {config:?}"),
        Err(e) => println!("Rejected: {e}"),
    }

    Ok(())
}
