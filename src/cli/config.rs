//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "resolver.live_lookup")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        println!("{}", Config::config_path()?.display());
        return Ok(());
    }

    if args.reset {
        Config::default().save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (args.key.as_deref(), args.value.as_deref()) {
        (None, None) => show_all_config(&config),

        (Some(key), None) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => {
                return Err(Error::Config(format!(
                    "Unknown config key: {} (available: {})",
                    key,
                    Config::available_keys().join(", ")
                )));
            }
        },

        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".to_string()));
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[api]");
    println!("base_url = \"{}\"", config.api.base_url);
    println!("timeout_secs = {}", config.api.timeout_secs);
    println!();

    println!("[resolver]");
    println!("live_lookup = {}", config.resolver.live_lookup);
    println!("geocode_ttl_secs = {}", config.resolver.geocode_ttl_secs);
    println!();

    println!("[station]");
    println!("ttl_secs = {}", config.station.ttl_secs);
    println!();

    println!("[cache]");
    if config.cache.dir.is_empty() {
        match config.cache_dir() {
            Ok(dir) => println!("dir = \"\" # {}", dir.display()),
            Err(_) => println!("dir = \"\""),
        }
    } else {
        println!("dir = \"{}\"", config.cache.dir);
    }
    println!();

    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
}
