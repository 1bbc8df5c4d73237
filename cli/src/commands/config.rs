//! Config commands

use anyhow::bail;

use crate::config::Config;
use crate::output::OutputFormat;
use crate::ConfigCommands;

const NOT_SET: &str = "(not set)";

pub fn handle(action: ConfigCommands, profile: Option<&str>) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Init => {
            let path = Config::default().save(profile)?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(profile)?;
            match key.as_str() {
                "default_format" => {
                    if OutputFormat::parse(&value).is_none() {
                        bail!("Unknown output format: {} (expected table, json or yaml)", value);
                    }
                    config.default_format = Some(value.to_lowercase());
                }
                "log_filter" => config.log_filter = Some(value),
                _ => bail!("Unknown config key: {}", key),
            }
            config.save(profile)?;
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(profile)?;
            let value = match key.as_str() {
                "default_format" => config.default_format,
                "log_filter" => config.log_filter,
                _ => bail!("Unknown config key: {}", key),
            };
            println!("{}: {}", key, value.unwrap_or_else(|| NOT_SET.into()));
        }
        ConfigCommands::List => {
            let config = Config::load(profile)?;
            println!("default_format: {}", config.default_format.unwrap_or_else(|| NOT_SET.into()));
            println!("log_filter: {}", config.log_filter.unwrap_or_else(|| NOT_SET.into()));
        }
    }
    Ok(())
}
