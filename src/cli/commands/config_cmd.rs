//! config command - Get, set, or list configuration values

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::{Config, KEYS};
use crate::ui::output;

/// Get a configuration value. Unset keys print nothing.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let config = ctx.load_config()?;
    if let Some(value) = config.file.get(key)? {
        println!("{}", value);
    }
    Ok(())
}

/// Set a configuration value and write the file atomically.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.load_config()?;
    config.file.set(key, value)?;

    let path = ctx.config_write_path(&config)?;
    Config::write_atomic(&path, &config.file)
        .with_context(|| format!("Failed to write config to '{}'", path.display()))?;

    output::success(format!("Set {} = {}", key, value), ctx.verbosity);
    Ok(())
}

/// List all configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let config = ctx.load_config()?;

    match config.loaded_from() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no config file, defaults"),
    }
    for key in KEYS {
        let value = config.file.get(key)?;
        println!("{} = {}", key, value.as_deref().unwrap_or("(not set)"));
    }
    Ok(())
}
