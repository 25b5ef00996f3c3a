//! `docchat config` subcommands.

use anyhow::{Context, Result};
use docchat_core::config::{Config, SERVER_URL_ENV, paths};

/// Prints where docchat keeps its settings and logs.
pub fn path() {
    println!("config: {}", paths::config_path().display());
    println!("logs:   {}", paths::logs_dir().display());
}

/// Writes the commented default config, refusing to overwrite one.
pub fn init() -> Result<()> {
    let target = paths::config_path();
    Config::init(&target)
        .with_context(|| format!("write default config to {}", target.display()))?;

    println!("Created config at {}", target.display());
    println!("Set server_url there, or export {SERVER_URL_ENV}, to point at your backend.");
    Ok(())
}
