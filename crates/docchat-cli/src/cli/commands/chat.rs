//! Interactive TUI command.

use anyhow::Result;
use docchat_core::config::Config;

pub fn run(config: &Config) -> Result<()> {
    docchat_tui::run_interactive(config)
}
