//! Full-screen terminal UI for docchat.

pub mod effects;
pub mod events;
pub mod input;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use docchat_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive session until the user quits.
///
/// Must be called from within a multi-threaded tokio runtime; backend calls
/// are spawned onto it while this thread drives the terminal.
///
/// # Errors
/// Returns an error if stderr is not a terminal or the terminal fails.
pub fn run_interactive(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Interactive mode requires a terminal.\n\
             Use `docchat ask '...'` or `docchat upload <FILE>` instead."
        );
    }

    let mut runtime = TuiRuntime::new(config)?;
    runtime.run()
}
