//! Core library for docchat: backend client, configuration, logging and
//! the session coordinator shared by the TUI and the one-shot commands.

pub mod api;
pub mod config;
pub mod logging;
pub mod session;
