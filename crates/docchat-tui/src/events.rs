//! Events consumed by the TUI reducer.

use docchat_core::session::SessionEvent;

#[derive(Debug)]
pub enum UiEvent {
    /// Frame clock; drives the spinner and notification expiry.
    Tick,
    Terminal(crossterm::event::Event),
    /// Completion of a backend call, posted through the inbox.
    Session(SessionEvent),
}
