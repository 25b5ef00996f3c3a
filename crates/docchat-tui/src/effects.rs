//! Effects returned by the TUI reducer.
//!
//! The reducer only mutates state; the runtime performs the I/O these
//! describe and posts results back through the inbox.

use docchat_core::session::SessionEffect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// A backend call requested by the session coordinator.
    Session(SessionEffect),
    /// Write the retrieval toggle to the config file.
    PersistRetrieval { use_rag: bool },
}
