//! Backend calls requested by the reducer.
//!
//! The reducer never performs I/O. It returns these and whoever drives the
//! session (the TUI runtime or [`super::drive`]) executes them and feeds the
//! completion back as a [`super::SessionEvent`].

use crate::session::events::FileCandidate;
use crate::session::state::EntryId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Read `file` from disk and upload it.
    Upload { row_id: String, file: FileCandidate },
    Chat {
        pending: EntryId,
        message: String,
        use_rag: bool,
    },
    Clear,
    FetchStats,
}
