//! Inputs to the session reducer.
//!
//! User intents and completions of previously issued effects share one enum
//! so the reducer sees every state transition in one place.

use std::path::{Path, PathBuf};
use std::{fs, io};
use std::time::Instant;

use crate::api::{ApiError, ChatResponse, StatsResponse, UploadResponse};
use crate::session::state::EntryId;

/// A local file the user picked or dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl FileCandidate {
    /// Reads name and size from the filesystem.
    ///
    /// # Errors
    /// Returns an error if `path` cannot be stat'ed or is not a regular file.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let meta = fs::metadata(path)?;
        if !meta.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self {
            name,
            size: meta.len(),
            path: path.to_path_buf(),
        })
    }
}

#[derive(Debug)]
pub enum SessionEvent {
    /// Files chosen through a picker, a drop or the command line.
    SubmitFiles(Vec<FileCandidate>),
    /// The user pressed send.
    SendMessage(String),
    /// The user asked to clear the history; needs confirmation.
    RequestClear,
    /// Answer to the pending confirmation.
    Confirm(bool),
    RefreshStats,
    ToggleRetrieval,
    SetRetrieval(bool),
    /// Periodic clock used to expire notifications.
    Tick(Instant),

    UploadFinished {
        row_id: String,
        name: String,
        result: Result<UploadResponse, ApiError>,
    },
    ChatFinished {
        pending: EntryId,
        query: String,
        result: Result<ChatResponse, ApiError>,
    },
    ClearFinished(Result<(), ApiError>),
    StatsLoaded(Result<StatsResponse, ApiError>),
}
