//! Client-side session coordinator.
//!
//! Holds uploaded files, the conversation and everything the user sees,
//! and decides which backend calls to make. Presentation layers send
//! [`SessionEvent`]s, execute the returned [`SessionEffect`]s and render
//! [`SessionState::view`].

mod effects;
mod events;
mod executor;
mod state;
mod update;
mod validate;
mod view;

pub use effects::SessionEffect;
pub use events::{FileCandidate, SessionEvent};
pub use executor::{drive, execute};
pub use state::{
    CLEARED_TEXT, Confirmation, ConversationTurn, EntryId, EntryKind, FileKind, FileRow,
    Notification, NotificationLevel, Notifications, SessionState, Transcript, TranscriptEntry,
    UploadStatus, UploadedFile, WELCOME_TEXT,
};
pub use update::{NETWORK_ERROR_REPLY, new_file_id, update};
pub use validate::{
    ALLOWED_EXTENSIONS, MAX_FILE_BYTES, ValidationError, extension_of, validate_file,
};
pub use view::{
    CharCounter, ConfirmView, CounterLevel, EntryRole, EntryView, FileRowView, MAX_MESSAGE_CHARS,
    NotificationView, SessionView, SourceView, StatsView, UPLOADING_LABEL, status_label,
};
