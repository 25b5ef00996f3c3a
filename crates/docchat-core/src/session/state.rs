//! Session state owned by the coordinator.
//!
//! Everything here is plain data; the reducer in `update.rs` is the only
//! place that mutates it.

use std::time::{Duration, Instant};

use crate::api::Source;

/// Text shown in an empty transcript before anything happened.
pub const WELCOME_TEXT: &str =
    "Welcome! Upload documents on the left, then ask me anything about them.";

/// Text shown in the transcript after the history was cleared.
pub const CLEARED_TEXT: &str = "Chat history cleared. Ask me anything about your documents!";

/// A document the backend accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    /// Client-generated `{millis}_{suffix}` id.
    pub id: String,
    pub name: String,
    /// Parser metadata returned by the backend; opaque.
    pub metadata: serde_json::Value,
    pub trace_id: Option<String>,
}

/// A completed question/answer exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub query: String,
    pub response: String,
    pub sources: Vec<Source>,
    pub trace_id: Option<String>,
}

/// Broad document family, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Word,
    PowerPoint,
    Csv,
    Text,
    Other,
}

impl FileKind {
    pub fn from_name(name: &str) -> Self {
        match super::validate::extension_of(name).as_str() {
            "pdf" => FileKind::Pdf,
            "docx" => FileKind::Word,
            "pptx" => FileKind::PowerPoint,
            "csv" => FileKind::Csv,
            "txt" | "md" => FileKind::Text,
            _ => FileKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Processing,
    Ready,
    Failed,
}

/// One row of the file list. Rows are never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub id: String,
    pub name: String,
    pub kind: FileKind,
    pub status: UploadStatus,
}

/// Stable handle of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum EntryKind {
    User,
    Bot { sources: Vec<Source> },
    /// Placeholder while an answer is pending.
    Thinking,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub id: EntryId,
    pub kind: EntryKind,
    pub text: String,
}

/// Visible chat transcript plus the placeholder shown when it is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    placeholder: Option<&'static str>,
    next_id: u64,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            placeholder: Some(WELCOME_TEXT),
            next_id: 0,
        }
    }
}

impl Transcript {
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.placeholder
    }

    pub fn hide_placeholder(&mut self) {
        self.placeholder = None;
    }

    /// Appends an entry and hides the placeholder.
    pub fn push(&mut self, kind: EntryKind, text: impl Into<String>) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.placeholder = None;
        self.entries.push(TranscriptEntry {
            id,
            kind,
            text: text.into(),
        });
        id
    }

    /// Replaces the entry `id` in place, or appends when it is gone.
    pub fn replace_or_push(&mut self, id: EntryId, kind: EntryKind, text: String) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.kind = kind;
            entry.text = text;
        } else {
            self.push(kind, text);
        }
    }

    /// Drops every entry and shows `placeholder`.
    pub fn reset(&mut self, placeholder: &'static str) {
        self.entries.clear();
        self.placeholder = Some(placeholder);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: Instant,
}

/// Transient toasts that expire after a fixed lifetime.
#[derive(Debug, Clone)]
pub struct Notifications {
    items: Vec<Notification>,
    ttl: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl,
        }
    }

    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.items.push(Notification {
            level,
            message: message.into(),
            created_at: Instant::now(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message);
    }

    /// Drops notifications older than the lifetime at `now`.
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items
            .retain(|n| now.saturating_duration_since(n.created_at) < ttl);
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}

/// A destructive action waiting for the user's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    ClearHistory,
}

/// Complete client-side session.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Successfully uploaded documents, in completion order.
    pub uploads: Vec<UploadedFile>,
    /// Successful exchanges since the last clear.
    pub conversation: Vec<ConversationTurn>,
    pub file_rows: Vec<FileRow>,
    pub transcript: Transcript,
    pub notifications: Notifications,
    /// Chunk count from the last successful stats call.
    pub chunk_count: u64,
    pub use_rag: bool,
    pub confirmation: Option<Confirmation>,
    /// Uploads issued but not yet answered.
    pub uploads_in_flight: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(true, Duration::from_secs(5))
    }
}

impl SessionState {
    pub fn new(use_rag: bool, notification_ttl: Duration) -> Self {
        Self {
            uploads: Vec::new(),
            conversation: Vec::new(),
            file_rows: Vec::new(),
            transcript: Transcript::default(),
            notifications: Notifications::new(notification_ttl),
            chunk_count: 0,
            use_rag,
            confirmation: None,
            uploads_in_flight: 0,
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.uploads_in_flight > 0
    }

    pub(crate) fn set_row_status(&mut self, row_id: &str, status: UploadStatus) {
        if let Some(row) = self.file_rows.iter_mut().find(|r| r.id == row_id) {
            row.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_from_extension() {
        assert_eq!(FileKind::from_name("a.PDF"), FileKind::Pdf);
        assert_eq!(FileKind::from_name("a.docx"), FileKind::Word);
        assert_eq!(FileKind::from_name("a.md"), FileKind::Text);
        assert_eq!(FileKind::from_name("noext"), FileKind::Other);
    }

    #[test]
    fn test_transcript_replace_keeps_position() {
        let mut t = Transcript::default();
        t.push(EntryKind::User, "q1");
        let pending = t.push(EntryKind::Thinking, "");
        t.push(EntryKind::User, "q2");

        t.replace_or_push(pending, EntryKind::Error, "boom".to_string());

        assert_eq!(t.entries()[1].kind, EntryKind::Error);
        assert_eq!(t.entries()[1].text, "boom");
        assert_eq!(t.entries().len(), 3);
    }

    #[test]
    fn test_transcript_reset_shows_placeholder() {
        let mut t = Transcript::default();
        assert_eq!(t.placeholder(), Some(WELCOME_TEXT));
        t.push(EntryKind::User, "hi");
        assert_eq!(t.placeholder(), None);

        t.reset(CLEARED_TEXT);
        assert!(t.entries().is_empty());
        assert_eq!(t.placeholder(), Some(CLEARED_TEXT));
    }

    #[test]
    fn test_notifications_expire_after_ttl() {
        let mut n = Notifications::new(Duration::from_secs(5));
        n.success("done");
        let created = n.items()[0].created_at;

        n.expire(created + Duration::from_secs(4));
        assert_eq!(n.items().len(), 1);

        n.expire(created + Duration::from_secs(5));
        assert!(n.items().is_empty());
    }
}
