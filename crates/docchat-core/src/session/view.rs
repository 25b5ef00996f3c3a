//! Read-only projection of the session for presentation layers.
//!
//! Everything a renderer needs is derived here so the TUI and CLI print the
//! same labels.

use crate::api::Source;
use crate::session::state::{
    Confirmation, EntryKind, FileKind, NotificationLevel, SessionState, UploadStatus,
};

/// Character limit of the message input.
pub const MAX_MESSAGE_CHARS: usize = 500;

const COUNTER_WARNING_ABOVE: usize = 400;
const COUNTER_CRITICAL_ABOVE: usize = 450;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    Warning,
    Critical,
}

/// `N/500` counter below the input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharCounter {
    pub count: usize,
    pub level: CounterLevel,
}

impl CharCounter {
    pub fn for_draft(draft: &str) -> Self {
        let count = draft.chars().count();
        let level = if count > COUNTER_CRITICAL_ABOVE {
            CounterLevel::Critical
        } else if count > COUNTER_WARNING_ABOVE {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        };
        Self { count, level }
    }

    pub fn label(&self) -> String {
        format!("{}/{MAX_MESSAGE_CHARS}", self.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub name: String,
    pub kind: FileKind,
    pub status: UploadStatus,
    pub status_label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsView {
    pub documents: usize,
    pub chunks: u64,
    pub conversations: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceView {
    pub file_name: String,
    pub kind: FileKind,
    /// Score as reported, or `N/A` when absent.
    pub score: String,
}

impl SourceView {
    fn from_source(source: &Source) -> Self {
        let kind = source
            .file_type
            .as_deref()
            .map_or_else(|| FileKind::from_name(&source.file_name), |t| {
                FileKind::from_name(&format!(".{}", t.trim_start_matches('.')))
            });
        Self {
            file_name: source.file_name.clone(),
            kind,
            score: source
                .relevance_score
                .map_or_else(|| "N/A".to_string(), |s| s.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRole {
    User,
    Bot,
    Thinking,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub role: EntryRole,
    pub text: String,
    pub sources: Vec<SourceView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmView {
    pub title: &'static str,
    pub prompt: &'static str,
}

/// Snapshot of everything visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub files: Vec<FileRowView>,
    pub stats: StatsView,
    pub placeholder: Option<&'static str>,
    pub entries: Vec<EntryView>,
    pub notifications: Vec<NotificationView>,
    pub confirm: Option<ConfirmView>,
    pub use_rag: bool,
    /// Label of the blocking progress indicator, if any upload is running.
    pub busy: Option<&'static str>,
}

pub const UPLOADING_LABEL: &str = "Uploading and processing document...";

pub fn status_label(status: UploadStatus) -> &'static str {
    match status {
        UploadStatus::Processing => "Processing...",
        UploadStatus::Ready => "Ready",
        UploadStatus::Failed => "Error",
    }
}

impl SessionState {
    /// Document and conversation counts come from local state; chunks from
    /// the last stats call.
    pub fn stats(&self) -> StatsView {
        StatsView {
            documents: self.uploads.len(),
            chunks: self.chunk_count,
            conversations: self.conversation.len(),
        }
    }

    pub fn view(&self) -> SessionView {
        let files = self
            .file_rows
            .iter()
            .map(|row| FileRowView {
                name: row.name.clone(),
                kind: row.kind,
                status: row.status,
                status_label: status_label(row.status),
            })
            .collect();

        let entries = self
            .transcript
            .entries()
            .iter()
            .map(|entry| {
                let (role, sources) = match &entry.kind {
                    EntryKind::User => (EntryRole::User, Vec::new()),
                    EntryKind::Bot { sources } => (
                        EntryRole::Bot,
                        sources.iter().map(SourceView::from_source).collect(),
                    ),
                    EntryKind::Thinking => (EntryRole::Thinking, Vec::new()),
                    EntryKind::Error => (EntryRole::Error, Vec::new()),
                };
                EntryView {
                    role,
                    text: entry.text.clone(),
                    sources,
                }
            })
            .collect();

        let notifications = self
            .notifications
            .items()
            .iter()
            .map(|n| NotificationView {
                level: n.level,
                message: n.message.clone(),
            })
            .collect();

        let confirm = self.confirmation.map(|c| match c {
            Confirmation::ClearHistory => ConfirmView {
                title: "Clear history",
                prompt: "Are you sure you want to clear the chat history?",
            },
        });

        SessionView {
            files,
            stats: self.stats(),
            placeholder: self.transcript.placeholder(),
            entries,
            notifications,
            confirm,
            use_rag: self.use_rag,
            busy: self.is_uploading().then_some(UPLOADING_LABEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::state::{ConversationTurn, EntryKind, UploadedFile};

    #[test]
    fn test_counter_thresholds() {
        assert_eq!(CharCounter::for_draft("").label(), "0/500");
        assert_eq!(
            CharCounter::for_draft(&"a".repeat(400)).level,
            CounterLevel::Normal
        );
        assert_eq!(
            CharCounter::for_draft(&"a".repeat(401)).level,
            CounterLevel::Warning
        );
        assert_eq!(
            CharCounter::for_draft(&"a".repeat(450)).level,
            CounterLevel::Warning
        );
        assert_eq!(
            CharCounter::for_draft(&"a".repeat(451)).level,
            CounterLevel::Critical
        );
    }

    #[test]
    fn test_counter_counts_chars_not_bytes() {
        assert_eq!(CharCounter::for_draft("héllo").count, 5);
    }

    #[test]
    fn test_source_score_labels() {
        let with_score = Source {
            file_name: "a.pdf".to_string(),
            relevance_score: Some(0.873),
            file_type: None,
        };
        let zero = Source {
            relevance_score: Some(0.0),
            ..with_score.clone()
        };
        let missing = Source {
            relevance_score: None,
            ..with_score.clone()
        };

        assert_eq!(SourceView::from_source(&with_score).score, "0.873");
        assert_eq!(SourceView::from_source(&zero).score, "0");
        assert_eq!(SourceView::from_source(&missing).score, "N/A");
    }

    #[test]
    fn test_source_kind_prefers_file_type() {
        let source = Source {
            file_name: "unknown".to_string(),
            relevance_score: None,
            file_type: Some("pptx".to_string()),
        };
        assert_eq!(SourceView::from_source(&source).kind, FileKind::PowerPoint);
    }

    #[test]
    fn test_stats_derive_from_local_lists() {
        let mut state = SessionState::default();
        state.uploads.push(UploadedFile {
            id: "1_abc".to_string(),
            name: "a.pdf".to_string(),
            metadata: serde_json::Value::Null,
            trace_id: None,
        });
        state.conversation.push(ConversationTurn {
            query: "q".to_string(),
            response: "r".to_string(),
            sources: vec![],
            trace_id: None,
        });
        state.chunk_count = 7;

        assert_eq!(
            state.stats(),
            StatsView {
                documents: 1,
                chunks: 7,
                conversations: 1
            }
        );
    }

    #[test]
    fn test_view_reports_busy_and_confirm() {
        let mut state = SessionState::default();
        assert_eq!(state.view().busy, None);
        assert_eq!(state.view().confirm, None);

        state.uploads_in_flight = 2;
        state.confirmation = Some(Confirmation::ClearHistory);
        state.transcript.push(EntryKind::Thinking, "");

        let view = state.view();
        assert_eq!(view.busy, Some(UPLOADING_LABEL));
        assert!(view.confirm.is_some());
        assert_eq!(view.entries[0].role, EntryRole::Thinking);
        assert_eq!(view.placeholder, None);
    }
}
