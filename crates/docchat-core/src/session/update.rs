//! Session reducer.
//!
//! `update(state, event)` applies one event and returns the backend calls to
//! issue next. It performs no I/O.

use crate::api::{ApiError, ChatResponse};
use crate::session::effects::SessionEffect;
use crate::session::events::{FileCandidate, SessionEvent};
use crate::session::state::{
    CLEARED_TEXT, Confirmation, ConversationTurn, EntryId, EntryKind, FileKind, FileRow,
    SessionState, UploadStatus, UploadedFile,
};
use crate::session::validate::validate_file;

pub const NETWORK_ERROR_REPLY: &str = "Network error. Please try again.";

pub fn update(state: &mut SessionState, event: SessionEvent) -> Vec<SessionEffect> {
    match event {
        SessionEvent::SubmitFiles(files) => submit_files(state, files),
        SessionEvent::SendMessage(text) => send_message(state, &text),
        SessionEvent::RequestClear => {
            state.confirmation = Some(Confirmation::ClearHistory);
            vec![]
        }
        SessionEvent::Confirm(accepted) => match state.confirmation.take() {
            Some(Confirmation::ClearHistory) if accepted => vec![SessionEffect::Clear],
            _ => vec![],
        },
        SessionEvent::RefreshStats => vec![SessionEffect::FetchStats],
        SessionEvent::ToggleRetrieval => {
            state.use_rag = !state.use_rag;
            vec![]
        }
        SessionEvent::SetRetrieval(on) => {
            state.use_rag = on;
            vec![]
        }
        SessionEvent::Tick(now) => {
            state.notifications.expire(now);
            vec![]
        }
        SessionEvent::UploadFinished {
            row_id,
            name,
            result,
        } => {
            state.uploads_in_flight = state.uploads_in_flight.saturating_sub(1);
            match result {
                Ok(response) => {
                    state.set_row_status(&row_id, UploadStatus::Ready);
                    state.uploads.push(UploadedFile {
                        id: row_id,
                        name: name.clone(),
                        metadata: response.metadata,
                        trace_id: response.trace_id,
                    });
                    state
                        .notifications
                        .success(format!("Successfully processed {name}"));
                    vec![SessionEffect::FetchStats]
                }
                Err(err) => {
                    state.set_row_status(&row_id, UploadStatus::Failed);
                    tracing::error!(file = %name, error = %err, "upload failed");
                    let message = if err.is_status() {
                        format!("Error processing {name}: {err}")
                    } else {
                        format!("Network error uploading {name}")
                    };
                    state.notifications.error(message);
                    vec![]
                }
            }
        }
        SessionEvent::ChatFinished {
            pending,
            query,
            result,
        } => chat_finished(state, pending, query, result),
        SessionEvent::ClearFinished(result) => match result {
            Ok(()) => {
                state.conversation.clear();
                state.transcript.reset(CLEARED_TEXT);
                state.notifications.success("Chat history cleared");
                vec![SessionEffect::FetchStats]
            }
            Err(err) => {
                tracing::error!(error = %err, "clearing history failed");
                if err.is_status() {
                    state.notifications.error("Error clearing chat history");
                } else {
                    state.notifications.error("Network error");
                }
                vec![]
            }
        },
        SessionEvent::StatsLoaded(result) => {
            match result {
                Ok(stats) => state.chunk_count = stats.chunk_count(),
                Err(err) => tracing::warn!(error = %err, "stats refresh failed"),
            }
            vec![]
        }
    }
}

fn submit_files(state: &mut SessionState, files: Vec<FileCandidate>) -> Vec<SessionEffect> {
    let mut effects = Vec::new();
    for file in files {
        if let Err(reason) = validate_file(&file.name, file.size) {
            tracing::info!(file = %file.name, %reason, "file rejected");
            state.notifications.error(reason.to_string());
            continue;
        }

        let row_id = new_file_id();
        state.file_rows.push(FileRow {
            id: row_id.clone(),
            name: file.name.clone(),
            kind: FileKind::from_name(&file.name),
            status: UploadStatus::Processing,
        });
        state.transcript.hide_placeholder();
        state.uploads_in_flight += 1;
        effects.push(SessionEffect::Upload { row_id, file });
    }
    effects
}

fn send_message(state: &mut SessionState, text: &str) -> Vec<SessionEffect> {
    let message = text.trim();
    if message.is_empty() {
        return vec![];
    }

    state.transcript.push(EntryKind::User, message);
    let pending = state.transcript.push(EntryKind::Thinking, "");
    vec![SessionEffect::Chat {
        pending,
        message: message.to_string(),
        use_rag: state.use_rag,
    }]
}

fn chat_finished(
    state: &mut SessionState,
    pending: EntryId,
    query: String,
    result: Result<ChatResponse, ApiError>,
) -> Vec<SessionEffect> {
    match result {
        Ok(answer) => {
            state.transcript.replace_or_push(
                pending,
                EntryKind::Bot {
                    sources: answer.sources.clone(),
                },
                answer.response.clone(),
            );
            state.conversation.push(ConversationTurn {
                query,
                response: answer.response,
                sources: answer.sources,
                trace_id: answer.trace_id,
            });
            vec![SessionEffect::FetchStats]
        }
        Err(err) => {
            tracing::error!(error = %err, "chat failed");
            let (reply, toast) = if err.is_status() {
                (format!("Error: {err}"), "Error processing message")
            } else {
                (NETWORK_ERROR_REPLY.to_string(), "Network error")
            };
            state
                .transcript
                .replace_or_push(pending, EntryKind::Error, reply);
            state.notifications.error(toast);
            vec![]
        }
    }
}

/// `{unix millis}_{9 random alphanumerics}`; unique within a session.
pub fn new_file_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{millis}_{}", &suffix[..9])
}
