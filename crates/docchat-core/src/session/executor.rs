//! Effect execution against a live backend.

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use tokio::fs;

use crate::api::{ApiError, ChatbotClient};
use crate::session::effects::SessionEffect;
use crate::session::events::SessionEvent;
use crate::session::state::SessionState;
use crate::session::update::update;

/// Runs one effect and returns the completion event for the reducer.
pub async fn execute(client: &ChatbotClient, effect: SessionEffect) -> SessionEvent {
    match effect {
        SessionEffect::Upload { row_id, file } => {
            let result = match fs::read(&file.path).await {
                Ok(bytes) => client.upload(&file.name, bytes).await,
                Err(source) => Err(ApiError::File {
                    path: file.path.display().to_string(),
                    source,
                }),
            };
            SessionEvent::UploadFinished {
                row_id,
                name: file.name,
                result,
            }
        }
        SessionEffect::Chat {
            pending,
            message,
            use_rag,
        } => {
            let result = client.chat(&message, use_rag).await;
            SessionEvent::ChatFinished {
                pending,
                query: message,
                result,
            }
        }
        SessionEffect::Clear => SessionEvent::ClearFinished(client.clear().await),
        SessionEffect::FetchStats => SessionEvent::StatsLoaded(client.stats().await),
    }
}

/// Applies `event` and keeps executing the resulting effects, concurrently,
/// until the session is idle again.
///
/// Used by the one-shot CLI commands and tests; the TUI runtime schedules
/// effects itself so it can keep rendering.
pub async fn drive(state: &mut SessionState, client: &ChatbotClient, event: SessionEvent) {
    let mut in_flight = FuturesUnordered::new();
    for effect in update(state, event) {
        in_flight.push(execute(client, effect));
    }

    while let Some(done) = in_flight.next().await {
        for effect in update(state, done) {
            in_flight.push(execute(client, effect));
        }
    }
}
