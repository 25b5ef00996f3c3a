//! Statistics command.
//!
//! Documents and conversations are counted by the client session, so a
//! one-shot invocation reports zero for both. Backend figures are labelled
//! separately.

use anyhow::{Context, Result};
use docchat_core::api::ChatbotClient;
use docchat_core::config::Config;
use docchat_core::session::{SessionEvent, update};

pub async fn run(client: &ChatbotClient, config: &Config) -> Result<()> {
    // Fetched here rather than through `drive` so a failure is reported
    // instead of only logged.
    let stats = client.stats().await.context("fetch stats")?;

    let mut session = super::new_session(config);
    update(&mut session, SessionEvent::StatsLoaded(Ok(stats.clone())));
    super::print_stats(&session.view().stats);

    if let Some(count) = stats.conversation_count {
        println!("Backend conversations: {count}");
    }
    if let Some(store) = &stats.vector_store {
        if let Some(dimension) = store.dimension {
            println!("Dimension:     {dimension}");
        }
        if let Some(model) = &store.model_name {
            println!("Model:         {model}");
        }
    }
    Ok(())
}
