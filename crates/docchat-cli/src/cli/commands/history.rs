//! Conversation history command.

use anyhow::{Context, Result};
use docchat_core::api::ChatbotClient;

pub async fn run(client: &ChatbotClient) -> Result<()> {
    let history = client.history().await.context("fetch history")?;
    if history.is_empty() {
        println!("No conversation history.");
        return Ok(());
    }

    for (i, record) in history.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("Q: {}", record.query);
        println!("A: {}", record.response);
        for source in &record.sources {
            let score = source
                .relevance_score
                .map_or_else(|| "N/A".to_string(), |s| s.to_string());
            println!("   - {} (score: {score})", source.file_name);
        }
    }
    Ok(())
}
