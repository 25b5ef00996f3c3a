//! One-shot upload command.

use std::path::PathBuf;

use anyhow::Result;
use docchat_core::api::ChatbotClient;
use docchat_core::config::Config;
use docchat_core::session::{FileCandidate, SessionEvent, drive};

/// Uploads all files concurrently; fails if any file was rejected or failed.
pub async fn run(client: &ChatbotClient, config: &Config, files: &[PathBuf]) -> Result<()> {
    let mut session = super::new_session(config);

    let mut candidates = Vec::with_capacity(files.len());
    let mut unreadable = 0;
    for path in files {
        match FileCandidate::from_path(path) {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => {
                eprintln!("✗ Cannot read {}: {e}", path.display());
                unreadable += 1;
            }
        }
    }

    if !candidates.is_empty() {
        drive(&mut session, client, SessionEvent::SubmitFiles(candidates)).await;
    }

    let failed = super::print_notifications(&session) + unreadable;
    println!();
    super::print_stats(&session.view().stats);

    if failed > 0 {
        anyhow::bail!("{failed} of {} file(s) failed", files.len());
    }
    Ok(())
}
