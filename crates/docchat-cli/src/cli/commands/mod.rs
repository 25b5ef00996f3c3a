//! CLI command handlers.

pub mod ask;
pub mod chat;
pub mod clear;
pub mod config;
pub mod history;
pub mod stats;
pub mod upload;

use docchat_core::config::Config;
use docchat_core::session::{NotificationLevel, SessionState, SourceView, StatsView};

/// Fresh session seeded from config.
fn new_session(config: &Config) -> SessionState {
    SessionState::new(config.use_rag, config.notification_ttl())
}

/// Prints notifications: successes to stdout, errors to stderr.
/// Returns the number of errors.
fn print_notifications(session: &SessionState) -> usize {
    let mut errors = 0;
    for notification in session.notifications.items() {
        match notification.level {
            NotificationLevel::Success => println!("✓ {}", notification.message),
            NotificationLevel::Error => {
                errors += 1;
                eprintln!("✗ {}", notification.message);
            }
        }
    }
    errors
}

fn print_sources(sources: &[SourceView]) {
    if sources.is_empty() {
        return;
    }
    println!();
    println!("Sources:");
    for source in sources {
        println!("  - {} (score: {})", source.file_name, source.score);
    }
}

fn print_stats(stats: &StatsView) {
    println!("Documents:     {}", stats.documents);
    println!("Conversations: {}", stats.conversations);
    println!("Chunks:        {}", stats.chunks);
}
