//! Clear-history command.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use docchat_core::api::ChatbotClient;
use docchat_core::config::Config;
use docchat_core::session::{NotificationLevel, SessionEvent, drive};

pub async fn run(client: &ChatbotClient, config: &Config, yes: bool) -> Result<()> {
    let mut session = super::new_session(config);
    drive(&mut session, client, SessionEvent::RequestClear).await;

    let confirmed = if yes {
        true
    } else {
        let prompt = session
            .view()
            .confirm
            .map_or("Clear the chat history?", |c| c.prompt);
        ask_yes_no(prompt)?
    };

    drive(&mut session, client, SessionEvent::Confirm(confirmed)).await;
    if !confirmed {
        println!("Cancelled.");
        return Ok(());
    }

    match session.notifications.items().last() {
        Some(n) if n.level == NotificationLevel::Success => {
            println!("{}", n.message);
            Ok(())
        }
        Some(n) => anyhow::bail!("{}", n.message),
        None => anyhow::bail!("No response from backend"),
    }
}

/// Reads one line from stdin; only `y`/`yes` confirms.
fn ask_yes_no(prompt: &str) -> Result<bool> {
    eprint!("{prompt} [y/N] ");
    io::stderr().flush().context("flush prompt")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("read confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
