//! One-shot question command.

use anyhow::Result;
use docchat_core::api::ChatbotClient;
use docchat_core::config::Config;
use docchat_core::session::{EntryRole, SessionEvent, drive};

pub async fn run(
    client: &ChatbotClient,
    config: &Config,
    message: &str,
    use_rag: bool,
) -> Result<()> {
    if message.trim().is_empty() {
        eprintln!("Nothing to send: the message is empty.");
        return Ok(());
    }

    let mut session = super::new_session(config);
    session.use_rag = use_rag;
    drive(&mut session, client, SessionEvent::SendMessage(message.to_string())).await;

    let view = session.view();
    let Some(answer) = view.entries.last() else {
        anyhow::bail!("No answer received");
    };

    match answer.role {
        EntryRole::Bot => {
            println!("{}", answer.text);
            super::print_sources(&answer.sources);
            Ok(())
        }
        _ => anyhow::bail!("{}", answer.text),
    }
}
