//! TUI state: the session plus everything that only exists on screen.

use docchat_core::config::Config;
use docchat_core::session::SessionState;

use crate::input::InputBuffer;

#[derive(Debug)]
pub struct AppState {
    pub session: SessionState,
    pub input: InputBuffer,
    /// Lines scrolled up from the bottom of the transcript; 0 follows output.
    pub scroll_offset: u16,
    pub server_url: String,
    /// One-line feedback for slash commands, cleared on the next key.
    pub hint: Option<String>,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            session: SessionState::new(config.use_rag, config.notification_ttl()),
            input: InputBuffer::default(),
            scroll_offset: 0,
            server_url: config.server_url.clone(),
            hint: None,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }
}
