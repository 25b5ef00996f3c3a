//! TUI runtime: owns the terminal, runs the event loop and executes effects.
//!
//! Backend calls run on their own tokio tasks and post their completion
//! into the inbox channel, which the loop drains every frame. Nothing is
//! awaited on the loop itself so rendering never stalls behind a request.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use docchat_core::api::ChatbotClient;
use docchat_core::config::Config;
use docchat_core::session::{self, SessionEffect, SessionEvent};
use tokio::sync::mpsc;
use tokio::task;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::{self, Tui};
use crate::{render, update};

/// Frame cadence while a request is running or the user is typing.
const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Frame cadence when idle; still short enough to expire notifications.
const IDLE_POLL_DURATION: Duration = Duration::from_millis(250);

pub struct TuiRuntime {
    terminal: Tui,
    state: AppState,
    client: ChatbotClient,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Enters the alternate screen and builds the initial state.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(config: &Config) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state: AppState::new(config),
            client: ChatbotClient::new(config.server_url.clone()),
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs until the user quits.
    ///
    /// # Errors
    /// Returns an error if reading terminal events or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(server = %self.state.server_url, "interactive session started");
        self.dispatch(UiEvent::Session(SessionEvent::RefreshStats));

        let mut dirty = true;
        while !self.state.should_quit {
            let events = self.collect_events()?;
            if !events.is_empty() {
                dirty = true;
            }
            for event in events {
                self.dispatch(event);
            }

            if dirty {
                self.terminal
                    .draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        tracing::info!("interactive session ended");
        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let busy = self.state.session.is_uploading()
            || self
                .state
                .session
                .transcript
                .entries()
                .iter()
                .any(|e| e.kind == session::EntryKind::Thinking);
        let tick_interval = if busy {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn dispatch(&mut self, event: UiEvent) {
        for effect in update::update(&mut self.state, event) {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&self, effect: UiEffect) {
        match effect {
            UiEffect::Session(effect) => self.spawn_session_effect(effect),
            UiEffect::PersistRetrieval { use_rag } => {
                task::spawn_blocking(move || {
                    if let Err(e) = Config::save_use_rag(use_rag) {
                        tracing::warn!(error = %format!("{e:#}"), "failed to persist use_rag");
                    }
                });
            }
        }
    }

    fn spawn_session_effect(&self, effect: SessionEffect) {
        let client = self.client.clone();
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let done = session::execute(&client, effect).await;
            let _ = tx.send(UiEvent::Session(done));
        });
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
