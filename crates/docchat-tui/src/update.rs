//! TUI reducer.
//!
//! Translates key presses and pastes into session events, forwards session
//! completions to the coordinator and collects the effects for the runtime.

use std::path::PathBuf;
use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use docchat_core::session::{self, FileCandidate, SessionEvent};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::input::{self, Command};
use crate::state::AppState;

/// Lines moved per PageUp/PageDown.
const PAGE_SCROLL: u16 = 10;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            dispatch(app, SessionEvent::Tick(Instant::now()))
        }
        UiEvent::Terminal(Event::Key(key)) => handle_key(app, key),
        UiEvent::Terminal(Event::Paste(text)) => handle_paste(app, &text),
        UiEvent::Terminal(_) => vec![],
        UiEvent::Session(event) => dispatch(app, event),
    }
}

/// Runs the session reducer and wraps its effects.
fn dispatch(app: &mut AppState, event: SessionEvent) -> Vec<UiEffect> {
    session::update(&mut app.session, event)
        .into_iter()
        .map(UiEffect::Session)
        .collect()
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind == KeyEventKind::Release {
        return vec![];
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    if ctrl && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return vec![];
    }

    if app.session.confirmation.is_some() {
        return match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => dispatch(app, SessionEvent::Confirm(true)),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => dispatch(app, SessionEvent::Confirm(false)),
            _ => vec![],
        };
    }

    app.hint = None;
    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            vec![]
        }
        KeyCode::Enter if alt || key.modifiers.contains(KeyModifiers::SHIFT) => {
            app.input.insert_char('\n');
            vec![]
        }
        KeyCode::Enter => submit(app),
        KeyCode::Char('t') if ctrl => set_retrieval(app, None),
        KeyCode::Char('l') if ctrl => dispatch(app, SessionEvent::RequestClear),
        KeyCode::F(5) => dispatch(app, SessionEvent::RefreshStats),
        KeyCode::PageUp => {
            app.scroll_up(PAGE_SCROLL);
            vec![]
        }
        KeyCode::PageDown => {
            app.scroll_down(PAGE_SCROLL);
            vec![]
        }
        KeyCode::Up => {
            app.scroll_up(1);
            vec![]
        }
        KeyCode::Down => {
            app.scroll_down(1);
            vec![]
        }
        KeyCode::Char(ch) if !ctrl && !alt => {
            app.input.insert_char(ch);
            vec![]
        }
        KeyCode::Backspace => {
            app.input.backspace();
            vec![]
        }
        KeyCode::Delete => {
            app.input.delete();
            vec![]
        }
        KeyCode::Left => {
            app.input.move_left();
            vec![]
        }
        KeyCode::Right => {
            app.input.move_right();
            vec![]
        }
        KeyCode::Home => {
            app.input.move_home();
            vec![]
        }
        KeyCode::End => {
            app.input.move_end();
            vec![]
        }
        _ => vec![],
    }
}

fn handle_paste(app: &mut AppState, text: &str) -> Vec<UiEffect> {
    if app.session.confirmation.is_some() {
        return vec![];
    }
    if let Some(paths) = input::dropped_paths(text) {
        return submit_paths(app, paths);
    }
    app.input.insert_str(text);
    vec![]
}

fn submit(app: &mut AppState) -> Vec<UiEffect> {
    if app.input.is_blank() {
        return vec![];
    }
    let text = app.input.take();
    app.scroll_offset = 0;

    let Some(command) = input::parse_command(&text) else {
        return dispatch(app, SessionEvent::SendMessage(text));
    };

    match command {
        Command::Upload(paths) if paths.is_empty() => {
            app.hint = Some("Usage: /upload <path>...".to_string());
            vec![]
        }
        Command::Upload(paths) => submit_paths(app, paths),
        Command::Clear => dispatch(app, SessionEvent::RequestClear),
        Command::Stats => dispatch(app, SessionEvent::RefreshStats),
        Command::Rag(value) => set_retrieval(app, value),
        Command::Quit => {
            app.should_quit = true;
            vec![]
        }
        Command::Help => {
            app.hint = Some(input::HELP_TEXT.to_string());
            vec![]
        }
        Command::Unknown(raw) => {
            app.hint = Some(format!("Unknown command: {raw}"));
            vec![]
        }
    }
}

/// Stats each path; unreadable ones are reported and skipped.
fn submit_paths(app: &mut AppState, paths: Vec<PathBuf>) -> Vec<UiEffect> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match FileCandidate::from_path(&path) {
            Ok(file) => files.push(file),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot read dropped file");
                app.session
                    .notifications
                    .error(format!("Cannot read {}: {err}", path.display()));
            }
        }
    }
    if files.is_empty() {
        return vec![];
    }
    dispatch(app, SessionEvent::SubmitFiles(files))
}

/// `None` toggles.
fn set_retrieval(app: &mut AppState, value: Option<bool>) -> Vec<UiEffect> {
    let event = match value {
        Some(on) => SessionEvent::SetRetrieval(on),
        None => SessionEvent::ToggleRetrieval,
    };
    let mut effects = dispatch(app, event);
    effects.push(UiEffect::PersistRetrieval {
        use_rag: app.session.use_rag,
    });
    effects
}

#[cfg(test)]
mod tests {
    use std::fs;

    use docchat_core::config::Config;
    use docchat_core::session::{Confirmation, EntryKind, SessionEffect, UploadStatus};
    use tempfile::tempdir;

    use super::*;

    fn app() -> AppState {
        AppState::new(&Config::default())
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(ch: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::CONTROL,
        )))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            update(app, key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn test_enter_sends_message() {
        let mut app = app();
        type_text(&mut app, "hello");
        let effects = update(&mut app, key(KeyCode::Enter));

        assert!(matches!(
            effects.as_slice(),
            [UiEffect::Session(SessionEffect::Chat { message, use_rag: true, .. })] if message == "hello"
        ));
        assert_eq!(app.input.text(), "");
        assert_eq!(app.session.transcript.entries()[0].kind, EntryKind::User);
    }

    #[test]
    fn test_blank_input_is_kept_and_not_sent() {
        let mut app = app();
        type_text(&mut app, "   ");
        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());
        assert_eq!(app.input.text(), "   ");
        assert!(app.session.transcript.entries().is_empty());
    }

    #[test]
    fn test_alt_enter_inserts_newline() {
        let mut app = app();
        type_text(&mut app, "a");
        update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT))),
        );
        type_text(&mut app, "b");
        assert_eq!(app.input.text(), "a\nb");
    }

    #[test]
    fn test_ctrl_t_toggles_and_persists() {
        let mut app = app();
        let effects = update(&mut app, ctrl('t'));
        assert!(!app.session.use_rag);
        assert_eq!(effects, vec![UiEffect::PersistRetrieval { use_rag: false }]);
    }

    #[test]
    fn test_clear_dialog_flow() {
        let mut app = app();
        update(&mut app, ctrl('l'));
        assert_eq!(app.session.confirmation, Some(Confirmation::ClearHistory));

        // Typing is swallowed while the dialog is open.
        update(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.input.text(), "");

        let effects = update(&mut app, key(KeyCode::Char('y')));
        assert_eq!(effects, vec![UiEffect::Session(SessionEffect::Clear)]);
        assert_eq!(app.session.confirmation, None);
    }

    #[test]
    fn test_escape_declines_dialog_before_quitting() {
        let mut app = app();
        update(&mut app, ctrl('l'));
        assert!(update(&mut app, key(KeyCode::Esc)).is_empty());
        assert!(!app.should_quit);
        assert_eq!(app.session.confirmation, None);

        update(&mut app, key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_slash_commands() {
        let mut app = app();
        type_text(&mut app, "/stats");
        assert_eq!(
            update(&mut app, key(KeyCode::Enter)),
            vec![UiEffect::Session(SessionEffect::FetchStats)]
        );

        type_text(&mut app, "/rag off");
        update(&mut app, key(KeyCode::Enter));
        assert!(!app.session.use_rag);

        type_text(&mut app, "/nope");
        update(&mut app, key(KeyCode::Enter));
        assert_eq!(app.hint.as_deref(), Some("Unknown command: /nope"));

        type_text(&mut app, "/quit");
        update(&mut app, key(KeyCode::Enter));
        assert!(app.should_quit);
    }

    #[test]
    fn test_pasted_file_path_uploads() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("report.pdf");
        fs::write(&file, b"%PDF").unwrap();

        let mut app = app();
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Paste(file.display().to_string())),
        );

        assert_eq!(effects.len(), 1);
        assert_eq!(app.session.file_rows[0].name, "report.pdf");
        assert_eq!(app.session.file_rows[0].status, UploadStatus::Processing);
        assert_eq!(app.input.text(), "");
    }

    #[test]
    fn test_pasted_text_goes_to_input() {
        let mut app = app();
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("what about\nthis".to_string())),
        );
        assert_eq!(app.input.text(), "what about\nthis");
    }

    #[test]
    fn test_upload_of_missing_path_notifies() {
        let mut app = app();
        type_text(&mut app, "/upload /definitely/not/here.pdf");
        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());
        let message = &app.session.notifications.items()[0].message;
        assert!(message.starts_with("Cannot read /definitely/not/here.pdf"));
    }
}
