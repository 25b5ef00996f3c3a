//! Pure render functions.
//!
//! Everything here takes `&AppState`, reads the session's view model and
//! draws; nothing mutates state or returns effects.

use std::mem;

use docchat_core::session::{
    CharCounter, CounterLevel, EntryRole, EntryView, FileKind, NotificationLevel, SessionView,
    UploadStatus,
};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::state::AppState;

const SIDEBAR_WIDTH: u16 = 34;
const STATS_HEIGHT: u16 = 5;
const STATUS_HEIGHT: u16 = 1;
const MAX_INPUT_LINES: u16 = 6;
const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 3;
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

pub fn render(app: &AppState, frame: &mut Frame) {
    let view = app.session.view();
    let area = frame.area();

    let input_lines = (app.input.text().split('\n').count() as u16).clamp(1, MAX_INPUT_LINES);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(input_lines + 2),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
        .split(rows[0]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(STATS_HEIGHT)])
        .split(columns[0]);

    render_files(frame, sidebar[0], &view);
    render_stats(frame, sidebar[1], &view);
    render_transcript(frame, columns[1], &view, app);
    render_input(frame, rows[1], app, view.use_rag);
    render_status_line(frame, rows[2], app, &view);
    render_notifications(frame, area, &view);
    render_confirm(frame, area, &view);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {title} "))
}

fn kind_badge(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Pdf => "PDF",
        FileKind::Word => "DOC",
        FileKind::PowerPoint => "PPT",
        FileKind::Csv => "CSV",
        FileKind::Text => "TXT",
        FileKind::Other => "FILE",
    }
}

fn status_color(status: UploadStatus) -> Color {
    match status {
        UploadStatus::Processing => Color::Yellow,
        UploadStatus::Ready => Color::Green,
        UploadStatus::Failed => Color::Red,
    }
}

fn render_files(frame: &mut Frame, area: Rect, view: &SessionView) {
    let lines: Vec<Line> = if view.files.is_empty() {
        vec![Line::styled(
            "Drop or /upload files",
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        view.files
            .iter()
            .map(|row| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<4} ", kind_badge(row.kind)),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(row.name.clone()),
                    Span::raw(" "),
                    Span::styled(row.status_label, Style::default().fg(status_color(row.status))),
                ])
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines).block(panel("Files")), area);
}

fn render_stats(frame: &mut Frame, area: Rect, view: &SessionView) {
    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(vec![
            Span::styled("Documents     ", label),
            Span::raw(view.stats.documents.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Conversations ", label),
            Span::raw(view.stats.conversations.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Chunks        ", label),
            Span::raw(view.stats.chunks.to_string()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(panel("Stats")), area);
}

fn render_transcript(frame: &mut Frame, area: Rect, view: &SessionView, app: &AppState) {
    let block = panel("Chat");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(placeholder) = view.placeholder {
        let text = Paragraph::new(placeholder)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(text, inner);
        return;
    }

    let width = usize::from(inner.width.max(1));
    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
    let mut lines = Vec::new();
    for entry in &view.entries {
        push_entry(&mut lines, entry, width, spinner);
    }

    let total = lines.len() as u16;
    let max_scroll = total.saturating_sub(inner.height);
    let top = max_scroll.saturating_sub(app.scroll_offset.min(max_scroll));
    frame.render_widget(Paragraph::new(lines).scroll((top, 0)), inner);
}

fn push_entry(lines: &mut Vec<Line<'static>>, entry: &EntryView, width: usize, spinner: &str) {
    let (header, color) = match entry.role {
        EntryRole::User => ("You", Color::Cyan),
        EntryRole::Bot | EntryRole::Thinking => ("Assistant", Color::Green),
        EntryRole::Error => ("Error", Color::Red),
    };
    lines.push(Line::styled(
        header,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));

    if entry.role == EntryRole::Thinking {
        lines.push(Line::styled(
            format!("{spinner} Thinking..."),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        let body = if entry.role == EntryRole::Error {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        for row in wrap_text(&entry.text, width) {
            lines.push(Line::styled(row, body));
        }
    }

    if !entry.sources.is_empty() {
        let dim = Style::default().fg(Color::DarkGray);
        lines.push(Line::styled("Sources:", dim.add_modifier(Modifier::ITALIC)));
        for source in &entry.sources {
            let text = format!(
                "  {} {} (score: {})",
                kind_badge(source.kind),
                source.file_name,
                source.score
            );
            for row in wrap_text(&text, width) {
                lines.push(Line::styled(row, dim));
            }
        }
    }
    lines.push(Line::default());
}

/// Word-wraps `text` to `width` display columns; words longer than a row
/// are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for paragraph in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;
        for word in paragraph.split(' ') {
            let word_width = word.width();
            let sep = usize::from(!row.is_empty());
            if row_width + sep + word_width <= width {
                if sep == 1 {
                    row.push(' ');
                }
                row.push_str(word);
                row_width += sep + word_width;
                continue;
            }
            if !row.is_empty() {
                rows.push(mem::take(&mut row));
                row_width = 0;
            }
            for ch in word.chars() {
                let w = ch.width().unwrap_or(0);
                if row_width + w > width && !row.is_empty() {
                    rows.push(mem::take(&mut row));
                    row_width = 0;
                }
                row.push(ch);
                row_width += w;
            }
        }
        rows.push(row);
    }
    rows
}

fn render_input(frame: &mut Frame, area: Rect, app: &AppState, use_rag: bool) {
    let counter = CharCounter::for_draft(app.input.text());
    let counter_color = match counter.level {
        CounterLevel::Normal => Color::DarkGray,
        CounterLevel::Warning => Color::Rgb(255, 165, 0),
        CounterLevel::Critical => Color::Red,
    };
    let rag = if use_rag {
        Span::styled(" RAG on ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" RAG off ", Style::default().fg(Color::DarkGray))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Message ")
        .title_bottom(Line::from(rag).left_aligned())
        .title_bottom(
            Line::styled(
                format!(" {} ", counter.label()),
                Style::default().fg(counter_color),
            )
            .right_aligned(),
        );
    let inner = block.inner(area);

    let lines: Vec<Line> = app.input.text().split('\n').map(Line::raw).collect();
    let (cursor_row, cursor_col) = cursor_position(app.input.text(), app.input.cursor());
    let visible = usize::from(inner.height.max(1));
    let top = cursor_row.saturating_sub(visible - 1);

    frame.render_widget(
        Paragraph::new(lines).block(block).scroll((top as u16, 0)),
        area,
    );

    if app.session.confirmation.is_none() && inner.width > 0 {
        let x = inner.x + (cursor_col as u16).min(inner.width - 1);
        let y = inner.y + (cursor_row - top) as u16;
        frame.set_cursor_position((x, y));
    }
}

/// Row and display column of the char cursor.
fn cursor_position(text: &str, cursor: usize) -> (usize, usize) {
    let before: String = text.chars().take(cursor).collect();
    let row = before.matches('\n').count();
    let col = before.rsplit('\n').next().unwrap_or("").width();
    (row, col)
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &AppState, view: &SessionView) {
    let left = if let Some(busy) = view.busy {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        Span::styled(format!("{spinner} {busy}"), Style::default().fg(Color::Yellow))
    } else if let Some(hint) = &app.hint {
        Span::styled(hint.clone(), Style::default().fg(Color::Magenta))
    } else {
        Span::styled(
            "Enter send  Alt+Enter newline  Ctrl+T RAG  Ctrl+L clear  F5 stats  Esc quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(app.server_url.width() as u16 + 1)])
        .split(area);
    frame.render_widget(Paragraph::new(Line::from(left)), halves[0]);
    frame.render_widget(
        Paragraph::new(app.server_url.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right),
        halves[1],
    );
}

fn render_notifications(frame: &mut Frame, area: Rect, view: &SessionView) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width - width;
    let mut y = area.y;

    for toast in &view.notifications {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let color = match toast.level {
            NotificationLevel::Success => Color::Green,
            NotificationLevel::Error => Color::Red,
        };
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(toast.message.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
            rect,
        );
        y += TOAST_HEIGHT;
    }
}

fn render_confirm(frame: &mut Frame, area: Rect, view: &SessionView) {
    let Some(confirm) = &view.confirm else {
        return;
    };

    let width = 56.min(area.width.saturating_sub(4));
    let height = 5.min(area.height);
    let rect = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, rect);
    let lines = vec![
        Line::raw(confirm.prompt),
        Line::default(),
        Line::styled("[y] Yes   [n] No", Style::default().fg(Color::DarkGray)),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(format!(" {} ", confirm.title))
                    .title_style(Style::default().add_modifier(Modifier::BOLD)),
            ),
        rect,
    );
}

#[cfg(test)]
mod tests {
    use docchat_core::api::Source;
    use docchat_core::config::Config;
    use docchat_core::session::{EntryKind, SessionEvent, WELCOME_TEXT, update};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn draw(app: &AppState, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn contains(screen: &[String], needle: &str) -> bool {
        screen.iter().any(|row| row.contains(needle))
    }

    #[test]
    fn test_wrap_text_breaks_on_words_and_long_tokens() {
        assert_eq!(wrap_text("hello big world", 9), vec!["hello big", "world"]);
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_cursor_position_tracks_lines() {
        assert_eq!(cursor_position("ab\ncd", 4), (1, 1));
        assert_eq!(cursor_position("", 0), (0, 0));
    }

    #[test]
    fn test_initial_screen_shows_panels_and_placeholder() {
        let app = AppState::new(&Config::default());
        let screen = draw(&app, 120, 30);

        assert!(contains(&screen, "Files"));
        assert!(contains(&screen, "Documents     0"));
        assert!(contains(&screen, "Chunks        0"));
        assert!(contains(&screen, &WELCOME_TEXT[..20]));
        assert!(contains(&screen, "0/500"));
        assert!(contains(&screen, "RAG on"));
    }

    #[test]
    fn test_bot_answer_lists_sources() {
        let mut app = AppState::new(&Config::default());
        app.session.transcript.push(EntryKind::User, "What is X?");
        app.session.transcript.push(
            EntryKind::Bot {
                sources: vec![Source {
                    file_name: "report.pdf".to_string(),
                    relevance_score: Some(0.873),
                    file_type: None,
                }],
            },
            "X is...",
        );

        let screen = draw(&app, 120, 30);
        assert!(contains(&screen, "What is X?"));
        assert!(contains(&screen, "X is..."));
        assert!(contains(&screen, "report.pdf (score: 0.873)"));
    }

    #[test]
    fn test_confirm_dialog_and_notifications_render() {
        let mut app = AppState::new(&Config::default());
        update(&mut app.session, SessionEvent::RequestClear);
        app.session.notifications.error("File type .mp4 is not supported");

        let screen = draw(&app, 120, 30);
        assert!(contains(&screen, "Are you sure"));
        assert!(contains(&screen, "File type .mp4 is not supported"));
    }

    #[test]
    fn test_busy_label_replaces_hints() {
        let mut app = AppState::new(&Config::default());
        app.session.uploads_in_flight = 1;

        let screen = draw(&app, 120, 30);
        assert!(contains(&screen, "Uploading and processing document..."));
        assert!(!contains(&screen, "Ctrl+L clear"));
    }
}
