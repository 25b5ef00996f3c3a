//! Message input: an editable buffer plus parsing of slash commands and
//! dropped file paths.

use std::mem;
use std::path::PathBuf;

/// Single text buffer with a cursor measured in chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.byte_index(self.cursor);
        self.text.insert(idx, ch);
        self.cursor += 1;
    }

    /// Inserts `text`, normalizing CRLF so pasted blocks keep one newline.
    pub fn insert_str(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let idx = self.byte_index(self.cursor);
        self.text.insert_str(idx, &normalized);
        self.cursor += normalized.chars().count();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.text.remove(idx);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let idx = self.byte_index(self.cursor);
            self.text.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// Empties the buffer and returns what it held.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        mem::take(&mut self.text)
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

/// A slash command typed into the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Upload(Vec<PathBuf>),
    Clear,
    Stats,
    /// `None` toggles.
    Rag(Option<bool>),
    Quit,
    Help,
    Unknown(String),
}

pub const HELP_TEXT: &str = "/upload <path>...  /clear  /stats  /rag [on|off]  /quit";

/// Parses `text` as a slash command; `None` when it is a normal message.
pub fn parse_command(text: &str) -> Option<Command> {
    let trimmed = text.trim();
    let rest = trimmed.strip_prefix('/')?;
    let (name, args) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(n, a)| (n, a.trim()));

    let command = match name {
        "upload" => Command::Upload(split_paths(args).into_iter().map(PathBuf::from).collect()),
        "clear" => Command::Clear,
        "stats" => Command::Stats,
        "rag" => match args {
            "" => Command::Rag(None),
            "on" => Command::Rag(Some(true)),
            "off" => Command::Rag(Some(false)),
            _ => Command::Unknown(trimmed.to_string()),
        },
        "quit" | "exit" => Command::Quit,
        "help" => Command::Help,
        _ => Command::Unknown(trimmed.to_string()),
    };
    Some(command)
}

/// Treats a paste as a file drop when every token names an existing file.
pub fn dropped_paths(pasted: &str) -> Option<Vec<PathBuf>> {
    let paths: Vec<PathBuf> = split_paths(pasted).into_iter().map(PathBuf::from).collect();
    if paths.is_empty() || !paths.iter().all(|p| p.is_file()) {
        return None;
    }
    Some(paths)
}

/// Splits on whitespace, honoring quotes, backslash escapes and `file://`
/// prefixes the way terminals render dropped files.
pub fn split_paths(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(ch);
                in_token = true;
            }
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_token = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_token {
                    tokens.push(mem::take(&mut current));
                    in_token = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }

    tokens
        .into_iter()
        .map(|t| t.strip_prefix("file://").map(str::to_string).unwrap_or(t))
        .collect()
}
