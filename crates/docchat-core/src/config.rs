//! Configuration management for docchat.
//!
//! Loads configuration from ${DOCCHAT_HOME}/config.toml with sensible defaults.

use std::{env, fs};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `server_url`.
pub const SERVER_URL_ENV: &str = "DOCCHAT_SERVER_URL";

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments from the template are always present while the user's
/// customized values win.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;
    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for docchat configuration and data directories.
    //!
    //! DOCCHAT_HOME resolution order:
    //! 1. DOCCHAT_HOME environment variable (if set)
    //! 2. ~/.config/docchat (default)
    //! 3. ./.docchat when no home directory can be determined

    use std::env;
    use std::path::PathBuf;

    /// Returns the docchat home directory.
    pub fn docchat_home() -> PathBuf {
        if let Ok(home) = env::var("DOCCHAT_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".docchat"),
            |h| h.join(".config").join("docchat"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        docchat_home().join("config.toml")
    }

    /// Returns the directory that receives log files.
    pub fn logs_dir() -> PathBuf {
        docchat_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the chat backend.
    pub server_url: String,

    /// Initial value of the retrieval toggle.
    pub use_rag: bool,

    /// Lifetime of transient notifications in seconds.
    pub notification_ttl_secs: u64,

    /// Default tracing filter (e.g. "info", "docchat_core=debug").
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: Self::DEFAULT_SERVER_URL.to_string(),
            use_rag: true,
            notification_ttl_secs: Self::DEFAULT_NOTIFICATION_TTL_SECS,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
    const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 5;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies the server URL override, flag first, then environment.
    pub fn with_server_override(mut self, flag: Option<&str>) -> Self {
        let from_env = env::var(SERVER_URL_ENV).ok();
        let chosen = flag
            .map(str::to_string)
            .or(from_env)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        if let Some(url) = chosen {
            self.server_url = url;
        }
        self
    }

    /// Notification lifetime as a `Duration`.
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_ttl_secs)
    }

    /// Saves only the `use_rag` field to the config file.
    ///
    /// # Errors
    /// Returns an error if the config cannot be read, merged or written.
    pub fn save_use_rag(use_rag: bool) -> Result<()> {
        Self::save_use_rag_to(&paths::config_path(), use_rag)
    }

    /// Saves only the `use_rag` field to a specific config file path.
    ///
    /// Creates the file from the default template if it doesn't exist;
    /// otherwise merges user values into the latest template.
    ///
    /// # Errors
    /// Returns an error if the config cannot be read, merged or written.
    pub fn save_use_rag_to(path: &Path, use_rag: bool) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        doc["use_rag"] = value(use_rag);

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content atomically (temp file + rename), creating parent
    /// directories as needed.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
