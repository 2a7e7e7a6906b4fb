//! Configuration management for the v2ex TUI.
//!
//! Configuration is read from `~/.config/v2ex-tui/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;
pub mod network;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;
pub use network::NetworkConfig;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
    pub network: NetworkConfig,
}

impl Config {
    /// Load configuration from the default path, creating it when missing.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_config_path()?)
    }

    /// Load configuration from `path`.
    ///
    /// A missing file is created with the commented defaults. Missing fields
    /// fall back to their defaults; an unparsable file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/v2ex-tui/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("v2ex-tui").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn default_config_content() -> &'static str {
        r##"# v2ex-tui configuration
#
# Colors can be named (Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
# DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
# LightCyan, White, Reset) or hex ("#RRGGBB" / "#RGB").
#
# Keys are single characters ("j", "G"), special keys (Enter, Backspace,
# Space, Left, Right, Up, Down, PageUp, PageDown, Home, End, Esc, F1-F12)
# or combinations ("Ctrl+c", "Alt+Enter").

[network]
base_url = "https://www.v2ex.com"
tab = "all"
timeout_secs = 10
# Uncomment to route all requests through a proxy. When unset, the
# HTTP_PROXY / HTTPS_PROXY environment variables are honored.
# proxy = "http://127.0.0.1:7890"

[colors]
border = "Cyan"
selection_bg = "Cyan"
selection_fg = "Black"
title = "White"
author = "Yellow"
timestamp = "DarkGray"
comment_count = "Green"
reply_count = "Magenta"
mention = "Blue"
error = "Red"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["PageDown", "Ctrl+d"]
prev_page = ["PageUp", "Ctrl+u"]
first = ["g", "Home"]
last = ["G", "End"]
activate = ["Enter", "Right", "l"]
back = ["Backspace", "Space", "Left", "h"]
toggle_mouse = ["m"]
copy_url = ["f"]
open_in_browser = ["o"]
refresh = ["r"]
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let config: Config = toml::from_str(Config::default_config_content())
            .expect("Default config should be valid TOML");

        assert_eq!(config.colors.border, ratatui::style::Color::Cyan);
        assert_eq!(config.keybindings.back, vec!["Backspace", "Space", "Left", "h"]);
        assert_eq!(config.network.tab, "all");
        assert_eq!(config.network.proxy, None);
        assert!(config.keybindings.invalid_bindings().is_empty());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[network]
proxy = "socks5://127.0.0.1:1080"
timeout_secs = 3

[colors]
border = "#FF0000"
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.network.proxy.as_deref(), Some("socks5://127.0.0.1:1080"));
        assert_eq!(config.network.timeout_secs, 3);
        assert_eq!(config.network.base_url, network::DEFAULT_BASE_URL);
        assert_eq!(config.colors.border, ratatui::style::Color::Rgb(255, 0, 0));
        assert_eq!(config.colors.error, ratatui::style::Color::Red);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);
        assert_eq!(config.network.timeout_secs, 10);
    }

    #[test]
    fn test_load_from_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.network.tab, "all");

        // The written file loads back to the same values.
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.keybindings.copy_url, vec!["f"]);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[colors]\nborder = \"chartreuse-ish\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
