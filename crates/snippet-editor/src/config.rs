//! Editor configuration.
//!
//! [`EditorConfig::default`] reproduces the stock behaviour: 4-cell tabs, one cell per character,
//! 20 undo entries per page, a 300 ms typing debounce and JavaScript-style lexical tokens.
//!
//! With the `serde` feature the configuration can be loaded from JSON:
//!
//! ```rust
//! # #[cfg(feature = "serde")]
//! # {
//! use snippet_editor::EditorConfig;
//!
//! let config = EditorConfig::from_json(r#"{ "tab_width": 2, "history_limit": 50 }"#).unwrap();
//! assert_eq!(config.tab_width, 2);
//! assert_eq!(config.debounce_ms, 300);
//! # }
//! ```

use crate::history::{DEFAULT_DEBOUNCE, DEFAULT_HISTORY_LIMIT};
use crate::position::{DEFAULT_TAB_WIDTH, TextMetrics, WidthMode};
use snippet_editor_lang::LanguageConfig;
use std::time::Duration;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `tab_width` must be at least 1.
    #[error("tab width must be at least 1")]
    ZeroTabWidth,
    /// `history_limit` must be at least 1.
    #[error("history limit must be at least 1")]
    ZeroHistoryLimit,
    /// The configuration document could not be parsed.
    #[cfg(feature = "serde")]
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings shared by every page of an editor session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorConfig {
    /// Cells added by one tab character.
    pub tab_width: usize,
    /// Width policy for non-tab characters.
    pub width_mode: WidthMode,
    /// Maximum undo entries kept per page.
    pub history_limit: usize,
    /// Debounce window for ordinary keystrokes, in milliseconds.
    pub debounce_ms: u64,
    /// Lexical tokens used by indentation and bracket matching.
    pub language: LanguageConfig,
}

impl EditorConfig {
    /// Check the settings for values the engine cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tab_width == 0 {
            return Err(ConfigError::ZeroTabWidth);
        }
        if self.history_limit == 0 {
            return Err(ConfigError::ZeroHistoryLimit);
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Measurement settings for the position model.
    pub fn metrics(&self) -> TextMetrics {
        TextMetrics {
            tab_width: self.tab_width.max(1),
            width_mode: self.width_mode,
        }
    }

    /// Debounce window as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            width_mode: WidthMode::Chars,
            history_limit: DEFAULT_HISTORY_LIMIT,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            language: LanguageConfig::javascript(),
        }
    }
}
