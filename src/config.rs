//! Message box configuration persistence.
//!
//! Stores display timing and stacking layout as JSON at
//! `~/.local/share/msgbox-sim/config.json`. Every field has a default, so a
//! partial file (or none at all) still yields a usable configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file path.
pub fn default_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("msgbox-sim")
        .join("config.json")
}

/// Timing and layout settings for the message box manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBoxConfig {
    /// Seconds a static message stays on screen per character of text.
    #[serde(default = "default_time_per_char")]
    pub time_per_char: f64,
    /// Gap between the bottom of the screen and the lowest message.
    #[serde(default = "default_padding")]
    pub bottom_padding: i32,
    /// Gap between two stacked messages.
    #[serde(default = "default_padding")]
    pub next_box_padding: i32,
    /// Oldest non-status message is dropped once the stack grows past this.
    #[serde(default)]
    pub max_static_boxes: Option<usize>,
    /// Headless measurer: height of one text line.
    #[serde(default = "default_line_height")]
    pub line_height: i32,
    /// Headless measurer: padding added around the text block.
    #[serde(default = "default_vertical_padding")]
    pub vertical_padding: i32,
}

fn default_time_per_char() -> f64 { 0.1 }
fn default_padding() -> i32 { 20 }
fn default_line_height() -> i32 { 18 }
fn default_vertical_padding() -> i32 { 16 }

impl Default for MessageBoxConfig {
    fn default() -> Self {
        Self {
            time_per_char: default_time_per_char(),
            bottom_padding: default_padding(),
            next_box_padding: default_padding(),
            max_static_boxes: None,
            line_height: default_line_height(),
            vertical_padding: default_vertical_padding(),
        }
    }
}

impl MessageBoxConfig {
    /// Load from the default path, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = default_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate(path)?;
        Ok(config)
    }

    /// Persist the config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Check values that would break timing or layout. `path` names where the
    /// values came from and is only used in the error.
    pub fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidConfig {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };
        if !is_valid_time_per_char(self.time_per_char) {
            return Err(invalid("time_per_char must be a non-negative number"));
        }
        if self.line_height <= 0 {
            return Err(invalid("line_height must be positive"));
        }
        if self.max_static_boxes == Some(0) {
            return Err(invalid("max_static_boxes must be at least 1"));
        }
        Ok(())
    }
}

/// A display speed must be a finite, non-negative number of seconds.
pub fn is_valid_time_per_char(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// `value` if it is a usable display speed, otherwise the default one.
pub fn sanitize_time_per_char(value: f64) -> f64 {
    if is_valid_time_per_char(value) {
        value
    } else {
        tracing::warn!(
            "Invalid time_per_char {}, using {}",
            value,
            default_time_per_char()
        );
        default_time_per_char()
    }
}
