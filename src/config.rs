//! Editor configuration
//!
//! Read from `~/.config/jk/config.yaml`. Every field has a default, so a
//! missing or partial file is fine.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Editor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Columns between tab stops when rendering
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
    /// Rows at the bottom of the screen kept for the status line
    #[serde(default = "default_reserved_rows")]
    pub reserved_rows: usize,
    /// Initial text of every view's tag line
    #[serde(default = "default_tag_text")]
    pub tag_text: String,
    /// Mode new views start in
    #[serde(default = "default_initial_mode")]
    pub initial_mode: String,
}

fn default_tab_width() -> usize {
    4
}

fn default_reserved_rows() -> usize {
    1
}

fn default_tag_text() -> String {
    "save quit".to_string()
}

fn default_initial_mode() -> String {
    "normal".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: default_tab_width(),
            reserved_rows: default_reserved_rows(),
            tag_text: default_tag_text(),
            initial_mode: default_initial_mode(),
        }
    }
}

impl EditorConfig {
    /// Load config from the user config directory, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
