//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/markpane/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::theme::ThemeMode;

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Light or dark appearance
    #[serde(default)]
    pub theme: ThemeMode,
    /// Initial scroll sync state for new tabs
    #[serde(default = "default_true")]
    pub scroll_sync: bool,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Monospace font file; when unset, common system locations are probed
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Share of the content width given to the preview pane
    #[serde(default = "default_preview_ratio")]
    pub preview_ratio: f32,
}

fn default_true() -> bool {
    true
}

fn default_font_size() -> f32 {
    14.0
}

fn default_window_width() -> u32 {
    1280
}

fn default_window_height() -> u32 {
    800
}

fn default_preview_ratio() -> f32 {
    0.5
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            scroll_sync: default_true(),
            font_size: default_font_size(),
            font_path: None,
            window_width: default_window_width(),
            window_height: default_window_height(),
            preview_ratio: default_preview_ratio(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<EditorConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
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

    /// Save config to disk
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp values that would break the layout
    pub fn sanitized(mut self) -> Self {
        self.preview_ratio = if self.preview_ratio.is_finite() {
            self.preview_ratio.clamp(0.2, 0.8)
        } else {
            default_preview_ratio()
        };
        if !self.font_size.is_finite() || self.font_size < 6.0 {
            self.font_size = default_font_size();
        }
        self.window_width = self.window_width.max(400);
        self.window_height = self.window_height.max(300);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: EditorConfig = serde_yaml::from_str("theme: dark\n").unwrap();
        assert_eq!(config.theme, ThemeMode::Dark);
        assert!(config.scroll_sync);
        assert_eq!(config.font_size, 14.0);
        assert_eq!(config.preview_ratio, 0.5);
    }

    #[test]
    fn sanitize_clamps_ratio_and_font() {
        let config = EditorConfig {
            preview_ratio: 0.95,
            font_size: f32::NAN,
            window_width: 10,
            ..EditorConfig::default()
        }
        .sanitized();
        assert_eq!(config.preview_ratio, 0.8);
        assert_eq!(config.font_size, 14.0);
        assert_eq!(config.window_width, 400);
    }
}
