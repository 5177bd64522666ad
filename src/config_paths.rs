//! Config directory layout for markpane
//!
//! Everything lives under:
//! - Unix/macOS: `~/.config/markpane/` (or `$XDG_CONFIG_HOME/markpane/`)
//! - Windows: `%APPDATA%\markpane\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "markpane";

/// Base config directory
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        // dirs::config_dir() is ~/Library/Application Support on macOS; stay XDG-style
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/markpane/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/markpane/themes/`
pub fn themes_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("themes"))
}

/// `~/.config/markpane/keymap.yaml`
pub fn keymap_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("keymap.yaml"))
}

/// `~/.config/markpane/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}

/// Create the config and themes directories, logging the outcome
pub fn ensure_config_dirs() {
    let Some(themes) = themes_dir() else {
        tracing::warn!("No config directory available");
        return;
    };
    match ensure_dir(&themes) {
        Ok(()) => tracing::info!("Config directories ready ({})", themes.display()),
        Err(e) => tracing::warn!("Failed to ensure config directories: {}", e),
    }
}
