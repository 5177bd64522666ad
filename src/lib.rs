//! Markpane - a Markdown editor with a live preview
//!
//! This crate provides the core types and logic for the editor, built on
//! the Elm Architecture pattern. The window, renderer and webviews live in
//! the binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod format;
pub mod keymap;
pub mod layout;
pub mod markdown;
pub mod messages;
pub mod model;
pub mod scroll_sync;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::AppModel;
pub use theme::Theme;
