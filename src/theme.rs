//! Theme system for the editor
//!
//! Two built-in themes (light and dark) are embedded at compile time.
//! A YAML file with the same id in `~/.config/markpane/themes/` takes
//! priority over the builtin.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const LIGHT_YAML: &str = include_str!("../themes/light.yaml");
pub const DARK_YAML: &str = include_str!("../themes/dark.yaml");

/// A built-in theme entry
pub struct BuiltinTheme {
    pub id: &'static str,
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "light",
        yaml: LIGHT_YAML,
    },
    BuiltinTheme {
        id: "dark",
        yaml: DARK_YAML,
    },
];

/// Light or dark appearance, toggled globally for every tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Theme id used for file lookup
    pub fn id(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::debug!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// Resolve the theme for a mode, falling back to the builtin on any error
pub fn theme_for_mode(mode: ThemeMode) -> Theme {
    match load_theme(mode.id()) {
        Ok(theme) => theme,
        Err(e) => {
            tracing::warn!("Failed to load theme '{}': {}", mode.id(), e);
            Theme::builtin(mode)
        }
    }
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|part| u8::from_str_radix(part, 16).map_err(|e| e.to_string()))
        };
        match hex.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// CSS notation: `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    pub ui: UiThemeData,
    pub preview: PreviewThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub editor: EditorThemeData,
    pub gutter: GutterThemeData,
    pub tab_bar: TabBarThemeData,
    pub toolbar: ToolbarThemeData,
    pub status_bar: StatusBarThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorThemeData {
    pub background: String,
    pub foreground: String,
    pub current_line_background: String,
    pub cursor_color: String,
    pub selection_background: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GutterThemeData {
    pub background: String,
    pub foreground: String,
    pub foreground_active: String,
    pub border_color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TabBarThemeData {
    pub background: String,
    pub active_background: String,
    pub active_foreground: String,
    pub inactive_foreground: String,
    pub border: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolbarThemeData {
    pub background: String,
    pub foreground: String,
    pub button_background: String,
    pub border: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusBarThemeData {
    pub background: String,
    pub foreground: String,
}

/// Colors handed to the HTML preview stylesheet
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewThemeData {
    pub background: String,
    pub text: String,
    pub heading: String,
    pub link: String,
    pub code_background: String,
    pub border: String,
    pub blockquote_border: String,
    pub muted: String,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub editor: EditorTheme,
    pub gutter: GutterTheme,
    pub tab_bar: TabBarTheme,
    pub toolbar: ToolbarTheme,
    pub status_bar: StatusBarTheme,
    pub preview: PreviewColors,
}

#[derive(Debug, Clone)]
pub struct EditorTheme {
    pub background: Color,
    pub foreground: Color,
    pub current_line_background: Color,
    pub cursor_color: Color,
    pub selection_background: Color,
}

#[derive(Debug, Clone)]
pub struct GutterTheme {
    pub background: Color,
    pub foreground: Color,
    pub foreground_active: Color,
    pub border_color: Color,
}

#[derive(Debug, Clone)]
pub struct TabBarTheme {
    pub background: Color,
    pub active_background: Color,
    pub active_foreground: Color,
    pub inactive_foreground: Color,
    pub border: Color,
}

#[derive(Debug, Clone)]
pub struct ToolbarTheme {
    pub background: Color,
    pub foreground: Color,
    pub button_background: Color,
    pub border: Color,
}

#[derive(Debug, Clone)]
pub struct StatusBarTheme {
    pub background: Color,
    pub foreground: Color,
}

#[derive(Debug, Clone)]
pub struct PreviewColors {
    pub background: Color,
    pub text: Color,
    pub heading: Color,
    pub link: Color,
    pub code_background: Color,
    pub border: Color,
    pub blockquote_border: Color,
    pub muted: Color,
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// The embedded theme for a mode
    pub fn builtin(mode: ThemeMode) -> Self {
        match Theme::from_builtin(mode.id()) {
            Ok(theme) => theme,
            // Embedded YAML is covered by tests; this only guards a broken build
            Err(_) => Theme::fallback(mode),
        }
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let ui = &data.ui;
        let p = &data.preview;
        Ok(Theme {
            name: data.name,
            editor: EditorTheme {
                background: Color::from_hex(&ui.editor.background)?,
                foreground: Color::from_hex(&ui.editor.foreground)?,
                current_line_background: Color::from_hex(&ui.editor.current_line_background)?,
                cursor_color: Color::from_hex(&ui.editor.cursor_color)?,
                selection_background: Color::from_hex(&ui.editor.selection_background)?,
            },
            gutter: GutterTheme {
                background: Color::from_hex(&ui.gutter.background)?,
                foreground: Color::from_hex(&ui.gutter.foreground)?,
                foreground_active: Color::from_hex(&ui.gutter.foreground_active)?,
                border_color: Color::from_hex(&ui.gutter.border_color)?,
            },
            tab_bar: TabBarTheme {
                background: Color::from_hex(&ui.tab_bar.background)?,
                active_background: Color::from_hex(&ui.tab_bar.active_background)?,
                active_foreground: Color::from_hex(&ui.tab_bar.active_foreground)?,
                inactive_foreground: Color::from_hex(&ui.tab_bar.inactive_foreground)?,
                border: Color::from_hex(&ui.tab_bar.border)?,
            },
            toolbar: ToolbarTheme {
                background: Color::from_hex(&ui.toolbar.background)?,
                foreground: Color::from_hex(&ui.toolbar.foreground)?,
                button_background: Color::from_hex(&ui.toolbar.button_background)?,
                border: Color::from_hex(&ui.toolbar.border)?,
            },
            status_bar: StatusBarTheme {
                background: Color::from_hex(&ui.status_bar.background)?,
                foreground: Color::from_hex(&ui.status_bar.foreground)?,
            },
            preview: PreviewColors {
                background: Color::from_hex(&p.background)?,
                text: Color::from_hex(&p.text)?,
                heading: Color::from_hex(&p.heading)?,
                link: Color::from_hex(&p.link)?,
                code_background: Color::from_hex(&p.code_background)?,
                border: Color::from_hex(&p.border)?,
                blockquote_border: Color::from_hex(&p.blockquote_border)?,
                muted: Color::from_hex(&p.muted)?,
            },
        })
    }

    /// Hardcoded colors used only if the embedded YAML cannot be parsed
    fn fallback(mode: ThemeMode) -> Self {
        let (bg, fg) = match mode {
            ThemeMode::Light => (Color::rgb(0xFF, 0xFF, 0xFF), Color::rgb(0x0F, 0x0F, 0x0F)),
            ThemeMode::Dark => (Color::rgb(0x00, 0x00, 0x00), Color::rgb(0xF0, 0xF0, 0xF0)),
        };
        let muted = Color::rgb(0x80, 0x80, 0x80);
        Theme {
            name: mode.id().to_string(),
            editor: EditorTheme {
                background: bg,
                foreground: fg,
                current_line_background: bg,
                cursor_color: fg,
                selection_background: Color::rgba(0x26, 0x4F, 0x78, 0x80),
            },
            gutter: GutterTheme {
                background: bg,
                foreground: muted,
                foreground_active: fg,
                border_color: muted,
            },
            tab_bar: TabBarTheme {
                background: bg,
                active_background: bg,
                active_foreground: fg,
                inactive_foreground: muted,
                border: muted,
            },
            toolbar: ToolbarTheme {
                background: bg,
                foreground: fg,
                button_background: bg,
                border: muted,
            },
            status_bar: StatusBarTheme {
                background: bg,
                foreground: fg,
            },
            preview: PreviewColors {
                background: bg,
                text: fg,
                heading: fg,
                link: Color::rgb(0x1E, 0x6F, 0xD9),
                code_background: Color::rgba(0x80, 0x80, 0x80, 0x20),
                border: muted,
                blockquote_border: Color::rgba(0x80, 0x80, 0x80, 0x80),
                muted,
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin(ThemeMode::Light)
    }
}
