//! Preview theme - CSS colors for the rendered Markdown

use crate::theme::{Theme, ThemeMode};

/// Theme colors for the preview stylesheet (CSS-formatted)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTheme {
    pub background: String,
    pub text: String,
    pub heading: String,
    pub link: String,
    pub code_background: String,
    pub border: String,
    pub blockquote_border: String,
    pub muted: String,
}

impl PreviewTheme {
    /// Take the `preview` colors of a resolved editor theme
    pub fn from_editor_theme(theme: &Theme) -> Self {
        let p = &theme.preview;
        Self {
            background: p.background.to_css(),
            text: p.text.to_css(),
            heading: p.heading.to_css(),
            link: p.link.to_css(),
            code_background: p.code_background.to_css(),
            border: p.border.to_css(),
            blockquote_border: p.blockquote_border.to_css(),
            muted: p.muted.to_css(),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        Self::from_editor_theme(&Theme::builtin(mode))
    }
}

impl Default for PreviewTheme {
    fn default() -> Self {
        Self::for_mode(ThemeMode::Light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_preview_colors() {
        let light = PreviewTheme::for_mode(ThemeMode::Light);
        assert_eq!(light.background, "#ffffff");
        assert_eq!(light.text, "#0f0f0f");

        let dark = PreviewTheme::for_mode(ThemeMode::Dark);
        assert_eq!(dark.background, "#000000");
        assert_eq!(dark.text, "#f0f0f0");
        assert_eq!(dark.blockquote_border, "#80808080");
    }
}
