//! Markdown rendering for the live preview and HTML export

mod renderer;
mod theme;

pub use renderer::{
    escape_html, export_document, generate_css, markdown_to_html, preview_document,
    preview_navigation, preview_update_script, scroll_to_fraction_script, PreviewNavigation,
};
pub use theme::PreviewTheme;
