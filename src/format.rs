//! Markdown formatting transforms
//!
//! Each transform inspects the buffer and returns a [`TextEdit`] in char
//! offsets. The update layer applies it as a single undo step.

use std::ops::Range;

use ropey::Rope;

/// Placeholder used by [`insert_link`] when nothing is selected
pub const LINK_PLACEHOLDER: &str = "link text";
const LINK_URL: &str = "url";
const QUOTE_PREFIX: &str = "> ";

/// Inline styles produced by wrapping the selection in a marker pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineStyle {
    Bold,
    Italic,
    Strikethrough,
    Code,
}

impl InlineStyle {
    /// (prefix, suffix) inserted around the selection
    pub fn markers(self) -> (&'static str, &'static str) {
        match self {
            InlineStyle::Bold => ("**", "**"),
            InlineStyle::Italic => ("*", "*"),
            InlineStyle::Strikethrough => ("~~", "~~"),
            InlineStyle::Code => ("`", "`"),
        }
    }
}

/// A replacement plus the selection to show afterwards (`anchor..head`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub replacement: String,
    pub selection: Range<usize>,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Surround `selection` with `prefix` and `suffix`.
///
/// A non-empty selection stays selected together with its new markers;
/// an empty one leaves the caret between the markers.
pub fn wrap_selection(
    buffer: &Rope,
    selection: Range<usize>,
    prefix: &str,
    suffix: &str,
) -> TextEdit {
    let end = selection.end.min(buffer.len_chars());
    let start = selection.start.min(end);
    let selected = buffer.slice(start..end).to_string();
    let replacement = format!("{}{}{}", prefix, selected, suffix);

    let selection = if selected.is_empty() {
        let caret = start + char_len(prefix);
        caret..caret
    } else {
        start..start + char_len(&replacement)
    };

    TextEdit {
        range: start..end,
        replacement,
        selection,
    }
}

pub fn apply_style(buffer: &Rope, selection: Range<usize>, style: InlineStyle) -> TextEdit {
    let (prefix, suffix) = style.markers();
    wrap_selection(buffer, selection, prefix, suffix)
}

/// Replace the selection with `[text](url)` and select the `url` part
pub fn insert_link(buffer: &Rope, selection: Range<usize>) -> TextEdit {
    let end = selection.end.min(buffer.len_chars());
    let start = selection.start.min(end);
    let selected = buffer.slice(start..end).to_string();
    let text = if selected.is_empty() {
        LINK_PLACEHOLDER.to_string()
    } else {
        selected
    };

    let replacement = format!("[{}]({})", text, LINK_URL);
    let url_start = start + 1 + char_len(&text) + 2;

    TextEdit {
        range: start..end,
        replacement,
        selection: url_start..url_start + char_len(LINK_URL),
    }
}

/// Add or remove a `> ` quote marker on the line holding `caret`
pub fn toggle_blockquote(buffer: &Rope, caret: usize) -> TextEdit {
    let caret = caret.min(buffer.len_chars());
    let line_idx = buffer.char_to_line(caret);
    let line_start = buffer.line_to_char(line_idx);
    let line: String = buffer
        .line(line_idx)
        .chars()
        .take_while(|c| *c != '\n' && *c != '\r')
        .collect();
    let line_len = char_len(&line);

    let (replacement, new_caret) = if line.trim().starts_with('>') {
        let unquoted = line
            .trim_start_matches(|c: char| c == '>' || c.is_whitespace())
            .to_string();
        let caret = caret.saturating_sub(2).max(line_start);
        let caret = caret.min(line_start + char_len(&unquoted));
        (unquoted, caret)
    } else {
        let caret = (caret + QUOTE_PREFIX.len()).min(line_start + line_len + QUOTE_PREFIX.len());
        (format!("{}{}", QUOTE_PREFIX, line), caret)
    };

    TextEdit {
        range: line_start..line_start + line_len,
        replacement,
        selection: new_caret..new_caret,
    }
}
