//! Text helpers shared by the model, update and view layers

use std::borrow::Cow;

/// Tab width for visual column calculations
pub const TABULATOR_WIDTH: usize = 4;

/// Count words the way the status bar reports them.
///
/// Words are runs separated by spaces, carriage returns or line feeds.
/// Tabs and other whitespace do not split words.
pub fn word_count(text: &str) -> usize {
    text.split([' ', '\r', '\n'])
        .filter(|word| !word.is_empty())
        .count()
}

/// Status bar label for a word count, always `"N words"`
pub fn word_count_label(count: usize) -> String {
    format!("{} words", count)
}

/// Swap (or add) the extension of a bare file name: `notes.md` → `notes.html`
pub fn change_extension(file_name: &str, extension: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(idx) => &file_name[..idx],
    };
    format!("{}.{}", stem, extension.trim_start_matches('.'))
}

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '/' | ':'
            | ','
            | '.'
            | '-'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ';'
            | '"'
            | '\''
            | '<'
            | '>'
            | '='
            | '+'
            | '*'
            | '&'
            | '|'
            | '!'
            | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '~'
            | '`'
            | '\\'
            | '?'
            | '_'
    )
}

/// Character class used by word navigation and double-click selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    Whitespace,
    WordChar,
    Punctuation,
}

pub fn char_type(ch: char) -> CharType {
    if ch.is_whitespace() {
        CharType::Whitespace
    } else if is_punctuation(ch) {
        CharType::Punctuation
    } else {
        CharType::WordChar
    }
}

/// Expand tabs to spaces for display; borrows when there is nothing to expand
pub fn expand_tabs_for_display(text: &str) -> Cow<'_, str> {
    if !text.contains('\t') {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() * 2);
    let mut visual_col = 0;
    for ch in text.chars() {
        if ch == '\t' {
            let spaces = TABULATOR_WIDTH - (visual_col % TABULATOR_WIDTH);
            result.extend(std::iter::repeat(' ').take(spaces));
            visual_col += spaces;
        } else {
            result.push(ch);
            visual_col += 1;
        }
    }
    Cow::Owned(result)
}

/// Convert a visual column (screen position) to a character column.
pub fn visual_col_to_char_col(text: &str, visual_col: usize) -> usize {
    let mut current_visual = 0;
    let mut char_col = 0;

    for ch in text.chars() {
        if current_visual >= visual_col {
            return char_col;
        }
        if ch == '\t' {
            current_visual += TABULATOR_WIDTH - (current_visual % TABULATOR_WIDTH);
        } else {
            current_visual += 1;
        }
        char_col += 1;
    }

    char_col
}

/// Convert a character column to a visual column (screen position).
pub fn char_col_to_visual_col(text: &str, char_col: usize) -> usize {
    let mut visual_col = 0;
    for ch in text.chars().take(char_col) {
        if ch == '\t' {
            visual_col += TABULATOR_WIDTH - (visual_col % TABULATOR_WIDTH);
        } else {
            visual_col += 1;
        }
    }
    visual_col
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_splits_on_space_and_newlines_only() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \r\n  "), 0);
        assert_eq!(word_count("hello world"), 2);
        assert_eq!(word_count("one\r\ntwo\nthree  four"), 4);
        // tabs are not separators
        assert_eq!(word_count("a\tb"), 1);
        assert_eq!(word_count("# Heading\n\n- item"), 4);
    }

    #[test]
    fn word_count_labels() {
        assert_eq!(word_count_label(0), "0 words");
        assert_eq!(word_count_label(1), "1 words");
        assert_eq!(word_count_label(12), "12 words");
    }

    #[test]
    fn extension_changes() {
        assert_eq!(change_extension("notes.md", "html"), "notes.html");
        assert_eq!(change_extension("Untitled", ".pdf"), "Untitled.pdf");
        assert_eq!(change_extension("archive.tar.md", "pdf"), "archive.tar.pdf");
        assert_eq!(change_extension(".hidden", "html"), ".hidden.html");
    }

    #[test]
    fn tab_columns_round_trip_at_tab_stops() {
        let line = "\tab\tc";
        assert_eq!(char_col_to_visual_col(line, 1), 4);
        assert_eq!(char_col_to_visual_col(line, 4), 8);
        assert_eq!(visual_col_to_char_col(line, 4), 1);
        assert_eq!(visual_col_to_char_col(line, 100), 5);
        assert_eq!(expand_tabs_for_display(line), "    ab  c");
    }
}
