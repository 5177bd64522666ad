//! Window title, status bar and hit-testing tests

mod common;

use std::path::PathBuf;
use std::time::Duration;

use common::{numbered_lines, test_model};
use markpane::keymap::Command;
use markpane::layout::HitTarget;
use markpane::messages::{DocumentMsg, EditorMsg, Msg, UiMsg};
use markpane::model::Position;
use markpane::update::update;

#[test]
fn test_title_shows_dirty_marker() {
    let mut model = test_model("a", 0, 1);
    assert_eq!(model.window_title(), "Untitled - Markpane");

    update(&mut model, Msg::Document(DocumentMsg::InsertChar('b')));
    assert_eq!(model.window_title(), "*Untitled - Markpane");
    assert_eq!(
        model.active_tab().unwrap().document.display_name(),
        "Untitled*"
    );
}

#[test]
fn test_cursor_label_is_one_based() {
    let mut model = test_model("one\ntwo", 0, 0);
    update(
        &mut model,
        Msg::Editor(EditorMsg::SetCursorPosition { line: 1, column: 2 }),
    );
    assert_eq!(model.cursor_label().as_deref(), Some("Ln 2, Col 3"));
}

#[test]
fn test_word_count_follows_edits() {
    let mut model = test_model("one two", 0, 7);
    assert_eq!(model.word_count_label(), "2 words");

    update(
        &mut model,
        Msg::Document(DocumentMsg::InsertText(" three".to_string())),
    );
    assert_eq!(model.word_count_label(), "3 words");

    update(&mut model, Msg::Editor(EditorMsg::SelectAll));
    update(&mut model, Msg::Document(DocumentMsg::InsertText("x".to_string())));
    assert_eq!(model.word_count_label(), "1 words");
}

#[test]
fn test_status_prefers_transient_message() {
    let mut model = test_model("a", 0, 0);
    model.active_tab_mut().unwrap().document.file_path = Some(PathBuf::from("/docs/a.md"));
    assert_eq!(model.status_text(), "/docs/a.md");

    update(
        &mut model,
        Msg::Ui(UiMsg::SetTransientMessage {
            text: "Hello".to_string(),
            duration_ms: 60_000,
        }),
    );
    assert_eq!(model.status_text(), "Hello");
}

#[test]
fn test_expired_transient_message_is_dropped_on_tick() {
    let mut model = test_model("a", 0, 0);
    update(
        &mut model,
        Msg::Ui(UiMsg::SetTransientMessage {
            text: "gone soon".to_string(),
            duration_ms: 0,
        }),
    );
    std::thread::sleep(Duration::from_millis(5));

    update(&mut model, Msg::Ui(UiMsg::BlinkCursor));
    assert!(model.ui.transient_message.is_none());
    assert_eq!(model.status_text(), "");
}

#[test]
fn test_status_fallback_without_path() {
    let mut model = test_model("a", 0, 0);
    update(&mut model, Msg::Ui(UiMsg::SetStatus("Ready".to_string())));
    assert_eq!(model.status_text(), "Ready");
}

// ========================================================================
// Hit testing against the live model
// ========================================================================

#[test]
fn test_toolbar_buttons_hit_their_commands() {
    let model = test_model("a", 0, 0);
    let layout = model.layout();

    let on_screen = layout
        .buttons
        .iter()
        .filter(|b| b.rect.right() <= layout.window.width);
    for button in on_screen {
        let (x, y) = (button.rect.x + 1.0, button.rect.y + 1.0);
        assert_eq!(
            layout.hit_test(&model, x, y),
            HitTarget::ToolbarButton(button.command)
        );
    }
    assert!(layout
        .buttons
        .iter()
        .any(|b| b.command == Command::ExportPdf));
}

#[test]
fn test_tab_header_and_close_box() {
    let mut model = test_model("a", 0, 0);
    model.add_tab(markpane::model::Document::new());
    let layout = model.layout();
    let headers = layout.tab_headers(&model.tabs.tabs);
    assert_eq!(headers.len(), 2);

    let second = &headers[1];
    assert_eq!(
        layout.hit_test(&model, second.rect.x + 2.0, second.rect.y + 2.0),
        HitTarget::Tab(second.id)
    );
    let (cx, cy) = (
        second.close.x + second.close.width / 2.0,
        second.close.y + second.close.height / 2.0,
    );
    assert_eq!(layout.hit_test(&model, cx, cy), HitTarget::TabClose(second.id));
}

#[test]
fn test_click_in_text_resolves_position_with_scroll() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    update(&mut model, Msg::Editor(EditorMsg::Scroll(10)));
    let layout = model.layout();

    let x = layout.text.x + layout.char_width * 2.0;
    let y = layout.text.y + layout.line_height * 3.0 + 1.0;

    assert_eq!(
        layout.hit_test(&model, x, y),
        HitTarget::EditorText(Position::new(13, 2))
    );
}

#[test]
fn test_sync_segment_needs_a_tab() {
    let model = test_model("a", 0, 0);
    let layout = model.layout();
    let seg = layout.sync_segment;
    let (x, y) = (seg.x + seg.width / 2.0, seg.y + seg.height / 2.0);
    assert_eq!(layout.hit_test(&model, x, y), HitTarget::SyncToggle);

    let empty = common::empty_model();
    let layout = empty.layout();
    assert_eq!(layout.hit_test(&empty, x, y), HitTarget::StatusBar);
}

#[test]
fn test_preview_pane_is_its_own_target() {
    let model = test_model("a", 0, 0);
    let layout = model.layout();
    let p = layout.preview;
    assert_eq!(
        layout.hit_test(&model, p.x + p.width / 2.0, p.y + p.height / 2.0),
        HitTarget::Preview
    );
}
