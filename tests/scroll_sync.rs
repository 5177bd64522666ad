//! Scroll synchronization tests - editor to preview and back

mod common;

use common::{active, flatten, numbered_lines, test_model};
use markpane::commands::Cmd;
use markpane::messages::{AppMsg, EditorMsg, LayoutMsg, Msg, PreviewMsg};
use markpane::model::TabId;
use markpane::update::update;
use markpane::AppModel;

fn preview_scroll(model: &mut AppModel, tab_id: TabId, payload: &str) -> Vec<Cmd> {
    flatten(update(
        model,
        Msg::Preview(PreviewMsg::Message {
            tab_id,
            payload: payload.to_string(),
        }),
    ))
}

fn scroll_fraction(cmds: &[Cmd]) -> Option<f64> {
    cmds.iter().find_map(|cmd| match cmd {
        Cmd::ScrollPreview { fraction, .. } => Some(*fraction),
        _ => None,
    })
}

#[test]
fn test_editor_scroll_is_forwarded_as_fraction() {
    // 100 lines, 25 visible: 75 lines of scroll range
    let mut model = test_model(&numbered_lines(100), 0, 0);
    let id = model.tabs.active_id().unwrap();

    let cmds = flatten(update(&mut model, Msg::Editor(EditorMsg::Scroll(30))));

    assert!(cmds
        .iter()
        .any(|cmd| matches!(cmd, Cmd::ScrollPreview { tab_id, .. } if *tab_id == id)));
    let fraction = scroll_fraction(&cmds).unwrap();
    assert!((fraction - 0.4).abs() < 1e-9);
    assert!(!active(&model).scroll_sync.is_editor_scrolling());
}

#[test]
fn test_cursor_movement_that_scrolls_is_forwarded() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    let cmds = flatten(update(
        &mut model,
        Msg::Editor(EditorMsg::MoveCursorDocumentEnd),
    ));
    assert_eq!(scroll_fraction(&cmds), Some(1.0));
}

#[test]
fn test_scroll_after_background_clamp_is_forwarded() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    let id = model.tabs.active_id().unwrap();
    let cmds = flatten(update(&mut model, Msg::Editor(EditorMsg::Scroll(10))));
    assert!(scroll_fraction(&cmds).is_some());

    // a tall window clamps the background tab back to the top
    update(&mut model, Msg::Layout(LayoutMsg::NewTab));
    update(&mut model, Msg::App(AppMsg::Resize(800, 4000)));
    update(&mut model, Msg::App(AppMsg::Resize(800, 600)));
    update(&mut model, Msg::Layout(LayoutMsg::ActivateTab(id)));
    assert_eq!(active(&model).editor.viewport.top_line, 0);

    let cmds = flatten(update(&mut model, Msg::Editor(EditorMsg::Scroll(10))));
    assert_eq!(active(&model).editor.viewport.top_line, 10);
    assert!(cmds
        .iter()
        .any(|cmd| matches!(cmd, Cmd::ScrollPreview { tab_id, .. } if *tab_id == id)));
}

#[test]
fn test_movement_without_scroll_is_not_forwarded() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    let cmds = flatten(update(&mut model, Msg::Editor(EditorMsg::MoveCursorLineEnd)));
    assert!(scroll_fraction(&cmds).is_none());
}

#[test]
fn test_short_document_has_nothing_to_forward() {
    let mut model = test_model("one\ntwo", 0, 0);
    let cmds = flatten(update(&mut model, Msg::Editor(EditorMsg::Scroll(3))));
    assert!(scroll_fraction(&cmds).is_none());
}

#[test]
fn test_preview_scroll_moves_editor_without_echo() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    let id = model.tabs.active_id().unwrap();

    let cmds = preview_scroll(&mut model, id, r#"{"type":"scroll","percent":0.5}"#);

    // round(0.5 * 75) = 38
    assert_eq!(active(&model).editor.viewport.top_line, 38);
    assert!(scroll_fraction(&cmds).is_none());
    assert!(!active(&model).scroll_sync.is_preview_scrolling());
}

#[test]
fn test_preview_scroll_is_clamped() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    let id = model.tabs.active_id().unwrap();

    preview_scroll(&mut model, id, r#"{"type":"scroll","percent":3.0}"#);
    assert_eq!(active(&model).editor.viewport.top_line, 75);

    preview_scroll(&mut model, id, r#"{"type":"scroll","percent":-1}"#);
    assert_eq!(active(&model).editor.viewport.top_line, 0);
}

#[test]
fn test_editor_scroll_after_preview_scroll_is_forwarded_again() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    let id = model.tabs.active_id().unwrap();
    preview_scroll(&mut model, id, r#"{"type":"scroll","percent":0.2}"#);

    let cmds = flatten(update(&mut model, Msg::Editor(EditorMsg::Scroll(1))));
    assert!(scroll_fraction(&cmds).is_some());
}

#[test]
fn test_preview_scroll_of_background_tab() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    let background = model.tabs.active_id().unwrap();
    update(&mut model, Msg::Layout(markpane::messages::LayoutMsg::NewTab));

    preview_scroll(&mut model, background, r#"{"type":"scroll","percent":1}"#);

    let tab = model.tabs.get(background).unwrap();
    assert_eq!(tab.editor.viewport.top_line, 75);
}

#[test]
fn test_disabled_sync_ignores_both_directions() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    let id = model.tabs.active_id().unwrap();
    update(&mut model, Msg::Preview(PreviewMsg::ToggleScrollSync));
    assert!(!model.sync_enabled());

    let cmds = flatten(update(&mut model, Msg::Editor(EditorMsg::Scroll(10))));
    assert!(scroll_fraction(&cmds).is_none());

    preview_scroll(&mut model, id, r#"{"type":"scroll","percent":0}"#);
    assert_eq!(active(&model).editor.viewport.top_line, 10);
}

#[test]
fn test_toggle_reports_state() {
    let mut model = test_model("x", 0, 0);

    update(&mut model, Msg::Preview(PreviewMsg::ToggleScrollSync));
    assert_eq!(model.status_text(), "Scroll sync disabled");
    assert_eq!(model.sync_label(), "Sync: off");

    update(&mut model, Msg::Preview(PreviewMsg::ToggleScrollSync));
    assert_eq!(model.status_text(), "Scroll sync enabled");
    assert_eq!(model.sync_label(), "Sync: on");
}

#[test]
fn test_sync_is_per_tab() {
    let mut model = test_model("x", 0, 0);
    let first = model.tabs.active_id().unwrap();
    update(&mut model, Msg::Preview(PreviewMsg::ToggleScrollSync));
    update(&mut model, Msg::Layout(markpane::messages::LayoutMsg::NewTab));

    assert!(model.sync_enabled());
    assert!(!model.tabs.get(first).unwrap().scroll_sync.enabled);
}

#[test]
fn test_malformed_payloads_are_ignored() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    let id = model.tabs.active_id().unwrap();
    model.active_tab_mut().unwrap().editor.viewport.top_line = 5;

    for payload in [
        "not json",
        r#"{"type":"click","x":1}"#,
        r#"{"type":"scroll"}"#,
        r#"{"type":"scroll","percent":"half"}"#,
    ] {
        assert!(preview_scroll(&mut model, id, payload).is_empty(), "{}", payload);
    }
    assert_eq!(active(&model).editor.viewport.top_line, 5);
}

#[test]
fn test_message_for_closed_tab_is_ignored() {
    let mut model = test_model(&numbered_lines(100), 0, 0);
    let cmds = preview_scroll(&mut model, TabId(4242), r#"{"type":"scroll","percent":0.5}"#);
    assert!(cmds.is_empty());
}
