//! Tab management and close/quit flow tests

mod common;

use std::path::PathBuf;

use common::{active, flatten, test_model};
use markpane::commands::Cmd;
use markpane::messages::{AppMsg, CloseChoice, DocumentMsg, LayoutMsg, Msg};
use markpane::model::{Document, TabId};
use markpane::update::update;
use markpane::AppModel;

fn layout(model: &mut AppModel, msg: LayoutMsg) -> Vec<Cmd> {
    flatten(update(model, Msg::Layout(msg)))
}

fn make_dirty(model: &mut AppModel) {
    update(model, Msg::Document(DocumentMsg::InsertChar('!')));
}

fn confirm_close_for(cmds: &[Cmd]) -> Option<(TabId, String)> {
    cmds.iter().find_map(|cmd| match cmd {
        Cmd::ConfirmClose { tab_id, file_name } => Some((*tab_id, file_name.clone())),
        _ => None,
    })
}

fn has_quit(cmds: &[Cmd]) -> bool {
    cmds.iter().any(|cmd| matches!(cmd, Cmd::Quit))
}

fn confirm(model: &mut AppModel, tab_id: TabId, choice: CloseChoice) -> Vec<Cmd> {
    layout(model, LayoutMsg::CloseConfirmed { tab_id, choice })
}

// ========================================================================
// Switching
// ========================================================================

#[test]
fn test_new_tab_is_untitled_and_active() {
    let mut model = test_model("first", 0, 0);
    let first = model.tabs.active_id();

    layout(&mut model, LayoutMsg::NewTab);

    assert_eq!(model.tabs.len(), 2);
    assert_ne!(model.tabs.active_id(), first);
    assert_eq!(active(&model).document.file_name(), "Untitled");
    assert_eq!(active(&model).document.text(), "");
}

#[test]
fn test_new_tab_gets_initial_preview() {
    let mut model = test_model("first", 0, 0);
    let cmds = layout(&mut model, LayoutMsg::NewTab);
    let new_id = model.tabs.active_id();

    assert!(cmds.iter().any(|cmd| matches!(
        cmd,
        Cmd::RenderPreview { tab_id, full_reload: true, .. } if Some(*tab_id) == new_id
    )));
}

#[test]
fn test_next_and_prev_tab_wrap() {
    let mut model = test_model("a", 0, 0);
    layout(&mut model, LayoutMsg::NewTab);
    layout(&mut model, LayoutMsg::NewTab);
    let ids = model.tabs.ids();

    layout(&mut model, LayoutMsg::NextTab);
    assert_eq!(model.tabs.active_id(), Some(ids[0]));

    layout(&mut model, LayoutMsg::PrevTab);
    assert_eq!(model.tabs.active_id(), Some(ids[2]));
}

#[test]
fn test_activate_tab_keeps_per_tab_state() {
    let mut model = test_model("hello", 0, 3);
    let first = model.tabs.active_id().unwrap();
    layout(&mut model, LayoutMsg::NewTab);

    layout(&mut model, LayoutMsg::ActivateTab(first));

    assert_eq!(model.tabs.active_id(), Some(first));
    assert_eq!(active(&model).editor.cursor.column, 3);
    assert_eq!(active(&model).document.text(), "hello");
}

// ========================================================================
// Closing
// ========================================================================

#[test]
fn test_close_clean_tab_without_prompt() {
    let mut model = test_model("a", 0, 0);
    layout(&mut model, LayoutMsg::NewTab);
    let id = model.tabs.active_id().unwrap();

    let cmds = layout(&mut model, LayoutMsg::CloseTab(id));

    assert!(confirm_close_for(&cmds).is_none());
    assert_eq!(model.tabs.len(), 1);
    assert!(model.tabs.get(id).is_none());
}

#[test]
fn test_closing_last_tab_leaves_window_empty() {
    let mut model = test_model("a", 0, 0);
    let cmds = layout(&mut model, LayoutMsg::CloseActiveTab);

    assert!(model.tabs.is_empty());
    assert!(!has_quit(&cmds));
    assert_eq!(model.window_title(), "Markpane");
}

#[test]
fn test_close_dirty_tab_asks_first() {
    let mut model = test_model("a", 0, 1);
    make_dirty(&mut model);
    let id = model.tabs.active_id().unwrap();

    let cmds = layout(&mut model, LayoutMsg::CloseTab(id));

    assert_eq!(confirm_close_for(&cmds), Some((id, "Untitled".to_string())));
    assert_eq!(model.ui.pending_close, Some(id));
    assert_eq!(model.tabs.len(), 1);
}

#[test]
fn test_cancel_keeps_tab_and_clears_pending() {
    let mut model = test_model("a", 0, 1);
    make_dirty(&mut model);
    let id = model.tabs.active_id().unwrap();
    layout(&mut model, LayoutMsg::CloseTab(id));

    confirm(&mut model, id, CloseChoice::Cancel);

    assert!(model.tabs.get(id).is_some());
    assert!(model.ui.pending_close.is_none());
    assert!(active(&model).document.is_modified);
}

#[test]
fn test_discard_closes_tab() {
    let mut model = test_model("a", 0, 1);
    make_dirty(&mut model);
    let id = model.tabs.active_id().unwrap();
    layout(&mut model, LayoutMsg::CloseTab(id));

    confirm(&mut model, id, CloseChoice::Discard);

    assert!(model.tabs.is_empty());
    assert!(model.ui.pending_close.is_none());
}

#[test]
fn test_close_requests_ignored_while_prompt_open() {
    let mut model = test_model("a", 0, 1);
    make_dirty(&mut model);
    let first = model.tabs.active_id().unwrap();
    layout(&mut model, LayoutMsg::NewTab);
    let second = model.tabs.active_id().unwrap();

    layout(&mut model, LayoutMsg::CloseTab(first));
    let cmds = layout(&mut model, LayoutMsg::CloseTab(second));

    assert!(cmds.is_empty());
    assert!(model.tabs.get(second).is_some());
    assert_eq!(model.ui.pending_close, Some(first));
}

#[test]
fn test_answer_for_other_tab_is_ignored() {
    let mut model = test_model("a", 0, 1);
    make_dirty(&mut model);
    let id = model.tabs.active_id().unwrap();
    layout(&mut model, LayoutMsg::CloseTab(id));

    let cmds = confirm(&mut model, TabId(9999), CloseChoice::Discard);

    assert!(cmds.is_empty());
    assert!(model.tabs.get(id).is_some());
    assert_eq!(model.ui.pending_close, Some(id));
}

#[test]
fn test_save_choice_with_path_closes_after_save() {
    let mut model = test_model("a", 0, 1);
    let path = PathBuf::from("/tmp/markpane-close.md");
    model.active_tab_mut().unwrap().document.file_path = Some(path.clone());
    make_dirty(&mut model);
    let id = model.tabs.active_id().unwrap();
    layout(&mut model, LayoutMsg::CloseTab(id));

    let cmds = confirm(&mut model, id, CloseChoice::Save);
    let (saved_path, content, revision) = cmds
        .iter()
        .find_map(|cmd| match cmd {
            Cmd::SaveFile {
                path,
                content,
                revision,
                ..
            } => Some((path.clone(), content.clone(), *revision)),
            _ => None,
        })
        .expect("save command");
    assert_eq!(saved_path, path);
    assert_eq!(content, "a!");
    assert!(model.tabs.get(id).is_some(), "tab stays until the write lands");

    update(
        &mut model,
        Msg::App(AppMsg::SaveCompleted {
            tab_id: id,
            path,
            revision,
            result: Ok(()),
        }),
    );
    assert!(model.tabs.is_empty());
    assert!(model.ui.pending_close.is_none());
}

#[test]
fn test_edit_during_save_and_close_prompts_again() {
    let mut model = test_model("a", 0, 1);
    let path = PathBuf::from("/tmp/markpane-close.md");
    model.active_tab_mut().unwrap().document.file_path = Some(path.clone());
    make_dirty(&mut model);
    let id = model.tabs.active_id().unwrap();
    layout(&mut model, LayoutMsg::CloseTab(id));

    let cmds = confirm(&mut model, id, CloseChoice::Save);
    let revision = cmds
        .iter()
        .find_map(|cmd| match cmd {
            Cmd::SaveFile { revision, .. } => Some(*revision),
            _ => None,
        })
        .expect("save command");

    // typed while the write is in flight
    update(&mut model, Msg::Document(DocumentMsg::InsertChar('?')));

    let cmds = flatten(update(
        &mut model,
        Msg::App(AppMsg::SaveCompleted {
            tab_id: id,
            path,
            revision,
            result: Ok(()),
        }),
    ));

    assert!(model.tabs.get(id).is_some(), "newer edit must not be dropped");
    assert_eq!(active(&model).document.text(), "a!?");
    assert!(active(&model).document.is_modified);
    assert_eq!(
        confirm_close_for(&cmds),
        Some((id, "markpane-close.md".to_string()))
    );
    assert_eq!(model.ui.pending_close, Some(id));

    confirm(&mut model, id, CloseChoice::Discard);
    assert!(model.tabs.is_empty());
}

#[test]
fn test_save_choice_without_path_opens_dialog() {
    let mut model = test_model("a", 0, 1);
    make_dirty(&mut model);
    let id = model.tabs.active_id().unwrap();
    layout(&mut model, LayoutMsg::CloseTab(id));

    let cmds = confirm(&mut model, id, CloseChoice::Save);

    assert!(cmds.iter().any(|cmd| matches!(
        cmd,
        Cmd::ShowSaveFileDialog { tab_id, suggested_name, .. }
            if *tab_id == id && suggested_name == "Untitled"
    )));
    assert_eq!(model.ui.pending_close, Some(id));
}

#[test]
fn test_cancelled_save_dialog_keeps_tab() {
    let mut model = test_model("a", 0, 1);
    make_dirty(&mut model);
    let id = model.tabs.active_id().unwrap();
    layout(&mut model, LayoutMsg::CloseTab(id));
    confirm(&mut model, id, CloseChoice::Save);

    update(
        &mut model,
        Msg::App(AppMsg::SaveFileAsDialogResult {
            tab_id: id,
            path: None,
        }),
    );

    assert!(model.tabs.get(id).is_some());
    assert!(model.ui.pending_close.is_none());
}

#[test]
fn test_failed_save_keeps_tab_and_reports() {
    let mut model = test_model("a", 0, 1);
    let path = PathBuf::from("/nonexistent/dir/x.md");
    model.active_tab_mut().unwrap().document.file_path = Some(path.clone());
    make_dirty(&mut model);
    let id = model.tabs.active_id().unwrap();
    layout(&mut model, LayoutMsg::CloseTab(id));
    confirm(&mut model, id, CloseChoice::Save);

    let cmds = flatten(update(
        &mut model,
        Msg::App(AppMsg::SaveCompleted {
            tab_id: id,
            path,
            revision: 1,
            result: Err("permission denied".to_string()),
        }),
    ));

    assert!(model.tabs.get(id).is_some());
    assert!(model.ui.pending_close.is_none());
    assert!(active(&model).document.is_modified);
    assert!(cmds.iter().any(|cmd| matches!(
        cmd,
        Cmd::ShowMessage { text, .. } if text == "Error saving file: permission denied"
    )));
    assert_eq!(model.status_text(), "Save failed");
}

// ========================================================================
// Quitting
// ========================================================================

#[test]
fn test_quit_with_clean_tabs_exits() {
    let mut model = test_model("a", 0, 0);
    layout(&mut model, LayoutMsg::NewTab);

    let cmds = flatten(update(&mut model, Msg::App(AppMsg::QuitRequested)));

    assert!(has_quit(&cmds));
    assert!(model.tabs.is_empty());
}

#[test]
fn test_quit_with_no_tabs_exits() {
    let mut model = common::empty_model();
    let cmds = flatten(update(&mut model, Msg::App(AppMsg::QuitRequested)));
    assert!(has_quit(&cmds));
}

#[test]
fn test_quit_prompts_for_each_dirty_tab() {
    let mut model = test_model("a", 0, 1);
    make_dirty(&mut model);
    let dirty_a = model.tabs.active_id().unwrap();
    layout(&mut model, LayoutMsg::NewTab);
    let clean = model.tabs.active_id().unwrap();
    model.add_tab(Document::with_text("b"));
    make_dirty(&mut model);
    let dirty_b = model.tabs.active_id().unwrap();

    let cmds = flatten(update(&mut model, Msg::App(AppMsg::QuitRequested)));
    assert!(model.tabs.get(clean).is_none(), "clean tabs close first");
    assert_eq!(confirm_close_for(&cmds).map(|(id, _)| id), Some(dirty_a));
    assert!(!has_quit(&cmds));

    let cmds = confirm(&mut model, dirty_a, CloseChoice::Discard);
    assert_eq!(confirm_close_for(&cmds).map(|(id, _)| id), Some(dirty_b));

    let cmds = confirm(&mut model, dirty_b, CloseChoice::Discard);
    assert!(has_quit(&cmds));
    assert!(model.tabs.is_empty());
}

#[test]
fn test_cancel_aborts_quit() {
    let mut model = test_model("a", 0, 1);
    make_dirty(&mut model);
    let id = model.tabs.active_id().unwrap();

    update(&mut model, Msg::App(AppMsg::QuitRequested));
    assert!(model.ui.quitting);

    let cmds = confirm(&mut model, id, CloseChoice::Cancel);

    assert!(!has_quit(&cmds));
    assert!(!model.ui.quitting);
    assert_eq!(model.tabs.len(), 1);

    // a later plain close must not resume the abandoned quit
    layout(&mut model, LayoutMsg::NewTab);
    let cmds = layout(&mut model, LayoutMsg::CloseActiveTab);
    assert!(!has_quit(&cmds));
}
