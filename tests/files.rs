//! File open/save flow tests

mod common;

use std::path::PathBuf;

use common::{active, flatten, test_model};
use markpane::commands::Cmd;
use markpane::messages::{AppMsg, DocumentMsg, Msg};
use markpane::model::TabId;
use markpane::update::update;
use markpane::AppModel;
use tempfile::TempDir;

fn load_commands(cmds: &[Cmd]) -> Vec<(TabId, PathBuf)> {
    cmds.iter()
        .filter_map(|cmd| match cmd {
            Cmd::LoadFile { tab_id, path } => Some((*tab_id, path.clone())),
            _ => None,
        })
        .collect()
}

fn save_command(cmds: &[Cmd]) -> Option<(PathBuf, String, u64)> {
    cmds.iter().find_map(|cmd| match cmd {
        Cmd::SaveFile {
            path,
            content,
            revision,
            ..
        } => Some((path.clone(), content.clone(), *revision)),
        _ => None,
    })
}

/// A markdown file in a fresh temp dir, returned with its canonical path
fn temp_markdown(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    let path = std::fs::canonicalize(path).unwrap();
    (dir, path)
}

fn open(model: &mut AppModel, paths: Vec<PathBuf>) -> Vec<Cmd> {
    flatten(update(model, Msg::App(AppMsg::OpenFiles(paths))))
}

fn loaded(model: &mut AppModel, tab_id: TabId, result: Result<String, String>) -> Vec<Cmd> {
    flatten(update(model, Msg::App(AppMsg::FileLoaded { tab_id, result })))
}

// ========================================================================
// Opening
// ========================================================================

#[test]
fn test_open_creates_loading_tab_per_path() {
    let (_dir, a) = temp_markdown("a.md", "# A");
    let (_dir2, b) = temp_markdown("b.md", "# B");
    let mut model = common::empty_model();

    let cmds = open(&mut model, vec![a.clone(), b.clone()]);
    let loads = load_commands(&cmds);

    assert_eq!(model.tabs.len(), 2);
    assert_eq!(loads.len(), 2);
    assert_eq!(loads[0].1, a);
    assert_eq!(loads[1].1, b);
    assert!(model.tabs.iter().all(|tab| tab.loading));
    assert_eq!(model.tabs.active_id(), Some(loads[1].0));
    assert_eq!(model.status_text(), "Loading...");
}

#[test]
fn test_loading_tab_has_no_preview_yet() {
    let (_dir, a) = temp_markdown("a.md", "# A");
    let mut model = common::empty_model();

    let cmds = open(&mut model, vec![a]);

    assert!(!cmds
        .iter()
        .any(|cmd| matches!(cmd, Cmd::RenderPreview { .. })));
}

#[test]
fn test_file_loaded_fills_tab_and_renders() {
    let (_dir, a) = temp_markdown("notes.md", "# Title");
    let mut model = common::empty_model();
    let (tab_id, _) = load_commands(&open(&mut model, vec![a.clone()]))[0].clone();

    let cmds = loaded(&mut model, tab_id, Ok("# Title\n\nbody".to_string()));

    let tab = active(&model);
    assert!(!tab.loading);
    assert!(!tab.document.is_modified);
    assert_eq!(tab.document.text(), "# Title\n\nbody");
    assert!(tab.document.undo_stack.is_empty());
    assert_eq!(model.window_title(), "notes.md - Markpane");
    assert_eq!(model.status_text(), a.display().to_string());
    assert!(cmds.iter().any(|cmd| matches!(
        cmd,
        Cmd::RenderPreview { tab_id: id, html, full_reload: true }
            if *id == tab_id && html.contains("<h1>Title</h1>")
    )));
}

#[test]
fn test_opening_open_file_activates_existing_tab() {
    let (_dir, a) = temp_markdown("a.md", "# A");
    let mut model = common::empty_model();
    let (first, _) = load_commands(&open(&mut model, vec![a.clone()]))[0].clone();
    update(&mut model, Msg::Layout(markpane::messages::LayoutMsg::NewTab));

    let cmds = open(&mut model, vec![a]);

    assert!(load_commands(&cmds).is_empty());
    assert_eq!(model.tabs.len(), 2);
    assert_eq!(model.tabs.active_id(), Some(first));
}

#[test]
fn test_load_failure_closes_tab_and_reports() {
    let mut model = test_model("keep", 0, 0);
    let missing = PathBuf::from("/definitely/not/here.md");
    let (tab_id, path) = load_commands(&open(&mut model, vec![missing.clone()]))[0].clone();
    assert_eq!(path, missing);

    let cmds = loaded(&mut model, tab_id, Err("No such file".to_string()));

    assert!(model.tabs.get(tab_id).is_none());
    assert_eq!(model.tabs.len(), 1);
    assert!(cmds.iter().any(|cmd| matches!(
        cmd,
        Cmd::ShowMessage { text, .. } if text == "Error loading file: No such file"
    )));
}

#[test]
fn test_result_for_closed_tab_is_ignored() {
    let mut model = test_model("keep", 0, 0);
    let cmds = loaded(&mut model, TabId(777), Ok("late".to_string()));
    assert!(cmds.is_empty());
    assert_eq!(active(&model).document.text(), "keep");
}

#[test]
fn test_open_dialog_starts_in_active_file_dir() {
    let mut model = test_model("x", 0, 0);
    model.active_tab_mut().unwrap().document.file_path = Some(PathBuf::from("/docs/a.md"));

    let cmds = flatten(update(&mut model, Msg::App(AppMsg::OpenFileDialog)));

    assert!(cmds.iter().any(|cmd| matches!(
        cmd,
        Cmd::ShowOpenFileDialog { start_dir: Some(dir) } if dir == &PathBuf::from("/docs")
    )));
}

#[test]
fn test_cancelled_open_dialog_opens_nothing() {
    let mut model = test_model("x", 0, 0);
    let cmds = flatten(update(
        &mut model,
        Msg::App(AppMsg::OpenFileDialogResult { paths: vec![] }),
    ));
    assert!(load_commands(&cmds).is_empty());
    assert_eq!(model.tabs.len(), 1);
}

// ========================================================================
// Saving
// ========================================================================

#[test]
fn test_save_with_path_writes_directly() {
    let mut model = test_model("text", 0, 4);
    model.active_tab_mut().unwrap().document.file_path = Some(PathBuf::from("/tmp/t.md"));
    update(&mut model, Msg::Document(DocumentMsg::InsertChar('!')));

    let cmds = flatten(update(&mut model, Msg::App(AppMsg::SaveFile)));
    let (path, content, revision) = save_command(&cmds).expect("save command");

    assert_eq!(path, PathBuf::from("/tmp/t.md"));
    assert_eq!(content, "text!");
    assert_eq!(revision, active(&model).document.revision);
    assert_eq!(model.status_text(), "Saving...");
}

#[test]
fn test_save_untitled_asks_for_path() {
    let mut model = test_model("text", 0, 0);
    let cmds = flatten(update(&mut model, Msg::App(AppMsg::SaveFile)));

    assert!(save_command(&cmds).is_none());
    assert!(cmds
        .iter()
        .any(|cmd| matches!(cmd, Cmd::ShowSaveFileDialog { .. })));
}

#[test]
fn test_save_as_adds_markdown_extension() {
    let mut model = test_model("text", 0, 0);
    let id = model.tabs.active_id().unwrap();

    let cmds = flatten(update(
        &mut model,
        Msg::App(AppMsg::SaveFileAsDialogResult {
            tab_id: id,
            path: Some(PathBuf::from("/tmp/notes")),
        }),
    ));
    assert_eq!(
        save_command(&cmds).map(|(p, _, _)| p),
        Some(PathBuf::from("/tmp/notes.md"))
    );

    let cmds = flatten(update(
        &mut model,
        Msg::App(AppMsg::SaveFileAsDialogResult {
            tab_id: id,
            path: Some(PathBuf::from("/tmp/notes.txt")),
        }),
    ));
    assert_eq!(
        save_command(&cmds).map(|(p, _, _)| p),
        Some(PathBuf::from("/tmp/notes.txt"))
    );
}

#[test]
fn test_save_completed_marks_clean_and_sets_path() {
    let mut model = test_model("a", 0, 1);
    update(&mut model, Msg::Document(DocumentMsg::InsertChar('b')));
    let id = model.tabs.active_id().unwrap();
    let revision = active(&model).document.revision;

    update(
        &mut model,
        Msg::App(AppMsg::SaveCompleted {
            tab_id: id,
            path: PathBuf::from("/tmp/saved.md"),
            revision,
            result: Ok(()),
        }),
    );

    let tab = active(&model);
    assert!(!tab.document.is_modified);
    assert_eq!(tab.document.file_name(), "saved.md");
    assert_eq!(model.status_text(), "Saved: /tmp/saved.md");
}

#[test]
fn test_edit_during_save_keeps_document_dirty() {
    let mut model = test_model("a", 0, 1);
    update(&mut model, Msg::Document(DocumentMsg::InsertChar('b')));
    let id = model.tabs.active_id().unwrap();
    let saved_revision = active(&model).document.revision;
    update(&mut model, Msg::Document(DocumentMsg::InsertChar('c')));

    update(
        &mut model,
        Msg::App(AppMsg::SaveCompleted {
            tab_id: id,
            path: PathBuf::from("/tmp/saved.md"),
            revision: saved_revision,
            result: Ok(()),
        }),
    );

    assert!(active(&model).document.is_modified);
    assert_eq!(model.window_title(), "*saved.md - Markpane");
}

#[test]
fn test_save_ignored_while_loading() {
    let mut model = test_model("a", 0, 0);
    model.active_tab_mut().unwrap().loading = true;
    let cmds = flatten(update(&mut model, Msg::App(AppMsg::SaveFile)));
    assert!(cmds.is_empty());
}
