//! HTML export and printing to PDF

use std::path::PathBuf;

use crate::commands::{Cmd, MessageLevel};
use crate::markdown::{export_document, PreviewTheme};
use crate::messages::ExportMsg;
use crate::model::AppModel;
use crate::util::text::change_extension;

use super::app::{active_dir, error_message};

const HTML_EXTENSION: &str = "html";
const PDF_EXTENSION: &str = "pdf";

pub fn update_export(model: &mut AppModel, msg: ExportMsg) -> Option<Cmd> {
    match msg {
        ExportMsg::ExportHtml => {
            let start_dir = active_dir(model);
            let tab = model.active_tab()?;
            Some(Cmd::ShowExportDialog {
                tab_id: tab.id,
                suggested_name: change_extension(&tab.document.file_name(), HTML_EXTENSION),
                start_dir,
            })
        }

        ExportMsg::ExportHtmlDialogResult { tab_id, path } => {
            let path = with_html_extension(path?);
            let tab = model.tabs.get(tab_id)?;
            let theme = PreviewTheme::from_editor_theme(&model.theme);
            let html = export_document(&tab.document.text(), &tab.document.file_name(), &theme);
            model.ui.set_transient("Exporting...");
            Some(Cmd::WriteExport { path, html })
        }

        ExportMsg::ExportCompleted { path, result } => match result {
            Ok(()) => {
                tracing::info!("Exported {}", path.display());
                model
                    .ui
                    .set_transient(format!("Exported: {}", path.display()));
                Some(Cmd::batch(vec![
                    Cmd::ShowMessage {
                        level: MessageLevel::Info,
                        title: "Export".to_string(),
                        text: format!("Successfully exported to {}", path.display()),
                    },
                    Cmd::Redraw,
                ]))
            }
            Err(e) => {
                tracing::error!("Export to {} failed: {}", path.display(), e);
                Some(error_message(format!("Error exporting file: {}", e)))
            }
        },

        ExportMsg::ExportPdf => {
            let tab = model.active_tab()?;
            Some(Cmd::PrintPreview {
                tab_id: tab.id,
                document_name: change_extension(&tab.document.file_name(), PDF_EXTENSION),
            })
        }
    }
}

fn with_html_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(HTML_EXTENSION)
    }
}
