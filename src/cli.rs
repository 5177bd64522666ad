//! Command-line argument parsing for the editor
//!
//! Supports:
//! - Opening Markdown files as tabs
//! - Forcing an empty tab
//! - Overriding the theme and scroll sync for one run

use clap::Parser;
use std::path::PathBuf;

use crate::messages::{AppMsg, LayoutMsg, Msg};
use crate::model::AppModel;
use crate::theme::ThemeMode;

/// A Markdown editor with a live preview
#[derive(Parser, Debug)]
#[command(
    name = "markpane",
    version,
    about = "A Markdown editor with a live preview"
)]
pub struct CliArgs {
    /// Markdown files to open, one tab each
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Open an empty tab before any files
    #[arg(short = 'n', long)]
    pub new: bool,

    /// Use the dark theme for this run
    #[arg(long, conflicts_with = "light")]
    pub dark: bool,

    /// Use the light theme for this run
    #[arg(long)]
    pub light: bool,

    /// Start new tabs with scroll sync disabled
    #[arg(long)]
    pub no_sync: bool,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    /// Create an Untitled tab before opening `paths`
    pub empty_tab: bool,
    pub paths: Vec<PathBuf>,
    /// Theme override for this run (not persisted)
    pub theme: Option<ThemeMode>,
    /// Initial scroll sync override for new tabs
    pub scroll_sync: Option<bool>,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration
    pub fn into_config(self) -> Result<StartupConfig, String> {
        if let Some(dir) = self.paths.iter().find(|p| p.is_dir()) {
            return Err(format!("Cannot open a directory: {}", dir.display()));
        }

        let theme = if self.dark {
            Some(ThemeMode::Dark)
        } else if self.light {
            Some(ThemeMode::Light)
        } else {
            None
        };

        Ok(StartupConfig {
            empty_tab: self.new || self.paths.is_empty(),
            paths: self.paths,
            theme,
            scroll_sync: self.no_sync.then_some(false),
        })
    }
}

impl StartupConfig {
    /// Apply run-only overrides to a freshly built model
    pub fn apply(&self, model: &mut AppModel) {
        if let Some(mode) = self.theme {
            let persisted = model.config.theme;
            model.set_theme_mode(mode);
            model.config.theme = persisted;
        }
        if let Some(enabled) = self.scroll_sync {
            model.sync_default = enabled;
        }
    }

    /// Messages that create the initial tabs
    pub fn startup_messages(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        if self.empty_tab {
            msgs.push(Msg::Layout(LayoutMsg::NewTab));
        }
        if !self.paths.is_empty() {
            msgs.push(Msg::App(AppMsg::OpenFiles(self.paths.clone())));
        }
        msgs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    fn parse(args: &[&str]) -> StartupConfig {
        let mut argv = vec!["markpane"];
        argv.extend_from_slice(args);
        CliArgs::parse_from(argv).into_config().unwrap()
    }

    #[test]
    fn no_paths_gives_one_empty_tab() {
        let config = parse(&[]);
        assert!(config.empty_tab);
        let msgs = config.startup_messages();
        assert_eq!(msgs.len(), 1);
        assert!(matches!(msgs[0], Msg::Layout(LayoutMsg::NewTab)));
    }

    #[test]
    fn paths_open_in_order() {
        let config = parse(&["a.md", "b.md"]);
        assert!(!config.empty_tab);
        let msgs = config.startup_messages();
        assert_eq!(msgs.len(), 1);
        match &msgs[0] {
            Msg::App(AppMsg::OpenFiles(paths)) => {
                assert_eq!(paths, &vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn new_flag_adds_empty_tab_first() {
        let msgs = parse(&["--new", "a.md"]).startup_messages();
        assert_eq!(msgs.len(), 2);
        assert!(matches!(msgs[0], Msg::Layout(LayoutMsg::NewTab)));
    }

    #[test]
    fn theme_flags_conflict() {
        assert!(CliArgs::try_parse_from(["markpane", "--dark", "--light"]).is_err());
        assert_eq!(parse(&["--dark"]).theme, Some(ThemeMode::Dark));
        assert_eq!(parse(&["--light"]).theme, Some(ThemeMode::Light));
        assert_eq!(parse(&[]).theme, None);
    }

    #[test]
    fn overrides_do_not_touch_persisted_theme() {
        let mut model = AppModel::new(EditorConfig::default(), 800, 600);
        parse(&["--dark", "--no-sync"]).apply(&mut model);
        assert_eq!(model.theme_mode, ThemeMode::Dark);
        assert_eq!(model.config.theme, ThemeMode::Light);
        assert!(!model.sync_default);
        assert!(model.config.scroll_sync);
    }

    #[test]
    fn directories_are_rejected() {
        let dir = std::env::temp_dir();
        let args = CliArgs::parse_from(["markpane".into(), dir.into_os_string()]);
        assert!(args.into_config().is_err());
    }
}
