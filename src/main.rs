//! Markpane - a tabbed Markdown editor with a live preview

mod runtime;
mod view;

use anyhow::{anyhow, Result};
use clap::Parser;
use winit::event_loop::EventLoop;

use markpane::cli::CliArgs;
use markpane::config::EditorConfig;

use runtime::App;

fn main() -> Result<()> {
    let _log_guard = markpane::tracing::init();

    let startup = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;
    markpane::config_paths::ensure_config_dirs();
    let config = EditorConfig::load();
    tracing::info!("Starting with {} file(s)", startup.paths.len());

    let event_loop = EventLoop::<()>::with_user_event().build()?;
    let mut app = App::new(config, startup, event_loop.create_proxy());

    event_loop.run_app(&mut app)?;

    Ok(())
}
