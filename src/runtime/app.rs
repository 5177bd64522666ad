use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use anyhow::{anyhow, Result};
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoopProxy};
use winit::keyboard::ModifiersState;
use winit::window::{CursorIcon, Window, WindowId};

use markpane::cli::StartupConfig;
use markpane::commands::{Cmd, MessageLevel};
use markpane::config::EditorConfig;
use markpane::keymap::{load_default_keymap, Keymap};
use markpane::layout::HitTarget;
use markpane::messages::{AppMsg, CloseChoice, ExportMsg, LayoutMsg, Msg, PreviewMsg, UiMsg};
use markpane::model::AppModel;
use markpane::update::{update, CURSOR_BLINK_INTERVAL};

use super::input::handle_key;
use super::mouse::{handle_wheel, MouseState};
use super::webview::WebviewManager;
use super::MsgSender;
use crate::view::Renderer;

pub struct App {
    model: AppModel,
    keymap: Keymap,
    startup: StartupConfig,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    webviews: WebviewManager,
    sender: MsgSender,
    msg_rx: Receiver<Msg>,
    modifiers: ModifiersState,
    mouse: MouseState,
    last_tick: Instant,
    last_title: String,
}

impl App {
    pub fn new(config: EditorConfig, startup: StartupConfig, proxy: EventLoopProxy<()>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let keymap = Keymap::with_bindings(load_default_keymap());

        let (width, height) = (config.window_width, config.window_height);
        let mut model = AppModel::new(config, width, height);
        startup.apply(&mut model);

        Self {
            model,
            keymap,
            startup,
            renderer: None,
            window: None,
            context: None,
            webviews: WebviewManager::new(),
            sender: MsgSender::new(msg_tx, proxy),
            msg_rx,
            modifiers: ModifiersState::empty(),
            mouse: MouseState::default(),
            last_tick: Instant::now(),
            last_title: String::new(),
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.model.window_title())
            .with_inner_size(LogicalSize::new(
                self.model.config.window_width,
                self.model.config.window_height,
            ));

        let window = Rc::new(event_loop.create_window(window_attributes)?);
        let context = Context::new(Rc::clone(&window)).map_err(|e| anyhow!("{}", e))?;
        let renderer = Renderer::new(Rc::clone(&window), &context, &self.model.config)?;

        let size = window.inner_size();
        self.model.resize(size.width, size.height);
        self.model
            .set_font_metrics(renderer.line_height(), renderer.char_width());

        self.renderer = Some(renderer);
        self.window = Some(window);
        self.context = Some(context);
        Ok(())
    }

    fn handle_event(&mut self, event: &WindowEvent) -> Option<Cmd> {
        match event {
            WindowEvent::Resized(size) => update(
                &mut self.model,
                Msg::App(AppMsg::Resize(size.width, size.height)),
            ),
            WindowEvent::CloseRequested => {
                update(&mut self.model, Msg::App(AppMsg::QuitRequested))
            }
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
                None
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                handle_key(&mut self.model, &mut self.keymap, event, self.modifiers)
            }
            WindowEvent::RedrawRequested => {
                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.render(&self.model) {
                        tracing::error!("Render error: {}", e);
                    }
                }
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.update_cursor_icon(position.x, position.y);
                self.mouse.moved(&mut self.model, position.x, position.y)
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.mouse.press(&mut self.model, self.modifiers),
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => {
                self.mouse.release();
                None
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let over_editor = self
                    .mouse
                    .position
                    .is_some_and(|(x, y)| self.model.layout().editor.contains(x as f32, y as f32));
                if over_editor {
                    handle_wheel(&mut self.model, *delta)
                } else {
                    None
                }
            }
            WindowEvent::DroppedFile(path) => update(
                &mut self.model,
                Msg::App(AppMsg::OpenFiles(vec![path.clone()])),
            ),
            _ => None,
        }
    }

    fn update_cursor_icon(&self, x: f64, y: f64) {
        let Some(window) = &self.window else { return };
        let icon = match self.model.layout().hit_test(&self.model, x as f32, y as f32) {
            HitTarget::EditorText(_) => CursorIcon::Text,
            HitTarget::ToolbarButton(_)
            | HitTarget::Tab(_)
            | HitTarget::TabClose(_)
            | HitTarget::SyncToggle => CursorIcon::Pointer,
            _ => CursorIcon::Default,
        };
        window.set_cursor(icon);
    }

    /// Perform the side effects of a command
    fn process_cmd(&mut self, cmd: Cmd, event_loop: &ActiveEventLoop) {
        match cmd {
            Cmd::None | Cmd::Redraw => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd, event_loop);
                }
            }

            // =====================================================================
            // File I/O
            // =====================================================================
            Cmd::LoadFile { tab_id, path } => {
                let sender = self.sender.clone();
                std::thread::spawn(move || {
                    let result = std::fs::read_to_string(&path).map_err(|e| e.to_string());
                    sender.send(Msg::App(AppMsg::FileLoaded { tab_id, result }));
                });
            }
            Cmd::SaveFile {
                tab_id,
                path,
                content,
                revision,
            } => {
                let sender = self.sender.clone();
                std::thread::spawn(move || {
                    let result = std::fs::write(&path, content).map_err(|e| e.to_string());
                    sender.send(Msg::App(AppMsg::SaveCompleted {
                        tab_id,
                        path,
                        revision,
                        result,
                    }));
                });
            }
            Cmd::WriteExport { path, html } => {
                let sender = self.sender.clone();
                std::thread::spawn(move || {
                    let result = std::fs::write(&path, html).map_err(|e| e.to_string());
                    sender.send(Msg::Export(ExportMsg::ExportCompleted { path, result }));
                });
            }

            // =====================================================================
            // Dialogs (using rfd)
            // =====================================================================
            Cmd::ShowOpenFileDialog { start_dir } => {
                let sender = self.sender.clone();
                std::thread::spawn(move || {
                    let dlg = with_start_dir(rfd::FileDialog::new(), start_dir)
                        .set_title("Open")
                        .add_filter("Markdown Files", &["md", "mdown", "markdown"])
                        .add_filter("All Files", &["*"]);
                    let paths = dlg.pick_files().unwrap_or_default();
                    sender.send(Msg::App(AppMsg::OpenFileDialogResult { paths }));
                });
            }
            Cmd::ShowSaveFileDialog {
                tab_id,
                suggested_name,
                start_dir,
            } => {
                let sender = self.sender.clone();
                std::thread::spawn(move || {
                    let dlg = with_start_dir(rfd::FileDialog::new(), start_dir)
                        .set_title("Save As")
                        .set_file_name(suggested_name)
                        .add_filter("Markdown File", &["md"]);
                    let path = dlg.save_file();
                    sender.send(Msg::App(AppMsg::SaveFileAsDialogResult { tab_id, path }));
                });
            }
            Cmd::ShowExportDialog {
                tab_id,
                suggested_name,
                start_dir,
            } => {
                let sender = self.sender.clone();
                std::thread::spawn(move || {
                    let dlg = with_start_dir(rfd::FileDialog::new(), start_dir)
                        .set_title("Export HTML")
                        .set_file_name(suggested_name)
                        .add_filter("HTML Files", &["html", "htm"]);
                    let path = dlg.save_file();
                    sender.send(Msg::Export(ExportMsg::ExportHtmlDialogResult { tab_id, path }));
                });
            }
            Cmd::ConfirmClose { tab_id, file_name } => {
                let sender = self.sender.clone();
                std::thread::spawn(move || {
                    let answer = rfd::MessageDialog::new()
                        .set_level(rfd::MessageLevel::Warning)
                        .set_title("Unsaved Changes")
                        .set_description(format!("Do you want to save changes to {}?", file_name))
                        .set_buttons(rfd::MessageButtons::YesNoCancel)
                        .show();
                    let choice = match answer {
                        rfd::MessageDialogResult::Yes => CloseChoice::Save,
                        rfd::MessageDialogResult::No => CloseChoice::Discard,
                        _ => CloseChoice::Cancel,
                    };
                    sender.send(Msg::Layout(LayoutMsg::CloseConfirmed { tab_id, choice }));
                });
            }
            Cmd::ShowMessage { level, title, text } => {
                std::thread::spawn(move || {
                    let level = match level {
                        MessageLevel::Info => rfd::MessageLevel::Info,
                        MessageLevel::Error => rfd::MessageLevel::Error,
                    };
                    rfd::MessageDialog::new()
                        .set_level(level)
                        .set_title(title)
                        .set_description(text)
                        .set_buttons(rfd::MessageButtons::Ok)
                        .show();
                });
            }

            // =====================================================================
            // Preview
            // =====================================================================
            Cmd::RenderPreview {
                tab_id,
                html,
                full_reload,
            } => {
                let Some(window) = &self.window else { return };
                let bounds = self.model.layout().preview;
                if let Err(e) =
                    self.webviews
                        .render(tab_id, window, bounds, &html, full_reload, &self.sender)
                {
                    tracing::error!("Preview render failed for {}: {}", tab_id, e);
                    self.sender.send(Msg::Preview(PreviewMsg::RenderFailed { tab_id }));
                }
            }
            Cmd::ScrollPreview { tab_id, fraction } => {
                self.webviews.scroll_to_fraction(tab_id, fraction);
            }
            Cmd::PrintPreview {
                tab_id,
                document_name,
            } => {
                if let Err(e) = self.webviews.print(tab_id, &document_name) {
                    tracing::warn!("Print failed for {}: {}", tab_id, e);
                    self.process_cmd(
                        Cmd::ShowMessage {
                            level: MessageLevel::Error,
                            title: "Export PDF".to_string(),
                            text: e.to_string(),
                        },
                        event_loop,
                    );
                }
            }

            Cmd::SaveConfig(config) => {
                if let Err(e) = config.save() {
                    tracing::warn!("Failed to save config: {}", e);
                }
            }
            Cmd::Quit => event_loop.exit(),
        }
    }

    /// Run a command produced by an update and bring the window in line
    /// with the new model
    fn apply(&mut self, cmd: Option<Cmd>, event_loop: &ActiveEventLoop) {
        let needs_redraw = cmd.as_ref().is_some_and(Cmd::needs_redraw);
        if let Some(cmd) = cmd {
            self.process_cmd(cmd, event_loop);
        }
        if needs_redraw {
            self.sync_window();
        }
    }

    fn sync_window(&mut self) {
        let Some(window) = &self.window else { return };

        let title = self.model.window_title();
        if title != self.last_title {
            window.set_title(&title);
            self.last_title = title;
        }

        self.webviews.retain(&self.model.tabs.ids());
        self.webviews.sync_layout(
            self.model.tabs.active_id(),
            self.model.layout().preview,
            window.scale_factor(),
            window.inner_size().height,
        );
        window.request_redraw();
    }

    fn process_async_messages(&mut self, event_loop: &ActiveEventLoop) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            let cmd = update(&mut self.model, msg);
            self.apply(cmd, event_loop);
        }
    }
}

fn with_start_dir(dlg: rfd::FileDialog, start_dir: Option<PathBuf>) -> rfd::FileDialog {
    match start_dir {
        Some(dir) => dlg.set_directory(dir),
        None => dlg,
    }
}

impl ApplicationHandler<()> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            tracing::error!("Failed to create window: {:#}", e);
            event_loop.exit();
            return;
        }

        for msg in self.startup.startup_messages() {
            let cmd = update(&mut self.model, msg);
            self.apply(cmd, event_loop);
        }
        self.sync_window();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(|w| w.id()) != Some(window_id) {
            return;
        }
        let cmd = self.handle_event(&event);
        self.apply(cmd, event_loop);
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, _event: ()) {
        self.process_async_messages(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.process_async_messages(event_loop);

        let now = Instant::now();
        if now.duration_since(self.last_tick) >= CURSOR_BLINK_INTERVAL {
            self.last_tick = now;
            let cmd = update(&mut self.model, Msg::Ui(UiMsg::BlinkCursor));
            self.apply(cmd, event_loop);
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(
            self.last_tick + CURSOR_BLINK_INTERVAL,
        ));
    }
}
