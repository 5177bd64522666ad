//! Mouse event handling using the layout hit-test
//!
//! A press is resolved to a [`HitTarget`] and dispatched from there.
//! Presses in the editor text start a drag that extends the selection
//! until the button is released.

use std::time::{Duration, Instant};

use winit::event::MouseScrollDelta;
use winit::keyboard::ModifiersState;

use markpane::commands::Cmd;
use markpane::layout::{HitTarget, Layout};
use markpane::messages::{EditorMsg, LayoutMsg, Msg, PreviewMsg};
use markpane::model::{AppModel, Position};
use markpane::update::update;

use super::input::dispatch_command;

const DOUBLE_CLICK_TIME: Duration = Duration::from_millis(400);
/// Lines scrolled per wheel notch
pub const WHEEL_LINES: f32 = 3.0;

/// Click tracking state for double-click detection
#[derive(Debug, Default)]
pub struct ClickTracker {
    last_click: Option<(Instant, Position)>,
    click_count: u32,
}

impl ClickTracker {
    /// Register a click and return how many rapid clicks landed on `pos`
    pub fn track_click(&mut self, pos: Position) -> u32 {
        let now = Instant::now();
        let repeated = self
            .last_click
            .is_some_and(|(at, last)| last == pos && now.duration_since(at) < DOUBLE_CLICK_TIME);

        self.click_count = if repeated { self.click_count + 1 } else { 1 };
        self.last_click = Some((now, pos));
        self.click_count
    }

    pub fn reset(&mut self) {
        self.last_click = None;
        self.click_count = 0;
    }
}

/// Left-button state across press, move and release
#[derive(Debug, Default)]
pub struct MouseState {
    pub position: Option<(f64, f64)>,
    /// Dragging a selection in the editor text
    pub selecting: bool,
    pub clicks: ClickTracker,
}

impl MouseState {
    /// Handle a left press at the current position
    pub fn press(&mut self, model: &mut AppModel, modifiers: ModifiersState) -> Option<Cmd> {
        let (x, y) = self.position?;
        let layout = model.layout();

        match layout.hit_test(model, x as f32, y as f32) {
            HitTarget::ToolbarButton(command) => {
                self.clicks.reset();
                dispatch_command(model, command)
            }
            HitTarget::Tab(id) => update(model, Msg::Layout(LayoutMsg::ActivateTab(id))),
            HitTarget::TabClose(id) => update(model, Msg::Layout(LayoutMsg::CloseTab(id))),
            HitTarget::SyncToggle => update(model, Msg::Preview(PreviewMsg::ToggleScrollSync)),
            HitTarget::EditorText(pos) => {
                self.selecting = true;
                let Position { line, column } = pos;

                if modifiers.shift_key() {
                    return update(
                        model,
                        Msg::Editor(EditorMsg::ExtendSelectionToPosition { line, column }),
                    );
                }

                if self.clicks.track_click(pos) >= 2 {
                    self.selecting = false;
                    return update(model, Msg::Editor(EditorMsg::SelectWordAt { line, column }));
                }
                update(model, Msg::Editor(EditorMsg::SetCursorPosition { line, column }))
            }
            HitTarget::Gutter
            | HitTarget::Preview
            | HitTarget::StatusBar
            | HitTarget::Chrome
            | HitTarget::None => None,
        }
    }

    /// Extend the selection while dragging
    pub fn moved(&mut self, model: &mut AppModel, x: f64, y: f64) -> Option<Cmd> {
        self.position = Some((x, y));
        if !self.selecting {
            return None;
        }

        let layout = model.layout();
        let tab = model.active_tab()?;
        // Past the top or bottom edge the clamp in position_at picks the
        // nearest visible row, so scroll one line to keep extending
        let scroll = edge_scroll(&layout, y as f32);
        let pos = layout.position_at(tab, x as f32, y as f32);

        if scroll != 0 {
            update(model, Msg::Editor(EditorMsg::Scroll(scroll)));
        }
        update(
            model,
            Msg::Editor(EditorMsg::ExtendSelectionToPosition {
                line: pos.line,
                column: pos.column,
            }),
        )
    }

    pub fn release(&mut self) {
        self.selecting = false;
    }
}

fn edge_scroll(layout: &Layout, y: f32) -> i32 {
    if y < layout.text.y {
        -1
    } else if y >= layout.text.bottom() {
        1
    } else {
        0
    }
}

/// Convert a wheel event to (columns, lines) to scroll
pub fn wheel_delta(delta: MouseScrollDelta, line_height: f64, char_width: f64) -> (i32, i32) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => {
            ((x * WHEEL_LINES) as i32, (-y * WHEEL_LINES) as i32)
        }
        MouseScrollDelta::PixelDelta(pos) => (
            (pos.x / char_width.max(1.0)) as i32,
            (-pos.y / line_height.max(1.0)) as i32,
        ),
    }
}

/// Handle a wheel event over the editor
pub fn handle_wheel(model: &mut AppModel, delta: MouseScrollDelta) -> Option<Cmd> {
    let (columns, lines) = wheel_delta(delta, model.line_height as f64, model.char_width as f64);

    let v_cmd = if lines != 0 {
        update(model, Msg::Editor(EditorMsg::Scroll(lines)))
    } else {
        None
    };
    let h_cmd = if columns != 0 {
        update(model, Msg::Editor(EditorMsg::ScrollHorizontal(columns)))
    } else {
        None
    };

    match Cmd::batch(v_cmd.into_iter().chain(h_cmd).collect()) {
        Cmd::None => None,
        cmd => Some(cmd),
    }
}
