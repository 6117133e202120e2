use egui::{Context, Pos2, Rect, Vec2};

use crate::command::PixelPos;

/// Pointer state for one frame, in canvas-local pixel coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer position relative to the canvas origin; `None` when the canvas
    /// is not hovered
    pub pointer: Option<PixelPos>,
    /// Primary button went down this frame
    pub pressed: bool,
    /// Primary button is held
    pub down: bool,
    /// The window has keyboard/pointer focus
    pub focused: bool,
    /// Pointer movement since the previous frame
    pub delta: Vec2,
}

/// Converts raw egui input into [`FrameInput`] for the canvas area
#[derive(Debug, Clone, Copy)]
pub struct InputHandler {
    canvas_rect: Rect,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self { canvas_rect }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    /// Maps a screen position to the canvas pixel under it
    pub fn to_canvas(&self, pos: Pos2) -> PixelPos {
        let local = pos - self.canvas_rect.min;
        PixelPos::new(local.x.floor() as i32, local.y.floor() as i32)
    }

    /// Reads this frame's primary pointer state. `hovered` tells whether the
    /// canvas widget is under the pointer.
    pub fn process_input(&self, ctx: &Context, hovered: bool) -> FrameInput {
        ctx.input(|input| FrameInput {
            pointer: input
                .pointer
                .hover_pos()
                .filter(|pos| hovered && self.canvas_rect.contains(*pos))
                .map(|pos| self.to_canvas(pos)),
            pressed: input.pointer.primary_pressed(),
            down: input.pointer.primary_down(),
            focused: input.focused,
            delta: input.pointer.delta(),
        })
    }
}
