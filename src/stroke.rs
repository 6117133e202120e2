use egui::Vec2;

use crate::canvas::Canvas;
use crate::command::{DrawCommand, FLUSH_THRESHOLD, PixelPos};
use crate::config::PaintSettings;
use crate::input::FrameInput;

/// Turns pointer input into draw commands.
///
/// Commands are staged locally and handed to the canvas history in batches.
/// A batch is flushed when a stroke starts, when the pointer stalls on either
/// axis, when `FLUSH_THRESHOLD` commands are staged, and when the stroke ends.
#[derive(Debug, Default)]
pub struct StrokeProducer {
    staging: Vec<DrawCommand>,
    last_point: Option<PixelPos>,
    drawing: bool,
}

impl StrokeProducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one frame of input against `canvas`
    pub fn handle_input(&mut self, input: &FrameInput, settings: &PaintSettings, canvas: &mut Canvas) {
        if self.drawing && !input.down {
            self.end_stroke(canvas);
        }

        let Some(pos) = input.pointer.filter(|p| canvas.bitmap().contains(*p)) else {
            return;
        };

        if input.pressed && input.focused {
            self.begin_stroke(pos, settings, canvas);
        } else if input.down && self.drawing {
            self.continue_stroke(pos, input.delta, settings, canvas);
        }
    }

    fn begin_stroke(&mut self, pos: PixelPos, settings: &PaintSettings, canvas: &mut Canvas) {
        // Anything left over belongs to the previous stroke.
        self.flush(canvas);
        canvas.checkpoint();

        self.drawing = true;
        self.stage(new_command(settings, pos, pos));
        self.last_point = Some(pos);

        // Single taps must register even without movement.
        self.flush(canvas);
    }

    fn continue_stroke(&mut self, pos: PixelPos, delta: Vec2, settings: &PaintSettings, canvas: &mut Canvas) {
        if delta.x as i32 == 0 || delta.y as i32 == 0 {
            self.flush(canvas);
        }

        let from = self.last_point.unwrap_or(pos);
        self.stage(new_command(settings, from, pos));
        self.last_point = Some(pos);

        if self.staging.len() >= FLUSH_THRESHOLD {
            self.flush(canvas);
        }
    }

    fn end_stroke(&mut self, canvas: &mut Canvas) {
        self.flush(canvas);
        self.drawing = false;
        self.last_point = None;
    }

    fn stage(&mut self, command: DrawCommand) {
        self.staging.push(command);
    }

    /// Moves the staged batch into the canvas history without waiting for it to land
    pub fn flush(&mut self, canvas: &mut Canvas) {
        if self.staging.is_empty() {
            return;
        }
        canvas.append_commands(std::mem::take(&mut self.staging));
    }

    /// Drops staged commands and any stroke in progress
    pub fn reset(&mut self) {
        self.staging.clear();
        self.last_point = None;
        self.drawing = false;
    }

    pub fn staged(&self) -> &[DrawCommand] {
        &self.staging
    }

    pub fn last_point(&self) -> Option<PixelPos> {
        self.last_point
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }
}

fn new_command(settings: &PaintSettings, from: PixelPos, to: PixelPos) -> DrawCommand {
    DrawCommand {
        tool: settings.current_tool,
        color: settings.current_color,
        brush_size: settings.brush_size,
        from,
        to,
    }
}
