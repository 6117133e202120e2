use egui::Color32;
use serde::{Deserialize, Serialize};

/// Integer pixel coordinate on the canvas bitmap.
///
/// Coordinates are signed so strokes may start or end outside the bitmap;
/// rasterization clips whatever falls outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Paint tool recorded in a command.
///
/// Ids other than 0 and 1 are preserved as `Unknown` so histories written by
/// newer builds still load; replay skips them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Stroke,
    Fill,
    Unknown(u8),
}

impl Tool {
    pub fn id(self) -> u8 {
        match self {
            Tool::Stroke => 0,
            Tool::Fill => 1,
            Tool::Unknown(id) => id,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Stroke => "Stroke",
            Tool::Fill => "Fill",
            Tool::Unknown(_) => "Unknown",
        }
    }
}

impl From<u8> for Tool {
    fn from(id: u8) -> Self {
        match id {
            0 => Tool::Stroke,
            1 => Tool::Fill,
            other => Tool::Unknown(other),
        }
    }
}

/// A single recorded paint action. Never mutated once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub tool: Tool,
    pub color: Color32,
    pub brush_size: f32,
    pub from: PixelPos,
    pub to: PixelPos,
}

impl DrawCommand {
    /// A stroke segment between two points
    pub fn stroke(from: PixelPos, to: PixelPos, color: Color32, brush_size: f32) -> Self {
        Self {
            tool: Tool::Stroke,
            color,
            brush_size,
            from,
            to,
        }
    }

    /// A flood fill seeded at `at`. Brush size is irrelevant for fills.
    pub fn fill(at: PixelPos, color: Color32) -> Self {
        Self {
            tool: Tool::Fill,
            color,
            brush_size: 0.0,
            from: at,
            to: at,
        }
    }
}
