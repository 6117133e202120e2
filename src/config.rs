use std::path::PathBuf;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::command::Tool;

pub const DEFAULT_BRUSH_SIZE: f32 = 12.0;
pub const MIN_BRUSH_SIZE: f32 = 1.0;
pub const MAX_BRUSH_SIZE: f32 = 50.0;

/// Swatches offered by the tools panel: top row first, then bottom row
pub const DEFAULT_PALETTE: [Color32; 20] = [
    Color32::from_rgb(0, 0, 0),
    Color32::from_rgb(127, 127, 127),
    Color32::from_rgb(136, 0, 21),
    Color32::from_rgb(237, 28, 36),
    Color32::from_rgb(255, 127, 39),
    Color32::from_rgb(255, 242, 0),
    Color32::from_rgb(34, 177, 76),
    Color32::from_rgb(0, 162, 232),
    Color32::from_rgb(63, 72, 204),
    Color32::from_rgb(163, 73, 164),
    Color32::from_rgb(255, 255, 255),
    Color32::from_rgb(195, 195, 195),
    Color32::from_rgb(185, 122, 87),
    Color32::from_rgb(255, 174, 201),
    Color32::from_rgb(255, 201, 14),
    Color32::from_rgb(239, 228, 176),
    Color32::from_rgb(181, 230, 29),
    Color32::from_rgb(153, 217, 234),
    Color32::from_rgb(112, 146, 190),
    Color32::from_rgb(200, 191, 231),
];

/// Paint configuration read by the stroke producer for each new command.
///
/// Persisted between runs through eframe storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // settings saved by older builds get defaults for new fields
pub struct PaintSettings {
    pub current_tool: Tool,
    pub current_color: Color32,
    pub brush_size: f32,
    /// Color new canvases start with
    pub background: Color32,
    pub palette: Vec<Color32>,
    /// Where exported images and histories are written
    pub export_dir: PathBuf,
}

impl Default for PaintSettings {
    fn default() -> Self {
        Self {
            current_tool: Tool::Stroke,
            current_color: Color32::BLACK,
            brush_size: DEFAULT_BRUSH_SIZE,
            background: Color32::WHITE,
            palette: DEFAULT_PALETTE.to_vec(),
            export_dir: PathBuf::from("."),
        }
    }
}
