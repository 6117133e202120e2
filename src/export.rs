use std::fs;
use std::path::Path;

use crate::bitmap::Bitmap;
use crate::command::DrawCommand;
use crate::error::ExportError;

pub const IMAGE_FILE_NAME: &str = "canvas.png";
pub const HISTORY_FILE_NAME: &str = "canvas_history.json";

/// Writes the bitmap as a PNG file
pub fn save_png(bitmap: &Bitmap, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    bitmap
        .to_rgba_image()?
        .save_with_format(path, image::ImageFormat::Png)?;
    log::info!(
        "Exported {}x{} canvas to {}",
        bitmap.width(),
        bitmap.height(),
        path.display()
    );
    Ok(())
}

/// Writes a command history as JSON
pub fn save_history(commands: &[DrawCommand], path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(commands)?;
    fs::write(path, json)?;
    log::info!("Saved {} commands to {}", commands.len(), path.display());
    Ok(())
}

/// Reads a command history written by [`save_history`]
pub fn load_history(path: impl AsRef<Path>) -> Result<Vec<DrawCommand>, ExportError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let commands: Vec<DrawCommand> = serde_json::from_str(&json)?;
    log::info!("Loaded {} commands from {}", commands.len(), path.display());
    Ok(commands)
}
