use thiserror::Error;

/// Errors raised while handing a bitmap to a display surface
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("Surface has no bound texture; a committed push is required first")]
    NotBound,
    #[error("Surface backend rejected the upload: {0}")]
    Backend(String),
}

/// Errors that can occur while driving a canvas
#[derive(Error, Debug)]
pub enum CanvasError {
    /// The initial background upload failed. The canvas stays uninitialized
    /// and the next `compute` retries.
    #[error("Failed to initialize canvas: {0}")]
    Init(#[source] SurfaceError),
}

/// Errors that can occur while exporting or importing canvas data
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to serialize history: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bitmap buffer does not match its dimensions")]
    BufferMismatch,
}
