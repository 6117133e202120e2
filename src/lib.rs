#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod bitmap;
pub mod canvas;
pub mod command;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod panels;
pub mod raster;
pub mod session;
pub mod stroke;
pub mod surface;

pub use app::PaintApp;
pub use bitmap::Bitmap;
pub use canvas::Canvas;
pub use command::{CommandLog, DrawCommand, PixelPos, Tool};
pub use config::PaintSettings;
pub use error::{CanvasError, ExportError, SurfaceError};
pub use input::{FrameInput, InputHandler};
pub use session::PaintSession;
pub use stroke::StrokeProducer;
pub use surface::{DisplaySurface, MemorySurface, TextureSurface};
