mod commands;
mod history;

pub use commands::{DrawCommand, PixelPos, Tool};
pub use history::{CommandLog, Pending};

/// Number of staged commands that forces a flush
pub const FLUSH_THRESHOLD: usize = 8;
