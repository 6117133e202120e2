use egui::{Color32, TextureId};

use crate::bitmap::Bitmap;
use crate::command::{CommandLog, DrawCommand, Tool};
use crate::error::CanvasError;
use crate::raster;
use crate::surface::DisplaySurface;

/// A bitmap kept in sync with a command history.
///
/// The canvas starts uninitialized. The first [`Canvas::compute`] paints the
/// background and binds the display surface; every later call replays only the
/// commands appended since the previous call and publishes the result.
///
/// Invariant: the bitmap equals the background with `log[0..last_computed_index]`
/// applied in order.
pub struct Canvas {
    bitmap: Bitmap,
    log: CommandLog,
    last_computed: usize,
    /// Log length including batches still queued for the append worker
    submitted: usize,
    checkpoints: Vec<usize>,
    /// Truncations queued on the log; replay waits until the worker has applied them all
    truncations: u64,
    /// The bitmap changed without a replay and has not been uploaded yet
    needs_publish: bool,
    initialized: bool,
    background: Color32,
    surface: Box<dyn DisplaySurface>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("size", &self.bitmap.size())
            .field("log", &self.log)
            .field("last_computed", &self.last_computed)
            .field("submitted", &self.submitted)
            .field("truncations", &self.truncations)
            .field("needs_publish", &self.needs_publish)
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl Canvas {
    pub fn new(size: [usize; 2], background: Color32, surface: Box<dyn DisplaySurface>) -> Self {
        log::info!("Creating {}x{} canvas", size[0], size[1]);
        Self {
            bitmap: Bitmap::new(size, background),
            log: CommandLog::new(),
            last_computed: 0,
            submitted: 0,
            checkpoints: Vec::new(),
            truncations: 0,
            needs_publish: false,
            initialized: false,
            background,
            surface,
        }
    }

    /// Advances the canvas by one frame.
    ///
    /// Returns the number of commands applied. Only the initial upload can fail;
    /// later upload failures are logged and the local bitmap stays authoritative.
    pub fn compute(&mut self) -> Result<usize, CanvasError> {
        if !self.initialized {
            self.initialize()?;
            return Ok(0);
        }

        let pending = self.log.pending_since(self.last_computed);
        let mut applied = 0;
        if pending.truncations < self.truncations {
            // Entries past the cursor may still be ones a queued truncation drops.
            log::trace!("Waiting for the history truncation to land");
        } else if !pending.commands.is_empty() {
            log::debug!(
                "Replaying commands {}..{} onto the canvas",
                self.last_computed,
                pending.len
            );
            for command in &pending.commands {
                apply_command(&mut self.bitmap, command);
            }
            self.last_computed = pending.len;
            applied = pending.commands.len();
            self.needs_publish = true;
        }

        if self.needs_publish {
            if let Err(err) = self.surface.push(&self.bitmap, false) {
                log::warn!("Skipped canvas upload: {}", err);
            }
            self.needs_publish = false;
        }
        Ok(applied)
    }

    fn initialize(&mut self) -> Result<(), CanvasError> {
        raster::initialize(&mut self.bitmap, self.background);
        self.surface
            .push(&self.bitmap, true)
            .map_err(CanvasError::Init)?;
        self.initialized = true;
        self.needs_publish = false;
        log::info!("Canvas initialized");
        Ok(())
    }

    /// Hands a batch to the append worker. Does not wait for it to land.
    pub fn append_commands(&mut self, batch: Vec<DrawCommand>) {
        self.submitted += batch.len();
        self.log.append(batch);
    }

    /// Records the current history length as an undo point
    pub fn checkpoint(&mut self) {
        self.checkpoints.push(self.submitted);
    }

    /// Reverts to the most recent checkpoint. Returns false when there is none.
    pub fn undo(&mut self) -> bool {
        match self.checkpoints.pop() {
            Some(index) => {
                self.revert(index);
                true
            }
            None => false,
        }
    }

    /// Truncates the history to `to_index` commands. Returns without waiting for
    /// the append worker.
    ///
    /// Replay is held back until the worker has applied the truncation. If already
    /// rasterized commands were dropped, the bitmap is reset to the background, the
    /// next `compute` publishes it and replays the remaining history.
    pub fn revert(&mut self, to_index: usize) {
        let to_index = to_index.min(self.submitted);
        log::info!("Reverting canvas history to {} commands", to_index);

        self.log.truncate(to_index);
        self.truncations += 1;
        self.submitted = to_index;
        self.checkpoints.retain(|index| *index <= to_index);

        if to_index < self.last_computed {
            raster::initialize(&mut self.bitmap, self.background);
            self.last_computed = 0;
            self.needs_publish = self.initialized;
        }
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn size(&self) -> [usize; 2] {
        self.bitmap.size()
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn log(&self) -> &CommandLog {
        &self.log
    }

    /// Copy of every command the append worker has applied
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.log.snapshot()
    }

    pub fn last_computed_index(&self) -> usize {
        self.last_computed
    }

    pub fn submitted_len(&self) -> usize {
        self.submitted
    }

    pub fn checkpoints(&self) -> &[usize] {
        &self.checkpoints
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// True when the bitmap was reset and the surface still shows the old image
    pub fn needs_publish(&self) -> bool {
        self.needs_publish
    }

    pub fn texture_id(&self) -> Option<TextureId> {
        self.surface.texture_id()
    }

    /// Tears the canvas down, handing back its display surface.
    /// The history worker is stopped before this returns.
    pub fn into_surface(self) -> Box<dyn DisplaySurface> {
        self.surface
    }
}

fn apply_command(bitmap: &mut Bitmap, command: &DrawCommand) {
    match command.tool {
        Tool::Stroke => raster::stroke_line(
            bitmap,
            command.from,
            command.to,
            command.color,
            command.brush_size,
        ),
        Tool::Fill => raster::flood_fill(bitmap, command.color, command.from),
        Tool::Unknown(id) => log::trace!("Skipping command with unknown tool id {}", id),
    }
}
