use crate::bitmap::fitting_size_16_by_9;
use crate::canvas::Canvas;
use crate::command::DrawCommand;
use crate::config::PaintSettings;
use crate::error::CanvasError;
use crate::input::FrameInput;
use crate::stroke::StrokeProducer;
use crate::surface::DisplaySurface;

/// Creates the display surface for each new canvas
pub type SurfaceFactory = Box<dyn Fn() -> Box<dyn DisplaySurface>>;

/// Everything one painting session owns: the canvas, the stroke producer and
/// the paint settings. Input handlers receive it explicitly.
pub struct PaintSession {
    settings: PaintSettings,
    canvas: Option<Canvas>,
    producer: StrokeProducer,
    surface_factory: SurfaceFactory,
    /// History to replay once the canvas exists
    pending_history: Option<Vec<DrawCommand>>,
}

impl std::fmt::Debug for PaintSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintSession")
            .field("settings", &self.settings)
            .field("canvas", &self.canvas)
            .field("producer", &self.producer)
            .finish()
    }
}

impl PaintSession {
    pub fn new(
        settings: PaintSettings,
        surface_factory: impl Fn() -> Box<dyn DisplaySurface> + 'static,
    ) -> Self {
        Self {
            settings,
            canvas: None,
            producer: StrokeProducer::new(),
            surface_factory: Box::new(surface_factory),
            pending_history: None,
        }
    }

    pub fn settings(&self) -> &PaintSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut PaintSettings {
        &mut self.settings
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut Canvas> {
        self.canvas.as_mut()
    }

    pub fn producer(&self) -> &StrokeProducer {
        &self.producer
    }

    /// Returns the canvas, creating it from the available layout height the
    /// first time. Returns `None` while that height fits no pixels.
    pub fn ensure_canvas(&mut self, available_height: f32) -> Option<&mut Canvas> {
        if self.canvas.is_none() {
            let size = fitting_size_16_by_9(available_height);
            if size.contains(&0) {
                log::trace!("Deferring canvas creation, layout height {}", available_height);
                return None;
            }
            let mut canvas = Canvas::new(size, self.settings.background, (self.surface_factory)());
            if let Some(history) = self.pending_history.take() {
                canvas.append_commands(history);
            }
            self.canvas = Some(canvas);
        }
        self.canvas.as_mut()
    }

    /// Runs one frame: replays new commands, then turns this frame's input into
    /// commands. Returns the number of commands replayed.
    pub fn frame(&mut self, input: &FrameInput) -> Result<usize, CanvasError> {
        let Some(canvas) = self.canvas.as_mut() else {
            return Ok(0);
        };
        let applied = canvas.compute()?;
        self.producer.handle_input(input, &self.settings, canvas);
        Ok(applied)
    }

    /// True while there is work another frame would pick up
    pub fn needs_repaint(&self) -> bool {
        self.producer.is_drawing()
            || self
                .canvas
                .as_ref()
                .is_some_and(|c| {
                    !c.is_initialized() || c.needs_publish() || c.submitted_len() > c.last_computed_index()
                })
    }

    /// Discards the canvas and its history and starts a blank one of the same size.
    /// The old canvas's display surface is released first.
    pub fn clear(&mut self) {
        self.producer.reset();
        if let Some(canvas) = self.canvas.take() {
            let size = canvas.size();
            canvas.into_surface().release();
            log::info!("Canvas cleared");
            self.canvas = Some(Canvas::new(size, self.settings.background, (self.surface_factory)()));
        }
    }

    /// Reverts the canvas to the start of the last stroke
    pub fn undo(&mut self) -> bool {
        self.canvas.as_mut().is_some_and(Canvas::undo)
    }

    /// Replaces the canvas with a blank one and replays `commands` onto it
    pub fn replay_history(&mut self, commands: Vec<DrawCommand>) {
        log::info!("Replaying {} commands from history", commands.len());
        self.clear();
        match self.canvas.as_mut() {
            Some(canvas) => canvas.append_commands(commands),
            None => self.pending_history = Some(commands),
        }
    }
}
