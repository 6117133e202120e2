use crate::config::PaintSettings;
use crate::export;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::session::PaintSession;
use crate::surface::{DisplaySurface, TextureSurface};

/// eframe shell around a [`PaintSession`]
pub struct PaintApp {
    pub(crate) session: PaintSession,
    pub(crate) input: InputHandler,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Restore settings from the last run, if any.
        let settings: PaintSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let ctx = cc.egui_ctx.clone();
        let session = PaintSession::new(settings, move || {
            Box::new(TextureSurface::new(ctx.clone())) as Box<dyn DisplaySurface>
        });

        Self {
            session,
            input: InputHandler::default(),
        }
    }

    pub fn session(&self) -> &PaintSession {
        &self.session
    }

    pub(crate) fn export_png(&self) {
        let Some(canvas) = self.session.canvas() else {
            return;
        };
        let path = self.session.settings().export_dir.join(export::IMAGE_FILE_NAME);
        if let Err(err) = export::save_png(canvas.bitmap(), &path) {
            log::error!("Failed to export {}: {}", path.display(), err);
        }
    }

    pub(crate) fn save_history(&self) {
        let Some(canvas) = self.session.canvas() else {
            return;
        };
        let path = self.session.settings().export_dir.join(export::HISTORY_FILE_NAME);
        if let Err(err) = export::save_history(&canvas.commands(), &path) {
            log::error!("Failed to save {}: {}", path.display(), err);
        }
    }

    pub(crate) fn load_history(&mut self) {
        let path = self.session.settings().export_dir.join(export::HISTORY_FILE_NAME);
        match export::load_history(&path) {
            Ok(commands) => self.session.replay_history(commands),
            Err(err) => log::error!("Failed to load {}: {}", path.display(), err),
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.session.settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
