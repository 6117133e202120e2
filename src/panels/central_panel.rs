use egui::{Color32, Rect, Sense, pos2, vec2};

use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available = ui.available_size();
        let (panel_rect, response) = ui.allocate_exact_size(available, Sense::click_and_drag());

        // The canvas keeps the size it was created with; center it horizontally.
        let Some(canvas) = app.session.ensure_canvas(available.y) else {
            return;
        };
        let [width, height] = canvas.size();
        let size = vec2(width as f32, height as f32);
        let canvas_rect = Rect::from_min_size(
            pos2(panel_rect.center().x - size.x / 2.0, panel_rect.min.y),
            size,
        );
        app.input.set_canvas_rect(canvas_rect);

        let frame_input = app.input.process_input(ctx, response.hovered());
        if let Err(err) = app.session.frame(&frame_input) {
            log::error!("Canvas frame failed: {}", err);
        }

        if let Some(texture_id) = app.session.canvas().and_then(|canvas| canvas.texture_id()) {
            ui.painter().image(
                texture_id,
                canvas_rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        if app.session.needs_repaint() {
            ctx.request_repaint();
        }
    });
}
