use egui::{Button, Slider};

use crate::PaintApp;
use crate::command::Tool;
use crate::config::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::export;

const SWATCH_SIZE: f32 = 18.0;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let settings = app.session.settings_mut();
            ui.horizontal(|ui| {
                for tool in [Tool::Stroke, Tool::Fill] {
                    if ui
                        .selectable_label(settings.current_tool == tool, tool.name())
                        .clicked()
                    {
                        log::info!("Tool selected from UI: {}", tool.name());
                        settings.current_tool = tool;
                    }
                }
            });

            ui.separator();

            // Palette, two rows of swatches
            let palette = settings.palette.clone();
            for row in palette.chunks(palette.len().div_ceil(2).max(1)) {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;
                    for color in row {
                        let swatch = Button::new("").fill(*color).min_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE));
                        if ui.add(swatch).clicked() {
                            settings.current_color = *color;
                        }
                    }
                });
            }

            ui.horizontal(|ui| {
                ui.label("Color:");
                egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut settings.current_color,
                    egui::color_picker::Alpha::Opaque,
                );
            });

            ui.horizontal(|ui| {
                ui.label("Brush:");
                ui.add(Slider::new(&mut settings.brush_size, MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE));
            });

            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app
                    .session
                    .canvas()
                    .is_some_and(|canvas| !canvas.checkpoints().is_empty());
                if ui.add_enabled(can_undo, Button::new("Undo")).clicked() {
                    app.session.undo();
                }
                if ui.button("Clear").clicked() {
                    app.session.clear();
                }
            });

            ui.horizontal(|ui| {
                if ui.button("Export PNG").clicked() {
                    app.export_png();
                }
                if ui.button("Save history").clicked() {
                    app.save_history();
                }
                if ui.button("Load history").clicked() {
                    app.load_history();
                }
            });

            if let Some(canvas) = app.session.canvas() {
                ui.separator();
                let [width, height] = canvas.size();
                ui.label(format!("Canvas: {width}x{height}"));
                ui.label(format!("Commands: {}", canvas.submitted_len()));
                ui.label(format!("Rendered: {}", canvas.last_computed_index()));
            }

            ui.separator();
            ui.small(format!(
                "Exports go to {}",
                app.session.settings().export_dir.join(export::IMAGE_FILE_NAME).display()
            ));
        });
}
