use crate::app::FitsViewApp;

pub fn show(ctx: &egui::Context, app: &mut FitsViewApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area: fixed height for 4 lines.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            if let Some([w, h]) = app.viewer.preview_size {
                ui.label(format!("Image {w}x{h}"));
                ui.separator();
            }
            if let Some(pixel) = app.viewer.selected {
                ui.label(format!("Pixel ({}, {})", pixel.x, pixel.y));
                ui.separator();
            }
            if let Some([w, h]) = app.viewer.canvas_buffer {
                ui.label(format!("Canvas {w}x{h} @{:.2}x", ctx.pixels_per_point()));
                ui.separator();
            }
            ui.label(format!("Server: {}", app.config.server_url));
        });

        ui.add_space(2.0);
    });
}
