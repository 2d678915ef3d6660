use fitsview_core::mapping::{buffer_size, PixelCoord};

use crate::app::FitsViewApp;
use crate::messages::WorkerCommand;
use crate::panels::{paint_contained, placeholder};

const MARKER_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 80, 80);

pub fn show(ctx: &egui::Context, app: &mut FitsViewApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        ui.painter()
            .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
        app.viewer.canvas_buffer = Some(buffer_size(
            [rect.width(), rect.height()],
            ctx.pixels_per_point(),
        ));

        let (Some(texture), Some(native)) = (app.viewer.preview.as_ref(), app.viewer.preview_size)
        else {
            placeholder(ui, "Open a FITS file to begin");
            return;
        };

        let response = ui.allocate_rect(rect, egui::Sense::click());
        let Some(transform) = paint_contained(ui, texture, native, rect) else {
            return;
        };

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = pos - rect.min;
                if let Some(pixel) = transform.to_data(local.x, local.y) {
                    app.send_command(WorkerCommand::SelectPixel { pixel });
                }
            }
        }

        if let Some(pixel) = app.viewer.selected {
            draw_marker(ui, rect, &transform, pixel);
        }

        if let Some(pos) = response.hover_pos() {
            let local = pos - rect.min;
            if let Some(pixel) = transform.to_data(local.x, local.y) {
                draw_readout(ui, rect, pixel, transform.scale());
            }
        }
    });
}

fn draw_marker(
    ui: &egui::Ui,
    rect: egui::Rect,
    transform: &fitsview_core::mapping::DrawTransform,
    pixel: PixelCoord,
) {
    let marker = transform.marker_at(pixel);
    let center = rect.min + egui::vec2(marker.center[0], marker.center[1]);
    let stroke = egui::Stroke::new(1.5, MARKER_COLOR);
    let painter = ui.painter();

    painter.circle_stroke(center, marker.radius, stroke);
    painter.line_segment(
        [center - egui::vec2(marker.arm, 0.0), center + egui::vec2(marker.arm, 0.0)],
        stroke,
    );
    painter.line_segment(
        [center - egui::vec2(0.0, marker.arm), center + egui::vec2(0.0, marker.arm)],
        stroke,
    );
}

fn draw_readout(ui: &egui::Ui, rect: egui::Rect, pixel: PixelCoord, scale: f32) {
    ui.painter().text(
        rect.left_top() + egui::vec2(8.0, 8.0),
        egui::Align2::LEFT_TOP,
        format!("x={} y={}  ({:.0}%)", pixel.x, pixel.y, scale * 100.0),
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}
