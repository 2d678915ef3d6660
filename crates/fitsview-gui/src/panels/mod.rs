pub mod analysis;
pub mod header_bar;
pub mod menu_bar;
pub mod search;
pub mod status;
pub mod timeline;
pub mod viewport;

pub(crate) fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    ui.horizontal(|ui| {
        ui.strong(label);
        if let Some(s) = status {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(s);
            });
        }
    });
}

/// Paint a texture letterboxed into `rect` and return where it landed.
pub(crate) fn paint_contained(
    ui: &egui::Ui,
    texture: &egui::TextureHandle,
    native: [u32; 2],
    rect: egui::Rect,
) -> Option<fitsview_core::mapping::DrawTransform> {
    let transform =
        fitsview_core::mapping::DrawTransform::contain([rect.width(), rect.height()], native)?;
    let img_rect = egui::Rect::from_min_size(
        rect.min + egui::vec2(transform.origin_x, transform.origin_y),
        egui::vec2(transform.drawn_width, transform.drawn_height),
    );
    ui.painter().image(
        texture.id(),
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
    Some(transform)
}

pub(crate) fn placeholder(ui: &mut egui::Ui, text: &str) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(16.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
