use egui_plot::{Line, Plot, PlotPoints};
use fitsview_core::status::CLICK_TO_EXTRACT;

use crate::app::FitsViewApp;
use crate::panels::{paint_contained, placeholder, section_header};

const SLIT_HEIGHT: f32 = 220.0;

/// Slit image above the spectrum chart.
pub fn show(ctx: &egui::Context, app: &mut FitsViewApp) {
    egui::SidePanel::right("analysis")
        .resizable(true)
        .default_width(420.0)
        .min_width(280.0)
        .show(ctx, |ui| {
            let column_label = app.viewer.selected.map(|p| format!("x={}", p.x));
            let pixel_label = app
                .viewer
                .selected
                .map(|p| format!("x={} y={}", p.x, p.y));

            section_header(ui, "Slit", column_label.as_deref());
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), SLIT_HEIGHT),
                egui::Sense::hover(),
            );
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
            if let (Some(texture), Some(native)) = (app.viewer.slit.as_ref(), app.viewer.slit_size) {
                paint_contained(ui, texture, native, rect);
            }

            ui.separator();
            section_header(ui, "Spectrum", pixel_label.as_deref());

            match app.viewer.spectrum.as_ref() {
                Some(series) if !series.is_empty() => {
                    Plot::new("spectrum")
                        .height(ui.available_height())
                        .allow_scroll(false)
                        .x_axis_label(series.x_label())
                        .y_axis_label(series.y_label())
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("spectrum", PlotPoints::from(series.points())));
                        });
                }
                Some(_) => placeholder(ui, "Empty spectrum"),
                None => placeholder(ui, CLICK_TO_EXTRACT),
            }
        });
}
