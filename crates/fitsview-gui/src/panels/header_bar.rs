use fitsview_core::status::StatusLevel;

use crate::app::FitsViewApp;
use crate::messages::WorkerCommand;

pub fn show(ctx: &egui::Context, app: &mut FitsViewApp) {
    egui::TopBottomPanel::top("header_bar").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!app.viewer.uploading, egui::Button::new("Open FITS..."))
                .clicked()
            {
                open_fits(app);
            }

            ui.separator();
            correction_toggle(ui, app);
            ui.separator();
            slice_slider(ui, app);
            ui.separator();
            status_badge(ui, app);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if app.search.open { "Hide search" } else { "Search..." };
                if ui.button(label).clicked() {
                    app.search.open = !app.search.open;
                }
            });
        });

        ui.horizontal(|ui| {
            match app.viewer.filename.as_deref().or(app.viewer.file_id.as_deref()) {
                Some(name) => {
                    ui.strong(name);
                }
                None => {
                    ui.weak("No file loaded");
                }
            }
            if !app.viewer.header_summary.is_empty() {
                ui.separator();
                ui.label(&app.viewer.header_summary);
            }
        });
        ui.add_space(2.0);
    });
}

/// Pick a local FITS file and hand it to the worker for upload.
pub(crate) fn open_fits(app: &mut FitsViewApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("FITS files", &["fits", "fit", "fts", "fz"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::Upload { path });
        }
    });
}

fn correction_toggle(ui: &mut egui::Ui, app: &mut FitsViewApp) {
    ui.label("Correction");
    let mut enabled = app.viewer.correction;
    ui.selectable_value(&mut enabled, true, "On");
    ui.selectable_value(&mut enabled, false, "Off");
    if enabled != app.viewer.correction {
        app.viewer.correction = enabled;
        app.send_command(WorkerCommand::SetCorrection { enabled });
    }
}

fn slice_slider(ui: &mut egui::Ui, app: &mut FitsViewApp) {
    let slice = app.viewer.slice;
    let mut value = slice.value;
    let response = ui.add_enabled(
        slice.enabled,
        egui::Slider::new(&mut value, 0..=slice.max)
            .text("Slice")
            .clamping(egui::SliderClamping::Always),
    );
    if response.changed() {
        app.viewer.slice.value = value;
    }
    // Dragging only commits on release so a drag issues one preview request.
    if response.drag_stopped() || (response.changed() && !response.dragged()) {
        app.send_command(WorkerCommand::SetSlice {
            z: app.viewer.slice.value,
        });
    }
}

fn status_badge(ui: &mut egui::Ui, app: &FitsViewApp) {
    let status = &app.viewer.status;
    let color = match status.level {
        StatusLevel::Success => egui::Color32::from_rgb(40, 140, 70),
        StatusLevel::Warning => egui::Color32::from_rgb(200, 140, 20),
        StatusLevel::Danger => egui::Color32::from_rgb(190, 50, 50),
    };
    ui.label(
        egui::RichText::new(format!(" {} ", status.text))
            .color(egui::Color32::WHITE)
            .background_color(color),
    );
}
