use fitsview_core::config::AppConfig;

use crate::app::FitsViewApp;
use crate::messages::WorkerResult;
use crate::workers::send;
use crate::panels::header_bar::open_fits;

pub fn show(ctx: &egui::Context, app: &mut FitsViewApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                let open_button = egui::Button::new("Open FITS...")
                    .shortcut_text(ctx.format_shortcut(&open_shortcut));
                if ui.add_enabled(!app.viewer.uploading, open_button).clicked() {
                    ui.close();
                    open_fits(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(ctx, app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(ctx, app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let search_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::F);
                if ui.add(egui::Button::new("Search...").shortcut_text(ctx.format_shortcut(&search_shortcut))).clicked() {
                    ui.close();
                    app.search.open = true;
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O)))
            && !app.viewer.uploading
        {
            open_fits(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::F))) {
            app.search.open = !app.search.open;
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// The dialog runs off the UI thread; its result comes back through the
/// worker channel with a repaint.
fn import_config(ctx: &egui::Context, app: &mut FitsViewApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match AppConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::Error {
                message: format!("Config import failed: {e}"),
            },
        };
        send(&result_tx, &ctx, result);
    });
}

fn export_config(ctx: &egui::Context, app: &mut FitsViewApp) {
    let content = match app.config.to_toml_string() {
        Ok(content) => content,
        Err(e) => {
            app.ui_state.add_log(format!("ERROR: {e}"));
            return;
        }
    };
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("fitsview.toml")
            .save_file()
        {
            let message = match std::fs::write(&path, content) {
                Ok(()) => WorkerResult::Log {
                    message: format!("Config exported to {}", path.display()),
                },
                Err(e) => WorkerResult::Error {
                    message: format!("Config export failed: {e}"),
                },
            };
            send(&result_tx, &ctx, message);
        }
    });
}
