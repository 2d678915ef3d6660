use fitsview_core::search::{
    ChipKey, Facet, ManualDateInput, Meridiem, QuickRange, ResultCard, SearchPhase, SortKey,
};

use crate::app::FitsViewApp;
use crate::messages::WorkerCommand;

const THUMB_SIZE: f32 = 96.0;

/// Deferred so the window can borrow the app immutably while drawing.
enum Action {
    Submit,
    QuickRange(QuickRange),
    ToggleFacet(Facet, String),
    Sort(SortKey),
    RemoveChip(ChipKey),
    Page(u32),
    ToggleDetails(String),
    RequestFrames(String),
    RequestThumbnail(String, String),
    OpenInViewer(String),
    Timeline(String, String),
}

pub fn show(ctx: &egui::Context, app: &mut FitsViewApp) {
    if !app.search.open {
        return;
    }

    let mut open = true;
    let mut actions = Vec::new();

    egui::Window::new("Search")
        .open(&mut open)
        .default_width(760.0)
        .default_height(620.0)
        .resizable(true)
        .show(ctx, |ui| {
            form(ui, app, &mut actions);
            ui.weak(app.search.controller.location().as_str());
            ui.separator();
            chips_row(ui, app, &mut actions);
            summary_row(ui, app, &mut actions);
            ui.separator();
            results(ui, app, &mut actions);
        });

    if !open {
        app.search.open = false;
    }

    for action in actions {
        apply(app, action);
    }
}

fn apply(app: &mut FitsViewApp, action: Action) {
    match action {
        Action::Submit => app.submit_search(),
        Action::QuickRange(range) => app.apply_quick_range(range),
        Action::ToggleFacet(facet, value) => {
            app.search.controller.state_mut().toggle_facet(facet, &value);
            app.dispatch_search();
        }
        Action::Sort(sort) => {
            app.search.controller.state_mut().set_sort(sort);
            app.dispatch_search();
        }
        Action::RemoveChip(key) => app.remove_chip(&key),
        Action::Page(page) => {
            app.search.controller.state_mut().set_page(page);
            app.dispatch_search();
        }
        Action::ToggleDetails(file_id) => {
            if !app.search.expanded.remove(&file_id) {
                app.request_frames(&file_id);
                app.search.expanded.insert(file_id);
            }
        }
        Action::RequestFrames(file_id) => app.request_frames(&file_id),
        Action::RequestThumbnail(file_id, url) => {
            if let Some(url) = app.search.thumbnail_requests.request(&file_id, &url) {
                app.send_command(WorkerCommand::LoadThumbnail { file_id, url });
            }
        }
        Action::OpenInViewer(file_id) => app.open_in_viewer(&file_id),
        Action::Timeline(file_id, title) => app.open_timeline(&file_id, &title),
    }
}

fn form(ui: &mut egui::Ui, app: &mut FitsViewApp, actions: &mut Vec<Action>) {
    let form = &mut app.search.form;

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut form.query)
                .hint_text("Target, file name, keyword")
                .desired_width(360.0),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Search").clicked() || enter {
            actions.push(Action::Submit);
        }
    });

    egui::Grid::new("search_dates")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("From");
            let from_edited = date_row(ui, "date_from", &mut form.from);
            ui.end_row();
            ui.label("To");
            let to_edited = date_row(ui, "date_to", &mut form.to);
            ui.end_row();
            if from_edited || to_edited {
                actions.push(Action::Submit);
            }
        });
    if let Some(error) = &app.search.date_error {
        ui.colored_label(egui::Color32::from_rgb(190, 50, 50), error);
    }

    ui.horizontal(|ui| {
        for range in QuickRange::ALL {
            if ui.small_button(range.label()).clicked() {
                actions.push(Action::QuickRange(range));
            }
        }
    });

    ui.horizontal(|ui| {
        ui.label("Exposure (s)");
        let exposure_edited = range_edit(ui, &mut form.exposure_min, &mut form.exposure_max);
        ui.separator();
        ui.label("Frames");
        let frames_edited = range_edit(ui, &mut form.frames_min, &mut form.frames_max);
        if exposure_edited || frames_edited {
            actions.push(Action::Submit);
        }
    });

    pills(ui, app, Facet::Instrument, "Instruments", actions);
    pills(ui, app, Facet::Flag, "Flags", actions);

    let current = app.search.controller.state().sort();
    ui.horizontal(|ui| {
        ui.label("Sort");
        let mut selected = current;
        egui::ComboBox::from_id_salt("search_sort")
            .selected_text(selected.label())
            .show_ui(ui, |ui| {
                for key in SortKey::ALL {
                    ui.selectable_value(&mut selected, key, key.label());
                }
            });
        if selected != current {
            actions.push(Action::Sort(selected));
        }
    });
}

/// Returns true once an edit is committed (focus left a field, or the
/// meridiem changed).
fn date_row(ui: &mut egui::Ui, id: &str, input: &mut ManualDateInput) -> bool {
    ui.horizontal(|ui| {
        let date = ui.add(
            egui::TextEdit::singleline(&mut input.date)
                .hint_text("YYYY-MM-DD")
                .desired_width(100.0),
        );
        let time = ui.add(
            egui::TextEdit::singleline(&mut input.time)
                .hint_text("HH:MM[:SS]")
                .desired_width(80.0),
        );
        let before = input.meridiem;
        let label = input.meridiem.map_or("24h", |m| m.label());
        egui::ComboBox::from_id_salt(id)
            .width(56.0)
            .selected_text(label)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut input.meridiem, None, "24h");
                ui.selectable_value(&mut input.meridiem, Some(Meridiem::Am), Meridiem::Am.label());
                ui.selectable_value(&mut input.meridiem, Some(Meridiem::Pm), Meridiem::Pm.label());
            });
        let cleared = ui.small_button("x").on_hover_text("Clear").clicked();
        if cleared {
            *input = ManualDateInput::default();
        }
        date.lost_focus() || time.lost_focus() || before != input.meridiem || cleared
    })
    .inner
}

fn range_edit(ui: &mut egui::Ui, min: &mut String, max: &mut String) -> bool {
    let min = ui.add(egui::TextEdit::singleline(min).hint_text("min").desired_width(56.0));
    ui.label("~");
    let max = ui.add(egui::TextEdit::singleline(max).hint_text("max").desired_width(56.0));
    min.lost_focus() || max.lost_focus()
}

/// Configured values first, then any active value that came from the location.
fn pills(
    ui: &mut egui::Ui,
    app: &FitsViewApp,
    facet: Facet,
    title: &str,
    actions: &mut Vec<Action>,
) {
    let configured = match facet {
        Facet::Instrument => &app.config.instruments,
        Facet::Flag => &app.config.flags,
    };
    let state = app.search.controller.state();
    let extra = state
        .facet_values(facet)
        .iter()
        .filter(|v| !configured.contains(v));

    ui.horizontal_wrapped(|ui| {
        ui.label(title);
        for value in configured.iter().chain(extra) {
            if ui
                .selectable_label(state.is_active(facet, value), value.as_str())
                .clicked()
            {
                actions.push(Action::ToggleFacet(facet, value.clone()));
            }
        }
    });
}

fn chips_row(ui: &mut egui::Ui, app: &FitsViewApp, actions: &mut Vec<Action>) {
    let chips = app.search.controller.chips();
    if chips.is_empty() {
        return;
    }
    ui.horizontal_wrapped(|ui| {
        for chip in chips {
            let text = format!("{}  ✕", chip.label);
            if ui
                .button(egui::RichText::new(text).small())
                .on_hover_text("Remove filter")
                .clicked()
            {
                actions.push(Action::RemoveChip(chip.key));
            }
        }
    });
}

fn summary_row(ui: &mut egui::Ui, app: &FitsViewApp, actions: &mut Vec<Action>) {
    let controller = &app.search.controller;
    ui.horizontal(|ui| {
        match controller.phase() {
            SearchPhase::Searching => {
                ui.spinner();
                ui.label(controller.summary());
            }
            SearchPhase::Failed(reason) => {
                ui.colored_label(egui::Color32::from_rgb(190, 50, 50), controller.summary())
                    .on_hover_text(reason);
            }
            _ => {
                ui.strong(controller.summary());
            }
        }

        let page = controller.state().page();
        let shown = controller.items().len() as u64;
        let has_next = shown > 0 && controller.total() > shown * u64::from(page);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.add_enabled(has_next, egui::Button::new("Next")).clicked() {
                actions.push(Action::Page(page + 1));
            }
            ui.label(format!("Page {page}"));
            if ui.add_enabled(page > 1, egui::Button::new("Prev")).clicked() {
                actions.push(Action::Page(page - 1));
            }
        });
    });
}

fn results(ui: &mut egui::Ui, app: &FitsViewApp, actions: &mut Vec<Action>) {
    let cards = app.search.controller.cards(&app.config.placeholder_thumb);
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for card in &cards {
                result_card(ui, app, card, actions);
                ui.add_space(4.0);
            }
        });
}

fn result_card(ui: &mut egui::Ui, app: &FitsViewApp, card: &ResultCard, actions: &mut Vec<Action>) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            thumbnail(ui, app, card, actions);
            ui.vertical(|ui| {
                ui.strong(&card.target);
                ui.label(&card.filename);
                ui.small(format!(
                    "{}  |  {}  |  {} frames",
                    card.observed_at, card.exposure, card.frames
                ));
                ui.horizontal(|ui| {
                    if ui.button("Open in viewer").clicked() {
                        actions.push(Action::OpenInViewer(card.file_id.clone()));
                    }
                    if ui.button("Timeline").clicked() {
                        actions.push(Action::Timeline(card.file_id.clone(), card.target.clone()));
                    }
                });

                let expanded = app.search.expanded.contains(&card.file_id);
                let response = egui::CollapsingHeader::new("Details")
                    .id_salt(("details", &card.file_id))
                    .open(Some(expanded))
                    .show(ui, |ui| details(ui, app, card, actions));
                if response.header_response.clicked() {
                    actions.push(Action::ToggleDetails(card.file_id.clone()));
                }
            });
        });
    });
}

fn thumbnail(ui: &mut egui::Ui, app: &FitsViewApp, card: &ResultCard, actions: &mut Vec<Action>) {
    let size = egui::vec2(THUMB_SIZE, THUMB_SIZE);
    match app.search.thumbnails.get(&card.file_id) {
        Some(texture) => {
            ui.add(
                egui::Image::from_texture(egui::load::SizedTexture::new(texture.id(), texture.size_vec2()))
                    .fit_to_exact_size(size),
            );
        }
        None => {
            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
            ui.painter()
                .rect_filled(rect, 4.0, egui::Color32::from_gray(45));
            if app.search.thumbnail_requests.has_failed(&card.file_id) {
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "No preview",
                    egui::FontId::proportional(10.0),
                    egui::Color32::from_gray(140),
                );
            } else if !card.thumb_url.is_empty() && !app.search.thumbnail_requests.contains(&card.file_id) {
                actions.push(Action::RequestThumbnail(
                    card.file_id.clone(),
                    card.thumb_url.clone(),
                ));
            }
        }
    }
}

fn details(ui: &mut egui::Ui, app: &FitsViewApp, card: &ResultCard, actions: &mut Vec<Action>) {
    egui::Grid::new(("details_grid", &card.file_id))
        .num_columns(2)
        .spacing([12.0, 2.0])
        .show(ui, |ui| {
            for (label, value) in [
                ("File id", card.file_id.as_str()),
                ("Instrument", card.instrument.as_str()),
                ("Shape", card.shape.as_str()),
                ("Flags", card.flags.as_str()),
            ] {
                ui.weak(label);
                ui.label(if value.is_empty() { "-" } else { value });
                ui.end_row();
            }
        });

    let search = &app.search;
    if let Some(frames) = search.frames.get(&card.file_id) {
        ui.label(format!("{} frames available", frames.len()));
    } else if let Some(error) = search.frame_errors.get(&card.file_id) {
        ui.horizontal(|ui| {
            ui.colored_label(egui::Color32::from_rgb(190, 50, 50), error);
            if ui.small_button("Retry").clicked() {
                actions.push(Action::RequestFrames(card.file_id.clone()));
            }
        });
    } else {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading frames...");
        });
    }
}
