use std::time::Instant;

use fitsview_core::consts::{MAX_TIMELINE_FPS, MIN_TIMELINE_FPS};

use crate::app::FitsViewApp;
use crate::messages::WorkerCommand;
use crate::panels::{paint_contained, placeholder};

const FRAME_HEIGHT: f32 = 420.0;

pub fn show(ctx: &egui::Context, app: &mut FitsViewApp) {
    let FitsViewApp {
        timeline,
        search,
        cmd_tx,
        ..
    } = app;
    let Some(view) = timeline.as_mut() else {
        return;
    };

    let now = Instant::now();
    let mut open = true;

    egui::Window::new(format!("Timeline: {}", view.title))
        .id(egui::Id::new("timeline"))
        .open(&mut open)
        .collapsible(false)
        .default_width(640.0)
        .show(ctx, |ui| {
            let Some(player) = view.player.as_mut() else {
                match search.frame_errors.get(&view.file_id) {
                    Some(error) => {
                        ui.colored_label(egui::Color32::from_rgb(190, 50, 50), error);
                    }
                    None => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Loading frames...");
                        });
                    }
                }
                return;
            };
            let Some(frames) = search.frames.get(&view.file_id) else {
                return;
            };
            if player.frame_count() == 0 {
                placeholder(ui, "No frames available.");
                return;
            }

            player.poll(now);
            let index = player.index();

            // Fetch the shown frame and the next one ahead of playback.
            for i in [index, (index + 1) % player.frame_count()] {
                if let Some(frame) = frames.get(i) {
                    if view.requested.insert(i) {
                        let _ = cmd_tx.send(WorkerCommand::LoadFrameImage {
                            file_id: view.file_id.clone(),
                            index: i,
                            url: frame.url.clone(),
                        });
                    }
                }
            }

            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), FRAME_HEIGHT),
                egui::Sense::hover(),
            );
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
            match view.textures.get(&index) {
                Some(texture) => {
                    let [w, h] = texture.size();
                    paint_contained(ui, texture, [w as u32, h as u32], rect);
                }
                None => {
                    ui.put(rect, egui::Spinner::new());
                }
            }

            ui.horizontal(|ui| {
                let label = if player.is_playing() { "Pause" } else { "Play" };
                if ui.button(label).clicked() {
                    player.toggle(now);
                }

                let mut scrub = index;
                if ui
                    .add(
                        egui::Slider::new(&mut scrub, 0..=player.frame_count() - 1)
                            .text("Frame"),
                    )
                    .changed()
                {
                    player.scrub(scrub);
                }

                let mut fps = player.fps();
                if ui
                    .add(egui::Slider::new(&mut fps, MIN_TIMELINE_FPS..=MAX_TIMELINE_FPS).text("fps"))
                    .changed()
                {
                    player.set_fps(fps, now);
                }
            });

            let channel = frames
                .get(player.index())
                .and_then(|f| f.channel.as_deref())
                .unwrap_or("");
            ui.label(format!(
                "Frame {} / {}  {channel}",
                player.index() + 1,
                player.frame_count()
            ));
        });

    if !open {
        if let Some(player) = view.player.as_mut() {
            player.close();
        }
        *timeline = None;
        return;
    }

    if let Some(wait) = view.player.as_ref().and_then(|p| p.time_until_next(now)) {
        ctx.request_repaint_after(wait);
    }
}
