use std::sync::mpsc;

use chrono::Local;
use fitsview_core::config::AppConfig;
use fitsview_core::search::{ChipKey, QuickRange, SearchController, SearchForm, ThumbnailRequests};
use fitsview_core::status::{self, StatusLevel};
use fitsview_core::viewer::ViewerEvent;
use tracing::{debug, info};

use crate::convert::load_texture;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::state::{SearchView, TimelineView, UIState, ViewerView};
use crate::workers;

pub struct FitsViewApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub config: AppConfig,
    pub ui_state: UIState,
    pub viewer: ViewerView,
    pub search: SearchView,
    pub timeline: Option<TimelineView>,
}

impl FitsViewApp {
    pub fn new(ctx: &egui::Context, config: AppConfig) -> anyhow::Result<Self> {
        let location = config.search_page()?;
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx.clone(), ctx.clone(), config.clone())?;
        let search = SearchView::new(SearchController::new(location), &config.placeholder_thumb);

        let mut app = Self {
            cmd_tx,
            result_tx,
            result_rx,
            config,
            ui_state: UIState::default(),
            viewer: ViewerView::default(),
            search,
            timeline: None,
        };

        // The startup search reflects the location as-is and must not rewrite it.
        let query = app.search.controller.begin_search(false);
        app.send_command(WorkerCommand::Search { query });
        Ok(app)
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Viewer(event) => self.apply_viewer_event(ctx, event),
                WorkerResult::SearchComplete { result } => {
                    self.search.controller.finish_search(result);
                    self.search.expanded.clear();
                    self.ui_state.add_log(self.search.controller.summary());
                }
                WorkerResult::FramesLoaded { file_id, result } => {
                    self.search.frames_pending.remove(&file_id);
                    match result {
                        Ok(items) => {
                            let count = items.len();
                            self.search.frames.insert(&file_id, items);
                            self.search.frame_errors.remove(&file_id);
                            if let Some(timeline) = self.timeline.as_mut() {
                                if timeline.file_id == file_id && timeline.player.is_none() {
                                    timeline.start(count);
                                }
                            }
                        }
                        Err(message) => {
                            self.ui_state.add_log(format!("Frames for {file_id}: {message}"));
                            self.search.frame_errors.insert(file_id, message);
                        }
                    }
                }
                WorkerResult::FrameImage {
                    file_id,
                    index,
                    image,
                } => {
                    if let Some(timeline) = self.timeline.as_mut() {
                        if timeline.file_id == file_id {
                            let texture =
                                load_texture(ctx, &format!("frame-{file_id}-{index}"), &image);
                            timeline.textures.insert(index, texture);
                        }
                    }
                }
                WorkerResult::Thumbnail { file_id, image } => {
                    let texture = load_texture(ctx, &format!("thumb-{file_id}"), &image);
                    self.search.thumbnails.insert(file_id, texture);
                }
                WorkerResult::ThumbnailFailed { file_id, message } => {
                    debug!(file_id, "thumbnail failed: {message}");
                    if let Some(url) = self.search.thumbnail_requests.fail(&file_id) {
                        self.send_command(WorkerCommand::LoadThumbnail { file_id, url });
                    }
                }
                WorkerResult::ConfigImported { config } => self.apply_config(config),
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn apply_viewer_event(&mut self, ctx: &egui::Context, event: ViewerEvent) {
        let view = &mut self.viewer;
        match event {
            ViewerEvent::Status(next) => {
                if next.text == status::UPLOADING {
                    view.uploading = true;
                }
                if next.level == StatusLevel::Danger {
                    self.ui_state.add_log(format!("ERROR: {}", next.text));
                }
                view.status = next;
            }
            ViewerEvent::FileLoaded {
                file_id,
                filename,
                header_summary,
                shape,
                slice,
            } => {
                view.reset_for_file();
                self.ui_state
                    .add_log(format!("Loaded {}", filename.as_deref().unwrap_or(&file_id)));
                view.file_id = Some(file_id);
                view.filename = filename;
                view.header_summary = header_summary;
                view.shape = shape;
                view.slice = slice;
            }
            ViewerEvent::MetaUpdated {
                filename,
                header_summary,
            } => {
                if filename.is_some() {
                    view.filename = filename;
                }
                if let Some(summary) = header_summary {
                    view.header_summary = summary;
                }
            }
            ViewerEvent::Preview(image) => {
                view.preview_size = Some(image.size());
                view.preview = Some(load_texture(ctx, "preview", &image));
            }
            ViewerEvent::Slit(image) => {
                view.slit_size = Some(image.size());
                view.slit = Some(load_texture(ctx, "slit", &image));
            }
            ViewerEvent::Spectrum(series) => {
                view.spectrum = Some(series);
            }
            ViewerEvent::PixelSelected(pixel) => {
                view.selected = Some(pixel);
            }
            ViewerEvent::UploadSettled => {
                view.uploading = false;
            }
        }
    }

    fn apply_config(&mut self, config: AppConfig) {
        info!(server = %config.server_url, "configuration imported");
        self.ui_state.add_log(format!("Config imported ({})", config.server_url));
        // The worker drops its session, so the current file is gone too.
        self.viewer = ViewerView::default();
        self.timeline = None;
        self.search.frames.clear();
        self.search.frame_errors.clear();
        self.search.thumbnails.clear();
        self.search.thumbnail_requests = ThumbnailRequests::new(&config.placeholder_thumb);
        self.config = config.clone();
        self.send_command(WorkerCommand::Reconfigure { config });
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    /// Copy the form into the search state and dispatch a search. Nothing is
    /// sent when a date input does not parse.
    pub fn submit_search(&mut self) {
        let search = &mut self.search;
        if let Err(e) = search.form.apply(search.controller.state_mut()) {
            search.date_error = Some(e.user_message());
            return;
        }
        search.date_error = None;
        self.dispatch_search();
    }

    /// Dispatch a search with the state as it stands, updating the location.
    pub fn dispatch_search(&mut self) {
        let query = self.search.controller.begin_search(true);
        self.send_command(WorkerCommand::Search { query });
    }

    pub fn remove_chip(&mut self, key: &ChipKey) {
        self.search.controller.remove_chip(key);
        self.search.form = SearchForm::from_state(self.search.controller.state());
        self.dispatch_search();
    }

    pub fn apply_quick_range(&mut self, range: QuickRange) {
        let now = Local::now().naive_local();
        let (from, to) = self.search.controller.apply_quick_range(range, now);
        self.search.form.set_dates(&from, &to);
        self.search.date_error = None;
        self.submit_search();
    }

    /// Request the frame list once; cached and in-flight lists are not refetched.
    pub fn request_frames(&mut self, file_id: &str) {
        if self.search.frames.contains(file_id) || self.search.frames_pending.contains(file_id) {
            return;
        }
        self.search.frames_pending.insert(file_id.to_string());
        self.search.frame_errors.remove(file_id);
        self.send_command(WorkerCommand::LoadFrames {
            file_id: file_id.to_string(),
        });
    }

    pub fn open_in_viewer(&mut self, file_id: &str) {
        self.send_command(WorkerCommand::OpenExisting {
            file_id: file_id.to_string(),
        });
        self.search.open = false;
    }

    pub fn open_timeline(&mut self, file_id: &str, title: &str) {
        let mut timeline = TimelineView::new(file_id.to_string(), title.to_string(), &self.config);
        match self.search.frames.get(file_id) {
            Some(items) => timeline.start(items.len()),
            None => self.request_frames(file_id),
        }
        self.timeline = Some(timeline);
    }
}

impl eframe::App for FitsViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::header_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::analysis::show(ctx, self);
        panels::viewport::show(ctx, self);
        panels::search::show(ctx, self);
        panels::timeline::show(ctx, self);

        if self.ui_state.show_about {
            egui::Window::new("About FitsView")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("FitsView");
                        ui.label("FITS preview, spectrum extraction and catalog search");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.label(format!("Server: {}", self.config.server_url));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
