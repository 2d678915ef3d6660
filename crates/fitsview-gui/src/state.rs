use std::collections::{HashMap, HashSet};

use fitsview_core::config::AppConfig;
use fitsview_core::mapping::PixelCoord;
use fitsview_core::search::{
    FrameCache, SearchController, SearchForm, ThumbnailRequests, TimelinePlayer,
};
use fitsview_core::status::Status;
use fitsview_core::viewer::{SliceControl, SpectrumSeries};

/// General UI state.
#[derive(Default)]
pub struct UIState {
    pub log_messages: Vec<String>,
    pub show_about: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}

/// Everything the viewer panels draw. Mirrors what the worker's session reports.
#[derive(Default)]
pub struct ViewerView {
    pub status: Status,
    pub file_id: Option<String>,
    pub filename: Option<String>,
    pub header_summary: String,
    pub shape: Vec<usize>,
    pub slice: SliceControl,
    pub correction: bool,
    /// Set while an upload is in flight; the Open button is disabled meanwhile.
    pub uploading: bool,
    pub preview: Option<egui::TextureHandle>,
    pub preview_size: Option<[u32; 2]>,
    pub selected: Option<PixelCoord>,
    pub slit: Option<egui::TextureHandle>,
    pub slit_size: Option<[u32; 2]>,
    /// Replaced wholesale on every extraction so only one chart ever exists.
    pub spectrum: Option<SpectrumSeries>,
    /// Last physical canvas buffer size, for the status readout.
    pub canvas_buffer: Option<[u32; 2]>,
}

impl ViewerView {
    /// Forget everything about the previous file.
    pub fn reset_for_file(&mut self) {
        self.preview = None;
        self.preview_size = None;
        self.selected = None;
        self.slit = None;
        self.slit_size = None;
        self.spectrum = None;
    }
}

pub struct SearchView {
    pub open: bool,
    pub controller: SearchController,
    /// Copied into the controller's state on submit.
    pub form: SearchForm,
    /// Why the last submit was refused.
    pub date_error: Option<String>,
    /// Result cards whose details section is expanded.
    pub expanded: HashSet<String>,
    pub frames: FrameCache,
    pub frames_pending: HashSet<String>,
    pub frame_errors: HashMap<String, String>,
    pub thumbnails: HashMap<String, egui::TextureHandle>,
    pub thumbnail_requests: ThumbnailRequests,
}

impl SearchView {
    pub fn new(controller: SearchController, placeholder_thumb: &str) -> Self {
        let form = SearchForm::from_state(controller.state());
        Self {
            open: false,
            controller,
            form,
            date_error: None,
            expanded: HashSet::new(),
            frames: FrameCache::new(),
            frames_pending: HashSet::new(),
            frame_errors: HashMap::new(),
            thumbnails: HashMap::new(),
            thumbnail_requests: ThumbnailRequests::new(placeholder_thumb),
        }
    }
}

/// The open timeline modal. `player` stays `None` until the frame list arrives.
pub struct TimelineView {
    pub file_id: String,
    pub title: String,
    pub fps: f32,
    pub player: Option<TimelinePlayer>,
    pub textures: HashMap<usize, egui::TextureHandle>,
    pub requested: HashSet<usize>,
}

impl TimelineView {
    pub fn new(file_id: String, title: String, config: &AppConfig) -> Self {
        Self {
            file_id,
            title,
            fps: config.timeline_fps,
            player: None,
            textures: HashMap::new(),
            requested: HashSet::new(),
        }
    }

    pub fn start(&mut self, frame_count: usize) {
        self.player = Some(TimelinePlayer::new(frame_count, self.fps));
    }
}
