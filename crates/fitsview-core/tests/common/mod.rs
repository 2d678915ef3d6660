#![allow(dead_code)]

use std::cell::RefCell;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

use fitsview_core::api::{
    FitsBackend, FrameItem, FramesResponse, HeaderMap, PreviewParams, PreviewResponse,
    SearchResponse, SearchResultItem, SlitParams, SlitResponse, SpectrumParams,
    SpectrumResponse, UploadResponse,
};
use fitsview_core::data_url::DecodedImage;
use fitsview_core::error::{FitsViewError, Result};
use fitsview_core::viewer::{ViewerEvent, ViewerObserver};

/// Encode a solid grey PNG of the given size as a `data:` URL.
pub fn png_data_url(width: u32, height: u32) -> String {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([128, 128, 128, 255]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png)
        .expect("encode png");
    format!("data:image/png;base64,{}", STANDARD.encode(bytes.into_inner()))
}

pub fn sample_header() -> HeaderMap {
    let value = json!({
        "OBJECT": "Sun",
        "DATE-OBS": "2024-11-06T22:53:10",
        "EXPTIME": 0.5,
        "NAXIS1": 512,
        "NAXIS2": 256,
        "NAXIS3": 10,
    });
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn server_failure(message: &str) -> FitsViewError {
    FitsViewError::Server {
        status: 500,
        message: message.to_string(),
    }
}

/// One backend request as seen by [`FakeBackend`].
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Upload(PathBuf),
    Preview(PreviewParams),
    Slit(SlitParams),
    Spectrum(SpectrumParams),
    Search(String),
    Frames(String),
    FetchImage(String),
}

/// In-memory backend returning canned responses and recording every call.
pub struct FakeBackend {
    pub calls: Mutex<Vec<Call>>,
    pub file_id: String,
    pub shape: Vec<usize>,
    pub image_size: (u32, u32),
    pub upload_error: Option<String>,
    pub upload_preview: Option<String>,
    pub fail_preview: bool,
    pub fail_slit: bool,
    pub fail_spectrum: bool,
    pub search_response: Option<SearchResponse>,
    pub frames: Vec<FrameItem>,
    pub frame_failures: Mutex<usize>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            file_id: "abc123".to_string(),
            shape: vec![10, 256, 512],
            image_size: (512, 256),
            upload_error: None,
            upload_preview: None,
            fail_preview: false,
            fail_slit: false,
            fail_spectrum: false,
            search_response: Some(SearchResponse::default()),
            frames: Vec::new(),
            frame_failures: Mutex::new(0),
        }
    }
}

impl FakeBackend {
    pub fn with_shape(shape: Vec<usize>) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }
}

impl FitsBackend for FakeBackend {
    fn upload(&self, path: &Path) -> Result<UploadResponse> {
        self.record(Call::Upload(path.to_path_buf()));
        if let Some(message) = &self.upload_error {
            return Err(server_failure(message));
        }
        let (w, h) = self.image_size;
        Ok(UploadResponse {
            file_id: self.file_id.clone(),
            filename: "nxst_20241106_225310.658925_l1.fits".to_string(),
            header: sample_header(),
            shape: self.shape.clone(),
            preview_png: self
                .upload_preview
                .clone()
                .unwrap_or_else(|| png_data_url(w, h)),
        })
    }

    fn preview(&self, params: &PreviewParams) -> Result<PreviewResponse> {
        self.record(Call::Preview(params.clone()));
        if self.fail_preview {
            return Err(server_failure("preview exploded"));
        }
        let (w, h) = self.image_size;
        Ok(PreviewResponse {
            preview_png: png_data_url(w, h),
            filename: None,
            header: None,
        })
    }

    fn slit(&self, params: &SlitParams) -> Result<SlitResponse> {
        self.record(Call::Slit(params.clone()));
        if self.fail_slit {
            return Err(server_failure("slit exploded"));
        }
        Ok(SlitResponse {
            slit_png: png_data_url(4, 10),
        })
    }

    fn spectrum(&self, params: &SpectrumParams) -> Result<SpectrumResponse> {
        self.record(Call::Spectrum(params.clone()));
        if self.fail_spectrum {
            return Err(server_failure("spectrum exploded"));
        }
        Ok(SpectrumResponse {
            wavelength: vec![1.0, 2.0, 3.0],
            intensity: vec![10.0, 20.0, 15.0],
        })
    }

    fn search(&self, query: &str) -> Result<SearchResponse> {
        self.record(Call::Search(query.to_string()));
        self.search_response
            .clone()
            .ok_or_else(|| server_failure("search exploded"))
    }

    fn frames(&self, file_id: &str) -> Result<FramesResponse> {
        self.record(Call::Frames(file_id.to_string()));
        let mut failures = self.frame_failures.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            return Err(FitsViewError::Transport("connection reset".into()));
        }
        Ok(FramesResponse {
            items: self.frames.clone(),
        })
    }

    fn fetch_image(&self, url: &str) -> Result<DecodedImage> {
        self.record(Call::FetchImage(url.to_string()));
        DecodedImage::from_data_url(&png_data_url(8, 8))
    }
}

/// Observer that keeps every event for later inspection.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<ViewerEvent>>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<ViewerEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn statuses(&self) -> Vec<fitsview_core::status::Status> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewerEvent::Status(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

impl ViewerObserver for RecordingObserver {
    fn on_event(&self, event: ViewerEvent) {
        self.events.borrow_mut().push(event);
    }
}

pub fn frame_items(count: usize) -> Vec<FrameItem> {
    (0..count)
        .map(|index| FrameItem {
            index,
            url: format!("/static/frames/{index}.png"),
            channel: None,
        })
        .collect()
}

pub fn result_item(file_id: &str) -> SearchResultItem {
    SearchResultItem {
        file_id: file_id.to_string(),
        ..SearchResultItem::default()
    }
}
