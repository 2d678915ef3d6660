use std::path::PathBuf;

use fitsview_core::api::{FrameItem, SearchResponse};
use fitsview_core::config::AppConfig;
use fitsview_core::data_url::DecodedImage;
use fitsview_core::error::FitsViewError;
use fitsview_core::mapping::PixelCoord;
use fitsview_core::viewer::ViewerEvent;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Upload a local FITS file and make it current.
    Upload { path: PathBuf },

    /// Make a catalog file current without uploading.
    OpenExisting { file_id: String },

    SetSlice { z: usize },

    SetCorrection { enabled: bool },

    /// Extract slit + spectrum at a native pixel.
    SelectPixel { pixel: PixelCoord },

    /// Run a catalog search with an already-serialized query string.
    Search { query: String },

    /// Fetch the frame list of one catalog file.
    LoadFrames { file_id: String },

    /// Fetch one timeline frame image.
    LoadFrameImage {
        file_id: String,
        index: usize,
        url: String,
    },

    /// Fetch a result thumbnail.
    LoadThumbnail { file_id: String, url: String },

    /// Replace the backend configuration. The current file is dropped.
    Reconfigure { config: AppConfig },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    /// Forwarded from the viewer session.
    Viewer(ViewerEvent),

    SearchComplete {
        result: Result<SearchResponse, FitsViewError>,
    },

    FramesLoaded {
        file_id: String,
        result: Result<Vec<FrameItem>, String>,
    },

    FrameImage {
        file_id: String,
        index: usize,
        image: DecodedImage,
    },

    Thumbnail {
        file_id: String,
        image: DecodedImage,
    },

    ThumbnailFailed {
        file_id: String,
        message: String,
    },

    ConfigImported {
        config: AppConfig,
    },

    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
