use crate::data_url::DecodedImage;
use crate::mapping::PixelCoord;
use crate::status::Status;

use super::spectrum::SpectrumSeries;
use super::state::SliceControl;

/// Notifications published by [`super::ViewerSession`]. Views subscribe to
/// these instead of reaching into each other.
#[derive(Clone, Debug)]
pub enum ViewerEvent {
    Status(Status),
    /// A new file became current (upload or catalog pick).
    FileLoaded {
        file_id: String,
        filename: Option<String>,
        header_summary: String,
        shape: Vec<usize>,
        slice: SliceControl,
    },
    /// Filename/header refreshed by a preview response.
    MetaUpdated {
        filename: Option<String>,
        header_summary: Option<String>,
    },
    Preview(DecodedImage),
    Slit(DecodedImage),
    Spectrum(SpectrumSeries),
    PixelSelected(PixelCoord),
    /// The upload finished either way; the file picker may be reset.
    UploadSettled,
}

pub trait ViewerObserver {
    fn on_event(&self, event: ViewerEvent);
}

impl<F: Fn(ViewerEvent)> ViewerObserver for F {
    fn on_event(&self, event: ViewerEvent) {
        self(event)
    }
}
