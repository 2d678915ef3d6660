use std::path::Path;

use tracing::{debug, info, warn};

use crate::api::{FitsBackend, PreviewParams, SlitParams, SpectrumParams};
use crate::consts::GENERIC_UPLOAD_FAILURE;
use crate::data_url::DecodedImage;
use crate::error::{FitsViewError, Result};
use crate::mapping::PixelCoord;
use crate::status::{self, Status};

use super::events::{ViewerEvent, ViewerObserver};
use super::header::summarize_header;
use super::spectrum::SpectrumSeries;
use super::state::{LoadedFile, SliceControl, ViewerState};

/// Result of one view's request/response pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewOutcome {
    /// Not requested (no file, or no selected pixel).
    #[default]
    Skipped,
    Rendered,
    Failed(String),
}

impl ViewOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered)
    }
}

/// Per-view outcome of a refresh. Views fail independently.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub preview: ViewOutcome,
    pub slit: ViewOutcome,
    pub spectrum: ViewOutcome,
}

/// Owns the viewer state and drives the preview, slit and spectrum requests.
pub struct ViewerSession<B, O> {
    backend: B,
    observer: O,
    state: ViewerState,
    percent_clip: f64,
}

impl<B: FitsBackend, O: ViewerObserver> ViewerSession<B, O> {
    pub fn new(backend: B, observer: O, percent_clip: f64) -> Self {
        Self {
            backend,
            observer,
            state: ViewerState::default(),
            percent_clip,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn emit(&self, event: ViewerEvent) {
        self.observer.on_event(event);
    }

    /// Upload a local file and make it current.
    ///
    /// On failure the state is untouched. Either way `UploadSettled` is emitted
    /// so the picker can be cleared and the same file chosen again.
    pub fn upload(&mut self, path: &Path) -> Result<SliceControl> {
        self.emit(ViewerEvent::Status(Status::warning(status::UPLOADING)));
        let result = self.try_upload(path);
        match &result {
            Ok(slice) => {
                info!(path = %path.display(), slice_enabled = slice.enabled, "upload complete");
                self.emit(ViewerEvent::Status(Status::success(status::UPLOAD_SUCCESS)));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "upload failed");
                self.emit(ViewerEvent::Status(Status::danger(upload_failure_message(e))));
            }
        }
        self.emit(ViewerEvent::UploadSettled);
        result
    }

    fn try_upload(&mut self, path: &Path) -> Result<SliceControl> {
        let response = self.backend.upload(path)?;
        // Decode before touching state so a bad preview leaves it unchanged.
        let preview = DecodedImage::from_data_url(&response.preview_png)?;

        let filename = Some(response.filename).filter(|f| !f.is_empty());
        self.state.set_file(LoadedFile {
            file_id: response.file_id.clone(),
            filename: filename.clone(),
            header: response.header,
            shape: response.shape,
        });
        self.state.set_preview(preview.clone());

        let slice = self.state.slice_control();
        self.emit(self.file_loaded_event());
        self.emit(ViewerEvent::Preview(preview));
        Ok(slice)
    }

    /// Adopt a catalog file id without uploading. The shape is unknown, so the
    /// slice selector stays disabled.
    pub fn open_existing(&mut self, file_id: &str) -> RefreshReport {
        info!(file_id, "opening catalog file");
        self.state.set_file(LoadedFile {
            file_id: file_id.to_string(),
            ..LoadedFile::default()
        });
        self.emit(self.file_loaded_event());
        self.refresh()
    }

    fn file_loaded_event(&self) -> ViewerEvent {
        let file = self.state.file().cloned().unwrap_or_default();
        ViewerEvent::FileLoaded {
            header_summary: summarize_header(&file.header),
            slice: SliceControl::for_shape(&file.shape, self.state.current_z()),
            file_id: file.file_id,
            filename: file.filename,
            shape: file.shape,
        }
    }

    /// Change the z-slice and regenerate every view. `None` when the current
    /// file has no slice axis.
    pub fn set_slice(&mut self, z: usize) -> Option<RefreshReport> {
        let applied = self.state.set_slice(z)?;
        debug!(z = applied, "slice changed");
        Some(self.refresh())
    }

    /// Toggle server-side correction and regenerate every view.
    pub fn set_correction(&mut self, enabled: bool) -> RefreshReport {
        self.state.set_correction(enabled);
        debug!(enabled, "correction changed");
        self.refresh()
    }

    /// Re-request the preview, then slit and spectrum for the selected pixel.
    /// A preview failure does not stop the other two.
    pub fn refresh(&mut self) -> RefreshReport {
        let Some(file_id) = self.state.file_id().map(str::to_owned) else {
            return RefreshReport::default();
        };

        let preview = self.render_preview(&file_id);
        let mut report = match self.state.last_click() {
            Some(pixel) => self.draw_for(pixel),
            None => RefreshReport::default(),
        };
        report.preview = preview;
        report
    }

    fn render_preview(&mut self, file_id: &str) -> ViewOutcome {
        let params = PreviewParams {
            file_id: file_id.to_string(),
            z: self.state.current_z(),
            percent_clip: self.percent_clip,
            apply_correction: self.state.correction_enabled(),
        };

        let rendered = self.backend.preview(&params).and_then(|response| {
            let image = DecodedImage::from_data_url(&response.preview_png)?;
            Ok((image, response.filename, response.header))
        });

        match rendered {
            Ok((image, filename, header)) => {
                self.state.set_preview(image.clone());
                self.emit(ViewerEvent::Preview(image));
                if filename.is_some() || header.is_some() {
                    let header_summary = header.as_ref().map(summarize_header);
                    self.state.apply_meta(filename.clone(), header);
                    self.emit(ViewerEvent::MetaUpdated {
                        filename,
                        header_summary,
                    });
                }
                ViewOutcome::Rendered
            }
            Err(e) => self.view_failed(status::PREVIEW_FAILED, &e),
        }
    }

    /// Select a native pixel and extract slit + spectrum there. Rejected with
    /// no request and no state change when the pixel is off the image.
    pub fn select_pixel(&mut self, pixel: PixelCoord) -> Result<RefreshReport> {
        self.state.select_pixel(pixel)?;
        self.emit(ViewerEvent::PixelSelected(pixel));
        Ok(self.draw_for(pixel))
    }

    /// Request slit then spectrum for `pixel`. Each is rendered and reported
    /// on its own.
    pub fn draw_for(&mut self, pixel: PixelCoord) -> RefreshReport {
        let Some(file_id) = self.state.file_id().map(str::to_owned) else {
            return RefreshReport::default();
        };
        self.emit(ViewerEvent::Status(Status::warning(status::EXTRACTING_SPECTRUM)));

        let slit_params = SlitParams {
            file_id: file_id.clone(),
            x: pixel.x,
            percent_clip: self.percent_clip,
            apply_correction: self.state.correction_enabled(),
        };
        let slit = match self
            .backend
            .slit(&slit_params)
            .and_then(|r| DecodedImage::from_data_url(&r.slit_png))
        {
            Ok(image) => {
                self.state.set_slit(image.clone());
                self.emit(ViewerEvent::Slit(image));
                ViewOutcome::Rendered
            }
            Err(e) => self.view_failed(status::SLIT_FAILED, &e),
        };

        let spectrum_params = SpectrumParams {
            file_id,
            x: pixel.x,
            y: pixel.y,
            apply_correction: self.state.correction_enabled(),
        };
        let spectrum = match self.backend.spectrum(&spectrum_params) {
            Ok(response) => {
                let series = SpectrumSeries::from(response);
                self.state.set_spectrum(series.clone());
                self.emit(ViewerEvent::Spectrum(series));
                ViewOutcome::Rendered
            }
            Err(e) => self.view_failed(status::SPECTRUM_FAILED, &e),
        };

        if slit.is_rendered() && spectrum.is_rendered() {
            self.emit(ViewerEvent::Status(Status::success(status::EXTRACTING_SUCCESS)));
        }

        RefreshReport {
            preview: ViewOutcome::Skipped,
            slit,
            spectrum,
        }
    }

    fn view_failed(&self, what: &str, error: &FitsViewError) -> ViewOutcome {
        warn!(error = %error, "{what}");
        let message = format!("{what}: {}", error.user_message());
        self.emit(ViewerEvent::Status(Status::danger(message.clone())));
        ViewOutcome::Failed(message)
    }
}

fn upload_failure_message(error: &FitsViewError) -> String {
    match error {
        FitsViewError::Server { message, .. } => message.clone(),
        other => format!("{GENERIC_UPLOAD_FAILURE}: {other}"),
    }
}
