use crate::api::HeaderMap;
use crate::data_url::DecodedImage;
use crate::error::{FitsViewError, Result};
use crate::mapping::PixelCoord;

use super::spectrum::SpectrumSeries;

/// Slice selector configuration. Only 3-D cubes get an enabled selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SliceControl {
    pub enabled: bool,
    /// Inclusive upper bound of the slider (`shape[0] - 1`).
    pub max: usize,
    pub value: usize,
}

impl SliceControl {
    pub fn for_shape(shape: &[usize], value: usize) -> Self {
        match shape {
            [depth, _, _] if *depth > 0 => Self {
                enabled: true,
                max: depth - 1,
                value: value.min(depth - 1),
            },
            _ => Self::default(),
        }
    }
}

/// Identity of a freshly loaded file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadedFile {
    pub file_id: String,
    pub filename: Option<String>,
    pub header: HeaderMap,
    pub shape: Vec<usize>,
}

/// Everything the viewer knows about the current file. Mutated only through
/// the named operations below.
#[derive(Clone, Debug, Default)]
pub struct ViewerState {
    file: Option<LoadedFile>,
    current_z: usize,
    last_click: Option<PixelCoord>,
    correction_enabled: bool,
    last_preview: Option<DecodedImage>,
    last_slit: Option<DecodedImage>,
    last_spectrum: Option<SpectrumSeries>,
}

impl ViewerState {
    /// Adopt a new file: slice back to 0, selection and cached views dropped.
    /// The correction toggle is a user preference and survives.
    pub fn set_file(&mut self, file: LoadedFile) {
        self.file = Some(file);
        self.current_z = 0;
        self.last_click = None;
        self.last_preview = None;
        self.last_slit = None;
        self.last_spectrum = None;
    }

    /// Set the z-slice, clamped to the cube depth. Returns the applied value,
    /// or `None` when the loaded file has no slice axis.
    pub fn set_slice(&mut self, z: usize) -> Option<usize> {
        let control = self.slice_control();
        if !control.enabled {
            return None;
        }
        self.current_z = z.min(control.max);
        Some(self.current_z)
    }

    /// Returns true if the flag changed.
    pub fn set_correction(&mut self, enabled: bool) -> bool {
        let changed = self.correction_enabled != enabled;
        self.correction_enabled = enabled;
        changed
    }

    /// Record a click in native pixel space. Rejected (state untouched) when no
    /// preview is shown or the pixel lies outside it.
    pub fn select_pixel(&mut self, pixel: PixelCoord) -> Result<()> {
        if self.file.is_none() {
            return Err(FitsViewError::NoFileLoaded);
        }
        let [width, height] = self.preview_size().ok_or_else(|| {
            FitsViewError::InvalidInput("no preview image to select from".into())
        })?;
        if pixel.x >= width || pixel.y >= height {
            return Err(FitsViewError::OutOfBounds {
                x: pixel.x,
                y: pixel.y,
                width,
                height,
            });
        }
        self.last_click = Some(pixel);
        Ok(())
    }

    pub fn set_preview(&mut self, image: DecodedImage) {
        self.last_preview = Some(image);
    }

    pub fn set_slit(&mut self, image: DecodedImage) {
        self.last_slit = Some(image);
    }

    pub fn set_spectrum(&mut self, series: SpectrumSeries) {
        self.last_spectrum = Some(series);
    }

    /// Merge filename/header sent along with a preview.
    pub fn apply_meta(&mut self, filename: Option<String>, header: Option<HeaderMap>) {
        if let Some(file) = self.file.as_mut() {
            if let Some(name) = filename {
                file.filename = Some(name);
            }
            if let Some(header) = header {
                file.header = header;
            }
        }
    }

    pub fn file(&self) -> Option<&LoadedFile> {
        self.file.as_ref()
    }

    pub fn file_id(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.file_id.as_str())
    }

    pub fn current_z(&self) -> usize {
        self.current_z
    }

    pub fn last_click(&self) -> Option<PixelCoord> {
        self.last_click
    }

    pub fn correction_enabled(&self) -> bool {
        self.correction_enabled
    }

    pub fn last_preview(&self) -> Option<&DecodedImage> {
        self.last_preview.as_ref()
    }

    pub fn last_slit(&self) -> Option<&DecodedImage> {
        self.last_slit.as_ref()
    }

    pub fn last_spectrum(&self) -> Option<&SpectrumSeries> {
        self.last_spectrum.as_ref()
    }

    /// Native size of the displayed preview.
    pub fn preview_size(&self) -> Option<[u32; 2]> {
        self.last_preview.as_ref().map(DecodedImage::size)
    }

    pub fn slice_control(&self) -> SliceControl {
        self.file
            .as_ref()
            .map(|f| SliceControl::for_shape(&f.shape, self.current_z))
            .unwrap_or_default()
    }
}
