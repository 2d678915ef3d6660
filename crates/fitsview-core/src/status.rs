use std::fmt;

/// Severity of the status indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusLevel {
    #[default]
    Success,
    Warning,
    Danger,
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "ok"),
            Self::Warning => write!(f, "busy"),
            Self::Danger => write!(f, "error"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub level: StatusLevel,
}

impl Status {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Success,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Warning,
        }
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Danger,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::success(READY)
    }
}

pub const READY: &str = "Ready";
pub const UPLOADING: &str = "Uploading file...";
pub const UPLOAD_SUCCESS: &str = "Upload complete";
pub const PREVIEW_FAILED: &str = "Preview failed";
pub const CLICK_TO_EXTRACT: &str = "Click the image to extract a spectrum";
pub const EXTRACTING_SPECTRUM: &str = "Extracting slit and spectrum...";
pub const EXTRACTING_SUCCESS: &str = "Spectrum extracted";
pub const SLIT_FAILED: &str = "Slit extraction failed";
pub const SPECTRUM_FAILED: &str = "Spectrum extraction failed";
