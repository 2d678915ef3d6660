use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::consts::{DEFAULT_PERCENT_CLIP, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TIMELINE_FPS};
use crate::error::{FitsViewError, Result};

/// Client configuration. Every field has a default so a partial TOML file is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Scheme + host (+ port) of the backend; relative URLs are resolved against it.
    pub server_url: String,
    /// Prefix of the FITS-processing endpoints (`upload`, `preview`, `slit`, `spectrum`).
    pub fits_api_path: String,
    pub search_api_path: String,
    /// Frames endpoint; `{file_id}` is replaced by the file id as one path segment.
    pub frames_api_path: String,
    /// Page whose query string mirrors the search state.
    pub search_page_path: String,
    /// Opaque stretch parameter forwarded to preview and slit requests.
    pub percent_clip: f64,
    pub request_timeout_secs: u64,
    pub timeline_fps: f32,
    /// Facet values offered as instrument pills.
    pub instruments: Vec<String>,
    /// Facet values offered as flag pills.
    pub flags: Vec<String>,
    pub placeholder_thumb: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            fits_api_path: "/fits".into(),
            search_api_path: "/api/search".into(),
            frames_api_path: "/api/files/{file_id}/frames".into(),
            search_page_path: "/search".into(),
            percent_clip: DEFAULT_PERCENT_CLIP,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            timeline_fps: DEFAULT_TIMELINE_FPS,
            instruments: vec!["NXST".into()],
            flags: vec!["bad_pixels".into(), "saturated".into(), "cloudy".into()],
            placeholder_thumb: "/static/img/placeholder.png".into(),
        }
    }
}

impl AppConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| FitsViewError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FitsViewError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.server_root()?;
        if !self.frames_api_path.contains("{file_id}") {
            return Err(FitsViewError::Config(
                "frames_api_path must contain {file_id}".into(),
            ));
        }
        if !(self.timeline_fps.is_finite() && self.timeline_fps > 0.0) {
            return Err(FitsViewError::Config(format!(
                "timeline_fps must be positive, got {}",
                self.timeline_fps
            )));
        }
        Ok(())
    }

    pub fn server_root(&self) -> Result<Url> {
        Url::parse(&self.server_url)
            .map_err(|e| FitsViewError::Config(format!("server_url {:?}: {e}", self.server_url)))
    }

    /// Resolve a possibly relative URL (frame, thumbnail) against the server root.
    pub fn resolve(&self, reference: &str) -> Result<Url> {
        self.server_root()?
            .join(reference)
            .map_err(|e| FitsViewError::InvalidInput(format!("url {reference:?}: {e}")))
    }

    /// URL of one FITS endpoint, e.g. `fits_endpoint("preview")`.
    pub fn fits_endpoint(&self, name: &str) -> Result<Url> {
        let base = self.fits_api_path.trim_end_matches('/');
        self.resolve(&format!("{base}/{name}"))
    }

    pub fn search_endpoint(&self) -> Result<Url> {
        self.resolve(&self.search_api_path)
    }

    /// The id becomes a single path segment, so `/` and spaces are escaped.
    pub fn frames_endpoint(&self, file_id: &str) -> Result<Url> {
        let (prefix, suffix) = self.frames_api_path.split_once("{file_id}").ok_or_else(|| {
            FitsViewError::Config("frames_api_path must contain {file_id}".into())
        })?;
        let mut url = self.resolve(prefix)?;
        url.path_segments_mut()
            .map_err(|()| FitsViewError::Config(format!("server_url {:?} cannot hold a path", self.server_url)))?
            .pop_if_empty()
            .push(file_id)
            .extend(suffix.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    pub fn search_page(&self) -> Result<Url> {
        self.resolve(&self.search_page_path)
    }
}
