use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// FITS header as returned by the backend (keyword → value).
pub type HeaderMap = serde_json::Map<String, Value>;

/// Accept ids sent either as strings or as bare numbers.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// `null` and a missing field both read as an empty series.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<f64>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, Deserialize)]
pub struct UploadResponse {
    #[serde(deserialize_with = "id_string")]
    pub file_id: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub header: HeaderMap,
    #[serde(default)]
    pub shape: Vec<usize>,
    pub preview_png: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PreviewResponse {
    pub preview_png: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub header: Option<HeaderMap>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SlitResponse {
    pub slit_png: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectrumResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub wavelength: Vec<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub intensity: Vec<f64>,
}

/// One catalog hit. Everything except the id may be missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    #[serde(deserialize_with = "id_string")]
    pub file_id: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub date_obs: Option<String>,
    /// Usually a number, but rendered as-is when the server sends text.
    #[serde(default)]
    pub exptime: Option<Value>,
    #[serde(default)]
    pub frames: Option<u64>,
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub shape: Option<Value>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub thumb_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchResultItem>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameItem {
    pub index: usize,
    pub url: String,
    #[serde(default)]
    pub channel: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FramesResponse {
    #[serde(default)]
    pub items: Vec<FrameItem>,
}

/// Error body shared by every endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// `1.0` is sent as "1.0" rather than "1".
fn clip_param(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn flag(on: bool) -> String {
    if on { "true" } else { "false" }.to_string()
}

#[derive(Clone, Debug, PartialEq)]
pub struct PreviewParams {
    pub file_id: String,
    pub z: usize,
    pub percent_clip: f64,
    pub apply_correction: bool,
}

impl PreviewParams {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("file_id", self.file_id.clone()),
            ("z", self.z.to_string()),
            ("percent_clip", clip_param(self.percent_clip)),
            ("apply_correction", flag(self.apply_correction)),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SlitParams {
    pub file_id: String,
    pub x: u32,
    pub percent_clip: f64,
    pub apply_correction: bool,
}

impl SlitParams {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("file_id", self.file_id.clone()),
            ("x", self.x.to_string()),
            ("percent_clip", clip_param(self.percent_clip)),
            ("apply_correction", flag(self.apply_correction)),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpectrumParams {
    pub file_id: String,
    pub x: u32,
    pub y: u32,
    pub apply_correction: bool,
}

impl SpectrumParams {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("file_id", self.file_id.clone()),
            ("x", self.x.to_string()),
            ("y", self.y.to_string()),
            ("apply_correction", flag(self.apply_correction)),
        ]
    }
}
