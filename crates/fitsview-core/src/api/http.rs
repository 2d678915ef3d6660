use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::types::ErrorBody;
use super::{
    FitsBackend, FramesResponse, PreviewParams, PreviewResponse, SearchResponse, SlitParams,
    SlitResponse, SpectrumParams, SpectrumResponse, UploadResponse,
};
use crate::config::AppConfig;
use crate::data_url::DecodedImage;
use crate::error::{FitsViewError, Result};

impl From<reqwest::Error> for FitsViewError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FitsViewError::Transport("request timed out".into())
        } else if err.is_decode() {
            FitsViewError::MalformedResponse(err.to_string())
        } else {
            FitsViewError::Transport(err.to_string())
        }
    }
}

/// Blocking HTTP implementation of [`FitsBackend`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: AppConfig,
    client: Client,
}

impl HttpBackend {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| FitsViewError::Config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn get_json<T: DeserializeOwned>(&self, mut url: Url, pairs: &[(&str, String)]) -> Result<T> {
        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
        }
        debug!(%url, "GET");
        let response = self.client.get(url).send()?;
        decode_json(response)
    }
}

/// Map a response to `T`, or to the server's `error` message on non-2xx.
fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes()?;
    if !status.is_success() {
        return Err(server_error(status.as_u16(), &body));
    }
    serde_json::from_slice(&body).map_err(|e| FitsViewError::MalformedResponse(e.to_string()))
}

fn server_error(status: u16, body: &[u8]) -> FitsViewError {
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
    FitsViewError::Server {
        status,
        message: parsed
            .error
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {status}")),
    }
}

impl FitsBackend for HttpBackend {
    fn upload(&self, path: &Path) -> Result<UploadResponse> {
        let url = self.config.fits_endpoint("upload")?;
        let form = multipart::Form::new().file("file", path)?;
        debug!(%url, path = %path.display(), "POST multipart");
        let response = self.client.post(url).multipart(form).send()?;
        decode_json(response)
    }

    fn preview(&self, params: &PreviewParams) -> Result<PreviewResponse> {
        self.get_json(self.config.fits_endpoint("preview")?, &params.query_pairs())
    }

    fn slit(&self, params: &SlitParams) -> Result<SlitResponse> {
        self.get_json(self.config.fits_endpoint("slit")?, &params.query_pairs())
    }

    fn spectrum(&self, params: &SpectrumParams) -> Result<SpectrumResponse> {
        self.get_json(self.config.fits_endpoint("spectrum")?, &params.query_pairs())
    }

    fn search(&self, query: &str) -> Result<SearchResponse> {
        let mut url = self.config.search_endpoint()?;
        url.set_query(if query.is_empty() { None } else { Some(query) });
        self.get_json(url, &[])
    }

    fn frames(&self, file_id: &str) -> Result<FramesResponse> {
        self.get_json(self.config.frames_endpoint(file_id)?, &[])
    }

    fn fetch_image(&self, url: &str) -> Result<DecodedImage> {
        if url.starts_with("data:") {
            return DecodedImage::from_data_url(url);
        }
        let url = self.config.resolve(url)?;
        debug!(%url, "GET image");
        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.bytes()?;
        if !status.is_success() {
            return Err(server_error(status.as_u16(), &body));
        }
        DecodedImage::from_bytes(&body)
    }
}
