//! Backend contract: request parameters, response bodies, and the
//! [`FitsBackend`] trait with its HTTP implementation.

mod http;
pub mod types;

use std::path::Path;

use crate::data_url::DecodedImage;
use crate::error::Result;

pub use http::HttpBackend;
pub use types::{
    FrameItem, FramesResponse, HeaderMap, PreviewParams, PreviewResponse, SearchResponse,
    SearchResultItem, SlitParams, SlitResponse, SpectrumParams, SpectrumResponse, UploadResponse,
};

/// Everything the client asks of the server. Each call is independent; a
/// failure is returned to the caller and never retried.
pub trait FitsBackend {
    /// Multipart upload of a local FITS file.
    fn upload(&self, path: &Path) -> Result<UploadResponse>;

    fn preview(&self, params: &PreviewParams) -> Result<PreviewResponse>;

    fn slit(&self, params: &SlitParams) -> Result<SlitResponse>;

    fn spectrum(&self, params: &SpectrumParams) -> Result<SpectrumResponse>;

    /// `query` is a canonical, already-encoded query string without the `?`.
    fn search(&self, query: &str) -> Result<SearchResponse>;

    fn frames(&self, file_id: &str) -> Result<FramesResponse>;

    /// Fetch and decode an image by URL (absolute, server-relative, or `data:`).
    fn fetch_image(&self, url: &str) -> Result<DecodedImage>;
}

impl<B: FitsBackend + ?Sized> FitsBackend for &B {
    fn upload(&self, path: &Path) -> Result<UploadResponse> {
        (**self).upload(path)
    }

    fn preview(&self, params: &PreviewParams) -> Result<PreviewResponse> {
        (**self).preview(params)
    }

    fn slit(&self, params: &SlitParams) -> Result<SlitResponse> {
        (**self).slit(params)
    }

    fn spectrum(&self, params: &SpectrumParams) -> Result<SpectrumResponse> {
        (**self).spectrum(params)
    }

    fn search(&self, query: &str) -> Result<SearchResponse> {
        (**self).search(query)
    }

    fn frames(&self, file_id: &str) -> Result<FramesResponse> {
        (**self).frames(file_id)
    }

    fn fetch_image(&self, url: &str) -> Result<DecodedImage> {
        (**self).fetch_image(url)
    }
}
