use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{FitsViewError, Result};

/// An RGBA8 image decoded from a backend PNG.
#[derive(Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl DecodedImage {
    pub fn size(&self) -> [u32; 2] {
        [self.width, self.height]
    }

    /// Decode an encoded image (PNG or any format the `image` crate is built with).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    /// Decode a `data:image/png;base64,...` URL.
    pub fn from_data_url(url: &str) -> Result<Self> {
        Self::from_bytes(&data_url_bytes(url)?)
    }

    /// Re-encode as PNG, for saving previews from the CLI.
    pub fn save_png(&self, path: &std::path::Path) -> Result<()> {
        image::save_buffer(
            path,
            &self.rgba,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(())
    }
}

/// Extract the payload of a base64 data URL. A bare base64 string (no `data:`
/// prefix) is accepted as well.
pub fn data_url_bytes(url: &str) -> Result<Vec<u8>> {
    let url = url.trim();
    let payload = match url.strip_prefix("data:") {
        Some(rest) => {
            let (meta, data) = rest.split_once(',').ok_or_else(|| {
                FitsViewError::MalformedResponse("data URL without ',' separator".into())
            })?;
            if !meta.ends_with(";base64") {
                return Err(FitsViewError::MalformedResponse(format!(
                    "data URL is not base64 encoded ({meta})"
                )));
            }
            data
        }
        None => url,
    };
    STANDARD
        .decode(payload)
        .map_err(|e| FitsViewError::MalformedResponse(format!("invalid base64 image: {e}")))
}
