use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitsViewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx response. `message` is the server's `error` field, or `HTTP <status>`.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No file loaded")]
    NoFileLoaded,

    #[error("Pixel ({x}, {y}) outside image bounds {width}x{height}")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

impl FitsViewError {
    /// Text suitable for the status indicator.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FitsViewError>;
