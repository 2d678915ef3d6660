pub mod config;
pub mod frames;
pub mod preview;
pub mod search;
pub mod slit;
pub mod spectrum;
pub mod upload;

use anyhow::{Context, Result};
use fitsview_core::api::HttpBackend;
use fitsview_core::config::AppConfig;
use indicatif::{ProgressBar, ProgressStyle};

pub(crate) fn backend(config: &AppConfig) -> Result<HttpBackend> {
    HttpBackend::new(config.clone()).context("Failed to set up the backend client")
}

/// Spinner shown while a single request is in flight.
pub(crate) fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(pb)
}
