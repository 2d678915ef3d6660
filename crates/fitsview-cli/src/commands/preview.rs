use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fitsview_core::api::{FitsBackend, PreviewParams};
use fitsview_core::config::AppConfig;
use fitsview_core::data_url::DecodedImage;
use fitsview_core::viewer::summarize_header;

#[derive(Args)]
pub struct PreviewArgs {
    /// File id returned by upload or search
    pub file_id: String,

    /// Slice index for 3-D cubes
    #[arg(long, default_value = "0")]
    pub z: usize,

    /// Apply server-side correction
    #[arg(long)]
    pub correction: bool,

    /// Output PNG path
    #[arg(short, long, default_value = "preview.png")]
    pub output: PathBuf,
}

pub fn run(args: &PreviewArgs, config: &AppConfig) -> Result<()> {
    let backend = super::backend(config)?;
    let pb = super::spinner("Rendering preview")?;

    let params = PreviewParams {
        file_id: args.file_id.clone(),
        z: args.z,
        percent_clip: config.percent_clip,
        apply_correction: args.correction,
    };
    let response = backend.preview(&params);
    pb.finish_and_clear();
    let response = response.with_context(|| format!("Preview of {} failed", args.file_id))?;

    let image = DecodedImage::from_data_url(&response.preview_png)?;
    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Preview {}x{} (z={}) saved to {}",
        image.width,
        image.height,
        args.z,
        args.output.display()
    );
    if let Some(name) = response.filename {
        println!("File:    {}", name);
    }
    if let Some(header) = response.header {
        println!("Header:  {}", summarize_header(&header));
    }
    Ok(())
}
