use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fitsview_core::api::{FitsBackend, SlitParams};
use fitsview_core::config::AppConfig;
use fitsview_core::data_url::DecodedImage;

#[derive(Args)]
pub struct SlitArgs {
    /// File id returned by upload or search
    pub file_id: String,

    /// Native column to cut along
    #[arg(long)]
    pub x: u32,

    /// Apply server-side correction
    #[arg(long)]
    pub correction: bool,

    /// Output PNG path
    #[arg(short, long, default_value = "slit.png")]
    pub output: PathBuf,
}

pub fn run(args: &SlitArgs, config: &AppConfig) -> Result<()> {
    let backend = super::backend(config)?;
    let pb = super::spinner("Extracting slit")?;

    let params = SlitParams {
        file_id: args.file_id.clone(),
        x: args.x,
        percent_clip: config.percent_clip,
        apply_correction: args.correction,
    };
    let response = backend.slit(&params);
    pb.finish_and_clear();
    let response = response.with_context(|| format!("Slit at x={} failed", args.x))?;

    let image = DecodedImage::from_data_url(&response.slit_png)?;
    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!(
        "Slit {}x{} at x={} saved to {}",
        image.width,
        image.height,
        args.x,
        args.output.display()
    );
    Ok(())
}
