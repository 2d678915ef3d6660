use anyhow::{Context, Result};
use clap::Args;
use fitsview_core::config::AppConfig;
use fitsview_core::search::FrameCache;

#[derive(Args)]
pub struct FramesArgs {
    /// Catalog file id
    pub file_id: String,
}

pub fn run(args: &FramesArgs, config: &AppConfig) -> Result<()> {
    let backend = super::backend(config)?;
    let mut cache = FrameCache::new();

    let frames = cache
        .get_or_fetch(&backend, &args.file_id)
        .with_context(|| format!("Failed to list frames of {}", args.file_id))?;

    if frames.is_empty() {
        println!("No frames for {}", args.file_id);
        return Ok(());
    }

    println!("{:>6}  {:<8}  {}", "Index", "Channel", "URL");
    println!("{}", "-".repeat(60));
    for frame in frames {
        let url = config
            .resolve(&frame.url)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| frame.url.clone());
        println!(
            "{:>6}  {:<8}  {}",
            frame.index,
            frame.channel.as_deref().unwrap_or("-"),
            url
        );
    }
    println!("\n{} frames", frames.len());
    Ok(())
}
