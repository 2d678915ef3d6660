use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fitsview_core::api::{FitsBackend, SpectrumParams};
use fitsview_core::config::AppConfig;
use fitsview_core::viewer::SpectrumSeries;

#[derive(Args)]
pub struct SpectrumArgs {
    /// File id returned by upload or search
    pub file_id: String,

    #[arg(long)]
    pub x: u32,

    #[arg(long)]
    pub y: u32,

    /// Apply server-side correction
    #[arg(long)]
    pub correction: bool,

    /// Write the series as CSV instead of printing it
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub fn run(args: &SpectrumArgs, config: &AppConfig) -> Result<()> {
    let backend = super::backend(config)?;
    let pb = super::spinner("Extracting spectrum")?;

    let params = SpectrumParams {
        file_id: args.file_id.clone(),
        x: args.x,
        y: args.y,
        apply_correction: args.correction,
    };
    let response = backend.spectrum(&params);
    pb.finish_and_clear();
    let series = SpectrumSeries::from(
        response.with_context(|| format!("Spectrum at ({}, {}) failed", args.x, args.y))?,
    );

    if series.is_empty() {
        println!("Spectrum at ({}, {}) is empty", args.x, args.y);
        return Ok(());
    }

    if let Some(ref path) = args.csv {
        let mut out = String::new();
        writeln!(out, "{},{}", series.x_label(), series.y_label())?;
        for [x, y] in series.points() {
            writeln!(out, "{x},{y}")?;
        }
        std::fs::write(path, out)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Spectrum ({} points) saved to {}", series.points().len(), path.display());
        return Ok(());
    }

    println!("{:>16}  {:>14}", series.x_label(), series.y_label());
    println!("{}", "-".repeat(32));
    for [x, y] in series.points() {
        println!("{:>16.3}  {:>14.3}", x, y);
    }
    Ok(())
}
