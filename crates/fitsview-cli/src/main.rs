mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fitsview_core::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fitsview", about = "Browse, preview and search FITS observations")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Client configuration (TOML); defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a FITS file and show its header summary
    Upload(commands::upload::UploadArgs),
    /// Render the preview of an uploaded file
    Preview(commands::preview::PreviewArgs),
    /// Extract the slit image at a column
    Slit(commands::slit::SlitArgs),
    /// Extract the spectrum at a pixel
    Spectrum(commands::spectrum::SpectrumArgs),
    /// Search the observation catalog
    Search(commands::search::SearchArgs),
    /// List the frames of a catalog file
    Frames(commands::frames::FramesArgs),
    /// Print the default client configuration as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Commands::Config(args) = &cli.command {
        return commands::config::run(args);
    }

    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    match &cli.command {
        Commands::Upload(args) => commands::upload::run(args, &config),
        Commands::Preview(args) => commands::preview::run(args, &config),
        Commands::Slit(args) => commands::slit::run(args, &config),
        Commands::Spectrum(args) => commands::spectrum::run(args, &config),
        Commands::Search(args) => commands::search::run(args, &config),
        Commands::Frames(args) => commands::frames::run(args, &config),
        Commands::Config(args) => commands::config::run(args),
    }
}
