use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fitsview_core::config::AppConfig;
use fitsview_core::status::StatusLevel;
use fitsview_core::viewer::{ViewerEvent, ViewerSession};

use crate::summary::{print_file_summary, FileSummary};

#[derive(Args)]
pub struct UploadArgs {
    /// FITS file to upload
    pub file: PathBuf,

    /// Save the returned preview as PNG
    #[arg(long)]
    pub save_preview: Option<PathBuf>,
}

pub fn run(args: &UploadArgs, config: &AppConfig) -> Result<()> {
    let backend = super::backend(config)?;
    let pb = super::spinner("Connecting")?;

    let observer = |event: ViewerEvent| {
        if let ViewerEvent::Status(status) = event {
            if status.level == StatusLevel::Warning {
                pb.set_message(status.text);
            }
        }
    };
    let mut session = ViewerSession::new(backend, observer, config.percent_clip);

    let result = session.upload(&args.file);
    pb.finish_and_clear();
    let slice = result.with_context(|| format!("Failed to upload {}", args.file.display()))?;

    let state = session.state();
    let file = state
        .file()
        .context("Upload finished without a current file")?;
    let header_summary = fitsview_core::viewer::summarize_header(&file.header);
    print_file_summary(&FileSummary {
        file_id: &file.file_id,
        filename: file.filename.as_deref(),
        shape: &file.shape,
        header_summary: &header_summary,
        slice,
    });

    if let Some(ref path) = args.save_preview {
        let preview = state
            .last_preview()
            .context("Upload returned no preview")?;
        preview
            .save_png(path)
            .with_context(|| format!("Failed to write preview to {}", path.display()))?;
        println!("Preview saved to {}", path.display());
    }

    Ok(())
}
