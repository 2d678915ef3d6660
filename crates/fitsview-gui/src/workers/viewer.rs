use std::path::Path;
use std::sync::mpsc;

use fitsview_core::mapping::PixelCoord;
use tracing::{debug, info, warn};

use crate::messages::WorkerResult;

use super::dispatch::{send_error, send_log, Session};

pub(super) fn handle_upload(
    path: &Path,
    session: &mut Session,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    info!("uploading {}", path.display());
    // Status and settled events already reach the UI through the observer.
    match session.upload(path) {
        Ok(slice) if slice.enabled => send_log(
            tx,
            ctx,
            format!("Uploaded {} ({} slices)", path.display(), slice.max + 1),
        ),
        Ok(_) => send_log(tx, ctx, format!("Uploaded {}", path.display())),
        Err(e) => send_log(tx, ctx, format!("Upload of {} failed: {e}", path.display())),
    }
}

pub(super) fn handle_open_existing(
    file_id: &str,
    session: &mut Session,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let report = session.open_existing(file_id);
    if report.preview.is_rendered() {
        send_log(tx, ctx, format!("Opened {file_id} from catalog"));
    } else {
        warn!(file_id, "catalog file did not render");
    }
}

pub(super) fn handle_set_slice(z: usize, session: &mut Session) {
    if session.set_slice(z).is_none() {
        debug!(z, "slice change ignored");
    }
}

pub(super) fn handle_set_correction(enabled: bool, session: &mut Session) {
    session.set_correction(enabled);
}

pub(super) fn handle_select_pixel(
    pixel: PixelCoord,
    session: &mut Session,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    if let Err(e) = session.select_pixel(pixel) {
        send_error(tx, ctx, e.user_message());
    }
}
