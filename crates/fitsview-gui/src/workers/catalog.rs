use std::sync::mpsc;

use fitsview_core::api::{FitsBackend, HttpBackend};
use tracing::{debug, warn};

use crate::messages::WorkerResult;

use super::dispatch::{send, send_log};

pub(super) fn handle_search(
    query: &str,
    backend: &HttpBackend,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    debug!(query, "searching catalog");
    let result = backend.search(query);
    if let Err(e) = &result {
        warn!("search failed: {e}");
    }
    send(tx, ctx, WorkerResult::SearchComplete { result });
}

pub(super) fn handle_load_frames(
    file_id: &str,
    backend: &HttpBackend,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let result = backend
        .frames(file_id)
        .map(|response| response.items)
        .map_err(|e| e.user_message());
    send(
        tx,
        ctx,
        WorkerResult::FramesLoaded {
            file_id: file_id.to_string(),
            result,
        },
    );
}

pub(super) fn handle_load_frame_image(
    file_id: String,
    index: usize,
    url: &str,
    backend: &HttpBackend,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match backend.fetch_image(url) {
        Ok(image) => send(
            tx,
            ctx,
            WorkerResult::FrameImage {
                file_id,
                index,
                image,
            },
        ),
        Err(e) => send_log(tx, ctx, format!("Frame {index} of {file_id} failed: {e}")),
    }
}

pub(super) fn handle_load_thumbnail(
    file_id: String,
    url: &str,
    backend: &HttpBackend,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match backend.fetch_image(url) {
        Ok(image) => send(tx, ctx, WorkerResult::Thumbnail { file_id, image }),
        Err(e) => {
            debug!(file_id, "thumbnail unavailable: {e}");
            let message = e.user_message();
            send(tx, ctx, WorkerResult::ThumbnailFailed { file_id, message });
        }
    }
}
