use std::io;
use std::sync::mpsc;

use fitsview_core::api::HttpBackend;
use fitsview_core::config::AppConfig;
use fitsview_core::viewer::{ViewerEvent, ViewerObserver, ViewerSession};
use tracing::{error, info};

use crate::messages::{WorkerCommand, WorkerResult};

use super::{catalog, viewer};

pub(crate) type Session = ViewerSession<HttpBackend, ChannelObserver>;

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    config: AppConfig,
) -> io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("fitsview-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx, config);
        })?;

    Ok(cmd_tx)
}

/// Forwards viewer notifications to the UI thread.
pub(crate) struct ChannelObserver {
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
}

impl ViewerObserver for ChannelObserver {
    fn on_event(&self, event: ViewerEvent) {
        send(&self.tx, &self.ctx, WorkerResult::Viewer(event));
    }
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_log(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Log {
            message: msg.into(),
        },
    );
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

fn new_session(
    config: AppConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) -> Option<Session> {
    let percent_clip = config.percent_clip;
    match HttpBackend::new(config) {
        Ok(backend) => {
            let observer = ChannelObserver {
                tx: tx.clone(),
                ctx: ctx.clone(),
            };
            Some(ViewerSession::new(backend, observer, percent_clip))
        }
        Err(e) => {
            error!("backend setup failed: {e}");
            send_error(tx, ctx, format!("Backend setup failed: {}", e.user_message()));
            None
        }
    }
}

/// Commands are handled strictly in arrival order, so a response can never be
/// overtaken by the response to an older request.
fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    config: AppConfig,
) {
    let mut session = new_session(config, &tx, &ctx);

    while let Ok(cmd) = cmd_rx.recv() {
        if let WorkerCommand::Reconfigure { config } = cmd {
            info!(server = %config.server_url, "reconfiguring backend");
            session = new_session(config, &tx, &ctx);
            if session.is_some() {
                send_log(&tx, &ctx, "Backend configuration updated");
            }
            continue;
        }

        let Some(session) = session.as_mut() else {
            send_error(&tx, &ctx, "No backend available; import a valid configuration");
            continue;
        };

        match cmd {
            WorkerCommand::Upload { path } => {
                viewer::handle_upload(&path, session, &tx, &ctx);
            }
            WorkerCommand::OpenExisting { file_id } => {
                viewer::handle_open_existing(&file_id, session, &tx, &ctx);
            }
            WorkerCommand::SetSlice { z } => {
                viewer::handle_set_slice(z, session);
            }
            WorkerCommand::SetCorrection { enabled } => {
                viewer::handle_set_correction(enabled, session);
            }
            WorkerCommand::SelectPixel { pixel } => {
                viewer::handle_select_pixel(pixel, session, &tx, &ctx);
            }
            WorkerCommand::Search { query } => {
                catalog::handle_search(&query, session.backend(), &tx, &ctx);
            }
            WorkerCommand::LoadFrames { file_id } => {
                catalog::handle_load_frames(&file_id, session.backend(), &tx, &ctx);
            }
            WorkerCommand::LoadFrameImage {
                file_id,
                index,
                url,
            } => {
                catalog::handle_load_frame_image(file_id, index, &url, session.backend(), &tx, &ctx);
            }
            WorkerCommand::LoadThumbnail { file_id, url } => {
                catalog::handle_load_thumbnail(file_id, &url, session.backend(), &tx, &ctx);
            }
            WorkerCommand::Reconfigure { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    fn counting_context() -> (egui::Context, Arc<AtomicUsize>) {
        let ctx = egui::Context::default();
        let repaints = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&repaints);
        ctx.set_request_repaint_callback(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (ctx, repaints)
    }

    #[test]
    fn send_delivers_and_requests_repaint() {
        let (ctx, repaints) = counting_context();
        let (tx, rx) = mpsc::channel();

        send(&tx, &ctx, WorkerResult::Log { message: "Config exported".into() });

        assert!(matches!(rx.try_recv(), Ok(WorkerResult::Log { message }) if message == "Config exported"));
        assert!(repaints.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn unreachable_thumbnail_is_reported() {
        let (ctx, _) = counting_context();
        let (tx, rx) = mpsc::channel();
        let config = AppConfig {
            server_url: "http://127.0.0.1:9".into(),
            request_timeout_secs: 2,
            ..AppConfig::default()
        };
        let cmd_tx = spawn_worker(tx, ctx, config).unwrap();

        cmd_tx
            .send(WorkerCommand::LoadThumbnail {
                file_id: "f1".into(),
                url: "/thumbs/f1.png".into(),
            })
            .unwrap();

        let failed = loop {
            match rx.recv_timeout(Duration::from_secs(30)).unwrap() {
                WorkerResult::ThumbnailFailed { file_id, .. } => break file_id,
                WorkerResult::Thumbnail { .. } => panic!("thumbnail unexpectedly loaded"),
                _ => continue,
            }
        };
        assert_eq!(failed, "f1");
    }
}
