mod app;
mod convert;
mod messages;
mod panels;
mod state;
mod workers;

use std::path::PathBuf;

use fitsview_core::config::AppConfig;

/// Environment variable naming an optional TOML config file.
const CONFIG_ENV: &str = "FITSVIEW_CONFIG";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = match AppConfig::load_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("ignoring config: {e}");
            AppConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("FitsView"),
        ..Default::default()
    };

    eframe::run_native(
        "FitsView",
        options,
        Box::new(move |cc| Ok(Box::new(app::FitsViewApp::new(&cc.egui_ctx, config)?))),
    )
}
