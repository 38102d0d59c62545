mod app;
mod io;
mod model;

use app::{configure_fonts, DesktopApp};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let api = io::load_api_config().unwrap_or_else(|err| {
        tracing::warn!("config load failed, using defaults: {err:#}");
        safe_street_common::ApiConfig::default()
    });

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Safe Street",
        options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            Box::new(DesktopApp::new(api))
        }),
    )
}
