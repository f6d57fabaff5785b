mod app;
mod state;
mod ui;

use std::path::PathBuf;

use app::ExplorerApp;
use eframe::egui;
use element_explorer::config::ExplorerConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // A dataset path on the command line wins over config and environment.
    let config = ExplorerConfig::load().with_data_override(std::env::args_os().nth(1).map(PathBuf::from));
    log::info!("Dataset: {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Element Explorer – Periodic Table",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the element images.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(ExplorerApp::new(config)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}
