mod app;

use anyhow::anyhow;
use app::UiApp;
use eframe::{NativeOptions, egui};
use sowsmart_core::{AppConfig, ModelContext};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let (config, config_warning) = match AppConfig::discover() {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            tracing::warn!("{e}; using default configuration");
            (AppConfig::default(), Some(e.to_string()))
        }
    };
    // Loaded once; every view borrows it read-only.
    let models = ModelContext::initialize(&config.models);

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sow Smart - Crop Recommendation")
            .with_inner_size([1200.0, 820.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sow Smart - Crop Recommendation",
        options,
        Box::new(move |_cc| {
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(Box::new(UiApp::new(
                config,
                models,
                config_warning,
            )))
        }),
    )
    .map_err(|e| anyhow!("dashboard stopped with an error: {e}"))
}
