//! Sidebar with the feature overview, model status and versions.

use super::{Panel, UiApp};
use eframe::egui;

const APP_VERSION: &str = env!("SOWSMART_VERSION");

impl UiApp {
    pub(super) fn render_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(8.0);
        ui.heading("🌱 Crop Assistant");
        ui.separator();

        ui.strong("Features");
        let features = [
            (Panel::Predict, "🔮 Smart Predictions", "crop recommendations"),
            (Panel::Insights, "📊 Data Insights", "visualize your data"),
            (Panel::Models, "🧠 Model Selection", "compare algorithms"),
            (Panel::Guide, "📚 Crop Guide", "growing information"),
        ];
        for (panel, title, blurb) in features {
            ui.horizontal(|ui| {
                if ui.link(title).clicked() {
                    self.panel = panel;
                }
                ui.label(format!("- {blurb}"));
            });
        }

        ui.add_space(8.0);
        ui.separator();
        ui.strong("About");
        ui.label(
            "This system analyzes soil nutrients, weather conditions and rainfall \
             to recommend a suitable crop.",
        );

        ui.add_space(8.0);
        ui.separator();
        ui.strong("Models");
        match self.models.registry() {
            Some(registry) => {
                ui.label(format!(
                    "{} models loaded from {}",
                    registry.len(),
                    self.config.models.dir.display()
                ));
                for name in registry.names() {
                    ui.label(format!("• {name}"));
                }
            }
            None => {
                ui.colored_label(ui.visuals().warn_fg_color, "⚠ Prediction unavailable");
            }
        }
        if let Some(warning) = &self.config_warning {
            ui.colored_label(ui.visuals().warn_fg_color, format!("Config: {warning}"));
        }

        ui.add_space(8.0);
        ui.separator();
        ui.label(format!("App version: {APP_VERSION}"));
    }
}
