//! Accuracy comparison and algorithm notes.

use super::UiApp;
use super::charts::{self, ACCENT, DARK_GREEN};
use eframe::egui;
use sowsmart_core::{MODEL_NOTES, best_model, comparison_chart};

impl UiApp {
    pub(super) fn render_models_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("🧠 Model Performance Comparison");
        if !self.models.is_available() {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                "⚠ Models are not loaded. Comparison data may not be available.",
            );
            return;
        }
        ui.add_space(8.0);

        ui.columns(2, |cols| {
            charts::accuracy_bars(&mut cols[0], &comparison_chart(&self.accuracy));

            let ui = &mut cols[1];
            if let Some((name, accuracy)) = best_model(&self.accuracy) {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.label("🏆 Best Model");
                    ui.label(egui::RichText::new(name).size(22.0).strong().color(DARK_GREEN));
                    ui.label(
                        egui::RichText::new(format!("{accuracy:.1}% Accuracy"))
                            .size(18.0)
                            .color(ACCENT),
                    );
                });
            }
            ui.add_space(8.0);
            ui.strong("📊 All Models");
            egui::Grid::new("model-accuracy")
                .striped(true)
                .num_columns(2)
                .show(ui, |ui| {
                    for entry in self.accuracy.entries() {
                        ui.label(&entry.model);
                        ui.label(format!("{:.1}%", entry.accuracy));
                        ui.end_row();
                    }
                });
        });

        ui.add_space(12.0);
        ui.heading("📖 Model Characteristics");
        ui.columns(MODEL_NOTES.len(), |cols| {
            for (col, notes) in cols.iter_mut().zip(MODEL_NOTES.iter()) {
                egui::Frame::group(col.style()).show(col, |ui| {
                    ui.strong(notes.title);
                    for point in notes.points {
                        ui.label(format!("• {point}"));
                    }
                });
            }
        });
    }
}
