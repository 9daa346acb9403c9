//! Searchable crop growing guide.

use super::UiApp;
use eframe::egui;

impl UiApp {
    pub(super) fn render_guide_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("📚 Crop Growing Guide");
        ui.horizontal(|ui| {
            ui.label("🔍 Search for a crop");
            ui.add(
                egui::TextEdit::singleline(&mut self.search).hint_text("Type crop name..."),
            );
        });
        ui.add_space(8.0);

        let results = self.catalog.search(&self.search);
        if results.is_empty() {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                "No crops found matching your search",
            );
            return;
        }
        for profile in results {
            egui::CollapsingHeader::new(format!("{} {}", profile.icon, profile.name))
                .id_salt(profile.name)
                .show(ui, |ui| {
                    egui::Grid::new(("crop-fields", profile.name))
                        .num_columns(2)
                        .spacing([16.0, 4.0])
                        .show(ui, |ui| {
                            for (label, value) in profile.fields() {
                                ui.strong(label);
                                ui.label(value);
                                ui.end_row();
                            }
                        });
                });
        }
    }
}
