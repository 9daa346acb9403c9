//! Input form and prediction result.

use super::UiApp;
use super::charts::{ACCENT, DARK_GREEN};
use eframe::egui;
use sowsmart_core::{FIELD_BOUNDS, InputSummary};

impl UiApp {
    pub(super) fn render_predict_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("🌱 Enter Soil & Climate Parameters");
        if let Some(err) = self.models.load_error() {
            ui.colored_label(
                ui.visuals().error_fg_color,
                format!("⚠ Error loading models: {err}"),
            );
        }
        ui.add_space(8.0);

        ui.columns(3, |cols| {
            cols[0].strong("🧪 Soil Nutrients");
            nutrient_input(&mut cols[0], "Nitrogen (N)", &mut self.input.nitrogen, 0);
            nutrient_input(&mut cols[0], "Phosphorus (P)", &mut self.input.phosphorus, 1);
            nutrient_input(&mut cols[0], "Potassium (K)", &mut self.input.potassium, 2);

            cols[1].strong("🌡 Climate Factors");
            reading_input(&mut cols[1], "Temperature (°C)", &mut self.input.temperature, 3);
            reading_input(&mut cols[1], "Humidity (%)", &mut self.input.humidity, 4);
            reading_input(&mut cols[1], "Rainfall (cm)", &mut self.input.rainfall, 6);

            cols[2].strong("⚗ Soil Properties");
            reading_input(&mut cols[2], "pH Value", &mut self.input.ph, 5);
            cols[2].add_space(8.0);
            cols[2].strong("🤖 Select Model");
            if let Some(registry) = self.models.registry() {
                let current = self.selected_model.clone().unwrap_or_default();
                egui::ComboBox::from_id_salt("model-select")
                    .selected_text(current)
                    .show_ui(&mut cols[2], |ui| {
                        for name in registry.names() {
                            ui.selectable_value(
                                &mut self.selected_model,
                                Some(name.to_string()),
                                name,
                            );
                        }
                    });
            } else {
                cols[2].label("No models available");
            }
        });

        ui.add_space(12.0);
        let can_predict = self.models.is_available() && self.selected_model.is_some();
        ui.vertical_centered(|ui| {
            let button =
                egui::Button::new(egui::RichText::new("🚀 PREDICT BEST CROP").size(18.0));
            if ui.add_enabled(can_predict, button).clicked() {
                self.run_prediction();
            }
        });

        if let Some(result) = &self.last_prediction {
            ui.add_space(12.0);
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!("🎯 {}", result.headline()))
                            .size(26.0)
                            .strong()
                            .color(DARK_GREEN),
                    );
                    ui.label(result.subtitle());
                });
            });

            ui.add_space(8.0);
            ui.heading("📋 Input Summary");
            render_summary(ui, &result.summary());

            if let Some(profile) = self.catalog.get(&result.crop) {
                ui.add_space(8.0);
                egui::CollapsingHeader::new(format!("{} Growing {}", profile.icon, profile.name))
                    .id_salt("predicted-crop-guide")
                    .default_open(true)
                    .show(ui, |ui| {
                        egui::Grid::new("predicted-crop-fields")
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

    fn run_prediction(&mut self) {
        match self
            .models
            .predict(&self.input, self.selected_model.as_deref())
        {
            Ok(result) => {
                self.status = format!("{} recommends {}", result.model_name, result.crop);
                self.last_prediction = Some(result);
            }
            Err(e) => {
                tracing::warn!("prediction failed: {e}");
                self.status = format!("Prediction failed: {e}");
                self.last_prediction = None;
            }
        }
    }
}

fn nutrient_input(ui: &mut egui::Ui, label: &str, value: &mut u32, field: usize) {
    let bounds = FIELD_BOUNDS[field];
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(
            egui::DragValue::new(value)
                .range(bounds.min as u32..=bounds.max as u32)
                .speed(1),
        );
    });
}

fn reading_input(ui: &mut egui::Ui, label: &str, value: &mut f64, field: usize) {
    let bounds = FIELD_BOUNDS[field];
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(
            egui::DragValue::new(value)
                .range(bounds.min..=bounds.max)
                .speed(0.1)
                .fixed_decimals(1),
        );
    });
}

fn render_summary(ui: &mut egui::Ui, summary: &InputSummary) {
    let metric = |ui: &mut egui::Ui, title: &str, value: &str| {
        ui.label(title);
        ui.label(egui::RichText::new(value).size(20.0).strong().color(ACCENT));
    };
    ui.columns(3, |cols| {
        metric(&mut cols[0], "🧪 N-P-K Ratio", &summary.npk);
        metric(&mut cols[0], "🌡 Temperature", &summary.temperature);
        metric(&mut cols[1], "💧 Humidity", &summary.humidity);
        metric(&mut cols[1], "⚗ pH Value", &summary.ph);
        metric(&mut cols[2], "🌧 Rainfall", &summary.rainfall);
        metric(&mut cols[2], "🤖 Model", &summary.model);
    });
}
