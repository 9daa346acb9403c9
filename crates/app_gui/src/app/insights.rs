//! Dataset upload, preview and the three dataset charts.

use super::UiApp;
use super::charts;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use rfd::FileDialog;
use sowsmart_core::{BoxPlot, Dataset, Histogram, InsightError, MeanComparison};
use std::path::Path;

/// Last computed chart per view, keyed by the selected column.
#[derive(Default)]
pub(super) struct ChartCache {
    histogram: Option<(String, Result<Histogram, InsightError>)>,
    boxplot: Option<(String, Result<BoxPlot, InsightError>)>,
    means: Option<(String, Result<MeanComparison, InsightError>)>,
}

impl ChartCache {
    fn clear(&mut self) {
        *self = Self::default();
    }
}

fn cached<'a, T>(
    slot: &'a mut Option<(String, Result<T, InsightError>)>,
    key: &str,
    compute: impl FnOnce() -> Result<T, InsightError>,
) -> &'a Result<T, InsightError> {
    if slot.as_ref().is_some_and(|(k, _)| k != key) {
        *slot = None;
    }
    let (_, value) = slot.get_or_insert_with(|| (key.to_string(), compute()));
    value
}

/// Keeps `selected` pointing at one of `options`, falling back to the first.
pub(super) fn ensure_selection(selected: &mut Option<String>, options: &[String]) {
    let valid = selected
        .as_ref()
        .is_some_and(|s| options.iter().any(|o| o == s));
    if !valid {
        *selected = options.first().cloned();
    }
}

fn column_picker(
    ui: &mut egui::Ui,
    id: &str,
    label: &str,
    selected: &mut Option<String>,
    options: &[String],
) {
    ensure_selection(selected, options);
    ui.horizontal(|ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(selected.clone().unwrap_or_default())
            .show_ui(ui, |ui| {
                for option in options {
                    ui.selectable_value(selected, Some(option.clone()), option);
                }
            });
    });
}

fn show_error(ui: &mut egui::Ui, err: &InsightError) {
    ui.colored_label(ui.visuals().warn_fg_color, format!("⚠ {err}"));
}

impl UiApp {
    pub(super) fn render_insights_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("📊 Dataset Analysis & Visualizations");
        ui.horizontal(|ui| {
            if ui.button("📁 Upload Your Crop Dataset (CSV)").clicked()
                && let Some(path) = FileDialog::new()
                    .add_filter("CSV", &["csv"])
                    .set_directory(".")
                    .pick_file()
            {
                self.load_dataset(&path);
            }
            if let Some(name) = self.dataset_name.clone() {
                ui.label(name);
                if ui.button("🗑 Clear dataset").clicked() {
                    self.clear_dataset();
                }
            }
        });

        let Some(dataset) = self.insights.dataset() else {
            ui.add_space(8.0);
            ui.label("👆 Upload a CSV dataset to explore visualizations and insights");
            return;
        };

        ui.add_space(8.0);
        ui.strong("📈 Dataset Preview");
        preview_table(ui, dataset, self.config.insights.preview_rows);

        let all_columns: Vec<String> = dataset.column_names().map(str::to_string).collect();
        let feature_columns: Vec<String> = dataset.feature_columns().map(str::to_string).collect();
        let has_label = dataset.has_label();

        ui.add_space(12.0);
        ui.columns(2, |cols| {
            cols[0].strong("📉 Feature Distribution");
            column_picker(
                &mut cols[0],
                "histogram-column",
                "Select Feature",
                &mut self.histogram_column,
                &all_columns,
            );
            if let Some(column) = self.histogram_column.clone() {
                let insights = &self.insights;
                match cached(&mut self.charts.histogram, &column, || {
                    insights.distribution(&column)
                }) {
                    Ok(hist) => charts::histogram(&mut cols[0], hist),
                    Err(e) => show_error(&mut cols[0], e),
                }
            }

            cols[1].strong("📦 Box Plot Analysis");
            if has_label {
                column_picker(
                    &mut cols[1],
                    "boxplot-column",
                    "Select Feature for Box Plot",
                    &mut self.boxplot_column,
                    &feature_columns,
                );
                if let Some(column) = self.boxplot_column.clone() {
                    let insights = &self.insights;
                    match cached(&mut self.charts.boxplot, &column, || {
                        insights.grouped_boxplot(&column)
                    }) {
                        Ok(plot) => charts::box_plot(&mut cols[1], plot),
                        Err(e) => show_error(&mut cols[1], e),
                    }
                }
            } else {
                show_error(&mut cols[1], &InsightError::MissingLabelColumn);
            }
        });

        if has_label {
            ui.add_space(12.0);
            ui.heading("🌾 Crop-Specific Comparison");
            column_picker(
                ui,
                "compare-column",
                "Select Feature for Comparison",
                &mut self.compare_column,
                &feature_columns,
            );
            if let Some(column) = self.compare_column.clone() {
                let insights = &self.insights;
                match cached(&mut self.charts.means, &column, || {
                    insights.grouped_mean_comparison(&column)
                }) {
                    Ok(means) => charts::horizontal_bars(ui, means),
                    Err(e) => show_error(ui, e),
                }
            }
        }
    }

    /// Replaces the current dataset only when the new file parses.
    fn load_dataset(&mut self, path: &Path) {
        match Dataset::from_path(path) {
            Ok(dataset) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                self.status = format!(
                    "Loaded {name}: {} rows, {} columns",
                    dataset.row_count(),
                    dataset.columns().len()
                );
                self.insights.upload(dataset);
                self.dataset_name = Some(name);
                self.reset_chart_views();
            }
            Err(e) => {
                tracing::warn!("failed to load {}: {e}", path.display());
                self.status = format!("Could not read {}: {e}", path.display());
            }
        }
    }

    fn clear_dataset(&mut self) {
        self.insights.clear();
        self.dataset_name = None;
        self.reset_chart_views();
        self.status = "Dataset cleared".to_string();
    }

    fn reset_chart_views(&mut self) {
        self.histogram_column = None;
        self.boxplot_column = None;
        self.compare_column = None;
        self.charts.clear();
    }
}

fn preview_table(ui: &mut egui::Ui, dataset: &Dataset, rows: usize) {
    let headers: Vec<&str> = dataset.column_names().collect();
    egui::ScrollArea::horizontal()
        .id_salt("preview-scroll")
        .show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .columns(Column::auto().at_least(60.0), headers.len())
                .header(20.0, |mut header| {
                    for name in &headers {
                        header.col(|ui| {
                            ui.strong(*name);
                        });
                    }
                })
                .body(|mut body| {
                    for row in dataset.head(rows) {
                        body.row(18.0, |mut table_row| {
                            for cell in row {
                                table_row.col(|ui| {
                                    ui.label(cell);
                                });
                            }
                        });
                    }
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sowsmart_core::{AppConfig, ModelContext, ModelLoadError};

    fn options() -> Vec<String> {
        vec!["N".into(), "P".into(), "K".into()]
    }

    #[rstest]
    #[case(None, Some("N"))]
    #[case(Some("K"), Some("K"))]
    #[case(Some("label"), Some("N"))]
    fn selection_falls_back_to_first_option(
        #[case] current: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let mut selected = current.map(str::to_string);
        ensure_selection(&mut selected, &options());
        assert_eq!(selected.as_deref(), expected);
    }

    #[test]
    fn empty_options_clear_selection() {
        let mut selected = Some("N".to_string());
        ensure_selection(&mut selected, &[]);
        assert_eq!(selected, None);
    }

    #[test]
    fn cache_recomputes_only_on_new_key() {
        let mut slot = None;
        let mut calls = 0;
        let _ = cached(&mut slot, "N", || {
            calls += 1;
            Ok(1)
        });
        let _ = cached(&mut slot, "N", || {
            calls += 1;
            Ok(2)
        });
        assert_eq!(calls, 1);
        let value = cached(&mut slot, "P", || Ok(3));
        assert_eq!(value, &Ok(3));
    }

    #[test]
    fn clearing_the_dataset_resets_every_view() {
        let mut app = UiApp::new(
            AppConfig::default(),
            ModelContext::unavailable(ModelLoadError::NoModels),
            None,
        );
        let dataset = Dataset::from_reader("N,label\n10,rice\n20,maize\n".as_bytes())
            .expect("dataset parses");
        app.insights.upload(dataset);
        app.dataset_name = Some("crops.csv".into());
        app.histogram_column = Some("N".into());
        app.compare_column = Some("N".into());
        let _ = cached(&mut app.charts.histogram, "N", || app.insights.distribution("N"));

        app.clear_dataset();

        assert!(app.insights.dataset().is_none());
        assert_eq!(app.dataset_name, None);
        assert_eq!(app.histogram_column, None);
        assert_eq!(app.compare_column, None);
        assert!(app.charts.histogram.is_none());
    }
}
