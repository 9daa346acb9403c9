//! Dashboard state and top-level layout.

mod charts;
mod guide;
mod insights;
mod models;
mod predict;
mod sidebar;

use eframe::{App, Frame, egui};
use sowsmart_core::{
    AccuracyTable, AppConfig, CropCatalog, FeatureVector, InsightSession, ModelContext,
    PredictionResult,
};

use insights::ChartCache;

/// Tabs of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Panel {
    #[default]
    Predict,
    Insights,
    Models,
    Guide,
}

impl Panel {
    const ALL: [Panel; 4] = [Panel::Predict, Panel::Insights, Panel::Models, Panel::Guide];

    fn title(self) -> &'static str {
        match self {
            Panel::Predict => "🔮 Predict Crop",
            Panel::Insights => "📊 Data Insights",
            Panel::Models => "🧠 Model Selection",
            Panel::Guide => "📚 Crop Guide",
        }
    }
}

pub struct UiApp {
    config: AppConfig,
    models: ModelContext,
    config_warning: Option<String>,
    panel: Panel,
    status: String,

    input: FeatureVector,
    selected_model: Option<String>,
    last_prediction: Option<PredictionResult>,

    insights: InsightSession,
    dataset_name: Option<String>,
    histogram_column: Option<String>,
    boxplot_column: Option<String>,
    compare_column: Option<String>,
    charts: ChartCache,

    accuracy: AccuracyTable,
    catalog: CropCatalog,
    search: String,
}

impl UiApp {
    pub fn new(config: AppConfig, models: ModelContext, config_warning: Option<String>) -> Self {
        let selected_model = models
            .registry()
            .and_then(|r| r.names().next().map(str::to_string));
        let insights = InsightSession::new(config.insights.histogram_bins);
        Self {
            config,
            models,
            config_warning,
            panel: Panel::default(),
            status: String::new(),
            input: FeatureVector::default(),
            selected_model,
            last_prediction: None,
            insights,
            dataset_name: None,
            histogram_column: None,
            boxplot_column: None,
            compare_column: None,
            charts: ChartCache::default(),
            accuracy: AccuracyTable::benchmark(),
            catalog: CropCatalog::builtin(),
            search: String::new(),
        }
    }
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(230.0)
            .show(ctx, |ui| self.render_sidebar(ui));

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("🌾 Sow Smart - Crop Recommendation System");
            ui.horizontal(|ui| {
                for panel in Panel::ALL {
                    ui.selectable_value(&mut self.panel, panel, panel.title());
                }
            });
            if !self.status.is_empty() {
                ui.label(&self.status);
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.panel {
                    Panel::Predict => self.render_predict_panel(ui),
                    Panel::Insights => self.render_insights_panel(ui),
                    Panel::Models => self.render_models_panel(ui),
                    Panel::Guide => self.render_guide_panel(ui),
                });
        });
    }
}
