//! Recorded benchmark accuracy of the shipped models.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyEntry {
    pub model: String,
    /// Test-set accuracy in percent.
    pub accuracy: f64,
}

/// Model accuracies in a fixed display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyTable {
    entries: Vec<AccuracyEntry>,
}

impl AccuracyTable {
    pub fn new<S: Into<String>>(entries: impl IntoIterator<Item = (S, f64)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(model, accuracy)| AccuracyEntry {
                    model: model.into(),
                    accuracy,
                })
                .collect(),
        }
    }

    /// Figures measured when the shipped models were trained.
    pub fn benchmark() -> Self {
        Self::new([
            ("Random Forest", 99.3),
            ("Decision Tree", 98.4),
            ("KNN", 97.0),
        ])
    }

    pub fn entries(&self) -> &[AccuracyEntry] {
        &self.entries
    }
}

/// Entry with the strictly greatest accuracy; the earliest one wins ties.
pub fn best_model(table: &AccuracyTable) -> Option<(&str, f64)> {
    let mut best: Option<&AccuracyEntry> = None;
    for entry in &table.entries {
        if best.is_none_or(|b| entry.accuracy > b.accuracy) {
            best = Some(entry);
        }
    }
    best.map(|e| (e.model.as_str(), e.accuracy))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonBar {
    pub model: String,
    pub accuracy: f64,
    pub best: bool,
    /// Value printed above the bar, e.g. "99.3%".
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonChart {
    pub bars: Vec<ComparisonBar>,
    pub y_min: f64,
    pub y_max: f64,
}

/// Bar per model in table order with the best one flagged.
pub fn comparison_chart(table: &AccuracyTable) -> ComparisonChart {
    let best = best_model(table).map(|(name, _)| name);
    let bars = table
        .entries
        .iter()
        .map(|e| ComparisonBar {
            model: e.model.clone(),
            accuracy: e.accuracy,
            best: best == Some(e.model.as_str()),
            label: format!("{:.1}%", e.accuracy),
        })
        .collect();

    let lowest = table
        .entries
        .iter()
        .map(|e| e.accuracy)
        .fold(f64::INFINITY, f64::min);
    let mut y_min = 95.0;
    while lowest < y_min && y_min > 0.0 {
        y_min -= 5.0;
    }
    ComparisonChart {
        bars,
        y_min,
        y_max: 100.0,
    }
}

/// Short description of one algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelNotes {
    pub model: &'static str,
    pub title: &'static str,
    pub points: [&'static str; 4],
}

pub const MODEL_NOTES: [ModelNotes; 3] = [
    ModelNotes {
        model: "Random Forest",
        title: "Random Forest",
        points: [
            "Best overall accuracy",
            "Robust & stable",
            "Handles complex patterns",
            "Recommended for production",
        ],
    },
    ModelNotes {
        model: "Decision Tree",
        title: "Decision Tree",
        points: [
            "Highly interpretable",
            "Fast predictions",
            "May overfit",
            "Good for debugging",
        ],
    },
    ModelNotes {
        model: "KNN",
        title: "K-Nearest Neighbors",
        points: [
            "Instance-based learning",
            "Good for small datasets",
            "Slower predictions",
            "Sensitive to noise",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_forest_is_best_benchmark() {
        assert_eq!(
            best_model(&AccuracyTable::benchmark()),
            Some(("Random Forest", 99.3))
        );
    }

    #[test]
    fn ties_go_to_the_first_entry() {
        let table = AccuracyTable::new([("A", 90.0), ("B", 97.5), ("C", 97.5)]);
        assert_eq!(best_model(&table), Some(("B", 97.5)));
        assert_eq!(best_model(&AccuracyTable::new(Vec::<(&str, f64)>::new())), None);
    }

    #[test]
    fn chart_highlights_only_the_best() {
        let chart = comparison_chart(&AccuracyTable::benchmark());
        let flags: Vec<_> = chart.bars.iter().map(|b| (b.model.as_str(), b.best)).collect();
        assert_eq!(
            flags,
            [("Random Forest", true), ("Decision Tree", false), ("KNN", false)]
        );
        assert_eq!(chart.bars[1].label, "98.4%");
        assert_eq!(chart.bars[2].label, "97.0%");
        assert_eq!((chart.y_min, chart.y_max), (95.0, 100.0));
    }

    #[test]
    fn axis_widens_for_low_scores() {
        let chart = comparison_chart(&AccuracyTable::new([("A", 99.0), ("B", 86.2)]));
        assert_eq!(chart.y_min, 85.0);
    }

    #[test]
    fn every_benchmark_model_has_notes() {
        for entry in AccuracyTable::benchmark().entries() {
            assert!(MODEL_NOTES.iter().any(|n| n.model == entry.model));
        }
    }
}
