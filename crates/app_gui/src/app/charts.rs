//! Chart drawing on the egui painter.

use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, pos2, vec2,
};
use sowsmart_core::{BoxPlot, ComparisonChart, Histogram, MeanComparison};

pub(super) const GREEN: Color32 = Color32::from_rgb(0x52, 0xb7, 0x88);
pub(super) const DARK_GREEN: Color32 = Color32::from_rgb(0x2d, 0x6a, 0x4f);
pub(super) const ACCENT: Color32 = Color32::from_rgb(0xf4, 0xa2, 0x61);

const CHART_HEIGHT: f32 = 280.0;
const Y_TICKS: usize = 5;

/// Maps `value` from `[lo, hi]` onto `[start, end]`, clamped; a degenerate range maps to `start`.
pub(super) fn scale(value: f64, lo: f64, hi: f64, start: f32, end: f32) -> f32 {
    if hi <= lo {
        return start;
    }
    let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0) as f32;
    start + (end - start) * t
}

/// `count` evenly spaced values from `lo` to `hi` inclusive.
pub(super) fn ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![lo],
        n => (0..n)
            .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

struct Canvas {
    painter: egui::Painter,
    plot: Rect,
    text: Color32,
    grid: Color32,
}

impl Canvas {
    fn allocate(ui: &mut egui::Ui, height: f32, left_margin: f32) -> Self {
        let text = ui.visuals().text_color();
        let grid = ui.visuals().weak_text_color().gamma_multiply(0.4);
        let (response, painter) =
            ui.allocate_painter(vec2(ui.available_width(), height), Sense::hover());
        let r = response.rect;
        let plot = Rect::from_min_max(
            pos2(r.left() + left_margin, r.top() + 12.0),
            pos2(r.right() - 16.0, r.bottom() - 40.0),
        );
        Self {
            painter,
            plot,
            text,
            grid,
        }
    }

    fn label(&self, pos: Pos2, anchor: Align2, text: impl ToString, size: f32) {
        self.painter
            .text(pos, anchor, text, FontId::proportional(size), self.text);
    }

    fn y_of(&self, value: f64, lo: f64, hi: f64) -> f32 {
        scale(value, lo, hi, self.plot.bottom(), self.plot.top())
    }

    fn x_of(&self, value: f64, lo: f64, hi: f64) -> f32 {
        scale(value, lo, hi, self.plot.left(), self.plot.right())
    }

    /// Horizontal grid lines with value labels on the left axis.
    fn y_axis(&self, lo: f64, hi: f64, decimals: usize) {
        for tick in ticks(lo, hi, Y_TICKS) {
            let y = self.y_of(tick, lo, hi);
            self.painter.line_segment(
                [pos2(self.plot.left(), y), pos2(self.plot.right(), y)],
                Stroke::new(0.5, self.grid),
            );
            self.label(
                pos2(self.plot.left() - 6.0, y),
                Align2::RIGHT_CENTER,
                format!("{tick:.decimals$}"),
                11.0,
            );
        }
        self.axes();
    }

    fn axes(&self) {
        let stroke = Stroke::new(1.0, self.text);
        self.painter
            .line_segment([self.plot.left_bottom(), self.plot.right_bottom()], stroke);
        self.painter
            .line_segment([self.plot.left_top(), self.plot.left_bottom()], stroke);
    }

    fn bar(&self, rect: Rect, fill: Color32) {
        self.painter.rect_filled(rect, 2.0, fill);
        self.painter
            .rect_stroke(rect, 2.0, Stroke::new(1.2, DARK_GREEN), StrokeKind::Inside);
    }
}

fn title(ui: &mut egui::Ui, text: String) {
    ui.label(egui::RichText::new(text).strong().size(16.0).color(DARK_GREEN));
}

pub(super) fn histogram(ui: &mut egui::Ui, hist: &Histogram) {
    title(ui, format!("Distribution of {}", hist.column));
    let (Some(first), Some(last)) = (hist.bins.first(), hist.bins.last()) else {
        return;
    };
    let (lo, hi) = (first.lower, last.upper);
    let top = hist.max_count().max(1) as f64;

    let canvas = Canvas::allocate(ui, CHART_HEIGHT, 48.0);
    canvas.y_axis(0.0, top, 0);
    for bin in &hist.bins {
        if bin.count == 0 {
            continue;
        }
        let rect = Rect::from_min_max(
            pos2(canvas.x_of(bin.lower, lo, hi), canvas.y_of(bin.count as f64, 0.0, top)),
            pos2(canvas.x_of(bin.upper, lo, hi), canvas.plot.bottom()),
        );
        canvas.bar(rect, GREEN);
    }
    let below = canvas.plot.bottom() + 4.0;
    canvas.label(pos2(canvas.plot.left(), below), Align2::LEFT_TOP, format!("{lo:.2}"), 11.0);
    canvas.label(pos2(canvas.plot.right(), below), Align2::RIGHT_TOP, format!("{hi:.2}"), 11.0);
    canvas.label(
        pos2(canvas.plot.center().x, below + 16.0),
        Align2::CENTER_TOP,
        &hist.column,
        12.0,
    );
    canvas.label(
        pos2(canvas.plot.left(), canvas.plot.top() - 10.0),
        Align2::LEFT_BOTTOM,
        "Frequency",
        11.0,
    );
}

pub(super) fn box_plot(ui: &mut egui::Ui, plot: &BoxPlot) {
    title(ui, format!("{} by Crop Type", plot.column));
    if plot.groups.is_empty() {
        return;
    }
    let lo = plot
        .groups
        .iter()
        .map(|g| g.summary.min)
        .fold(f64::INFINITY, f64::min);
    let hi = plot
        .groups
        .iter()
        .map(|g| g.summary.max)
        .fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };

    let canvas = Canvas::allocate(ui, CHART_HEIGHT, 48.0);
    canvas.y_axis(lo, hi, 1);
    let slot = canvas.plot.width() / plot.groups.len() as f32;
    let half = (slot * 0.3).min(18.0);
    for (i, group) in plot.groups.iter().enumerate() {
        let s = &group.summary;
        let cx = canvas.plot.left() + slot * (i as f32 + 0.5);
        let y = |v: f64| canvas.y_of(v, lo, hi);
        let whisker = Stroke::new(1.0, DARK_GREEN);

        canvas
            .painter
            .line_segment([pos2(cx, y(s.max)), pos2(cx, y(s.q3))], whisker);
        canvas
            .painter
            .line_segment([pos2(cx, y(s.q1)), pos2(cx, y(s.min))], whisker);
        for cap in [s.min, s.max] {
            canvas.painter.line_segment(
                [pos2(cx - half / 2.0, y(cap)), pos2(cx + half / 2.0, y(cap))],
                whisker,
            );
        }
        let body = Rect::from_min_max(pos2(cx - half, y(s.q3)), pos2(cx + half, y(s.q1)));
        canvas.bar(body, GREEN.gamma_multiply(0.7));
        canvas.painter.line_segment(
            [pos2(cx - half, y(s.median)), pos2(cx + half, y(s.median))],
            Stroke::new(2.0, DARK_GREEN),
        );

        // stagger labels so neighbouring crop names do not overlap
        let offset = if i % 2 == 0 { 4.0 } else { 18.0 };
        canvas.label(
            pos2(cx, canvas.plot.bottom() + offset),
            Align2::CENTER_TOP,
            &group.label,
            10.0,
        );
    }
}

pub(super) fn horizontal_bars(ui: &mut egui::Ui, means: &MeanComparison) {
    title(ui, format!("Average {} Across Crops", means.column));
    if means.bars.is_empty() {
        return;
    }
    let lo = means.bars.iter().map(|b| b.mean).fold(0.0, f64::min);
    let hi = means.bars.iter().map(|b| b.mean).fold(0.0, f64::max);
    let (lo, hi) = if hi > lo { (lo, hi * 1.1) } else { (lo, lo + 1.0) };

    let row = 22.0;
    let height = means.bars.len() as f32 * row + 60.0;
    let canvas = Canvas::allocate(ui, height.max(160.0), 120.0);
    for tick in ticks(lo, hi, Y_TICKS) {
        let x = canvas.x_of(tick, lo, hi);
        canvas.painter.line_segment(
            [pos2(x, canvas.plot.top()), pos2(x, canvas.plot.bottom())],
            Stroke::new(0.5, canvas.grid),
        );
        canvas.label(
            pos2(x, canvas.plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            format!("{tick:.1}"),
            11.0,
        );
    }
    canvas.axes();

    let slot = canvas.plot.height() / means.bars.len() as f32;
    let zero = canvas.x_of(0.0, lo, hi);
    // ascending means, drawn bottom-up so the largest ends on top
    for (i, bar) in means.bars.iter().enumerate() {
        let cy = canvas.plot.bottom() - slot * (i as f32 + 0.5);
        let end = canvas.x_of(bar.mean, lo, hi);
        let rect = Rect::from_min_max(
            pos2(zero.min(end), cy - slot * 0.35),
            pos2(zero.max(end), cy + slot * 0.35),
        );
        canvas.bar(rect, GREEN);
        canvas.label(
            pos2(canvas.plot.left() - 6.0, cy),
            Align2::RIGHT_CENTER,
            &bar.label,
            11.0,
        );
        canvas.label(
            pos2(end + 4.0, cy),
            Align2::LEFT_CENTER,
            format!("{:.2}", bar.mean),
            10.0,
        );
    }
    canvas.label(
        pos2(canvas.plot.center().x, canvas.plot.bottom() + 20.0),
        Align2::CENTER_TOP,
        format!("Average {}", means.column),
        12.0,
    );
}

pub(super) fn accuracy_bars(ui: &mut egui::Ui, chart: &ComparisonChart) {
    title(ui, "Model Accuracy Comparison".to_string());
    if chart.bars.is_empty() {
        return;
    }
    let (lo, hi) = (chart.y_min, chart.y_max);
    let canvas = Canvas::allocate(ui, CHART_HEIGHT, 48.0);
    canvas.y_axis(lo, hi, 0);

    let slot = canvas.plot.width() / chart.bars.len() as f32;
    for (i, bar) in chart.bars.iter().enumerate() {
        let cx = canvas.plot.left() + slot * (i as f32 + 0.5);
        let top = canvas.y_of(bar.accuracy, lo, hi);
        let rect = Rect::from_min_max(
            pos2(cx - slot * 0.3, top),
            pos2(cx + slot * 0.3, canvas.plot.bottom()),
        );
        canvas.bar(rect, if bar.best { ACCENT } else { GREEN });
        canvas.label(pos2(cx, top - 2.0), Align2::CENTER_BOTTOM, &bar.label, 13.0);
        canvas.label(
            pos2(cx, canvas.plot.bottom() + 6.0),
            Align2::CENTER_TOP,
            &bar.model,
            12.0,
        );
    }
    canvas.label(
        pos2(canvas.plot.left(), canvas.plot.top() - 10.0),
        Align2::LEFT_BOTTOM,
        "Accuracy (%)",
        11.0,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(50.0, 100.0)]
    #[case(100.0, 200.0)]
    #[case(150.0, 200.0)]
    #[case(-5.0, 0.0)]
    fn scale_maps_and_clamps(#[case] value: f64, #[case] expected: f32) {
        assert_eq!(scale(value, 0.0, 100.0, 0.0, 200.0), expected);
    }

    #[test]
    fn scale_inverts_for_screen_y() {
        // bottom = 300, top = 100
        assert!((scale(99.3, 95.0, 100.0, 300.0, 100.0) - 128.0).abs() < 1e-3);
        assert_eq!(scale(1.0, 1.0, 1.0, 300.0, 100.0), 300.0);
    }

    #[test]
    fn ticks_are_inclusive() {
        assert_eq!(ticks(95.0, 100.0, 6), [95.0, 96.0, 97.0, 98.0, 99.0, 100.0]);
        assert_eq!(ticks(0.0, 10.0, 1), [0.0]);
        assert!(ticks(0.0, 10.0, 0).is_empty());
    }
}
