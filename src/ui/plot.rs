use eframe::egui::{Align2, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

use crate::charts::ChartView;
use crate::color::BarColors;

/// Axes with more categories than this get sparse tick labels
/// and no per-bar value labels. Covers the 66-bucket partial session.
const MAX_LABELED_BARS: usize = 72;

/// Every `n`-th tick is labelled on a dense axis.
const DENSE_TICK_STRIDE: usize = 6;

fn is_dense(categories: usize) -> bool {
    categories > MAX_LABELED_BARS
}

fn tick_stride(categories: usize) -> usize {
    if is_dense(categories) {
        DENSE_TICK_STRIDE
    } else {
        1
    }
}

// ---------------------------------------------------------------------------
// Distribution bar chart
// ---------------------------------------------------------------------------

/// Render one percentage bar chart with value labels above each bar.
pub fn distribution_chart(ui: &mut Ui, view: &ChartView, height: f32) {
    ui.strong(&view.spec.title);

    let dist = &view.distribution;
    if dist.is_empty() {
        ui.label("No observations");
        return;
    }

    let colors = BarColors::for_order(&view.spec.order);
    let categories: Vec<String> = dist.entries.iter().map(|e| e.category.clone()).collect();
    let n = categories.len();
    let dense = is_dense(n);
    let top = dist.max_percentage().max(1.0) * 1.2;

    let bars: Vec<Bar> = dist
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            Bar::new(i as f64, e.percentage)
                .name(&e.category)
                .fill(colors.color_for(&e.category))
                .width(0.8)
        })
        .collect();

    let stride = tick_stride(n);

    Plot::new(("distribution", view.spec.column.as_str()))
        .height(height)
        .show_axes([true, false])
        .show_grid([false, false])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-0.6)
        .include_x(n as f64 - 0.4)
        .include_y(0.0)
        .include_y(top)
        .x_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if v < 0.0 || (v - v.round()).abs() > 1e-6 {
                return String::new();
            }
            let idx = v.round() as usize;
            if idx % stride != 0 {
                return String::new();
            }
            categories.get(idx).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));

            if dense {
                return;
            }
            for (i, e) in dist.entries.iter().enumerate() {
                let anchor = PlotPoint::new(i as f64, e.percentage + top * 0.02);
                plot_ui.text(Text::new(anchor, e.label.clone()).anchor(Align2::CENTER_BOTTOM));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::buckets::{full_session_window, partial_session_window};

    #[test]
    fn partial_session_keeps_every_label() {
        let n = partial_session_window().labels().len();
        assert_eq!(n, 66);
        assert!(!is_dense(n));
        assert_eq!(tick_stride(n), 1);
    }

    #[test]
    fn full_session_is_thinned() {
        let n = full_session_window().labels().len();
        assert!(is_dense(n));
        assert_eq!(tick_stride(n), DENSE_TICK_STRIDE);
    }
}
