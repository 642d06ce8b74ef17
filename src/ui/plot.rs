use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::ColorMap;
use crate::data::view::{ChartSpec, X_AXIS_TITLE, Y_AXIS_TITLE};

// ---------------------------------------------------------------------------
// Grouped bar chart (central panel)
// ---------------------------------------------------------------------------

/// Share of one category slot taken up by its group of bars.
const GROUP_WIDTH: f64 = 0.8;

/// Centre and width of the bar for `series` within `category`.
/// Categories sit on integer x positions.
pub fn bar_slot(category: usize, series: usize, series_count: usize) -> (f64, f64) {
    let width = GROUP_WIDTH / series_count.max(1) as f64;
    let x = category as f64 - GROUP_WIDTH / 2.0 + width * (series as f64 + 0.5);
    (x, width)
}

/// Render the score chart for the current selection.
pub fn score_chart(ui: &mut Ui, chart: &ChartSpec, colors: &ColorMap) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(&chart.title).strong());
    });
    ui.add_space(4.0);

    if chart.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No exam results for this subject.");
        });
        return;
    }

    let categories = chart.categories.clone();
    let series_count = chart.series.len();

    Plot::new("score_chart")
        .legend(Legend::default())
        .x_axis_label(X_AXIS_TITLE)
        .y_axis_label(Y_AXIS_TITLE)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            categories.get(idx as usize).cloned().unwrap_or_default()
        })
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (series_idx, series) in chart.series.iter().enumerate() {
                let color = colors.color_for(&series.student);
                let bars: Vec<Bar> = series
                    .points
                    .iter()
                    .filter_map(|point| {
                        let category = chart.category_index(&point.semester)?;
                        let (x, width) = bar_slot(category, series_idx, series_count);
                        Some(
                            Bar::new(x, point.score)
                                .width(width)
                                .name(format!("{} – {}", series.student, point.semester)),
                        )
                    })
                    .collect();

                plot_ui.bar_chart(BarChart::new(bars).name(&series.student).color(color));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_series_is_centred_on_category() {
        let (x, width) = bar_slot(2, 0, 1);
        assert!((x - 2.0).abs() < 1e-9);
        assert!((width - GROUP_WIDTH).abs() < 1e-9);
    }

    #[test]
    fn bars_in_a_group_do_not_overlap() {
        let (a, wa) = bar_slot(0, 0, 2);
        let (b, wb) = bar_slot(0, 1, 2);
        assert!(a < b);
        assert!((b - a - (wa + wb) / 2.0).abs() < 1e-9);
        assert!(a - wa / 2.0 >= -GROUP_WIDTH / 2.0 - 1e-9);
        assert!(b + wb / 2.0 <= GROUP_WIDTH / 2.0 + 1e-9);
    }
}
