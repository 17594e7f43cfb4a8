use eframe::egui::{RichText, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::chart::{ScatterChart, DEFAULT_MARKER_RADIUS};
use crate::controller::{ChartSlot, SlotOutput};

// ---------------------------------------------------------------------------
// Scatter chart (one per slot)
// ---------------------------------------------------------------------------

/// Render a chart description with its title above the plot area.
pub fn scatter_plot(ui: &mut Ui, slot: ChartSlot, output: Option<&SlotOutput>) {
    let Some(output) = output else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No chart bound to this area.");
        });
        return;
    };
    let chart: &ScatterChart = &output.chart;

    ui.label(RichText::new(chart.title).strong());
    ui.label(format!(
        "{} points, coloured by {}{}",
        chart.point_count(),
        chart.color_by,
        chart
            .size_by
            .map(|col| format!(", sized by {col}"))
            .unwrap_or_default()
    ));

    let (x_label, y_label) = (chart.x_label, chart.y_label);

    Plot::new(slot.id())
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .label_formatter(move |name, value| {
            let head = if name.is_empty() {
                String::new()
            } else {
                format!("{name}\n")
            };
            format!("{head}{x_label} = {:.3}\n{y_label} = {:.3}", value.x, value.y)
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                if chart.size_by.is_none() {
                    let points: PlotPoints = series.points.iter().map(|p| [p.x, p.y]).collect();
                    plot_ui.points(
                        Points::new(points)
                            .name(&series.name)
                            .color(series.color)
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(DEFAULT_MARKER_RADIUS),
                    );
                    continue;
                }

                // Items sharing a name share a legend entry.
                for (radius, points) in series.by_radius() {
                    plot_ui.points(
                        Points::new(points)
                            .name(&series.name)
                            .color(series.color)
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(radius),
                    );
                }
            }
        });
}
