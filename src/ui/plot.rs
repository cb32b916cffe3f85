use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints};

use crate::state::FigureState;

// ---------------------------------------------------------------------------
// Stacked plot (central panel)
// ---------------------------------------------------------------------------

/// Render the stacked curves in the central panel.
pub fn stacked_plot(ui: &mut Ui, state: &FigureState) {
    if state.series.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No curves selected");
        });
        return;
    }

    let bounds = state.view_bounds();

    Plot::new("stacked_plot")
        .legend(Legend::default())
        .x_axis_label(state.style.x_label.as_str())
        .y_axis_label(state.style.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if let Some(((x0, x1), (y0, y1))) = bounds {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([x0, y0], [x1, y1]));
            }
            for (sp, &color) in state.series.iter().zip(&state.colors) {
                let points: PlotPoints = sp
                    .x
                    .iter()
                    .zip(sp.y.iter())
                    .map(|(&xi, &yi)| [xi, yi])
                    .collect();

                let line = Line::new(points)
                    .name(&sp.label)
                    .color(color)
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}
