use eframe::egui::{self, Ui};

use crate::state::FigureState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title / toolbar row above the plot.
pub fn top_bar(ui: &mut Ui, state: &mut FigureState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong(state.title.as_str());

        ui.separator();

        ui.label(format!("{} curves", state.series.len()));

        ui.separator();

        if ui
            .selectable_label(state.clamp_to_window, "Fixed axes")
            .on_hover_text("Use the figure's configured axis limits")
            .clicked()
        {
            state.clamp_to_window = !state.clamp_to_window;
        }
    });

    for path in &state.saved {
        ui.small(format!("Saved {}", path.display()));
    }
}
