use anyhow::anyhow;
use eframe::egui;

use crate::state::FigureState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FigureApp {
    pub state: FigureState,
}

impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and saved files ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::stacked_plot(ui, &self.state);
        });
    }
}

/// Open the figure window and block until it is closed.
pub fn show_window(state: FigureState) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 900.0])
            .with_min_inner_size([300.0, 300.0]),
        ..Default::default()
    };
    let window_title = state.title.clone();

    eframe::run_native(
        &window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(FigureApp { state }))),
    )
    .map_err(|e| anyhow!("figure window failed: {e}"))
}
