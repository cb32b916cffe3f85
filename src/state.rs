use std::path::PathBuf;

use eframe::egui::Color32;

use crate::color::generate_palette;
use crate::processing::stack::PlotSeries;
use crate::ui::figure::FigureStyle;

// ---------------------------------------------------------------------------
// Figure window state
// ---------------------------------------------------------------------------

/// What the figure window shows, independent of rendering.
pub struct FigureState {
    pub title: String,
    pub series: Vec<PlotSeries>,
    /// One colour per series, matching the saved PNG.
    pub colors: Vec<Color32>,
    pub style: FigureStyle,
    /// Files written by the run, listed in the top bar.
    pub saved: Vec<PathBuf>,
    /// Show the configured axis window instead of fitting all data.
    pub clamp_to_window: bool,
}

impl FigureState {
    pub fn new(title: String, series: Vec<PlotSeries>, style: FigureStyle) -> Self {
        let colors = generate_palette(series.len())
            .into_iter()
            .map(|[r, g, b]| Color32::from_rgb(r, g, b))
            .collect();
        Self {
            title,
            series,
            colors,
            style,
            saved: Vec::new(),
            clamp_to_window: true,
        }
    }

    pub fn with_saved(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.saved.extend(paths);
        self
    }

    /// Axis extents to apply, if the view is clamped.
    pub fn view_bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        self.clamp_to_window
            .then(|| self.style.bounds(&self.series))
    }
}
