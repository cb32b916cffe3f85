//! Re-plot a series CSV written by `raman-stacker`: every row's scope over its
//! Raman shift, labelled by filename.

use anyhow::Context;

use raman_stacker::app::show_window;
use raman_stacker::data::export::read_series_csv;
use raman_stacker::processing::stack::overlay_series;
use raman_stacker::state::FigureState;
use raman_stacker::ui::figure::{save_png, FigureStyle};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Some(path) = rfd::FileDialog::new()
        .set_title("Select a CSV file")
        .add_filter("CSV files", &["csv"])
        .pick_file()
    else {
        log::warn!("No file selected");
        return Ok(());
    };

    let table = read_series_csv(&path).with_context(|| format!("reading {}", path.display()))?;
    log::info!("Loaded {} rows from {}", table.len(), path.display());

    let series = overlay_series(&table);
    let style = FigureStyle {
        width: 800,
        height: 600,
        x_range: None,
        y_min: None,
        title: Some("Scope vs Raman shift".to_string()),
        ..FigureStyle::default()
    };
    let title = style.title_for("");

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "series".to_string());
    let out = path.with_file_name(format!("{stem}-replot.png"));
    save_png(&series, &style, &title, &out)?;

    show_window(FigureState::new(title, series, style).with_saved([out]))
}
