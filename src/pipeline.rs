use std::path::Path;

use crate::config::RunConfig;
use crate::data::aggregate::{aggregate, BatchReport};
use crate::data::enumerate::list_spectrum_files;
use crate::data::export::{write_series_csv, OutputPaths};
use crate::data::loader::load_all;
use crate::error::{RamanError, Result};
use crate::processing::peak::{nearest_index, ReferenceIndex};
use crate::processing::stack::{stack_series, PlotSeries};
use crate::ui::figure::save_png;

/// Everything one run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub report: BatchReport,
    pub reference: ReferenceIndex,
    pub series: Vec<PlotSeries>,
    pub title: String,
    pub outputs: OutputPaths,
}

/// Process every spectrum file in `folder` and write `{folder}.csv` and
/// `{folder}.png` next to it.
///
/// Unreadable files are skipped and listed in the report. A folder that
/// yields no rows fails the run before anything is written. A stacking
/// configuration that does not fit the rows fails it after the CSV is
/// written, so no figure is produced.
pub fn run(folder: &Path, config: &RunConfig) -> Result<RunSummary> {
    config.validate()?;
    let outputs = OutputPaths::for_folder(folder)?;

    let files = list_spectrum_files(folder, &config.extension)?;
    log::info!(
        "Processing {} .{} files in {}",
        files.len(),
        config.extension,
        folder.display()
    );

    let options = config.load_options();
    let report = aggregate(load_all(&files, &options), &config.time_axis)?;
    let Some(first) = report.table.records().first() else {
        return Err(RamanError::NoSpectra(folder.to_path_buf()));
    };

    let reference = nearest_index(first.raman_shift(), config.stack.reference_shift)?;
    log::info!(
        "Reference peak at index {} ({:.1} 1/cm, target {})",
        reference.get(),
        first.raman_shift()[reference.get()],
        config.stack.reference_shift
    );
    let title = config.figure.title_for(first.filename());

    // the table does not depend on the stacking settings
    write_series_csv(&report.table, &outputs.csv)?;
    let series = stack_series(&report.table, reference, &config.stack)?;
    save_png(&series, &config.figure, &title, &outputs.png)?;

    log::info!(
        "{} of {} files processed, {} curves stacked",
        report.table.len(),
        report.attempted(),
        series.len()
    );

    Ok(RunSummary {
        report,
        reference,
        series,
        title,
        outputs,
    })
}
