use anyhow::Context;

use raman_stacker::app::show_window;
use raman_stacker::config::RunConfig;
use raman_stacker::pipeline;
use raman_stacker::state::FigureState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Some(folder) = rfd::FileDialog::new()
        .set_title("Select folder containing spectra to be analysed")
        .pick_folder()
    else {
        log::warn!("No folder selected");
        return Ok(());
    };

    let config = RunConfig::for_folder(&folder).context("loading run settings")?;
    let summary = pipeline::run(&folder, &config)
        .with_context(|| format!("processing {}", folder.display()))?;

    for failure in &summary.report.failures {
        println!("Skipped {}: {}", failure.filename, failure.error);
    }
    println!(
        "{} spectra -> {} and {}",
        summary.report.table.len(),
        summary.outputs.csv.display(),
        summary.outputs.png.display()
    );

    if config.show_window {
        let state = FigureState::new(summary.title, summary.series, config.figure.clone())
            .with_saved([summary.outputs.csv, summary.outputs.png]);
        if let Err(e) = show_window(state) {
            log::error!("{e:#}");
        }
    }

    rprompt::prompt_reply("Press Enter to exit...").context("reading from terminal")?;
    Ok(())
}
