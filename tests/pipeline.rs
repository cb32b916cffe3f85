use std::path::{Path, PathBuf};

use raman_stacker::config::RunConfig;
use raman_stacker::data::export::read_series_csv;
use raman_stacker::data::raw8::{pack_date, Raw8File, Raw8Header};
use raman_stacker::error::RamanError;
use raman_stacker::pipeline;
use raman_stacker::processing::stack::{RowSelector, StackConfig};
use raman_stacker::ui::figure::FigureStyle;

fn write_spectrum(dir: &Path, name: &str, scale: f64) {
    let wavelengths: Vec<f64> = (0..64).map(|i| 830.0 + i as f64 * 0.5).collect();
    let scope = wavelengths
        .iter()
        .map(|&w| {
            let shift = (1.0 / 785.0 - 1.0 / w) * 1e7;
            scale * (100.0 + 900.0 * (-(shift - 931.0).powi(2) / 50.0).exp())
        })
        .collect();
    let path = dir.join(name);
    Raw8File {
        path: path.clone(),
        header: Raw8Header {
            start_pixel: 0,
            stop_pixel: 63,
            laser_wavelength_nm: 785.0,
            packed_date: pack_date(2024, 2, 20, 16, 0),
            ..Default::default()
        },
        wavelengths,
        scope,
        dark: None,
        reference: None,
    }
    .write(&path)
    .unwrap();
}

// headless test machines have no fonts for plotters' text rendering
fn config() -> RunConfig {
    RunConfig {
        stack: StackConfig {
            selector: RowSelector {
                start_index: 0,
                stride: 1,
            },
            ..StackConfig::default()
        },
        figure: FigureStyle {
            width: 200,
            height: 300,
            annotate: false,
            ..FigureStyle::default()
        },
        show_window: false,
        ..RunConfig::default()
    }
}

fn run_folder(root: &Path) -> PathBuf {
    let folder = root.join("run01");
    std::fs::create_dir(&folder).unwrap();
    folder
}

#[test]
fn two_good_files_and_one_malformed() {
    let root = tempfile::tempdir().unwrap();
    let folder = run_folder(root.path());
    write_spectrum(&folder, "a.raw8", 1.0);
    std::fs::write(folder.join("b.raw8"), b"not a spectrum").unwrap();
    write_spectrum(&folder, "c.RAW8", 2.0);
    std::fs::write(folder.join("notes.txt"), b"ignored").unwrap();

    testing_logger::setup();
    let summary = pipeline::run(&folder, &config()).unwrap();
    testing_logger::validate(|captured_logs| {
        let errors: Vec<_> = captured_logs
            .iter()
            .filter(|l| l.level == log::Level::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].body.starts_with("Error processing file b.raw8: "));
    });

    assert_eq!(summary.report.failures.len(), 1);
    let failure = &summary.report.failures[0];
    assert_eq!(failure.filename, "b.raw8");
    assert!(failure.error.to_string().contains("b.raw8"));

    assert_eq!(summary.outputs.csv, root.path().join("run01.csv"));
    assert_eq!(summary.outputs.png, root.path().join("run01.png"));
    assert!(summary.outputs.png.is_file());

    let table = read_series_csv(&summary.outputs.csv).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.records()[1].filename(), "c.RAW8");
    assert_eq!(table.time(), &[0.0, 15.0]);

    // both curves peak at the reference band, stacked 0.45 apart
    let r = summary.reference.get();
    assert_eq!(summary.series.len(), 2);
    assert!((summary.series[0].y[r] - 1.0).abs() < 1e-12);
    assert!((summary.series[1].y[r] - 1.45).abs() < 1e-12);
    assert!((summary.series[1].x[r] - 931.0).abs() < 10.0);
}

#[test]
fn folder_without_valid_spectra_fails_loudly() {
    let root = tempfile::tempdir().unwrap();
    let folder = run_folder(root.path());
    std::fs::write(folder.join("a.raw8"), b"junk").unwrap();

    let err = pipeline::run(&folder, &config()).unwrap_err();
    assert!(matches!(err, RamanError::NoSpectra(_)));
    assert!(!root.path().join("run01.csv").exists());
    assert!(!root.path().join("run01.png").exists());
}

#[test]
fn stacking_misconfiguration_is_fatal() {
    let root = tempfile::tempdir().unwrap();
    let folder = run_folder(root.path());
    write_spectrum(&folder, "a.raw8", 1.0);

    let mut cfg = config();
    cfg.stack.legend_labels = Some(vec!["0 V".into(), "1 V".into()]);
    let err = pipeline::run(&folder, &cfg).unwrap_err();
    assert!(matches!(err, RamanError::InvalidConfig(_)));
    // the table is still saved, only the figure is missing
    assert_eq!(read_series_csv(&root.path().join("run01.csv")).unwrap().len(), 1);
    assert!(!root.path().join("run01.png").exists());
}

#[test]
fn default_selection_on_short_run_keeps_csv() {
    let root = tempfile::tempdir().unwrap();
    let folder = run_folder(root.path());
    write_spectrum(&folder, "a.raw8", 1.0);
    std::fs::write(folder.join("b.raw8"), b"not a spectrum").unwrap();
    write_spectrum(&folder, "c.raw8", 2.0);

    let cfg = RunConfig {
        stack: StackConfig::default(),
        ..config()
    };
    // start index 4 selects nothing out of two rows
    let err = pipeline::run(&folder, &cfg).unwrap_err();
    assert!(matches!(err, RamanError::InvalidConfig(_)));

    let table = read_series_csv(&root.path().join("run01.csv")).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.records()[1].filename(), "c.raw8");
    assert!(!root.path().join("run01.png").exists());
}

#[test]
fn rerun_overwrites_outputs() {
    let root = tempfile::tempdir().unwrap();
    let folder = run_folder(root.path());
    write_spectrum(&folder, "a.raw8", 1.0);

    pipeline::run(&folder, &config()).unwrap();
    write_spectrum(&folder, "b.raw8", 3.0);
    let summary = pipeline::run(&folder, &config()).unwrap();
    assert_eq!(read_series_csv(&summary.outputs.csv).unwrap().len(), 2);
}
