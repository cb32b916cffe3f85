use std::path::{Path, PathBuf};

use super::aggregate::{FileError, FileOutcome};
use super::model::SpectrumRecord;
use super::raw8::Raw8File;
use crate::error::{RamanError, Result};
use crate::processing::shift::raman_shift;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Per-file processing choices shared by the whole batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    /// Excitation wavelength in nm. `None` reads it from each file's header.
    pub laser_wavelength_nm: Option<f64>,
    /// Use `scope - dark` instead of the raw scope when the file has a dark
    /// reading.
    pub subtract_dark: bool,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load one instrument file into a [`SpectrumRecord`]. Dispatch by extension.
pub fn load_record(path: &Path, options: &LoadOptions) -> Result<SpectrumRecord> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "raw8" => load_raw8(path, options),
        other => Err(RamanError::FileFormat {
            path: path.to_path_buf(),
            reason: format!("unsupported file extension: .{other}"),
        }),
    }
}

/// Lazily load `paths` in order, one outcome per file.
pub fn load_all<'a>(
    paths: &'a [PathBuf],
    options: &'a LoadOptions,
) -> impl Iterator<Item = FileOutcome> + 'a {
    paths.iter().map(move |path| {
        load_record(path, options).map_err(|error| FileError {
            filename: file_name(path),
            error,
        })
    })
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// RAW8
// ---------------------------------------------------------------------------

fn load_raw8(path: &Path, options: &LoadOptions) -> Result<SpectrumRecord> {
    let file = Raw8File::open(path)?;
    let filename = file_name(path);

    let laser = match options.laser_wavelength_nm {
        Some(nm) => nm,
        None => f64::from(file.header.laser_wavelength_nm),
    };

    let intensity = match (&file.dark, options.subtract_dark) {
        (Some(dark), true) => file.scope.iter().zip(dark).map(|(s, d)| s - d).collect(),
        (None, true) => {
            log::warn!("{filename}: no dark reading, using raw scope");
            file.scope
        }
        (_, false) => file.scope,
    };

    if let Some(i) = intensity.iter().position(|v| !v.is_finite()) {
        return Err(RamanError::InvalidSpectrum(format!(
            "{filename}: intensity[{i}] is not finite"
        )));
    }

    let shift = raman_shift(&file.wavelengths, laser)
        .map_err(|e| RamanError::InvalidSpectrum(format!("{filename}: {e}")))?;
    let acquired_at = file.header.acquired_at();

    SpectrumRecord::new(filename, file.wavelengths, intensity, shift, acquired_at)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::raw8::{pack_date, Raw8Header};
    use approx::assert_abs_diff_eq;

    fn write_file(dir: &Path, name: &str, header_laser: f32, dark: Option<Vec<f64>>) -> PathBuf {
        let path = dir.join(name);
        Raw8File {
            path: path.clone(),
            header: Raw8Header {
                start_pixel: 0,
                stop_pixel: 2,
                laser_wavelength_nm: header_laser,
                packed_date: pack_date(2024, 1, 9, 14, 30),
                ..Default::default()
            },
            wavelengths: vec![785.0, 800.0, 850.0],
            scope: vec![110.0, 220.0, 330.0],
            dark,
            reference: None,
        }
        .write(&path)
        .unwrap();
        path
    }

    fn options(laser: Option<f64>, subtract_dark: bool) -> LoadOptions {
        LoadOptions {
            laser_wavelength_nm: laser,
            subtract_dark,
        }
    }

    #[test]
    fn raw_scope_and_shift() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "a.raw8", 0.0, Some(vec![10.0, 20.0, 30.0]));
        let r = load_record(&path, &options(Some(785.0), false)).unwrap();
        assert_eq!(r.filename(), "a.raw8");
        assert_eq!(r.intensity(), &[110.0, 220.0, 330.0]);
        assert_eq!(r.raman_shift()[0], 0.0);
        assert_abs_diff_eq!(r.raman_shift()[2], 974.1476, epsilon = 1e-3);
        assert_eq!(r.acquired_at().unwrap().to_string(), "2024-01-09 14:30:00");
    }

    #[test]
    fn dark_subtraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "a.raw8", 0.0, Some(vec![10.0, 20.0, 30.0]));
        let r = load_record(&path, &options(Some(785.0), true)).unwrap();
        assert_eq!(r.intensity(), &[100.0, 200.0, 300.0]);
    }

    #[test]
    fn dark_subtraction_without_dark_uses_scope() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "a.raw8", 0.0, None);
        let r = load_record(&path, &options(Some(785.0), true)).unwrap();
        assert_eq!(r.intensity(), &[110.0, 220.0, 330.0]);
    }

    #[test]
    fn laser_from_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "a.raw8", 800.0, None);
        let r = load_record(&path, &options(None, false)).unwrap();
        assert_eq!(r.raman_shift()[1], 0.0);
    }

    #[test]
    fn missing_header_laser_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "a.raw8", 0.0, None);
        assert!(matches!(
            load_record(&path, &options(None, false)),
            Err(RamanError::InvalidSpectrum(_))
        ));
    }

    #[test]
    fn unsupported_extension() {
        let err = load_record(Path::new("spectrum.spc"), &options(Some(785.0), false)).unwrap_err();
        assert!(matches!(err, RamanError::FileFormat { .. }));
    }

    #[test]
    fn load_all_keeps_order_and_names_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_file(dir.path(), "1.raw8", 0.0, None);
        let bad = dir.path().join("2.raw8");
        std::fs::write(&bad, b"garbage").unwrap();
        let paths = vec![good, bad];
        let opts = options(Some(785.0), false);
        let outcomes: Vec<FileOutcome> = load_all(&paths, &opts).collect();
        assert!(outcomes[0].is_ok());
        let failure = outcomes[1].as_ref().unwrap_err();
        assert_eq!(failure.filename, "2.raw8");
        assert!(matches!(failure.error, RamanError::FileFormat { .. }));
    }
}
