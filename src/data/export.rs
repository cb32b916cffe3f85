use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::NaiveDateTime;

use super::literal::{format_list, parse_list};
use super::model::{SeriesTable, SpectrumRecord};
use crate::error::{RamanError, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Output locations
// ---------------------------------------------------------------------------

/// Where one run writes its results: `{parent}/{folder_name}.csv|.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub folder_name: String,
    pub csv: PathBuf,
    pub png: PathBuf,
}

impl OutputPaths {
    pub fn for_folder(folder: &Path) -> Result<Self> {
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                RamanError::InvalidConfig(format!("{} has no folder name", folder.display()))
            })?;
        let parent = folder.parent().ok_or_else(|| {
            RamanError::InvalidConfig(format!("{} has no parent folder", folder.display()))
        })?;
        Ok(Self {
            csv: parent.join(format!("{name}.csv")),
            png: parent.join(format!("{name}.png")),
            folder_name: name,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

/// Write one row per record. The first, unnamed column is the row index;
/// list-valued columns hold list literals (see [`super::literal`]).
pub fn write_series_csv(table: &SeriesTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "",
        "filename",
        "wavelengths",
        "scopes",
        "raman_shift",
        "time",
        "acquired_at",
    ])?;
    for (i, (record, time)) in table.iter().enumerate() {
        let acquired = record
            .acquired_at()
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default();
        writer.write_record([
            i.to_string(),
            record.filename().to_string(),
            format_list(record.wavelengths()),
            format_list(record.intensity()),
            format_list(record.raman_shift()),
            time.to_string(),
            acquired,
        ])?;
    }
    writer.flush()?;
    log::info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Read a series CSV back into a table.
///
/// Accepts the legacy header spellings `intensity` for `scopes` and
/// `raman_shift time` for `raman_shift`. A missing `time` column falls back
/// to the row position in seconds.
pub fn read_series_csv(path: &Path) -> anyhow::Result<SeriesTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let find = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let Some(filename_idx) = find(&["filename"]) else {
        bail!("CSV missing 'filename' column");
    };
    let Some(wavelengths_idx) = find(&["wavelengths"]) else {
        bail!("CSV missing 'wavelengths' column");
    };
    let Some(scopes_idx) = find(&["scopes", "intensity"]) else {
        bail!("CSV missing 'scopes' column");
    };
    let Some(shift_idx) = find(&["raman_shift", "raman_shift time"]) else {
        bail!("CSV missing 'raman_shift' column");
    };
    let time_idx = find(&["time"]);
    let acquired_idx = find(&["acquired_at"]);

    let mut records = Vec::new();
    let mut time = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let list = |idx: usize, col: &str| {
            parse_list(cell(idx)).with_context(|| format!("Row {row_no}, column '{col}'"))
        };
        let wavelengths = list(wavelengths_idx, "wavelengths")?;
        let scopes = list(scopes_idx, "scopes")?;
        let shift = list(shift_idx, "raman_shift")?;

        let acquired_at = match acquired_idx.map(cell) {
            Some(s) if !s.is_empty() => Some(
                NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
                    .with_context(|| format!("Row {row_no}: bad timestamp '{s}'"))?,
            ),
            _ => None,
        };

        let t = match time_idx {
            Some(idx) => cell(idx)
                .trim()
                .parse::<f64>()
                .with_context(|| format!("Row {row_no}: '{}' is not a time", cell(idx)))?,
            None => row_no as f64,
        };

        records.push(
            SpectrumRecord::new(cell(filename_idx), wavelengths, scopes, shift, acquired_at)
                .with_context(|| format!("Row {row_no}"))?,
        );
        time.push(t);
    }

    Ok(SeriesTable::new(records, time)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::raw8::{pack_date, unpack_date};

    fn table() -> SeriesTable {
        let a = SpectrumRecord::new(
            "a.raw8",
            vec![790.0, 800.5],
            vec![12.0, 13.25],
            vec![80.6, 238.9],
            unpack_date(pack_date(2023, 11, 30, 8, 5)),
        )
        .unwrap();
        let b = SpectrumRecord::new("b.raw8", vec![790.0, 800.5], vec![3.0, 4.0], vec![80.6, 238.9], None)
            .unwrap();
        SeriesTable::new(vec![a, b], vec![0.0, 15.0]).unwrap()
    }

    #[test]
    fn output_paths_live_in_parent() {
        let p = OutputPaths::for_folder(Path::new("/data/run-07/")).unwrap();
        assert_eq!(p.folder_name, "run-07");
        assert_eq!(p.csv, PathBuf::from("/data/run-07.csv"));
        assert_eq!(p.png, PathBuf::from("/data/run-07.png"));
        assert!(OutputPaths::for_folder(Path::new("/")).is_err());
    }

    #[test]
    fn csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.csv");
        write_series_csv(&table(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            ",filename,wavelengths,scopes,raman_shift,time,acquired_at"
        );
        assert_eq!(
            lines.next().unwrap(),
            "0,a.raw8,\"[790.0, 800.5]\",\"[12.0, 13.25]\",\"[80.6, 238.9]\",0,2023-11-30 08:05:00"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,b.raw8,\"[790.0, 800.5]\",\"[3.0, 4.0]\",\"[80.6, 238.9]\",15,"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn read_back_written_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.csv");
        let original = table();
        write_series_csv(&original, &path).unwrap();
        let back = read_series_csv(&path).unwrap();
        assert_eq!(back.records(), original.records());
        assert_eq!(back.time(), original.time());
    }

    #[test]
    fn read_legacy_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.csv");
        std::fs::write(
            &path,
            ",filename,wavelengths,scopes,raman_shift time\n0,x.raw8,[800. 801.],[5. 6.],[238.9 254.5]\n",
        )
        .unwrap();
        let back = read_series_csv(&path).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.records()[0].raman_shift(), &[238.9, 254.5]);
        assert_eq!(back.time(), &[0.0]);
    }

    #[test]
    fn read_rejects_missing_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "filename,wavelengths\nx.raw8,[1.0]\n").unwrap();
        let err = read_series_csv(&path).unwrap_err();
        assert!(err.to_string().contains("scopes"));
    }
}
