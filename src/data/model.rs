use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::error::{RamanError, Result};

// ---------------------------------------------------------------------------
// SpectrumRecord – one row of the series table
// ---------------------------------------------------------------------------

/// A single processed spectrum: one successfully parsed instrument file.
///
/// `wavelengths`, `intensity` and `raman_shift` always have the same length.
/// Fields are private so a record cannot be modified after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumRecord {
    filename: String,
    wavelengths: Vec<f64>,
    intensity: Vec<f64>,
    raman_shift: Vec<f64>,
    acquired_at: Option<NaiveDateTime>,
}

impl SpectrumRecord {
    pub fn new(
        filename: impl Into<String>,
        wavelengths: Vec<f64>,
        intensity: Vec<f64>,
        raman_shift: Vec<f64>,
        acquired_at: Option<NaiveDateTime>,
    ) -> Result<Self> {
        let filename = filename.into();
        if wavelengths.len() != intensity.len() || wavelengths.len() != raman_shift.len() {
            return Err(RamanError::InvalidSpectrum(format!(
                "{filename}: {} wavelengths, {} intensities, {} shifts",
                wavelengths.len(),
                intensity.len(),
                raman_shift.len()
            )));
        }
        Ok(Self {
            filename,
            wavelengths,
            intensity,
            raman_shift,
            acquired_at,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Wavelength axis in nm.
    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    /// Detector counts, dark-subtracted when the run asked for it.
    pub fn intensity(&self) -> &[f64] {
        &self.intensity
    }

    /// Raman-shift axis in cm⁻¹.
    pub fn raman_shift(&self) -> &[f64] {
        &self.raman_shift
    }

    pub fn acquired_at(&self) -> Option<NaiveDateTime> {
        self.acquired_at
    }

    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SeriesTable – the aggregated run
// ---------------------------------------------------------------------------

/// Ordered rows (enumeration order) plus the derived `time` column.
#[derive(Debug, Clone)]
pub struct SeriesTable {
    records: Vec<SpectrumRecord>,
    /// Seconds, one entry per row.
    time: Vec<f64>,
    /// filename → row position.
    by_filename: BTreeMap<String, usize>,
}

impl SeriesTable {
    /// Build a table from rows and an already computed time column.
    pub fn new(records: Vec<SpectrumRecord>, time: Vec<f64>) -> Result<Self> {
        if records.len() != time.len() {
            return Err(RamanError::InvalidConfig(format!(
                "{} rows but {} time values",
                records.len(),
                time.len()
            )));
        }
        let by_filename = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.filename.clone(), i))
            .collect();
        Ok(Self {
            records,
            time,
            by_filename,
        })
    }

    pub fn records(&self) -> &[SpectrumRecord] {
        &self.records
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn row(&self, index: usize) -> Option<(&SpectrumRecord, f64)> {
        Some((self.records.get(index)?, *self.time.get(index)?))
    }

    /// Row position of a file, if it was parsed successfully.
    pub fn position(&self, filename: &str) -> Option<usize> {
        self.by_filename.get(filename).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SpectrumRecord, f64)> {
        self.records.iter().zip(self.time.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn record(name: &str) -> SpectrumRecord {
        SpectrumRecord::new(name, vec![800.0, 801.0], vec![1.0, 2.0], vec![238.0, 253.0], None)
            .unwrap()
    }

    #[test]
    fn record_rejects_mismatched_lengths() {
        let r = SpectrumRecord::new("a.raw8", vec![800.0, 801.0], vec![1.0], vec![1.0, 2.0], None);
        assert!(matches!(r, Err(RamanError::InvalidSpectrum(_))));
    }

    #[test]
    fn table_indexes_filenames() {
        let table = SeriesTable::new(vec![record("a.raw8"), record("b.raw8")], vec![0.0, 15.0])
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.position("b.raw8"), Some(1));
        assert_eq!(table.position("c.raw8"), None);
        let (r, t) = table.row(1).unwrap();
        assert_eq!(r.filename(), "b.raw8");
        assert_eq!(t, 15.0);
    }

    #[test]
    fn table_rejects_short_time_column() {
        assert!(SeriesTable::new(vec![record("a.raw8")], vec![]).is_err());
    }
}
