use serde::{Deserialize, Serialize};

use super::model::{SeriesTable, SpectrumRecord};
use crate::error::{RamanError, Result};

// ---------------------------------------------------------------------------
// Per-file outcomes
// ---------------------------------------------------------------------------

/// A file that was enumerated but did not make it into the table.
#[derive(Debug)]
pub struct FileError {
    pub filename: String,
    pub error: RamanError,
}

pub type FileOutcome = std::result::Result<SpectrumRecord, FileError>;

/// How the `time` column is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeAxis {
    /// `row * interval_seconds`, by position in the table.
    Ordinal { interval_seconds: f64 },
    /// Seconds since the first row's acquisition timestamp.
    Acquisition,
}

impl Default for TimeAxis {
    fn default() -> Self {
        TimeAxis::Ordinal {
            interval_seconds: 15.0,
        }
    }
}

impl TimeAxis {
    fn column(&self, records: &[SpectrumRecord]) -> Result<Vec<f64>> {
        match *self {
            TimeAxis::Ordinal { interval_seconds } => Ok((0..records.len())
                .map(|i| i as f64 * interval_seconds)
                .collect()),
            TimeAxis::Acquisition => {
                let stamps = records
                    .iter()
                    .map(|r| {
                        r.acquired_at().ok_or_else(|| RamanError::MissingTimestamp {
                            filename: r.filename().to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                let Some(&first) = stamps.first() else {
                    return Ok(Vec::new());
                };
                Ok(stamps
                    .iter()
                    .map(|t| (*t - first).num_milliseconds() as f64 / 1000.0)
                    .collect())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Result of one batch: the table of parsed rows and every file that was
/// skipped, with its reason.
#[derive(Debug)]
pub struct BatchReport {
    pub table: SeriesTable,
    pub failures: Vec<FileError>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.table.len() + self.failures.len()
    }
}

/// Collect per-file outcomes in order. Failures are logged and recorded but
/// never stop the batch; the time column is computed afterwards so it stays
/// contiguous over the rows that survived.
pub fn aggregate<I>(outcomes: I, time_axis: &TimeAxis) -> Result<BatchReport>
where
    I: IntoIterator<Item = FileOutcome>,
{
    let mut records = Vec::new();
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome {
            Ok(record) => {
                log::debug!("{}: {} samples", record.filename(), record.len());
                records.push(record);
            }
            Err(failure) => {
                log::error!("Error processing file {}: {}", failure.filename, failure.error);
                failures.push(failure);
            }
        }
    }

    if *time_axis == TimeAxis::Acquisition {
        let (dated, undated): (Vec<_>, Vec<_>) = records
            .into_iter()
            .partition(|r| r.acquired_at().is_some());
        for record in undated {
            let filename = record.filename().to_string();
            let error = RamanError::MissingTimestamp {
                filename: filename.clone(),
            };
            log::error!("Error processing file {filename}: {error}");
            failures.push(FileError { filename, error });
        }
        records = dated;
    }

    let time = time_axis.column(&records)?;
    let table = SeriesTable::new(records, time)?;
    Ok(BatchReport { table, failures })
}
