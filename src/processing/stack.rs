use serde::{Deserialize, Serialize};

use super::peak::{ReferenceIndex, DEFAULT_REFERENCE_SHIFT};
use crate::data::model::SeriesTable;
use crate::error::{RamanError, Result};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Which rows take part in the stacked plot: every `stride`-th row starting
/// at `start_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowSelector {
    pub start_index: usize,
    pub stride: usize,
}

impl RowSelector {
    /// Row positions selected out of a table with `row_count` rows.
    pub fn select(&self, row_count: usize) -> Result<Vec<usize>> {
        if self.stride == 0 {
            return Err(RamanError::InvalidConfig("stride must be at least 1".into()));
        }
        Ok((self.start_index..row_count).step_by(self.stride).collect())
    }
}

impl Default for RowSelector {
    fn default() -> Self {
        Self {
            start_index: 4,
            stride: 8,
        }
    }
}

/// Everything that shapes the stacked figure's curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackConfig {
    #[serde(flatten)]
    pub selector: RowSelector,
    /// Vertical distance between consecutive selected curves.
    pub offset_increment: f64,
    /// Raman shift (cm⁻¹) of the normalization band.
    pub reference_shift: f64,
    /// One label per selected row, e.g. applied voltages. Time labels when
    /// absent.
    pub legend_labels: Option<Vec<String>>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            selector: RowSelector::default(),
            offset_increment: 0.45,
            reference_shift: DEFAULT_REFERENCE_SHIFT,
            legend_labels: None,
        }
    }
}

impl StackConfig {
    pub fn validate(&self) -> Result<()> {
        if self.selector.stride == 0 {
            return Err(RamanError::InvalidConfig("stride must be at least 1".into()));
        }
        if !self.offset_increment.is_finite() {
            return Err(RamanError::InvalidConfig(format!(
                "offset increment {} is not finite",
                self.offset_increment
            )));
        }
        if !self.reference_shift.is_finite() {
            return Err(RamanError::InvalidConfig(format!(
                "reference shift {} is not finite",
                self.reference_shift
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// One curve ready for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub label: String,
}

/// `intensity / intensity[reference] + offset`.
pub fn normalize_and_offset(
    intensity: &[f64],
    reference: ReferenceIndex,
    offset: f64,
) -> Result<Vec<f64>> {
    let index = reference.get();
    let peak = *intensity.get(index).ok_or(RamanError::IndexOutOfRange {
        index,
        len: intensity.len(),
    })?;
    if peak == 0.0 {
        return Err(RamanError::DivisionByZero { index });
    }
    Ok(intensity.iter().map(|v| v / peak + offset).collect())
}

/// Normalize and vertically offset the selected rows of `table`.
///
/// The offset of a row is its ordinal among the *selected* rows times
/// `offset_increment`. Any error here is a configuration problem and aborts
/// the plot.
pub fn stack_series(
    table: &SeriesTable,
    reference: ReferenceIndex,
    config: &StackConfig,
) -> Result<Vec<PlotSeries>> {
    config.validate()?;
    let rows = config.selector.select(table.len())?;
    if rows.is_empty() {
        return Err(RamanError::InvalidConfig(format!(
            "start index {} selects none of the {} rows",
            config.selector.start_index,
            table.len()
        )));
    }
    if let Some(labels) = &config.legend_labels {
        if labels.len() != rows.len() {
            return Err(RamanError::InvalidConfig(format!(
                "{} legend labels for {} selected rows",
                labels.len(),
                rows.len()
            )));
        }
    }

    rows.iter()
        .enumerate()
        .map(|(step, &row)| {
            let (record, time) = table.row(row).ok_or(RamanError::IndexOutOfRange {
                index: row,
                len: table.len(),
            })?;
            let offset = step as f64 * config.offset_increment;
            let y = normalize_and_offset(record.intensity(), reference, offset)?;
            let label = match &config.legend_labels {
                Some(labels) => labels[step].clone(),
                None => format!("{time} s"),
            };
            Ok(PlotSeries {
                x: record.raman_shift().to_vec(),
                y,
                label,
            })
        })
        .collect()
}

/// Every row as-is, intensity over Raman shift, labelled by filename.
pub fn overlay_series(table: &SeriesTable) -> Vec<PlotSeries> {
    table
        .records()
        .iter()
        .map(|r| PlotSeries {
            x: r.raman_shift().to_vec(),
            y: r.intensity().to_vec(),
            label: r.filename().to_string(),
        })
        .collect()
}
