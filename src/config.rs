use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::aggregate::TimeAxis;
use crate::data::loader::LoadOptions;
use crate::error::{RamanError, Result};
use crate::processing::stack::{RowSelector, StackConfig};
use crate::ui::figure::FigureStyle;

/// Name of the optional per-folder settings file.
pub const CONFIG_FILE_NAME: &str = "raman.json";

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// All knobs of one processing run. Every field has a default, so a settings
/// file only needs the values it changes:
///
/// ```json
/// { "subtract_dark": true, "stack": { "start_index": 0, "stride": 2 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Excitation wavelength (nm); `null` reads it from each file header.
    pub laser_wavelength_nm: Option<f64>,
    /// Spectrum file extension, without the dot.
    pub extension: String,
    pub subtract_dark: bool,
    pub time_axis: TimeAxis,
    pub stack: StackConfig,
    pub figure: FigureStyle,
    /// Open the figure window after saving.
    pub show_window: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            laser_wavelength_nm: Some(785.0),
            extension: "raw8".to_string(),
            subtract_dark: false,
            time_axis: TimeAxis::default(),
            stack: StackConfig::default(),
            figure: FigureStyle::default(),
            show_window: true,
        }
    }
}

impl RunConfig {
    /// Dark-subtracted voltage series: every row, tightly stacked.
    pub fn voltage_series() -> Self {
        Self {
            subtract_dark: true,
            stack: StackConfig {
                selector: RowSelector {
                    start_index: 0,
                    stride: 1,
                },
                offset_increment: 0.025,
                ..StackConfig::default()
            },
            ..Self::default()
        }
    }

    /// Load `raman.json` from `folder` if present, defaults otherwise.
    pub fn for_folder(folder: &Path) -> Result<Self> {
        let path = folder.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            log::info!("No {CONFIG_FILE_NAME} in {}, using defaults", folder.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| RamanError::InvalidConfig(format!("{}: {e}", path.display())))?;
        config.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(nm) = self.laser_wavelength_nm {
            if !(nm.is_finite() && nm > 0.0) {
                return Err(RamanError::InvalidConfig(format!(
                    "laser wavelength must be positive, got {nm}"
                )));
            }
        }
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(RamanError::InvalidConfig(format!(
                "extension {:?} must be non-empty and given without the dot",
                self.extension
            )));
        }
        if let TimeAxis::Ordinal { interval_seconds } = self.time_axis {
            if !(interval_seconds.is_finite() && interval_seconds > 0.0) {
                return Err(RamanError::InvalidConfig(format!(
                    "time interval must be positive, got {interval_seconds}"
                )));
            }
        }
        self.stack.validate()?;
        self.figure.validate()
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            laser_wavelength_nm: self.laser_wavelength_nm,
            subtract_dark: self.subtract_dark,
        }
    }
}
