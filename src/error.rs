use std::path::PathBuf;

use thiserror::Error;

/// Result type used by the processing core.
pub type Result<T> = std::result::Result<T, RamanError>;

/// Everything that can go wrong between reading a `.raw8` file and saving the
/// stacked figure.
#[derive(Debug, Error)]
pub enum RamanError {
    /// The instrument file could not be decoded.
    #[error("{path}: unreadable spectrum file: {reason}")]
    FileFormat { path: PathBuf, reason: String },

    /// A wavelength value that cannot be converted to a Raman shift.
    #[error("invalid spectrum: {0}")]
    InvalidSpectrum(String),

    #[error("cannot locate a reference peak in an empty sequence")]
    EmptySequence,

    #[error("reference index {index} out of range for {len} samples")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("intensity at reference index {index} is zero")]
    DivisionByZero { index: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{filename}: no acquisition timestamp")]
    MissingTimestamp { filename: String },

    /// Every enumerated file failed to parse (or there were none).
    #[error("no spectra could be loaded from {0}")]
    NoSpectra(PathBuf),

    #[error("malformed list literal: {0}")]
    ListLiteral(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("rendering failed: {0}")]
    Render(String),
}
