//! Avantes AvaSoft 8 `.raw8` decoder (and a matching encoder for fixtures and
//! the sample generator).
//!
//! Layout, all little-endian:
//!
//! ```text
//! offset  size  field
//!      0     5  version            "AVS82" / "AVS84"
//!      5     1  number of spectra
//!     14    10  spectrometer serial
//!     24    64  user friendly name
//!     89     2  start pixel
//!     91     2  stop pixel
//!     93     4  integration time (ms, f32)
//!    101     4  averages
//!    124     4  laser wavelength (nm, f32)
//!    134     4  packed acquisition date (SPC style)
//!    138     4  detector temperature (f32)
//!    198   130  comment
//!    328        f32 arrays of (stop - start + 1) pixels:
//!               wavelength, scope, [dark], [reference]
//! ```

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{RamanError, Result};

pub const HEADER_LEN: usize = 328;

const VERSION: std::ops::Range<usize> = 0..5;
const NUM_SPECTRA: usize = 5;
const SPEC_ID: std::ops::Range<usize> = 14..24;
const FRIENDLY_NAME: std::ops::Range<usize> = 24..88;
const START_PIXEL: usize = 89;
const STOP_PIXEL: usize = 91;
const INTEGRATION_TIME: usize = 93;
const AVERAGES: usize = 101;
const LASER_WAVELENGTH: usize = 124;
const FILE_DATE: usize = 134;
const DETECTOR_TEMP: usize = 138;
const COMMENT: std::ops::Range<usize> = 198..328;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Header fields this tool reads; the remaining bytes are instrument settings
/// that do not affect processing.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw8Header {
    pub version: String,
    pub num_spectra: u8,
    pub spectrometer_id: String,
    pub friendly_name: String,
    pub start_pixel: u16,
    pub stop_pixel: u16,
    pub integration_time_ms: f32,
    pub averages: u32,
    /// 0.0 when the acquisition software did not record one.
    pub laser_wavelength_nm: f32,
    pub packed_date: u32,
    pub detector_temp: f32,
    pub comment: String,
}

impl Raw8Header {
    pub fn pixel_count(&self) -> usize {
        usize::from(self.stop_pixel.saturating_sub(self.start_pixel)) + 1
    }

    pub fn acquired_at(&self) -> Option<NaiveDateTime> {
        unpack_date(self.packed_date)
    }
}

impl Default for Raw8Header {
    fn default() -> Self {
        Self {
            version: "AVS84".to_string(),
            num_spectra: 1,
            spectrometer_id: String::new(),
            friendly_name: String::new(),
            start_pixel: 0,
            stop_pixel: 0,
            integration_time_ms: 0.0,
            averages: 1,
            laser_wavelength_nm: 0.0,
            packed_date: 0,
            detector_temp: 0.0,
            comment: String::new(),
        }
    }
}

/// A decoded instrument file.
#[derive(Debug, Clone, PartialEq)]
pub struct Raw8File {
    pub path: PathBuf,
    pub header: Raw8Header,
    pub wavelengths: Vec<f64>,
    pub scope: Vec<f64>,
    pub dark: Option<Vec<f64>>,
    pub reference: Option<Vec<f64>>,
}

impl Raw8File {
    /// Read and decode a file from disk.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| RamanError::FileFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::decode(path, &bytes).map_err(|reason| RamanError::FileFormat {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn decode(path: &Path, bytes: &[u8]) -> std::result::Result<Self, String> {
        if bytes.len() < HEADER_LEN {
            return Err(format!(
                "file is {} bytes, shorter than the {HEADER_LEN}-byte header",
                bytes.len()
            ));
        }
        let version = read_str(bytes, VERSION);
        if !version.starts_with("AVS8") {
            return Err(format!("unexpected version marker {version:?}"));
        }

        let header = Raw8Header {
            version,
            num_spectra: bytes[NUM_SPECTRA],
            spectrometer_id: read_str(bytes, SPEC_ID),
            friendly_name: read_str(bytes, FRIENDLY_NAME),
            start_pixel: read_u16(bytes, START_PIXEL),
            stop_pixel: read_u16(bytes, STOP_PIXEL),
            integration_time_ms: read_f32(bytes, INTEGRATION_TIME),
            averages: read_u32(bytes, AVERAGES),
            laser_wavelength_nm: read_f32(bytes, LASER_WAVELENGTH),
            packed_date: read_u32(bytes, FILE_DATE),
            detector_temp: read_f32(bytes, DETECTOR_TEMP),
            comment: read_str(bytes, COMMENT),
        };
        if header.stop_pixel < header.start_pixel {
            return Err(format!(
                "stop pixel {} before start pixel {}",
                header.stop_pixel, header.start_pixel
            ));
        }

        let n = header.pixel_count();
        let mut blocks = bytes[HEADER_LEN..].chunks_exact(n * 4).map(read_f32_block);

        let wavelengths = blocks.next().ok_or("missing wavelength block")?;
        let scope = blocks.next().ok_or("missing scope block")?;
        let dark = blocks.next();
        let reference = blocks.next();

        Ok(Self {
            path: path.to_path_buf(),
            header,
            wavelengths,
            scope,
            dark,
            reference,
        })
    }

    /// Serialize back to the on-disk layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let h = &self.header;
        let mut out = vec![0u8; HEADER_LEN];
        write_str(&mut out, VERSION, &h.version);
        out[NUM_SPECTRA] = h.num_spectra;
        write_str(&mut out, SPEC_ID, &h.spectrometer_id);
        write_str(&mut out, FRIENDLY_NAME, &h.friendly_name);
        out[START_PIXEL..START_PIXEL + 2].copy_from_slice(&h.start_pixel.to_le_bytes());
        out[STOP_PIXEL..STOP_PIXEL + 2].copy_from_slice(&h.stop_pixel.to_le_bytes());
        out[INTEGRATION_TIME..INTEGRATION_TIME + 4]
            .copy_from_slice(&h.integration_time_ms.to_le_bytes());
        out[AVERAGES..AVERAGES + 4].copy_from_slice(&h.averages.to_le_bytes());
        out[LASER_WAVELENGTH..LASER_WAVELENGTH + 4]
            .copy_from_slice(&h.laser_wavelength_nm.to_le_bytes());
        out[FILE_DATE..FILE_DATE + 4].copy_from_slice(&h.packed_date.to_le_bytes());
        out[DETECTOR_TEMP..DETECTOR_TEMP + 4].copy_from_slice(&h.detector_temp.to_le_bytes());
        write_str(&mut out, COMMENT, &h.comment);

        let blocks = [Some(&self.wavelengths), Some(&self.scope)]
            .into_iter()
            .chain([
                self.dark.as_ref(),
                self.dark.as_ref().and(self.reference.as_ref()),
            ])
            .flatten();
        for block in blocks {
            for &v in block {
                out.extend_from_slice(&(v as f32).to_le_bytes());
            }
        }
        out
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_bytes())?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Packed date word
// ---------------------------------------------------------------------------

/// Decode the SPC-style date word: year(12) month(4) day(5) hour(5) minute(6).
pub fn unpack_date(word: u32) -> Option<NaiveDateTime> {
    let year = (word >> 20) as i32;
    let month = (word >> 16) & 0x0f;
    let day = (word >> 11) & 0x1f;
    let hour = (word >> 6) & 0x1f;
    let minute = word & 0x3f;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)
}

pub fn pack_date(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> u32 {
    (u32::from(year) << 20)
        | (u32::from(month & 0x0f) << 16)
        | (u32::from(day & 0x1f) << 11)
        | (u32::from(hour & 0x1f) << 6)
        | u32::from(minute & 0x3f)
}

// -- byte helpers --

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn read_f32(bytes: &[u8], at: usize) -> f32 {
    f32::from_bits(read_u32(bytes, at))
}

fn read_f32_block(chunk: &[u8]) -> Vec<f64> {
    chunk
        .chunks_exact(4)
        .map(|b| f64::from(f32::from_le_bytes([b[0], b[1], b[2], b[3]])))
        .collect()
}

/// NUL-padded text field.
fn read_str(bytes: &[u8], range: std::ops::Range<usize>) -> String {
    let field = &bytes[range];
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).trim().to_string()
}

fn write_str(out: &mut [u8], range: std::ops::Range<usize>, s: &str) {
    let field = &mut out[range];
    let n = s.len().min(field.len());
    field[..n].copy_from_slice(&s.as_bytes()[..n]);
}
