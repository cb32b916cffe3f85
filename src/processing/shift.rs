use crate::error::{RamanError, Result};

/// nm⁻¹ → cm⁻¹.
const NM_TO_CM: f64 = 1e7;

/// Convert a wavelength axis (nm) to Raman shift (cm⁻¹) relative to the
/// excitation laser: `(1/laser - 1/w) * 1e7`.
///
/// Zero, negative or non-finite wavelengths are rejected rather than turned
/// into infinities.
pub fn raman_shift(wavelengths: &[f64], laser_wavelength: f64) -> Result<Vec<f64>> {
    if !(laser_wavelength.is_finite() && laser_wavelength > 0.0) {
        return Err(RamanError::InvalidSpectrum(format!(
            "laser wavelength must be positive, got {laser_wavelength}"
        )));
    }
    let inv_laser = 1.0 / laser_wavelength;
    wavelengths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            if w.is_finite() && w > 0.0 {
                Ok((inv_laser - 1.0 / w) * NM_TO_CM)
            } else {
                Err(RamanError::InvalidSpectrum(format!(
                    "wavelength[{i}] = {w} is not a positive number"
                )))
            }
        })
        .collect()
}
