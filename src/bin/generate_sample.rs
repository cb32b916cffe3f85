use std::path::PathBuf;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use raman_stacker::data::raw8::{pack_date, Raw8File, Raw8Header};

const LASER_NM: f64 = 785.0;
const PIXELS: u16 = 2048;
const FILES: usize = 40;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn shift_of(wavelength: f64) -> f64 {
    (1.0 / LASER_NM - 1.0 / wavelength) * 1e7
}

fn generate_scope(
    wavelengths: &[f64],
    peaks: &[(f64, f64, f64)],
    baseline: f64,
    noise: &Normal<f64>,
    rng: &mut StdRng,
) -> Vec<f64> {
    wavelengths
        .iter()
        .map(|&wl| {
            let shift = shift_of(wl);
            let signal: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(shift, mu, sigma, amp))
                .sum();
            baseline + signal + noise.sample(rng)
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let scope_noise = Normal::new(0.0, 12.0).context("scope noise")?;
    let dark_noise = Normal::new(950.0, 4.0).context("dark noise")?;
    let out_dir = PathBuf::from("sample_run");
    std::fs::create_dir_all(&out_dir).context("creating sample_run/")?;

    // 790 → ~913 nm, i.e. roughly 80 → 1780 1/cm at 785 nm excitation
    let wavelengths: Vec<f64> = (0..PIXELS).map(|i| 790.0 + f64::from(i) * 0.06).collect();

    for i in 0..FILES {
        let progress = i as f64 / (FILES - 1) as f64;
        // fixed reference band, one growing and one fading product band
        let peaks = [
            (931.0, 9.0, 2400.0),
            (1045.0, 12.0, 300.0 + 1500.0 * progress),
            (1360.0, 25.0, 1200.0 * (1.0 - progress)),
            (1600.0, 20.0, 800.0),
        ];
        let dark: Vec<f64> = (0..PIXELS).map(|_| dark_noise.sample(&mut rng)).collect();
        let scope = generate_scope(&wavelengths, &peaks, 1000.0, &scope_noise, &mut rng);

        let seconds = i * 15;
        let header = Raw8Header {
            spectrometer_id: "SAMPLE0001".to_string(),
            friendly_name: "generate-sample".to_string(),
            start_pixel: 0,
            stop_pixel: PIXELS - 1,
            integration_time_ms: 1000.0,
            averages: 5,
            laser_wavelength_nm: LASER_NM as f32,
            packed_date: pack_date(2024, 6, 1, 9 + (seconds / 3600) as u8, ((seconds / 60) % 60) as u8),
            ..Default::default()
        };

        let path = out_dir.join(format!("spectrum_{i:04}.raw8"));
        Raw8File {
            path: path.clone(),
            header,
            wavelengths: wavelengths.clone(),
            scope,
            dark: Some(dark),
            reference: None,
        }
        .write(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    }

    // one file the loader has to skip
    std::fs::write(out_dir.join("spectrum_broken.raw8"), b"AVS84 truncated")
        .context("writing broken sample")?;

    println!(
        "Wrote {FILES} spectra ({PIXELS} pixels each) to {}",
        out_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn seeded_noise_is_reproducible() {
        let wavelengths: Vec<f64> = (0..32).map(|i| 840.0 + f64::from(i)).collect();
        let noise = Normal::new(0.0, 12.0).unwrap();
        let peaks = [(931.0, 9.0, 2400.0)];
        let a = generate_scope(&wavelengths, &peaks, 1000.0, &noise, &mut StdRng::seed_from_u64(7));
        let b = generate_scope(&wavelengths, &peaks, 1000.0, &noise, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn noiseless_scope_is_baseline_plus_peaks() {
        let noise = Normal::new(0.0, 0.0).unwrap();
        let peak_wl = 1e7 / (1e7 / LASER_NM - 931.0);
        let scope = generate_scope(
            &[790.0, peak_wl],
            &[(931.0, 9.0, 2400.0)],
            1000.0,
            &noise,
            &mut StdRng::seed_from_u64(1),
        );
        assert!((scope[0] - 1000.0).abs() < 1e-6);
        assert!((scope[1] - 3400.0).abs() < 1e-6);
    }
}
