use crate::error::{RamanError, Result};

/// Default reference band (cm⁻¹).
pub const DEFAULT_REFERENCE_SHIFT: f64 = 931.0;

/// Sample position of the reference peak.
///
/// Located once, on the first row of a run, and applied to every stacked row.
/// That is only valid while the peak does not drift between acquisitions
/// (same instrument, same calibration); a row whose axis is shifted will be
/// normalized at a slightly different band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceIndex(pub usize);

impl ReferenceIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

/// Index of the value closest to `target`. Ties go to the first occurrence.
pub fn nearest_index(raman_shift: &[f64], target: f64) -> Result<ReferenceIndex> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in raman_shift.iter().enumerate() {
        let d = (v - target).abs();
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| ReferenceIndex(i))
        .ok_or(RamanError::EmptySequence)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn closest_value_wins() {
        let idx = nearest_index(&[1000.0, 950.0, 930.0, 940.0, 960.0], 931.0).unwrap();
        assert_eq!(idx, ReferenceIndex(2));
    }

    #[test]
    fn first_index_on_tie() {
        let idx = nearest_index(&[920.0, 942.0, 920.0, 942.0], 931.0).unwrap();
        assert_eq!(idx.get(), 0);
    }

    #[test]
    fn empty_sequence() {
        assert!(matches!(
            nearest_index(&[], DEFAULT_REFERENCE_SHIFT),
            Err(RamanError::EmptySequence)
        ));
    }

    #[test]
    fn target_outside_axis() {
        assert_eq!(nearest_index(&[100.0, 200.0, 300.0], 931.0).unwrap().get(), 2);
    }
}
