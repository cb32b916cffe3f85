/// Numeric core: wavelength → Raman shift, reference-peak lookup, and
/// normalization/stacking of the selected rows.
///
/// ```text
///   wavelengths ──► shift ──► raman_shift (cm⁻¹)
///                                 │
///                     row 0 ──► peak ──► ReferenceIndex
///                                 │
///   SeriesTable + StackConfig ──► stack ──► Vec<PlotSeries>
/// ```

pub mod peak;
pub mod shift;
pub mod stack;
