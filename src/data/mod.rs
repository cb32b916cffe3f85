/// Data layer: instrument files in, series table out.
///
/// Architecture:
/// ```text
///   folder of .raw8
///        │
///        ▼
///   ┌───────────┐
///   │ enumerate │  list + filter + sort by filename
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │  loader   │  raw8 → SpectrumRecord (dark, Raman shift)
///   └───────────┘
///        │  one FileOutcome per file
///        ▼
///   ┌───────────┐
///   │ aggregate │  SeriesTable + failures, time column
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │  export   │  {folder}.csv with list-literal cells
///   └───────────┘
/// ```

pub mod aggregate;
pub mod enumerate;
pub mod export;
pub mod literal;
pub mod loader;
pub mod model;
pub mod raw8;
