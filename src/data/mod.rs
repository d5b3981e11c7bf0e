/// Data layer: core types, loading, reshaping, and filtering.
///
/// Architecture:
/// ```text
///  wide .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → WideTable (text cells, trimmed headers)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  reshape  │  melt + coerce + dedup → LongTable / PisaObservation
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year range + chosen indicators → rows to plot
///   └──────────┘
/// ```
///
/// `countries` holds the static pupil-teacher ratio set.

pub mod countries;
pub mod filter;
pub mod loader;
pub mod model;
pub mod reshape;
