/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → normalise rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Element>, ordered by atomic number, immutable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → FilteredView (borrowed elements)
///   └──────────┘
/// ```
///
/// `writer` goes the other way and emits a Parquet copy of a dataset.

pub mod filter;
pub mod loader;
pub mod model;
pub mod writer;
