/// Data layer: core types, loading, filtering and view shaping.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<ExamRecord>, subject catalog, student roster
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  subject == selection → filtered records
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   view    │  ChartSpec (grouped bars) + table rows
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod view;
