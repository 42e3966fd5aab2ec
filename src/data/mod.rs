/// Data layer: core types, loading, and the two chart transformations.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaunchTable │  Vec<LaunchRecord>, site list
///   └─────────────┘
///        │
///        ├──────────────────┐
///        ▼                  ▼
///   ┌───────────┐     ┌──────────┐
///   │ aggregate │     │  filter  │
///   └───────────┘     └──────────┘
///    PieSeries         ScatterSeries
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
