/// Data layer: catalogue types, loading, derived columns, filtering.
///
/// Architecture:
/// ```text
///  asterank API / .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  drop PER <= 0, bucket → Catalog (read-only)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  radius window + star sizes → row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  visible rows → CSV
///   └──────────┘
/// ```

pub mod derive;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
