/// Data layer: table model, loading, classification, and filtering.
///
/// Architecture:
/// ```text
///   measurement .csv  (';' delimited, '|' quoted)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  validate path, parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  clean headers, split group/leaf, constancy code
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  search term + measurement filter → selectable items
///   └──────────┘
///
///   Table ──► export  → .parquet next to the source file
/// ```

pub mod classify;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
