/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  precos.csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Catalog (bad prices dropped)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Catalog  │  Vec<PriceRecord>, read-only for the session
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  text / city / state → indices sorted by price
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
