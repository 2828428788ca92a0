/// Data layer: session tables, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  {symbol}_Full_Day_Partial_Day_From_2008_V1.csv  (HTTPS or local dir)
///        │
///        ▼
///   ┌──────────┐      ┌─────────┐
///   │  loader   │ ───▶ │  cache   │  one table per instrument until next login
///   └──────────┘      └─────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SessionTable  │  Vec<SessionRecord>, column list
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterState → row predicate → filtered table
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  one Distribution per chart (category orders from buckets)
///   └───────────┘
/// ```

pub mod aggregate;
pub mod buckets;
pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
