//! Data layer: core types, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!   owid-covid-data.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset (3-letter codes only, memoized)
//!   └──────────┘
//!        │
//!        ├──────────────────────────────┐
//!        ▼                              ▼
//!   ┌──────────┐                 ┌────────────┐
//!   │  filter   │  Selection →   │  snapshot   │  latest row per country
//!   └──────────┘  FilteredView   └────────────┘  (whole dataset → map)
//!        │
//!        ├───────────────┬──────────────┐
//!        ▼               ▼              ▼
//!   ┌──────────┐   ┌──────────┐   ┌──────────┐
//!   │ snapshot  │   │ derived   │   │  export   │
//!   └──────────┘   └──────────┘   └──────────┘
//!    sidebar totals  death_rate     CSV download
//!                       │
//!                       ▼
//!                  ┌──────────┐
//!                  │  series   │  per-country chart lines
//!                  └──────────┘
//! ```

pub mod derived;
pub mod export;
pub mod filter;
pub mod loader;
pub mod map;
pub mod model;
pub mod series;
pub mod snapshot;
