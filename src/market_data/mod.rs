pub mod loader;
pub mod series;

// Re-export the series types for convenient access (e.g. `use crate::market_data::Bar`).
pub use loader::{load_series, parse_series, SeriesDocument};
pub use series::{Bar, RawBar, TimeSeries};
