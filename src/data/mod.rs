//! Data module - CSV loading, aggregation and team views

pub mod aggregator;
pub mod loader;
pub mod views;

pub use aggregator::{
    aggregate_three_point, AggregateError, Aggregator, ThreePointSummary, ThreePointTable,
    MIN_THREE_POINT_ATTEMPTS,
};
pub use loader::{load_data, DataLoader, DataPaths, LoaderError, Tables};
pub use views::{build_views, DataSource, TeamView, ViewError, Views, WinPoint};
