//! Aggregate counts for the front-desk dashboard.

pub mod dashboard;

pub use dashboard::{DashboardService, DashboardSnapshot};
