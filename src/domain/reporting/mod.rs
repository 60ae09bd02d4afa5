//! Reporting module - read-only aggregates over the other entity families.

mod dashboard;
mod range;
mod summary;

pub use dashboard::DashboardOverview;
pub use range::ReportRange;
pub use summary::{DailyRevenue, StatusCount, SummaryReport};
