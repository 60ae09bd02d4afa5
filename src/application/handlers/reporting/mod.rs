//! Read-only reporting handlers.

mod get_dashboard;
mod get_summary;

pub use get_dashboard::GetDashboardHandler;
pub use get_summary::GetSummaryReportHandler;
