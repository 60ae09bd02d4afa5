//! Dashboard and reporting HTTP area.

mod dto;
mod handlers;
mod routes;

pub use dto::SummaryQuery;
pub use handlers::ReportHandlers;
pub use routes::report_routes;
