//! HTTP routes for the dashboard and reports.

use axum::{routing::get, Router};

use super::handlers::{get_dashboard, get_summary, ReportHandlers};

/// Mounted at `/api`; owns `/dashboard` and `/reports/summary`.
pub fn report_routes(handlers: ReportHandlers) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/reports/summary", get(get_summary))
        .with_state(handlers)
}
