//! HTTP handlers for the dashboard and reports.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::common::handle_domain_error;
use crate::application::handlers::reporting::{GetDashboardHandler, GetSummaryReportHandler};
use crate::domain::reporting::ReportRange;

use super::dto::SummaryQuery;

#[derive(Clone)]
pub struct ReportHandlers {
    dashboard_handler: Arc<GetDashboardHandler>,
    summary_handler: Arc<GetSummaryReportHandler>,
}

impl ReportHandlers {
    pub fn new(
        dashboard_handler: Arc<GetDashboardHandler>,
        summary_handler: Arc<GetSummaryReportHandler>,
    ) -> Self {
        Self {
            dashboard_handler,
            summary_handler,
        }
    }
}

/// GET /api/dashboard
pub async fn get_dashboard(State(handlers): State<ReportHandlers>) -> Response {
    match handlers.dashboard_handler.handle().await {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(e) => handle_domain_error("Dashboard query", e),
    }
}

/// GET /api/reports/summary?range=today|week|month|all
pub async fn get_summary(
    State(handlers): State<ReportHandlers>,
    Query(query): Query<SummaryQuery>,
) -> Response {
    let range = ReportRange::from_query(query.range.as_deref());
    match handlers.summary_handler.handle(range).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => handle_domain_error("Summary report", e),
    }
}
