use serde::Deserialize;

/// Query string of `GET /api/reports/summary`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryQuery {
    pub range: Option<String>,
}
