//! Request and response types for messaging endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::LeadId;
use crate::domain::messaging::{Channel, Direction};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub customer_id: LeadId,
    pub content: String,
    #[serde(default)]
    pub channel: Option<Channel>,
    #[serde(default)]
    pub direction: Option<Direction>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadResponse {
    pub customer_id: LeadId,
    pub updated: usize,
}
