//! Request types for lead endpoints. Responses are the `Lead` entity itself,
//! the same shape carried by `leadCreated` / `leadUpdated` events.

use serde::Deserialize;

use crate::domain::lead::{LeadChanges, LeadSource, LeadStatus};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub source: Option<LeadSource>,
    #[serde(default)]
    pub status: Option<LeadStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub notes: Option<String>,
}

impl From<UpdateLeadRequest> for LeadChanges {
    fn from(req: UpdateLeadRequest) -> Self {
        LeadChanges {
            name: req.name,
            phone: req.phone,
            email: req.email,
            status: req.status,
            source: req.source,
            notes: req.notes,
        }
    }
}
