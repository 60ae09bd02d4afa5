//! Lead query handlers.

use std::sync::Arc;

use crate::domain::foundation::LeadId;
use crate::domain::lead::{Lead, LeadError};
use crate::ports::LeadRepository;

pub struct GetLeadHandler {
    repository: Arc<dyn LeadRepository>,
}

impl GetLeadHandler {
    pub fn new(repository: Arc<dyn LeadRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, id: LeadId) -> Result<Lead, LeadError> {
        self.repository
            .find_by_id(&id)
            .await?
            .ok_or(LeadError::not_found(id))
    }
}

/// Lists every lead, newest first.
pub struct ListLeadsHandler {
    repository: Arc<dyn LeadRepository>,
}

impl ListLeadsHandler {
    pub fn new(repository: Arc<dyn LeadRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Vec<Lead>, LeadError> {
        Ok(self.repository.list().await?)
    }
}
