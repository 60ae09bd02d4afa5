//! Lead repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LeadId};
use crate::domain::lead::Lead;

/// Repository port for Lead persistence.
#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn save(&self, lead: &Lead) -> Result<(), DomainError>;

    /// Update an existing lead.
    ///
    /// # Errors
    ///
    /// - `LeadNotFound` if the lead doesn't exist
    async fn update(&self, lead: &Lead) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &LeadId) -> Result<Option<Lead>, DomainError>;

    /// All leads, newest first.
    async fn list(&self) -> Result<Vec<Lead>, DomainError>;

    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, id: &LeadId) -> Result<bool, DomainError>;
}
