use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, LeadId};
use crate::domain::lead::Lead;
use crate::ports::LeadRepository;

#[derive(Default)]
pub struct InMemoryLeadRepository {
    leads: RwLock<Vec<Lead>>,
}

impl InMemoryLeadRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadRepository for InMemoryLeadRepository {
    async fn save(&self, lead: &Lead) -> Result<(), DomainError> {
        self.leads.write().await.insert(0, lead.clone());
        Ok(())
    }

    async fn update(&self, lead: &Lead) -> Result<(), DomainError> {
        let mut leads = self.leads.write().await;
        let slot = leads
            .iter_mut()
            .find(|l| l.id() == lead.id())
            .ok_or_else(|| DomainError::new(ErrorCode::LeadNotFound, format!("Lead not found: {}", lead.id())))?;
        *slot = lead.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &LeadId) -> Result<Option<Lead>, DomainError> {
        Ok(self.leads.read().await.iter().find(|l| l.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Lead>, DomainError> {
        Ok(self.leads.read().await.clone())
    }

    async fn delete(&self, id: &LeadId) -> Result<bool, DomainError> {
        let mut leads = self.leads.write().await;
        let before = leads.len();
        leads.retain(|l| l.id() != id);
        Ok(leads.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lead::NewLead;

    fn lead(name: &str) -> Lead {
        Lead::new(NewLead {
            name: name.to_string(),
            phone: "555-0100".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let repo = InMemoryLeadRepository::new();
        repo.save(&lead("first")).await.unwrap();
        repo.save(&lead("second")).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|l| l.name().to_string())
            .collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn update_of_unknown_lead_fails() {
        let repo = InMemoryLeadRepository::new();
        let err = repo.update(&lead("ghost")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::LeadNotFound);
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let repo = InMemoryLeadRepository::new();
        let l = lead("a");
        repo.save(&l).await.unwrap();
        assert!(repo.delete(l.id()).await.unwrap());
        assert!(!repo.delete(l.id()).await.unwrap());
        assert!(repo.find_by_id(l.id()).await.unwrap().is_none());
    }
}
