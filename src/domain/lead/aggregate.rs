//! Lead aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{required_text, LeadId, Timestamp, ValidationError};
use crate::domain::realtime::{Entity, EntityKind};

/// Pipeline position of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Booked,
    Converted,
    Lost,
}

/// Where the lead came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeadSource {
    #[default]
    Website,
    Form,
    Referral,
    Social,
    Email,
    Other,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Booked => "Booked",
            LeadStatus::Converted => "Converted",
            LeadStatus::Lost => "Lost",
        }
    }
}

/// A prospective customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    id: LeadId,
    name: String,
    phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    status: LeadStatus,
    source: LeadSource,
    #[serde(default)]
    notes: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

/// Input for a new lead.
#[derive(Debug, Clone, Default)]
pub struct NewLead {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub source: Option<LeadSource>,
    pub status: Option<LeadStatus>,
    pub notes: Option<String>,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct LeadChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub notes: Option<String>,
}

fn normalize_email(email: Option<String>) -> Option<String> {
    email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
}

impl Lead {
    pub fn new(input: NewLead) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        Ok(Self {
            id: LeadId::new(),
            name: required_text("name", &input.name)?,
            phone: required_text("phone", &input.phone)?,
            email: normalize_email(input.email),
            status: input.status.unwrap_or_default(),
            source: input.source.unwrap_or_default(),
            notes: input.notes.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, changes: LeadChanges) -> Result<(), ValidationError> {
        let name = changes
            .name
            .as_deref()
            .map(|n| required_text("name", n))
            .transpose()?;
        let phone = changes
            .phone
            .as_deref()
            .map(|p| required_text("phone", p))
            .transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if changes.email.is_some() {
            self.email = normalize_email(changes.email);
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(source) = changes.source {
            self.source = source;
        }
        if let Some(notes) = changes.notes {
            self.notes = notes;
        }
        self.touch();
        Ok(())
    }

    pub fn set_status(&mut self, status: LeadStatus) {
        self.status = status;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    pub fn id(&self) -> &LeadId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn status(&self) -> LeadStatus {
        self.status
    }

    pub fn source(&self) -> LeadSource {
        self.source
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }
}

impl Entity for Lead {
    type Id = LeadId;
    const KIND: EntityKind = EntityKind::Lead;

    fn id(&self) -> &LeadId {
        &self.id
    }
}
