//! Lead module - prospective customers and their pipeline status.

mod aggregate;
mod errors;

pub use aggregate::{Lead, LeadChanges, LeadSource, LeadStatus, NewLead};
pub use errors::LeadError;
