//! Lead command and query handlers.

mod create_lead;
mod delete_lead;
mod get_leads;
mod update_lead;

pub use create_lead::{CreateLeadCommand, CreateLeadHandler};
pub use delete_lead::{DeleteLeadCommand, DeleteLeadHandler};
pub use get_leads::{GetLeadHandler, ListLeadsHandler};
pub use update_lead::{UpdateLeadCommand, UpdateLeadHandler};
