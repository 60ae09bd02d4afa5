//! Lead HTTP area.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateLeadRequest, UpdateLeadRequest};
pub use handlers::LeadHandlers;
pub use routes::lead_routes;
