//! HTTP adapters - REST API implementations.
//!
//! Each entity family has its own area with `dto`, `handlers` and `routes`;
//! [`router`] stitches them together.

mod common;
pub mod error;

pub mod bookings;
pub mod inventory;
pub mod leads;
pub mod messages;
pub mod reports;
pub mod router;

pub use common::CommandResponse;
pub use error::ErrorResponse;
pub use router::{api_router, cors_layer, with_common_layers, with_rest_layers, ApiHandlers};
