//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `event` - Change-feed delivery request/response DTOs
//! - `error` - Common error response DTOs

mod error;
mod event;

pub use error::ErrorResponse;
pub use event::{EventDeliveryRequest, EventDeliveryResponse};
