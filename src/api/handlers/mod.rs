//! HTTP request handlers for API endpoints.

pub mod events;
pub mod health;
