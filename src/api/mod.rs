//! HTTP ingest layer: handlers, middleware and DTOs.
//!
//! The host change-feed posts deliveries to `/api/events`; everything else
//! here is health checks and request plumbing.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
