//! Outbound HTTP plumbing shared by gateways and lookup stores.

pub mod client;
