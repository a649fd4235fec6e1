//! Outbound collaborators of the dispatcher.
//!
//! `messaging` delivers notifications, `lookup` serves the side reads made
//! while building them. Both are injected into the dispatcher as trait
//! objects.

pub mod lookup;
pub mod messaging;

pub use lookup::{LookupError, MemoryLookup, SideLookup, create_lookup};
pub use messaging::{GatewayError, MessagingGateway, SendReceipt, create_gateway};

#[cfg(test)]
pub use messaging::RecordingGateway;
