//! doorbell-relay
//!
//! Turns smart-doorbell database changes into push notifications on a shared
//! topic. The decision logic lives in [`dispatch`]; [`api`] and [`cli`] feed
//! it change events.

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod external;
pub mod logger;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
