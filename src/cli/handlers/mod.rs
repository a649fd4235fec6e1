//! Command handlers for CLI operations
//!
//! Each handler owns the execution logic of one subcommand, separate from
//! parsing and configuration merging.

pub mod dispatch;
pub mod serve;

pub use dispatch::DispatchCommandHandler;
pub use serve::ServeCommandHandler;
