//! Notification dispatch: classify a change event, build a message, send it.
//!
//! ```text
//! ChangeEvent ─▶ TriggerRouter ─▶ Dispatcher::dispatch_* ─▶ MessagingGateway
//!                                        │
//!                                        └─▶ SideLookup (password change only)
//! ```

pub mod classify;
mod dispatcher;
pub mod event;
pub mod intent;
pub mod outcome;
pub mod record;
pub mod trigger;

pub use classify::{AlertKind, Classification, NO_ALERT_SENTINEL, classify_alert};
pub use dispatcher::{DEFAULT_TOPIC, DEFAULT_UPDATE_INFO_PATH, Dispatcher};
pub use event::{ChangeEvent, EventKind, RecordCreated, RecordDeleted, ValueUpdated};
pub use intent::NotificationIntent;
pub use outcome::{DispatchOutcome, FailureReason, SkipReason};
pub use record::{PasswordChangeContext, TempPasswordRecord};
pub use trigger::{Trigger, TriggerRouter, TriggeredEvent, Unrouted};
