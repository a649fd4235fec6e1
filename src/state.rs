//! Application state shared by the HTTP handlers and the CLI.

use std::sync::Arc;

use crate::config::Settings;
use crate::dispatch::{Dispatcher, TriggerRouter};
use crate::error::AppResult;
use crate::services::{MessagingGateway, SideLookup, create_gateway, create_lookup};

/// Everything a change-feed delivery needs, built once at startup.
///
/// Cloning is cheap: all members are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub router: Arc<TriggerRouter>,
    pub gateway: Arc<dyn MessagingGateway>,
    pub version: String,
}

impl AppState {
    /// Wires the given collaborators with the watched paths and topic from `settings`
    pub fn new(
        settings: &Settings,
        gateway: Arc<dyn MessagingGateway>,
        lookup: Arc<dyn SideLookup>,
    ) -> Self {
        let dispatcher = Dispatcher::new(gateway.clone(), lookup)
            .with_topic(settings.messaging.topic.clone())
            .with_update_info_path(settings.watch.update_info_path.clone());

        Self {
            dispatcher: Arc::new(dispatcher),
            router: Arc::new(TriggerRouter::new(&settings.watch)),
            gateway,
            version: settings.application.version.clone(),
        }
    }

    /// Builds the configured gateway and lookup store, then wires them
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let gateway = create_gateway(&settings.messaging)?;
        let lookup = create_lookup(&settings.database)?;

        tracing::info!(
            gateway = gateway.name(),
            lookup = lookup.name(),
            topic = %settings.messaging.topic,
            "Dispatch collaborators created"
        );

        Ok(Self::new(settings, gateway, lookup))
    }
}
