use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{dashboard::Dashboard, registry::Registry};
use crate::{
    config::Config,
    events::Bus,
    notifications::NotificationQueue,
    subscribers::{Subscribe, SubscriberSet},
    transport::{Connector, WsConnector},
};

/// Builder for a [`Dashboard`].
pub struct DashboardBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
    connector: Arc<dyn Connector>,
}

impl DashboardBuilder {
    /// Creates a builder that dials over WebSocket.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            connector: Arc::new(WsConnector::new()),
        }
    }

    /// Sets event subscribers.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Replaces the transport (tests, alternative protocols).
    pub fn with_connector(mut self, connector: Arc<dyn Connector>) -> Self {
        self.connector = connector;
        self
    }

    /// Builds the dashboard and starts its event listener.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Arc<Dashboard> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = SubscriberSet::new(self.subscribers);
        let notifications = NotificationQueue::new(self.cfg.notification_ttl);
        let runtime_token = CancellationToken::new();
        let registry = Registry::new(
            bus.clone(),
            runtime_token.clone(),
            self.connector,
            notifications.clone(),
            self.cfg.reconnect,
        );

        Arc::new(Dashboard::new_internal(
            self.cfg,
            bus,
            subs,
            notifications,
            registry,
            runtime_token,
        ))
    }
}
