//! # Dashboard: one supervised session per provider, shared notifications.
//!
//! The [`Dashboard`] owns the event bus, the [`NotificationQueue`], a [`SubscriberSet`]
//! and the session [`Registry`]. It spawns an isolated session per configured provider
//! and exposes read-only views for rendering.
//!
//! ## High-level architecture
//! ```text
//! Vec<ProviderConfig> ──► Dashboard::start()
//!                            └──► Registry::spawn(provider)        (one per provider)
//!                                    └──► SessionActor::run(child token)
//!
//! Event flow:
//!   SessionActor ── opened/closed/exhausted ──► NotificationQueue::on_event
//!                └─ publish(Event) ──► Bus ──► listener ──► SubscriberSet::emit
//!
//! Rendering boundary:
//!   views()          ──► Vec<ProviderView { name, severity, state, attempts, records }>
//!   notifications()  ──► Vec<Notification>   (insertion order)
//!   dismiss(id)      ──► idempotent removal
//!
//! Shutdown path:
//!   wait_for_shutdown_signal() ──► ShutdownRequested
//!                               ──► runtime token cancelled (all sessions)
//!                               ──► Registry::shutdown(grace)
//!                                      ├─ Ok  → AllStoppedWithin
//!                                      └─ Err → GraceExceeded + RuntimeError
//!                               ──► listener drained, subscriber queues flushed
//! ```
//!
//! Dropping the dashboard without `shutdown()` still cancels every session (closing live
//! links and pending reconnect timers) and every notification timer.
//!
//! ## Example
//! ```no_run
//! use tickerboard::{Config, Dashboard, ProviderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let providers = ProviderConfig::parse_lenient("Stocks=wss://stocks.example/feed");
//!     let dashboard = Dashboard::builder(Config::default()).build();
//!     dashboard.start(providers).await;
//!
//!     for view in dashboard.views().await {
//!         println!("{} [{}]: {} records", view.name, view.severity, view.records.len());
//!     }
//!     dashboard.shutdown().await?;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{builder::DashboardBuilder, registry::Registry, shutdown, view::ProviderView};
use crate::{
    config::Config,
    error::RuntimeError,
    events::{Bus, Event, EventKind},
    notifications::{Notification, NotificationQueue},
    providers::ProviderConfig,
    subscribers::SubscriberSet,
};

/// Provider orchestrator.
pub struct Dashboard {
    cfg: Config,
    bus: Bus,
    notifications: NotificationQueue,
    registry: Arc<Registry>,
    runtime_token: CancellationToken,
    listener: Mutex<Option<JoinHandle<()>>>,
    listener_stop: CancellationToken,
}

impl Dashboard {
    /// Starts building a dashboard.
    pub fn builder(cfg: Config) -> DashboardBuilder {
        DashboardBuilder::new(cfg)
    }

    /// Must be called from within a tokio runtime: spawns the event listener.
    pub(super) fn new_internal(
        cfg: Config,
        bus: Bus,
        subs: SubscriberSet,
        notifications: NotificationQueue,
        registry: Arc<Registry>,
        runtime_token: CancellationToken,
    ) -> Self {
        let listener_stop = CancellationToken::new();
        let listener = spawn_listener(bus.subscribe(), subs, listener_stop.clone());
        Self {
            cfg,
            bus,
            notifications,
            registry,
            runtime_token,
            listener: Mutex::new(Some(listener)),
            listener_stop,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Starts one session per provider, in order.
    pub async fn start(&self, providers: Vec<ProviderConfig>) {
        for provider in providers {
            self.add_provider(provider).await;
        }
    }

    /// Starts a session for a single provider. Returns its session id.
    ///
    /// Returns `None` once the dashboard has been shut down.
    pub async fn add_provider(&self, provider: ProviderConfig) -> Option<u64> {
        if self.runtime_token.is_cancelled() {
            tracing::warn!(%provider, "dashboard is shut down, provider ignored");
            return None;
        }
        tracing::info!(%provider, "starting provider session");
        Some(self.registry.spawn(provider).await)
    }

    /// Starts `providers` and runs until an OS termination signal, then shuts down.
    pub async fn run(&self, providers: Vec<ProviderConfig>) -> Result<(), RuntimeError> {
        self.start(providers).await;
        shutdown::wait_for_shutdown_signal().await?;
        self.shutdown().await
    }

    /// Tears down every session, cancels notification timers and flushes subscribers.
    ///
    /// Publishes [`EventKind::AllStoppedWithin`] on success, or
    /// [`EventKind::GraceExceeded`] and returns [`RuntimeError::GraceExceeded`].
    /// Subscribers have seen every event up to that one when this returns.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.bus.publish(Event::new(EventKind::ShutdownRequested));
        self.runtime_token.cancel();
        let res = self.registry.shutdown(self.cfg.grace).await;
        self.notifications.shutdown();

        let res = match res {
            Ok(()) => {
                self.bus.publish(Event::new(EventKind::AllStoppedWithin));
                Ok(())
            }
            Err(stuck) => {
                self.bus.publish(
                    Event::new(EventKind::GraceExceeded).with_reason(stuck.join(",")),
                );
                Err(RuntimeError::GraceExceeded {
                    grace: self.cfg.grace,
                    stuck,
                })
            }
        };

        self.listener_stop.cancel();
        if let Some(listener) = self.listener.lock().await.take() {
            if let Err(e) = listener.await {
                tracing::error!(error = %e, "event listener panicked");
            }
        }
        res
    }

    /// Per-provider snapshots, in configuration order.
    pub async fn views(&self) -> Vec<ProviderView> {
        let mut out = Vec::new();
        for view in self.registry.views().await {
            out.push(view.to_view().await);
        }
        out
    }

    /// Snapshot of the first provider named `name`.
    pub async fn view(&self, name: &str) -> Option<ProviderView> {
        match self.registry.find(name).await {
            Some(view) => Some(view.to_view().await),
            None => None,
        }
    }

    /// Live notifications in display order.
    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.list().await
    }

    /// Dismisses a notification. Returns `false` if it was already gone.
    pub async fn dismiss(&self, id: u64) -> bool {
        self.notifications.dismiss(id).await
    }

    /// Tears down the session of provider `name` without a `closed` notification.
    pub async fn remove(&self, name: &str) -> bool {
        self.registry.remove(name).await
    }

    /// Restarts an exhausted session with a fresh retry budget.
    pub async fn resume(&self, name: &str) -> bool {
        self.registry.resume(name).await
    }

    /// Raw event stream (events published after this call).
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.runtime_token.cancel();
        self.notifications.shutdown();
        self.listener_stop.cancel();
    }
}

/// Forwards bus events to subscribers until `stop`, then drains what is left and
/// waits for subscriber queues to empty.
fn spawn_listener(
    mut rx: broadcast::Receiver<Event>,
    subs: SubscriberSet,
    stop: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let res = tokio::select! {
                biased;
                res = rx.recv() => res,
                _ = stop.cancelled() => break,
            };
            match res {
                Ok(ev) => subs.emit(&ev),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event listener lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
        loop {
            match rx.try_recv() {
                Ok(ev) => subs.emit(&ev),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event listener lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        subs.shutdown().await;
    })
}
