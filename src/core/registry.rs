//! # Session registry.
//!
//! Owns one [`Handle`] per configured provider, in configuration order:
//! - `spawn` → create view, start actor under a child token
//! - `remove` → cancel, join, `SessionRemoved`
//! - `resume` → restart an exhausted session with a fresh budget, same store
//! - `shutdown` → cancel all, join within grace, report stuck sessions
//!
//! ## Rules
//! - Exhausted sessions stay registered so their last snapshot remains visible.
//! - Duplicate provider names are allowed; name lookups act on the first match.
//! - Each session's token is a child of the runtime token.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::actor::{ActorExitReason, SessionActor};
use crate::core::machine::ConnState;
use crate::core::view::SessionView;
use crate::events::{Bus, Event, EventKind};
use crate::notifications::NotificationQueue;
use crate::policies::ReconnectPolicy;
use crate::providers::ProviderConfig;
use crate::transport::Connector;

/// Handle to a running (or finished) session actor.
struct Handle {
    view: Arc<SessionView>,
    join: JoinHandle<ActorExitReason>,
    cancel: CancellationToken,
}

/// Registry of provider sessions.
pub struct Registry {
    sessions: RwLock<Vec<Handle>>,
    bus: Bus,
    runtime_token: CancellationToken,
    connector: Arc<dyn Connector>,
    notifications: NotificationQueue,
    policy: ReconnectPolicy,
    next_id: AtomicU64,
}

impl Registry {
    pub fn new(
        bus: Bus,
        runtime_token: CancellationToken,
        connector: Arc<dyn Connector>,
        notifications: NotificationQueue,
        policy: ReconnectPolicy,
    ) -> Arc<Self> {
        Arc::new(Self {
            sessions: RwLock::new(Vec::new()),
            bus,
            runtime_token,
            connector,
            notifications,
            policy,
            next_id: AtomicU64::new(1),
        })
    }

    /// Creates a session for `provider` and starts its actor. Returns the session id.
    pub async fn spawn(&self, provider: ProviderConfig) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let view = Arc::new(SessionView::new(id, provider));
        let handle = self.start(view);
        self.sessions.write().await.push(handle);
        id
    }

    /// Views in configuration order.
    pub async fn views(&self) -> Vec<Arc<SessionView>> {
        self.sessions
            .read()
            .await
            .iter()
            .map(|h| Arc::clone(&h.view))
            .collect()
    }

    /// View of the first session named `name`.
    pub async fn find(&self, name: &str) -> Option<Arc<SessionView>> {
        self.sessions
            .read()
            .await
            .iter()
            .find(|h| h.view.name() == name)
            .map(|h| Arc::clone(&h.view))
    }

    /// Tears down the first session named `name`.
    pub async fn remove(&self, name: &str) -> bool {
        let handle = {
            let mut sessions = self.sessions.write().await;
            match sessions.iter().position(|h| h.view.name() == name) {
                Some(idx) => sessions.remove(idx),
                None => return false,
            }
        };
        handle.cancel.cancel();
        self.join_and_report(&handle.view, handle.join).await;
        true
    }

    /// Restarts the first session named `name` if it is exhausted.
    pub async fn resume(&self, name: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        let Some(slot) = sessions.iter_mut().find(|h| h.view.name() == name) else {
            return false;
        };
        if slot.view.status().await.state != ConnState::Exhausted || !slot.join.is_finished() {
            return false;
        }

        let view = Arc::clone(&slot.view);
        let old = std::mem::replace(slot, self.start(Arc::clone(&view)));
        drop(sessions);

        if let Err(e) = old.join.await {
            tracing::error!(provider = view.name(), error = %e, "session actor panicked");
        }
        self.bus.publish(
            Event::new(EventKind::SessionResumed)
                .with_provider(view.name())
                .with_session(view.id()),
        );
        true
    }

    /// Cancels every session and waits up to `grace` for them to stop.
    ///
    /// Returns the names of sessions that were still running (and were aborted).
    pub async fn shutdown(&self, grace: Duration) -> Result<(), Vec<String>> {
        let mut handles: Vec<Handle> = self.sessions.write().await.drain(..).collect();
        for h in &handles {
            h.cancel.cancel();
        }

        let joined = tokio::time::timeout(grace, async {
            for h in handles.iter_mut() {
                if let Err(e) = (&mut h.join).await {
                    tracing::error!(provider = h.view.name(), error = %e, "session actor panicked");
                }
            }
        })
        .await;

        let mut stuck = Vec::new();
        for h in &handles {
            if joined.is_err() && !h.join.is_finished() {
                h.join.abort();
                stuck.push(h.view.name().to_string());
            }
            self.publish_removed(&h.view);
        }

        if stuck.is_empty() { Ok(()) } else { Err(stuck) }
    }

    fn start(&self, view: Arc<SessionView>) -> Handle {
        let cancel = self.runtime_token.child_token();
        let actor = SessionActor::new(
            self.bus.clone(),
            Arc::clone(&view),
            Arc::clone(&self.connector),
            self.notifications.clone(),
            self.policy,
        );
        let token = cancel.clone();
        let join = tokio::spawn(async move { actor.run(token).await });
        Handle { view, join, cancel }
    }

    async fn join_and_report(&self, view: &SessionView, join: JoinHandle<ActorExitReason>) {
        match join.await {
            Ok(reason) => {
                tracing::debug!(provider = view.name(), ?reason, "session actor finished");
            }
            Err(e) => {
                tracing::error!(provider = view.name(), error = %e, "session actor panicked");
            }
        }
        self.publish_removed(view);
    }

    fn publish_removed(&self, view: &SessionView) {
        self.bus.publish(
            Event::new(EventKind::SessionRemoved)
                .with_provider(view.name())
                .with_session(view.id()),
        );
    }
}
