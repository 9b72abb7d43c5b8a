//! # Ordered, dismissible, auto-expiring notification list.
//!
//! ```text
//! push(level, text) ──► entries.push(Entry)          (insertion order = display order)
//!                   └─► spawn expiry timer ──► sleep(ttl) ──► remove(id)
//!                                          └─► cancelled (dismiss / shutdown)
//!
//! dismiss(id) ──► remove(id) ──► cancel that entry's timer
//! ```
//!
//! ## Rules
//! - Removal is idempotent: dismissing or expiring a missing id is a no-op.
//! - Each entry's timer is a child of the queue token; [`NotificationQueue::shutdown`]
//!   cancels every pending timer.
//! - Timers hold a weak reference and never keep the queue alive.
//! - `ttl == 0` disables expiry (entries live until dismissed).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use super::notification::{Level, Notification, describe};
use crate::events::Event;

struct Entry {
    note: Notification,
    expiry: CancellationToken,
}

struct Inner {
    entries: RwLock<Vec<Entry>>,
    ttl: Duration,
    next_id: AtomicU64,
    token: CancellationToken,
}

impl Inner {
    async fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.write().await;
        match entries.iter().position(|e| e.note.id == id) {
            Some(idx) => {
                let entry = entries.remove(idx);
                entry.expiry.cancel();
                true
            }
            None => false,
        }
    }
}

/// Shared notification list. Cheap to clone.
#[derive(Clone)]
pub struct NotificationQueue {
    inner: Arc<Inner>,
}

impl NotificationQueue {
    /// Creates an empty queue whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: RwLock::new(Vec::new()),
                ttl,
                next_id: AtomicU64::new(1),
                token: CancellationToken::new(),
            }),
        }
    }

    /// Appends a notification and starts its expiry timer.
    pub async fn push(&self, level: Level, text: impl Into<Arc<str>>) -> Notification {
        let note = Notification {
            id: self.inner.next_id.fetch_add(1, Ordering::Relaxed),
            level,
            text: text.into(),
        };
        let expiry = self.inner.token.child_token();

        self.inner.entries.write().await.push(Entry {
            note: note.clone(),
            expiry: expiry.clone(),
        });

        if !self.inner.ttl.is_zero() && !expiry.is_cancelled() {
            spawn_expiry(Arc::downgrade(&self.inner), note.id, self.inner.ttl, expiry);
        }
        note
    }

    /// Pushes the notification describing `ev`, if it is user-facing.
    pub async fn on_event(&self, ev: &Event) -> Option<Notification> {
        let (level, text) = describe(ev)?;
        Some(self.push(level, text).await)
    }

    /// Removes the notification with `id`. Returns `false` if it was already gone.
    pub async fn dismiss(&self, id: u64) -> bool {
        self.inner.remove(id).await
    }

    /// Live notifications in insertion order.
    pub async fn list(&self) -> Vec<Notification> {
        self.inner
            .entries
            .read()
            .await
            .iter()
            .map(|e| e.note.clone())
            .collect()
    }

    /// Number of live notifications.
    pub async fn len(&self) -> usize {
        self.inner.entries.read().await.len()
    }

    /// True when nothing is shown.
    pub async fn is_empty(&self) -> bool {
        self.inner.entries.read().await.is_empty()
    }

    /// Cancels all pending expiry timers. Entries already shown stay until dismissed.
    pub fn shutdown(&self) {
        self.inner.token.cancel();
    }
}

fn spawn_expiry(inner: Weak<Inner>, id: u64, ttl: Duration, expiry: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(ttl) => {
                if let Some(inner) = inner.upgrade() {
                    inner.remove(id).await;
                }
            }
            _ = expiry.cancelled() => {}
        }
    });
}
