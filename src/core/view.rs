//! # Read-side of a session.
//!
//! [`SessionView`] is the part of a session the renderer may see. The session actor is
//! its only writer; everyone else gets cloned snapshots through [`ProviderView`].

use tokio::sync::RwLock;

use crate::core::machine::ConnState;
use crate::providers::ProviderConfig;
use crate::records::{Record, RecordStore};
use crate::status::{Severity, classify};

/// Connection status mirrored from the session state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionStatus {
    pub state: ConnState,
    pub attempts: u32,
}

/// Rendering snapshot for one provider.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderView {
    /// Provider display name.
    pub name: String,
    /// Health derived from consecutive closes.
    pub severity: Severity,
    /// Current connection state.
    pub state: ConnState,
    /// Consecutive closes since the last open.
    pub attempts: u32,
    /// Latest record per ticker, ordered by ticker.
    pub records: Vec<Record>,
}

/// Shared state of one session.
pub struct SessionView {
    id: u64,
    provider: ProviderConfig,
    store: RwLock<RecordStore>,
    status: RwLock<SessionStatus>,
}

impl SessionView {
    pub(crate) fn new(id: u64, provider: ProviderConfig) -> Self {
        Self {
            id,
            provider,
            store: RwLock::new(RecordStore::new()),
            status: RwLock::new(SessionStatus {
                state: ConnState::Disconnected,
                attempts: 0,
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.provider.name
    }

    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    pub async fn status(&self) -> SessionStatus {
        *self.status.read().await
    }

    /// Records ordered by ticker.
    pub async fn snapshot(&self) -> Vec<Record> {
        self.store.read().await.sorted_snapshot()
    }

    pub async fn to_view(&self) -> ProviderView {
        let status = self.status().await;
        ProviderView {
            name: self.provider.name.clone(),
            severity: classify(status.attempts),
            state: status.state,
            attempts: status.attempts,
            records: self.snapshot().await,
        }
    }

    pub(crate) async fn upsert(&self, record: Record) -> Option<Record> {
        self.store.write().await.upsert(record)
    }

    pub(crate) async fn set_status(&self, state: ConnState, attempts: u32) {
        *self.status.write().await = SessionStatus { state, attempts };
    }
}
