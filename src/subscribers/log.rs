//! # LogWriter: events as `tracing` records
//!
//! Lifecycle transitions are logged at `info`/`warn`/`error`, bookkeeping at `debug`.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! INFO  session opened provider="Stocks" session=1
//! WARN  session closed provider="Stocks" session=1 attempt=1 reason="protocol error: ..."
//! DEBUG reconnect scheduled provider="Stocks" session=1 attempt=1 delay_ms=10000
//! ERROR session exhausted provider="Stocks" session=1 attempt=1000
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Logging subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let provider = e.provider.as_deref().unwrap_or("-");
        let reason = e.reason.as_deref().unwrap_or("");
        match e.kind {
            EventKind::SessionStarting => {
                tracing::debug!(provider, session = e.session, attempt = e.attempt, "session starting");
            }
            EventKind::SessionOpened => {
                tracing::info!(provider, session = e.session, "session opened");
            }
            EventKind::SessionClosed => {
                tracing::warn!(provider, session = e.session, attempt = e.attempt, reason, "session closed");
            }
            EventKind::ReconnectScheduled => {
                tracing::debug!(
                    provider,
                    session = e.session,
                    attempt = e.attempt,
                    delay_ms = e.delay_ms,
                    "reconnect scheduled"
                );
            }
            EventKind::SessionExhausted => {
                tracing::error!(provider, session = e.session, attempt = e.attempt, "session exhausted");
            }
            EventKind::RecordDropped => {
                tracing::debug!(provider, session = e.session, reason, "record dropped");
            }
            EventKind::SessionRemoved => {
                tracing::info!(provider, session = e.session, "session removed");
            }
            EventKind::SessionResumed => {
                tracing::info!(provider, session = e.session, "session resumed");
            }
            EventKind::ShutdownRequested => {
                tracing::info!("shutdown requested");
            }
            EventKind::AllStoppedWithin => {
                tracing::info!("all sessions stopped within grace");
            }
            EventKind::GraceExceeded => {
                tracing::warn!(stuck = reason, "grace exceeded");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
