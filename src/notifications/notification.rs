//! # User-facing notification.

use std::fmt;
use std::sync::Arc;

use crate::events::{Event, EventKind};

/// Notification severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// Connection established.
    Info,
    /// Connection lost, retrying.
    Warn,
    /// Retry budget exhausted.
    Error,
}

impl Level {
    /// Short stable label.
    pub fn as_label(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// A transient, dismissible message.
///
/// Identity is `id`: two notifications with the same text are distinct entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Unique id within its queue.
    pub id: u64,
    /// Severity.
    pub level: Level,
    /// Rendered text.
    pub text: Arc<str>,
}

/// Maps a lifecycle event to the notification shown for it.
///
/// Returns `None` for events users are not notified about.
pub fn describe(ev: &Event) -> Option<(Level, String)> {
    let provider = ev.provider.as_deref().unwrap_or_default();
    match ev.kind {
        EventKind::SessionOpened => Some((Level::Info, format!("Connected to {provider}"))),
        EventKind::SessionClosed => Some((
            Level::Warn,
            format!("Connection to {provider} was closed. Trying to reconnect"),
        )),
        EventKind::SessionExhausted => Some((
            Level::Error,
            // `attempt` counts dials; the first one was not a reconnect.
            format!(
                "Tried to reconnect {} times. Won't repeat",
                ev.attempt.unwrap_or_default().saturating_sub(1)
            ),
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_texts() {
        let opened = Event::new(EventKind::SessionOpened).with_provider("Stocks");
        assert_eq!(
            describe(&opened),
            Some((Level::Info, "Connected to Stocks".to_string()))
        );

        let closed = Event::new(EventKind::SessionClosed)
            .with_provider("Stocks")
            .with_attempt(1);
        assert_eq!(
            describe(&closed),
            Some((
                Level::Warn,
                "Connection to Stocks was closed. Trying to reconnect".to_string()
            ))
        );

        let exhausted = Event::new(EventKind::SessionExhausted)
            .with_provider("Stocks")
            .with_attempt(3);
        assert_eq!(
            describe(&exhausted),
            Some((Level::Error, "Tried to reconnect 2 times. Won't repeat".to_string()))
        );
    }

    #[test]
    fn exhaustion_text_counts_reconnects_not_dials() {
        let single = Event::new(EventKind::SessionExhausted)
            .with_provider("Stocks")
            .with_attempt(1);
        assert_eq!(
            describe(&single).map(|(_, text)| text),
            Some("Tried to reconnect 0 times. Won't repeat".to_string())
        );

        let budget = Event::new(EventKind::SessionExhausted)
            .with_provider("Stocks")
            .with_attempt(1001);
        assert_eq!(
            describe(&budget).map(|(_, text)| text),
            Some("Tried to reconnect 1000 times. Won't repeat".to_string())
        );
    }

    #[test]
    fn internal_events_are_silent() {
        for kind in [
            EventKind::SessionStarting,
            EventKind::ReconnectScheduled,
            EventKind::RecordDropped,
            EventKind::SessionRemoved,
            EventKind::ShutdownRequested,
        ] {
            assert!(describe(&Event::new(kind).with_provider("p")).is_none());
        }
    }
}
