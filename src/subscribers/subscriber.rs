//! # Event subscriber trait.
//!
//! [`Subscribe`] is the extension point for observing session lifecycle events
//! (logging, metrics, custom renderers that want push updates).
//!
//! Each subscriber gets:
//! - **Dedicated worker task** (runs independently)
//! - **Per-subscriber bounded queue** (capacity via [`Subscribe::queue_capacity`])
//! - **Panic isolation** (a panicking handler is logged; the worker keeps going)
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use tickerboard::{Event, EventKind, Subscribe};
//!
//! struct Outages;
//!
//! #[async_trait]
//! impl Subscribe for Outages {
//!     async fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::SessionExhausted) {
//!             // page someone
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "outages" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Event subscriber for runtime observability.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
/// - Slow processing affects only this subscriber's queue.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event. Events arrive in FIFO order per subscriber.
    async fn on_event(&self, event: &Event);

    /// Subscriber name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred queue capacity (clamped to at least 1). Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
