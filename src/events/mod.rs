//! Runtime events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: session actors, `Registry`, `Dashboard`.
//! - **Consumers**: the dashboard listener, which fans out to the `SubscriberSet`.
//!   The `NotificationQueue` is fed by session actors directly, never from the bus.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
