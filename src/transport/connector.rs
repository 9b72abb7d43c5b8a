//! # Transport abstraction.
//!
//! A [`Connector`] dials an endpoint and hands back a [`Link`], an inbound message
//! stream for one live connection. Session actors only talk to these traits, so the
//! reconnect logic is exercised in tests with scripted in-memory links.
//!
//! ## Link contract
//! - `recv()` yields `Some(Ok(text))` per data message.
//! - `Some(Err(_))` reports a transport failure; the session treats it as a close.
//! - `None` means the peer closed the connection.
//! - `close()` is called only on intentional teardown and must not fail.

use async_trait::async_trait;
use url::Url;

use crate::error::TransportError;

/// Owned, boxed link.
pub type BoxLink = Box<dyn Link>;

/// One live connection.
#[async_trait]
pub trait Link: Send + 'static {
    /// Waits for the next inbound message.
    async fn recv(&mut self) -> Option<Result<String, TransportError>>;

    /// Closes the connection (intentional teardown).
    async fn close(&mut self);
}

/// Dials endpoints.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Establishes one connection to `endpoint`.
    async fn connect(&self, endpoint: &Url) -> Result<BoxLink, TransportError>;

    /// Name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
