//! Provider transports.
//!
//! - [`Connector`], [`Link`] the seam between session actors and the network
//! - [`WsConnector`] WebSocket implementation on `tokio-tungstenite`

mod connector;
mod ws;

pub use connector::{BoxLink, Connector, Link};
pub use ws::WsConnector;
