//! # WebSocket transport.
//!
//! [`WsConnector`] dials with `tokio_tungstenite::connect_async` and exposes text
//! frames as messages. Binary frames are forwarded when they are valid UTF-8; ping,
//! pong and raw frames are skipped (tungstenite answers pings itself).

use async_trait::async_trait;
use futures::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

use super::connector::{BoxLink, Connector, Link};
use crate::error::TransportError;

/// Connector for `ws://` and `wss://` endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct WsConnector;

impl WsConnector {
    /// Creates a connector.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self, endpoint: &Url) -> Result<BoxLink, TransportError> {
        let (stream, _response) =
            connect_async(endpoint.as_str())
                .await
                .map_err(|e| TransportError::Connect {
                    error: e.to_string(),
                })?;
        Ok(Box::new(WsLink { stream }))
    }

    fn name(&self) -> &'static str {
        "websocket"
    }
}

struct WsLink {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl Link for WsLink {
    async fn recv(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.stream.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text)),
                Ok(Message::Binary(bytes)) => match String::from_utf8(bytes) {
                    Ok(text) => return Some(Ok(text)),
                    Err(_) => {
                        tracing::debug!("skipping non-utf8 binary frame");
                        continue;
                    }
                },
                Ok(Message::Close(_)) => return None,
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => continue,
                Err(e) => {
                    return Some(Err(TransportError::Protocol {
                        error: e.to_string(),
                    }));
                }
            }
        }
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            tracing::debug!(error = %e, "websocket close failed");
        }
    }
}
