//! WebSocket transport for the streaming generation endpoint.
//!
//! Messages are JSON text frames. Binary, ping and pong frames are skipped;
//! a close frame ends the inbound sequence.

use async_trait::async_trait;
use folio_core::{ClientMessage, ServerMessage};
use folio_error::{GenerationError, GenerationErrorKind};
use folio_interface::{GenerationConnector, GenerationResult, GenerationTransport};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tracing::{debug, error, instrument, trace};

use crate::config::GenerationConfig;

/// Opens a fresh WebSocket connection per generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsConnector {
    url: String,
}

impl WsConnector {
    /// Connector for an explicit endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Connector for the configured endpoint.
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(config.ws_url.clone())
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GenerationConnector for WsConnector {
    type Transport = WsTransport;

    #[instrument(name = "ws_connect", skip(self), fields(url = %self.url))]
    async fn connect(&self) -> GenerationResult<WsTransport> {
        let (ws_stream, _) = connect_async(self.url.as_str()).await.map_err(|e| {
            error!("WebSocket connection failed: {}", e);
            GenerationError::new(GenerationErrorKind::Connection(e.to_string()))
        })?;

        debug!("WebSocket connection established");
        Ok(WsTransport { ws_stream })
    }
}

/// Active WebSocket connection carrying one generation.
pub struct WsTransport {
    ws_stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl GenerationTransport for WsTransport {
    async fn send(&mut self, message: &ClientMessage) -> GenerationResult<()> {
        let json = serde_json::to_string(message).map_err(|e| {
            error!("Failed to serialize message: {}", e);
            GenerationError::new(GenerationErrorKind::Serialization(e.to_string()))
        })?;

        trace!("Outbound JSON: {}", json);

        self.ws_stream
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| {
                error!("Failed to send message: {}", e);
                GenerationError::new(GenerationErrorKind::Send(e.to_string()))
            })
    }

    async fn recv(&mut self) -> Option<GenerationResult<ServerMessage>> {
        while let Some(msg_result) = self.ws_stream.next().await {
            let msg = match msg_result {
                Ok(msg) => msg,
                Err(e) => {
                    return Some(Err(GenerationError::new(GenerationErrorKind::Transport(
                        e.to_string(),
                    ))));
                }
            };

            match msg {
                Message::Text(text) => {
                    trace!("Received frame: {}", text);
                    let parsed = serde_json::from_str::<ServerMessage>(&text).map_err(|e| {
                        error!("Failed to parse server message: {}", e);
                        GenerationError::new(GenerationErrorKind::InvalidServerMessage(
                            e.to_string(),
                        ))
                    });
                    return Some(parsed);
                }
                Message::Close(frame) => {
                    debug!(?frame, "Server sent close frame");
                    return None;
                }
                other => {
                    trace!(?other, "Skipping non-text frame");
                }
            }
        }

        None
    }

    async fn close(&mut self) -> GenerationResult<()> {
        self.ws_stream.close(None).await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::Transport(format!("Close error: {}", e)))
        })
    }
}
