//! Single-use duplex channel for one streaming generation.
//!
//! A [`GenerationChannel`] sends the request as its first message, then turns
//! inbound server messages into an ordered sequence of [`GenerationEvent`]s.
//!
//! # Termination
//!
//! - `status == "finished"` ends the stream with `Terminal(Finished)` and the
//!   channel closes its transport.
//! - After [`GenerationChannel::stop`], a server-side close ends the stream
//!   with `Terminal(Stopped)`.
//! - Any other close or read failure is an `Err` item, reported apart from the
//!   graceful endings.
//!
//! # Example
//!
//! ```no_run
//! use folio_client::{GenerationChannel, WsConnector};
//! use folio_core::{FieldName, GenerationRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = WsConnector::new("ws://localhost:8080/api/gpt/stream");
//! let request = GenerationRequest::builder()
//!     .id("b1")
//!     .title("Rust Field Notes")
//!     .model("gpt-4o-mini")
//!     .content_type(FieldName::MdBody)
//!     .build()?;
//!
//! let mut channel = GenerationChannel::open(&connector, request).await?;
//! while let Some(event) = channel.next_event().await {
//!     println!("{:?}", event?);
//! }
//! # Ok(())
//! # }
//! ```

use folio_core::{ClientMessage, GenerationRequest};
use folio_error::{GenerationError, GenerationErrorKind};
use folio_interface::{
    GenerationConnector, GenerationEvent, GenerationResult, GenerationTransport, Termination,
};
use futures_util::stream::{self, Stream};
use std::collections::VecDeque;
use tracing::{debug, error, info, instrument, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelState {
    Running,
    Closed,
}

/// One open generation stream.
///
/// Never reused: once it has ended, open a new channel for the next request.
pub struct GenerationChannel<T> {
    transport: T,
    request: GenerationRequest,
    state: ChannelState,
    stop_sent: bool,
    pending: VecDeque<GenerationEvent>,
}

impl<T: GenerationTransport> GenerationChannel<T> {
    /// Connect and send `request` as the first outbound message.
    ///
    /// # Errors
    ///
    /// Fails when the connection cannot be established or the request cannot
    /// be written.
    #[instrument(
        name = "generation_channel_open",
        skip(connector, request),
        fields(record_id = %request.id, field = %request.content_type)
    )]
    pub async fn open<C>(connector: &C, request: GenerationRequest) -> GenerationResult<Self>
    where
        C: GenerationConnector<Transport = T>,
    {
        let mut transport = connector.connect().await?;
        debug!("Connection established, sending request");

        transport
            .send(&ClientMessage::Request(request.clone()))
            .await?;

        info!(model = %request.model, "Generation started");
        Ok(Self {
            transport,
            request,
            state: ChannelState::Running,
            stop_sent: false,
            pending: VecDeque::new(),
        })
    }

    /// Request this channel was opened with.
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// Whether the stream has not ended yet.
    pub fn is_running(&self) -> bool {
        self.state == ChannelState::Running
    }

    /// Whether a stop message was sent.
    pub fn stop_requested(&self) -> bool {
        self.stop_sent
    }

    /// Ask the server to stop generating.
    ///
    /// Only sends the stop message; the stream keeps delivering whatever the
    /// server emits until it closes. Returns `Ok(false)` without sending when
    /// the channel has ended or a stop was already sent.
    ///
    /// # Errors
    ///
    /// Fails when the stop message cannot be written.
    #[instrument(name = "generation_channel_stop", skip(self), fields(record_id = %self.request.id))]
    pub async fn stop(&mut self) -> GenerationResult<bool> {
        if !self.is_running() || self.stop_sent {
            debug!(
                running = self.is_running(),
                stop_sent = self.stop_sent,
                "Ignoring stop"
            );
            return Ok(false);
        }

        self.transport
            .send(&ClientMessage::Stop(self.request.stop_message()))
            .await?;
        self.stop_sent = true;
        info!("Stop requested");
        Ok(true)
    }

    /// Next event in arrival order, or `None` once the stream has ended.
    ///
    /// Cancel-safe when the transport's `recv` is.
    pub async fn next_event(&mut self) -> Option<GenerationResult<GenerationEvent>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                trace!(?event, "Delivering event");
                return Some(Ok(event));
            }

            if self.state == ChannelState::Closed {
                return None;
            }

            match self.transport.recv().await {
                Some(Ok(message)) => {
                    trace!(?message, "Received server message");
                    let finished = message.is_finished();
                    self.pending
                        .extend(GenerationEvent::from_server_message(message));
                    if finished {
                        debug!("Received terminal status");
                        self.state = ChannelState::Closed;
                        self.close_transport().await;
                    }
                }
                Some(Err(e)) if self.stop_sent => {
                    debug!(error = %e, "Connection dropped after stop");
                    self.state = ChannelState::Closed;
                    return Some(Ok(GenerationEvent::Terminal(Termination::Stopped)));
                }
                Some(Err(e)) => {
                    error!(error = %e, "Generation stream failed");
                    self.state = ChannelState::Closed;
                    return Some(Err(e));
                }
                None if self.stop_sent => {
                    info!("Server closed the stream after stop");
                    self.state = ChannelState::Closed;
                    return Some(Ok(GenerationEvent::Terminal(Termination::Stopped)));
                }
                None => {
                    warn!("Server closed the stream without a terminal status");
                    self.state = ChannelState::Closed;
                    return Some(Err(GenerationError::new(
                        GenerationErrorKind::ClosedWithoutTerminal,
                    )));
                }
            }
        }
    }

    /// Give up on the stream from this side.
    ///
    /// Does not guarantee that the remote generation halts.
    pub async fn close(&mut self) {
        if self.state == ChannelState::Running {
            debug!("Closing generation channel");
            self.state = ChannelState::Closed;
            self.pending.clear();
            self.close_transport().await;
        }
    }

    /// Consume the channel into a lazy event stream, for consumers that never
    /// need to stop it.
    pub fn into_events(self) -> impl Stream<Item = GenerationResult<GenerationEvent>> {
        stream::unfold(self, |mut channel| async move {
            channel.next_event().await.map(|event| (event, channel))
        })
    }

    async fn close_transport(&mut self) {
        if let Err(e) = self.transport.close().await {
            debug!(error = %e, "Error while closing transport");
        }
    }
}
