//! Scripted transport standing in for the WebSocket connection.
//!
//! Shared with the editor tests, which add [`ScriptStep::Wait`] gates to
//! interleave user commands with the stream.

use async_trait::async_trait;
use folio_core::{ClientMessage, ServerMessage};
use folio_error::{GenerationError, GenerationErrorKind};
use folio_interface::{GenerationConnector, GenerationResult, GenerationTransport};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// One scripted inbound step.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum ScriptStep {
    /// Deliver a server message
    Message(ServerMessage),
    /// Fail the read with a transport error
    Fail(String),
    /// Hold further reads until the gate is notified
    Wait(Arc<Notify>),
}

impl From<ServerMessage> for ScriptStep {
    fn from(message: ServerMessage) -> Self {
        ScriptStep::Message(message)
    }
}

#[derive(Debug, Default)]
struct Shared {
    script: VecDeque<ScriptStep>,
    sent: Vec<ClientMessage>,
    closed: bool,
    connects: usize,
    refuse: bool,
}

/// Connector handing out transports that share one script and send log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConnector {
    shared: Arc<Mutex<Shared>>,
}

#[allow(dead_code)]
impl ScriptedConnector {
    /// Connector whose transport replays `steps`, then closes.
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        let shared = Shared {
            script: steps.into_iter().collect(),
            ..Default::default()
        };
        Self {
            shared: Arc::new(Mutex::new(shared)),
        }
    }

    /// Connector replaying plain messages.
    pub fn with_messages(messages: impl IntoIterator<Item = ServerMessage>) -> Self {
        Self::new(messages.into_iter().map(ScriptStep::Message))
    }

    /// Connector that refuses to connect.
    pub fn refusing() -> Self {
        let connector = Self::default();
        connector.shared.lock().unwrap().refuse = true;
        connector
    }

    /// Everything written to the connection so far.
    pub fn sent(&self) -> Vec<ClientMessage> {
        self.shared.lock().unwrap().sent.clone()
    }

    /// Number of stop messages written.
    pub fn stops_sent(&self) -> usize {
        self.sent()
            .iter()
            .filter(|m| matches!(m, ClientMessage::Stop(_)))
            .count()
    }

    /// Whether the client closed the connection.
    pub fn closed(&self) -> bool {
        self.shared.lock().unwrap().closed
    }

    /// Number of connections opened.
    pub fn connects(&self) -> usize {
        self.shared.lock().unwrap().connects
    }
}

#[async_trait]
impl GenerationConnector for ScriptedConnector {
    type Transport = ScriptedTransport;

    async fn connect(&self) -> GenerationResult<ScriptedTransport> {
        let mut shared = self.shared.lock().unwrap();
        if shared.refuse {
            return Err(GenerationError::new(GenerationErrorKind::Connection(
                "connection refused".to_string(),
            )));
        }
        shared.connects += 1;
        Ok(ScriptedTransport {
            shared: Arc::clone(&self.shared),
        })
    }
}

/// Transport popping scripted steps; an empty script reads as a server close.
#[derive(Debug)]
pub struct ScriptedTransport {
    shared: Arc<Mutex<Shared>>,
}

#[async_trait]
impl GenerationTransport for ScriptedTransport {
    async fn send(&mut self, message: &ClientMessage) -> GenerationResult<()> {
        self.shared.lock().unwrap().sent.push(message.clone());
        Ok(())
    }

    async fn recv(&mut self) -> Option<GenerationResult<ServerMessage>> {
        loop {
            let front = self.shared.lock().unwrap().script.front().cloned()?;
            match front {
                ScriptStep::Wait(gate) => {
                    // Pop only after the gate opens, so a cancelled read keeps waiting.
                    gate.notified().await;
                    self.shared.lock().unwrap().script.pop_front();
                }
                ScriptStep::Message(message) => {
                    self.shared.lock().unwrap().script.pop_front();
                    return Some(Ok(message));
                }
                ScriptStep::Fail(reason) => {
                    self.shared.lock().unwrap().script.pop_front();
                    return Some(Err(GenerationError::new(GenerationErrorKind::Transport(
                        reason,
                    ))));
                }
            }
        }
    }

    async fn close(&mut self) -> GenerationResult<()> {
        self.shared.lock().unwrap().closed = true;
        Ok(())
    }
}
