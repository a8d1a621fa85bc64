//! Core type definitions for the Folio interface.

use folio_core::ServerMessage;
use folio_error::GenerationError;
use serde::{Deserialize, Serialize};

/// Result type for generation channel operations.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// How a generation stream ended without error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Termination {
    /// Server sent the terminal status
    Finished,
    /// Server closed the connection after a user stop
    Stopped,
}

/// One item of a generation stream.
///
/// Transport failures travel as the `Err` side of [`GenerationResult`], so a
/// stream item is `Progress | Delta | Terminal | Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationEvent {
    /// Server-reported progress marker
    Progress(String),
    /// Text to append to the field
    Delta(String),
    /// End of stream
    Terminal(Termination),
}

impl GenerationEvent {
    /// Expand one server message into events, in delivery order:
    /// progress, then delta, then terminal.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_core::ServerMessage;
    /// use folio_interface::{GenerationEvent, Termination};
    ///
    /// let msg = ServerMessage {
    ///     gpt_progress: Some("99%".into()),
    ///     gpt_result: Some("end".into()),
    ///     status: Some("finished".into()),
    /// };
    /// assert_eq!(
    ///     GenerationEvent::from_server_message(msg),
    ///     vec![
    ///         GenerationEvent::Progress("99%".into()),
    ///         GenerationEvent::Delta("end".into()),
    ///         GenerationEvent::Terminal(Termination::Finished),
    ///     ]
    /// );
    /// ```
    pub fn from_server_message(message: ServerMessage) -> Vec<GenerationEvent> {
        let finished = message.is_finished();
        let mut events = Vec::with_capacity(3);
        if let Some(label) = message.gpt_progress {
            events.push(GenerationEvent::Progress(label));
        }
        if let Some(delta) = message.gpt_result {
            events.push(GenerationEvent::Delta(delta));
        }
        if finished {
            events.push(GenerationEvent::Terminal(Termination::Finished));
        }
        events
    }

    /// Whether this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationEvent::Terminal(_))
    }
}
