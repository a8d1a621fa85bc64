//! Wire messages for the generation endpoints.

use crate::FieldName;
use folio_error::{BuilderError, BuilderErrorKind};
use serde::{Deserialize, Serialize};

/// Status value that marks the end of a generation stream.
pub const FINISHED_STATUS: &str = "finished";

/// Request that opens a generation, sent as the first message on the duplex
/// connection (and as the body of the one-shot endpoint).
///
/// # Examples
///
/// ```
/// use folio_core::{FieldName, GenerationRequest};
///
/// let request = GenerationRequest::builder()
///     .id("b1")
///     .title("Rust Field Notes")
///     .model("gpt-4o-mini")
///     .content_type(FieldName::MdBody)
///     .req_markdown("1. Intro")
///     .count(3u64)
///     .build()
///     .unwrap();
///
/// let json = serde_json::to_value(&request).unwrap();
/// assert_eq!(json["contentType"], "mdBody");
/// assert_eq!(json["reqMarkdown"], "1. Intro");
/// assert_eq!(json["count"], 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct GenerationRequest {
    /// Record identifier
    pub id: String,
    /// Record title
    pub title: String,
    /// Model selector
    pub model: String,
    /// Field to generate
    pub content_type: FieldName,
    /// Seed text given to the model as context (usually the table of contents)
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_markdown: Option<String>,
    /// Per-editor request sequence number
    #[builder(default, setter(into, strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl GenerationRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// The stop message matching this request.
    pub fn stop_message(&self) -> StopMessage {
        StopMessage {
            id: self.id.clone(),
            title: self.title.clone(),
            action: ControlAction::Stop,
            count: self.count,
        }
    }

    /// Copy without the streaming-only fields, for the one-shot endpoint.
    pub fn one_shot(&self) -> Self {
        Self {
            req_markdown: None,
            count: None,
            ..self.clone()
        }
    }
}

impl From<GenerationRequestBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: GenerationRequestBuilderError) -> Self {
        match err {
            GenerationRequestBuilderError::UninitializedField(name) => {
                BuilderError::new(BuilderErrorKind::MissingField(name.to_string()))
            }
            GenerationRequestBuilderError::ValidationError(message) => {
                BuilderError::new(BuilderErrorKind::ValidationFailed(message))
            }
        }
    }
}

/// Control discriminator for messages sent after the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlAction {
    /// Ask the server to stop generating
    Stop,
}

/// Stop control message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopMessage {
    /// Record identifier
    pub id: String,
    /// Record title
    pub title: String,
    /// Always [`ControlAction::Stop`]
    pub action: ControlAction,
    /// Sequence number of the request being stopped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// Any message the client writes to the duplex connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientMessage {
    /// Stop control message (carries an `action` key)
    Stop(StopMessage),
    /// Initial generation request
    Request(GenerationRequest),
}

/// Message received from the duplex connection.
///
/// Every key is optional: a message may carry only progress, only a delta,
/// both, or just the terminal status.
///
/// # Examples
///
/// ```
/// use folio_core::ServerMessage;
///
/// let msg: ServerMessage =
///     serde_json::from_str(r#"{"gptResult":"body text","status":"finished"}"#).unwrap();
/// assert_eq!(msg.gpt_result.as_deref(), Some("body text"));
/// assert!(msg.is_finished());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerMessage {
    /// Server-reported progress marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpt_progress: Option<String>,
    /// Text delta to append
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpt_result: Option<String>,
    /// Stream status; only [`FINISHED_STATUS`] is meaningful
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ServerMessage {
    /// Whether this message ends the stream.
    pub fn is_finished(&self) -> bool {
        self.status.as_deref() == Some(FINISHED_STATUS)
    }
}
