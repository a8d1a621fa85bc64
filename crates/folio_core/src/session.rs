//! State of one generation request.

use crate::{FieldName, GenerationRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifecycle of a generation session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GenerationStatus {
    /// Created, channel not open yet
    #[default]
    Idle,
    /// Channel open, chunks arriving
    Running,
    /// Server sent the terminal status
    Finished,
    /// User asked to stop
    Stopped,
    /// Channel failed or closed early
    Errored,
}

impl GenerationStatus {
    /// Terminal states never change again.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GenerationStatus::Finished | GenerationStatus::Stopped | GenerationStatus::Errored
        )
    }
}

/// One in-flight or completed generation.
///
/// Transitions only move forward: `idle → running → finished | stopped | errored`.
/// A new generation gets a new session.
///
/// # Examples
///
/// ```
/// use folio_core::{FieldName, GenerationSession, GenerationStatus};
///
/// let mut session = GenerationSession::new(FieldName::MdBody, "b1", "Rust Field Notes", None);
/// assert!(session.start());
/// session.record_delta("# Title\n");
/// assert!(session.stop());
/// assert!(!session.stop());
///
/// // Deltas still in flight after a stop are kept.
/// session.record_delta("late");
/// assert_eq!(session.accumulated_text(), "# Title\nlate");
/// assert_eq!(*session.status(), GenerationStatus::Stopped);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct GenerationSession {
    field_name: FieldName,
    record_id: String,
    record_title: String,
    prompt_seed: Option<String>,
    accumulated_text: String,
    status: GenerationStatus,
    progress_label: Option<String>,
}

impl GenerationSession {
    /// New idle session.
    pub fn new(
        field_name: FieldName,
        record_id: impl Into<String>,
        record_title: impl Into<String>,
        prompt_seed: Option<String>,
    ) -> Self {
        Self {
            field_name,
            record_id: record_id.into(),
            record_title: record_title.into(),
            prompt_seed,
            accumulated_text: String::new(),
            status: GenerationStatus::Idle,
            progress_label: None,
        }
    }

    /// New idle session for a request.
    pub fn for_request(request: &GenerationRequest) -> Self {
        Self::new(
            request.content_type,
            request.id.clone(),
            request.title.clone(),
            request.req_markdown.clone(),
        )
    }

    /// Whether chunks are still expected.
    pub fn is_running(&self) -> bool {
        self.status == GenerationStatus::Running
    }

    /// `idle → running`. Returns whether the transition happened.
    pub fn start(&mut self) -> bool {
        self.transition(GenerationStatus::Idle, GenerationStatus::Running)
    }

    /// `running → finished`. Returns whether the transition happened.
    pub fn finish(&mut self) -> bool {
        self.transition(GenerationStatus::Running, GenerationStatus::Finished)
    }

    /// `running → stopped`. Returns whether the transition happened.
    pub fn stop(&mut self) -> bool {
        self.transition(GenerationStatus::Running, GenerationStatus::Stopped)
    }

    /// `running → errored`. Returns whether the transition happened.
    pub fn fail(&mut self) -> bool {
        self.transition(GenerationStatus::Running, GenerationStatus::Errored)
    }

    /// Remember the latest progress marker.
    pub fn record_progress(&mut self, label: impl Into<String>) {
        self.progress_label = Some(label.into());
    }

    /// Grow the accumulated text.
    pub fn record_delta(&mut self, delta: &str) {
        self.accumulated_text.push_str(delta);
    }

    fn transition(&mut self, from: GenerationStatus, to: GenerationStatus) -> bool {
        if self.status != from {
            return false;
        }
        debug!(field = %self.field_name, %from, %to, "Generation session transition");
        self.status = to;
        true
    }
}
