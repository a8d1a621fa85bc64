//! Folds generation events into a field and its session.
//!
//! Events are applied synchronously in arrival order with no buffering, so a
//! field that starts as `initial` ends as `initial + d1 + ... + dn` for the
//! deltas `d1..dn` of one stream. Manual edits write the same text; whichever
//! write happens later wins.

use crate::StatusContext;
use folio_core::{Field, GenerationSession};
use folio_error::FieldError;
use folio_interface::{GenerationEvent, Termination};
use tracing::{debug, trace};

/// What the caller should do after an event was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ReconcileOutcome {
    /// More events are expected
    Continue,
    /// Server finished the generation
    Finished,
    /// Stream ended after a user stop
    Stopped,
}

/// Applies stream events to document state and reports progress.
#[derive(Debug, Clone)]
pub struct Reconciler {
    status: StatusContext,
}

impl Reconciler {
    /// Reconciler reporting through `status`.
    pub fn new(status: StatusContext) -> Self {
        Self { status }
    }

    /// Append a delta to the field's current text.
    ///
    /// # Errors
    ///
    /// Fails when the field is not loaded.
    pub fn apply_chunk(&self, field: &mut Field, delta: &str) -> Result<(), FieldError> {
        trace!(field = %field.name(), len = delta.len(), "Applying chunk");
        field.append(delta)
    }

    /// Show a progress marker. Never touches text.
    pub fn apply_progress(&self, label: &str) {
        self.status.set_loading(format!("generating… {}", label));
    }

    /// Fold one event into the field and the session.
    ///
    /// Deltas are applied whatever the session state, so text still in flight
    /// after a stop is kept.
    ///
    /// # Errors
    ///
    /// Fails when a delta arrives for a field that is not loaded.
    pub fn apply(
        &self,
        field: &mut Field,
        session: &mut GenerationSession,
        event: GenerationEvent,
    ) -> Result<ReconcileOutcome, FieldError> {
        match event {
            GenerationEvent::Progress(label) => {
                self.apply_progress(&label);
                session.record_progress(label);
                Ok(ReconcileOutcome::Continue)
            }
            GenerationEvent::Delta(delta) => {
                self.apply_chunk(field, &delta)?;
                session.record_delta(&delta);
                Ok(ReconcileOutcome::Continue)
            }
            GenerationEvent::Terminal(Termination::Finished) => {
                // A stopped session stays stopped even if the server finishes anyway.
                if session.finish() {
                    self.status.set_success(format!("Generated {}", field.name()));
                }
                debug!(field = %field.name(), status = %session.status(), "Generation finished");
                Ok(ReconcileOutcome::Finished)
            }
            GenerationEvent::Terminal(Termination::Stopped) => {
                session.stop();
                self.status.clear();
                debug!(field = %field.name(), "Generation stopped");
                Ok(ReconcileOutcome::Stopped)
            }
        }
    }
}
