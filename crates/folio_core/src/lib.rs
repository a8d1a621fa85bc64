//! Core data types for the Folio book-authoring client.
//!
//! This crate holds the document model (fields with a current text and a
//! server-confirmed baseline), the REST record shapes, the generation wire
//! messages, and the per-request generation session state machine.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod document;
mod field;
mod generation;
mod policy;
mod record;
mod session;

pub use document::Document;
pub use field::{Field, FieldContent, FieldName};
pub use generation::{
    ClientMessage, ControlAction, FINISHED_STATUS, GenerationRequest, GenerationRequestBuilder,
    GenerationRequestBuilderError, ServerMessage, StopMessage,
};
pub use policy::EditPolicy;
pub use record::{NewRecord, Record, RecordPatch};
pub use session::{GenerationSession, GenerationStatus};
