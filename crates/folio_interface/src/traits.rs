//! Trait definitions for the editor's collaborators.

use crate::GenerationResult;
use async_trait::async_trait;
use folio_core::{
    ClientMessage, FieldName, GenerationRequest, NewRecord, Record, RecordPatch, ServerMessage,
};
use folio_error::FolioResult;

/// REST backend that persists book records.
///
/// The editor core only consumes this; it never owns storage.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch a record by id (large fields usually omitted).
    async fn fetch_record(&self, id: &str) -> FolioResult<Record>;

    /// Fetch one large field of a record.
    async fn fetch_field(&self, id: &str, field: FieldName) -> FolioResult<String>;

    /// Partial update with only the changed fields. Returns the stored record.
    async fn update_record(&self, id: &str, patch: &RecordPatch) -> FolioResult<Record>;

    /// Create a record.
    async fn create_record(&self, record: &NewRecord) -> FolioResult<Record>;

    /// Delete a record.
    async fn delete_record(&self, id: &str) -> FolioResult<()>;

    /// Whether the backend is generating content for a record right now.
    async fn generation_in_progress(&self, id: &str) -> FolioResult<bool>;

    /// Non-streaming generation for short fields. Returns the generated text.
    async fn generate_text(&self, request: &GenerationRequest) -> FolioResult<String>;
}

/// One open duplex connection to the generation service.
///
/// `recv` must be cancel-safe: dropping its future before it resolves must not
/// lose a message, since the editor polls it inside `select!`.
#[async_trait]
pub trait GenerationTransport: Send {
    /// Write one message.
    async fn send(&mut self, message: &ClientMessage) -> GenerationResult<()>;

    /// Next inbound message. `None` means the connection closed.
    async fn recv(&mut self) -> Option<GenerationResult<ServerMessage>>;

    /// Close the connection from this side.
    async fn close(&mut self) -> GenerationResult<()>;
}

/// Factory for fresh duplex connections. Every generation gets its own.
#[async_trait]
pub trait GenerationConnector: Send + Sync {
    /// Transport produced by this connector.
    type Transport: GenerationTransport;

    /// Establish a new connection.
    async fn connect(&self) -> GenerationResult<Self::Transport>;
}
