//! In-memory record store that counts calls.

use async_trait::async_trait;
use folio_core::{FieldName, GenerationRequest, NewRecord, Record, RecordPatch};
use folio_error::{FolioResult, StoreError, StoreErrorKind};
use folio_interface::RecordStore;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct State {
    record: Record,
    fields: HashMap<FieldName, String>,
    failing_field_fetches: usize,
    fail_updates: bool,
    generated: String,
    field_fetches: usize,
    updates: Vec<RecordPatch>,
    generate_requests: Vec<GenerationRequest>,
}

/// Record store over one in-memory record.
#[derive(Debug, Default)]
pub struct MockStore {
    state: Mutex<State>,
}

#[allow(dead_code)]
impl MockStore {
    /// Store holding `record`.
    pub fn new(record: Record) -> Self {
        Self {
            state: Mutex::new(State {
                record,
                ..Default::default()
            }),
        }
    }

    /// Serve `text` for a separately fetched field.
    pub fn with_field(self, name: FieldName, text: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .fields
            .insert(name, text.to_string());
        self
    }

    /// Text returned by the one-shot generation endpoint.
    pub fn with_generated(self, text: &str) -> Self {
        self.state.lock().unwrap().generated = text.to_string();
        self
    }

    /// Fail the next `count` field fetches.
    pub fn fail_field_fetches(&self, count: usize) {
        self.state.lock().unwrap().failing_field_fetches = count;
    }

    /// Reject every update.
    pub fn fail_updates(&self) {
        self.state.lock().unwrap().fail_updates = true;
    }

    /// Number of field fetches attempted.
    pub fn field_fetches(&self) -> usize {
        self.state.lock().unwrap().field_fetches
    }

    /// Patches received, accepted or not.
    pub fn updates(&self) -> Vec<RecordPatch> {
        self.state.lock().unwrap().updates.clone()
    }

    /// One-shot generation requests received.
    pub fn generate_requests(&self) -> Vec<GenerationRequest> {
        self.state.lock().unwrap().generate_requests.clone()
    }
}

#[async_trait]
impl RecordStore for MockStore {
    async fn fetch_record(&self, id: &str) -> FolioResult<Record> {
        let state = self.state.lock().unwrap();
        if state.record.id != id {
            return Err(StoreError::new(StoreErrorKind::NotFound(id.to_string())).into());
        }
        Ok(state.record.clone())
    }

    async fn fetch_field(&self, _id: &str, field: FieldName) -> FolioResult<String> {
        let mut state = self.state.lock().unwrap();
        state.field_fetches += 1;
        if state.failing_field_fetches > 0 {
            state.failing_field_fetches -= 1;
            return Err(StoreError::new(StoreErrorKind::Request("connection reset".into())).into());
        }
        Ok(state.fields.get(&field).cloned().unwrap_or_default())
    }

    async fn update_record(&self, _id: &str, patch: &RecordPatch) -> FolioResult<Record> {
        let mut state = self.state.lock().unwrap();
        state.updates.push(patch.clone());
        if state.fail_updates {
            return Err(StoreError::new(StoreErrorKind::from_status(500, "database down")).into());
        }
        Ok(state.record.clone())
    }

    async fn create_record(&self, record: &NewRecord) -> FolioResult<Record> {
        Ok(Record {
            id: "new".to_string(),
            title: record.title.clone(),
            toc: record.toc.clone(),
            ..Default::default()
        })
    }

    async fn delete_record(&self, _id: &str) -> FolioResult<()> {
        Ok(())
    }

    async fn generation_in_progress(&self, _id: &str) -> FolioResult<bool> {
        Ok(self.state.lock().unwrap().record.generating)
    }

    async fn generate_text(&self, request: &GenerationRequest) -> FolioResult<String> {
        let mut state = self.state.lock().unwrap();
        state.generate_requests.push(request.clone());
        Ok(state.generated.clone())
    }
}
