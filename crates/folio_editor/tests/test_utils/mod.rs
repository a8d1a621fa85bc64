//! Test utilities for Folio editor tests.
//!
//! Provides a gated scripted generation transport, a counting in-memory record
//! store, and message helpers.

use folio_core::{Record, ServerMessage};

pub mod mock_store;
#[path = "../../../folio_client/tests/test_utils/mock_transport.rs"]
pub mod mock_transport;

#[allow(unused_imports)]
pub use mock_store::MockStore;
#[allow(unused_imports)]
pub use mock_transport::{ScriptStep, ScriptedConnector};

/// Record with a table of contents and an unloaded body.
#[allow(dead_code)]
pub fn create_test_record() -> Record {
    Record {
        id: "b1".to_string(),
        title: "Rust Field Notes".to_string(),
        toc: Some("1. Intro".to_string()),
        summary: Some("A field guide.".to_string()),
        ..Default::default()
    }
}

/// Server message carrying only a text delta.
#[allow(dead_code)]
pub fn delta(text: &str) -> ServerMessage {
    ServerMessage {
        gpt_result: Some(text.to_string()),
        ..Default::default()
    }
}

/// Server message carrying only a progress label.
#[allow(dead_code)]
pub fn progress(label: &str) -> ServerMessage {
    ServerMessage {
        gpt_progress: Some(label.to_string()),
        ..Default::default()
    }
}

/// Server message ending the stream, optionally with a final delta.
#[allow(dead_code)]
pub fn finished(text: Option<&str>) -> ServerMessage {
    ServerMessage {
        gpt_result: text.map(str::to_string),
        status: Some("finished".to_string()),
        ..Default::default()
    }
}
