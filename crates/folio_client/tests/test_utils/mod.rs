//! Test utilities for Folio client tests.
//!
//! This module provides a scripted generation transport and request helpers.

use folio_core::{FieldName, GenerationRequest, ServerMessage};

pub mod mock_transport;

#[allow(unused_imports)]
pub use mock_transport::{ScriptStep, ScriptedConnector, ScriptedTransport};

/// Helper to create a streaming request for `field`.
pub fn create_test_request(field: FieldName) -> GenerationRequest {
    GenerationRequest::builder()
        .id("b1")
        .title("Rust Field Notes")
        .model("gpt-4o-mini")
        .content_type(field)
        .req_markdown("1. Intro")
        .count(1u64)
        .build()
        .expect("Failed to build test request")
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
