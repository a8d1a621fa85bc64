use folio_core::{
    ClientMessage, FieldName, GenerationRequest, GenerationSession, GenerationStatus,
    ServerMessage,
};
use folio_error::{BuilderError, BuilderErrorKind};
use serde_json::json;

fn request() -> GenerationRequest {
    GenerationRequest::builder()
        .id("b1")
        .title("Rust Field Notes")
        .model("gpt-4o-mini")
        .content_type(FieldName::MdBody)
        .count(2u64)
        .build()
        .unwrap()
}

#[test]
fn request_omits_absent_optional_keys() {
    let value = serde_json::to_value(request().one_shot()).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "b1",
            "title": "Rust Field Notes",
            "model": "gpt-4o-mini",
            "contentType": "mdBody",
        })
    );
}

#[test]
fn stop_message_carries_action_discriminator() {
    let stop = ClientMessage::Stop(request().stop_message());
    let value = serde_json::to_value(&stop).unwrap();
    assert_eq!(
        value,
        json!({ "id": "b1", "title": "Rust Field Notes", "action": "stop", "count": 2 })
    );
}

#[test]
fn client_messages_are_distinguishable_on_the_wire() {
    let stop: ClientMessage =
        serde_json::from_value(json!({ "id": "b1", "title": "t", "action": "stop", "count": 1 }))
            .unwrap();
    assert!(matches!(stop, ClientMessage::Stop(_)));

    let req: ClientMessage = serde_json::from_value(serde_json::to_value(request()).unwrap())
        .unwrap();
    assert!(matches!(req, ClientMessage::Request(_)));
}

#[test]
fn only_finished_status_is_terminal() {
    let progress: ServerMessage = serde_json::from_str(r#"{"gptProgress":"50%"}"#).unwrap();
    assert!(!progress.is_finished());
    assert_eq!(progress.gpt_result, None);

    let other: ServerMessage = serde_json::from_str(r#"{"status":"working"}"#).unwrap();
    assert!(!other.is_finished());

    let done: ServerMessage = serde_json::from_str(r#"{"status":"finished"}"#).unwrap();
    assert!(done.is_finished());
}

#[test]
fn session_terminal_states_are_final() {
    let mut session = GenerationSession::for_request(&request());
    assert_eq!(*session.status(), GenerationStatus::Idle);
    assert!(!session.finish());

    assert!(session.start());
    assert!(session.is_running());
    assert!(session.finish());
    assert!(!session.stop());
    assert!(!session.fail());
    assert!(!session.start());
    assert_eq!(*session.status(), GenerationStatus::Finished);
}

#[test]
fn session_tracks_progress_and_text() {
    let mut session = GenerationSession::for_request(&request());
    session.start();
    session.record_progress("10%");
    session.record_delta("# Title\n");
    session.record_progress("50%");
    session.record_delta("body");

    assert_eq!(session.progress_label().as_deref(), Some("50%"));
    assert_eq!(session.accumulated_text(), "# Title\nbody");
    assert_eq!(*session.field_name(), FieldName::MdBody);
}

#[test]
fn missing_model_maps_to_builder_error() {
    let err = GenerationRequest::builder()
        .id("b1")
        .title("Rust Field Notes")
        .content_type(FieldName::Summary)
        .build()
        .map_err(BuilderError::from)
        .unwrap_err();
    assert_eq!(
        err.kind(),
        &BuilderErrorKind::MissingField("model".into())
    );
}
