use folio_core::{Field, FieldContent, FieldName};
use folio_error::FieldErrorKind;
use std::str::FromStr;
use strum::IntoEnumIterator;

#[test]
fn wire_names_round_trip() {
    for name in FieldName::iter() {
        let parsed = FieldName::from_str(&name.to_string()).unwrap();
        assert_eq!(parsed, name);
    }
    assert_eq!(
        serde_json::to_string(&FieldName::MdBody).unwrap(),
        "\"mdBody\""
    );
}

#[test]
fn only_large_fields_are_lazy() {
    let lazy: Vec<_> = FieldName::iter().filter(|n| n.is_lazy()).collect();
    assert_eq!(lazy, vec![FieldName::MdBody, FieldName::Usage]);
}

#[test]
fn empty_text_is_not_the_same_as_unloaded() {
    let unloaded = Field::new(FieldName::MdBody);
    let empty = Field::loaded(FieldName::MdBody, "");

    assert!(!unloaded.is_loaded());
    assert_eq!(unloaded.current_text(), None);
    assert!(empty.is_loaded());
    assert_eq!(empty.current_text(), Some(""));
}

#[test]
fn text_operations_require_loaded_field() {
    let mut field = Field::new(FieldName::Usage);

    let err = field.append("x").unwrap_err();
    assert_eq!(err.kind, FieldErrorKind::NotLoaded("usage".to_string()));

    assert!(field.begin_loading().unwrap());
    let err = field.set_text("x").unwrap_err();
    assert_eq!(err.kind, FieldErrorKind::Loading("usage".to_string()));
}

#[test]
fn loading_lifecycle() {
    let mut field = Field::new(FieldName::MdBody);
    assert!(field.begin_loading().unwrap());
    assert_eq!(*field.content(), FieldContent::Loading);

    // A second fetch while the first is in flight is refused.
    assert!(field.begin_loading().is_err());

    field.abort_loading();
    assert_eq!(*field.content(), FieldContent::NotLoaded);

    assert!(field.begin_loading().unwrap());
    field.finish_loading("body");
    assert_eq!(field.baseline_text(), Some("body"));
    assert!(!field.begin_loading().unwrap());
}

#[test]
fn dirty_tracking_and_commit() {
    let mut field = Field::loaded(FieldName::Summary, "a");
    assert!(!field.is_dirty());

    field.set_text("b").unwrap();
    assert!(field.is_dirty());

    // Edits back to the baseline are clean again.
    field.set_text("a").unwrap();
    assert!(!field.is_dirty());

    field.append("bc").unwrap();
    field.commit("abc");
    assert!(!field.is_dirty());
    assert_eq!(field.baseline_text(), Some("abc"));
}

#[test]
fn commit_keeps_edits_made_during_save() {
    let mut field = Field::loaded(FieldName::Summary, "");
    field.set_text("saved").unwrap();
    field.append(" and more").unwrap();

    field.commit("saved");
    assert!(field.is_dirty());
    assert_eq!(field.current_text(), Some("saved and more"));
}
