//! Status context shared between components.

use folio_editor::{Notice, StatusContext};

#[tokio::test]
async fn clones_publish_to_the_same_watchers() -> anyhow::Result<()> {
    let status = StatusContext::new();
    let reporter = status.clone();
    let mut watcher = status.subscribe();

    reporter.set_loading("generating… 10%");
    watcher.changed().await?;
    assert_eq!(
        *watcher.borrow_and_update(),
        Notice::Loading("generating… 10%".into())
    );

    reporter.set_error("Connection closed before generation finished");
    watcher.changed().await?;
    assert!(watcher.borrow_and_update().is_error());

    status.clear();
    assert_eq!(status.current(), Notice::Idle);
    Ok(())
}

#[test]
fn notices_render_for_a_status_line() {
    assert_eq!(Notice::Idle.to_string(), "");
    assert_eq!(Notice::Success("Saved".into()).to_string(), "Saved");
    assert_eq!(
        Notice::Warning("Nothing changed".into()).to_string(),
        "warning: Nothing changed"
    );
    assert_eq!(Notice::Error("boom".into()).to_string(), "error: boom");
}

#[test]
fn setting_status_without_watchers_is_fine() {
    let status = StatusContext::default();
    status.set_success("Saved");
    status.set_warning("Nothing changed");
    assert_eq!(status.current(), Notice::Warning("Nothing changed".into()));
}
