//! Book record command handlers.

use super::authenticated_store;
use folio::{
    Editor, ExportFormat, FieldContent, FieldName, FolioConfig, FolioResult, NewRecord,
    RecordStore, StatusContext, ValidationError,
};
use strum::IntoEnumIterator;

/// Print a book summary, or one field's text.
pub async fn show(config: &FolioConfig, id: &str, field: Option<FieldName>) -> FolioResult<()> {
    let store = authenticated_store(config)?;
    let mut editor = Editor::open(&store, id, StatusContext::new()).await?;

    if let Some(name) = field {
        editor.open_field(&store, name).await?;
        println!("{}", editor.document().text(name).unwrap_or_default());
        return Ok(());
    }

    let document = editor.document();
    println!("{} ({})", document.title(), document.record_id());
    for name in FieldName::iter() {
        let state = match document.field(name).map(|f| f.content()) {
            Some(FieldContent::Loaded { current, .. }) => {
                format!("{} chars", current.chars().count())
            }
            Some(FieldContent::Loading) => "loading".to_string(),
            _ => "not loaded".to_string(),
        };
        println!("  {:<8} {}", name.to_string(), state);
    }
    if editor.refresh_server_generating(&store).await? {
        println!("Generation in progress on the server.");
    }
    Ok(())
}

/// Create a book and print its id.
pub async fn create(config: &FolioConfig, title: String, toc: Option<String>) -> FolioResult<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("A title is required").into());
    }
    let store = authenticated_store(config)?;
    let record = store.create_record(&NewRecord { title, toc }).await?;
    println!("{}", record.id);
    Ok(())
}

/// Delete a book.
pub async fn delete(config: &FolioConfig, id: &str) -> FolioResult<()> {
    let store = authenticated_store(config)?;
    store.delete_record(id).await?;
    println!("Deleted {}.", id);
    Ok(())
}

/// Print a book in the requested format.
pub async fn export(config: &FolioConfig, id: &str, format: ExportFormat) -> FolioResult<()> {
    let store = authenticated_store(config)?;
    let mut editor = Editor::open(&store, id, StatusContext::new()).await?;
    editor.open_field(&store, FieldName::MdBody).await?;
    print!("{}", folio::export(editor.document(), format));
    Ok(())
}
