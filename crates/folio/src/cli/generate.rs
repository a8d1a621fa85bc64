//! Generation command handlers.

use super::authenticated_store;
use folio::{
    Editor, EditorCommand, FieldName, FolioConfig, FolioResult, HttpRecordStore, PreviewFrame,
    SaveOutcome, StatusContext, WsConnector,
};
use std::io::Write;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

/// Open `id`, load `field`, and apply config defaults.
async fn open_editor(
    config: &FolioConfig,
    store: &HttpRecordStore,
    id: &str,
    field: FieldName,
    model: Option<String>,
) -> FolioResult<Editor> {
    let model = model.unwrap_or_else(|| config.generation.default_model.clone());
    let mut editor = Editor::open(store, id, StatusContext::new())
        .await?
        .with_model(model)
        .with_policy(config.editor.edit_policy);
    editor.open_field(store, field).await?;
    Ok(editor)
}

/// Stream a generation into `field`, echoing text as it arrives.
pub async fn generate(
    config: &FolioConfig,
    id: &str,
    field: FieldName,
    model: Option<String>,
    save: bool,
) -> FolioResult<()> {
    let store = authenticated_store(config)?;
    let connector = WsConnector::from_config(&config.generation);
    let mut editor = open_editor(config, &store, id, field, model).await?;

    let initial = editor.document().text(field).unwrap_or_default();
    print!("{}", initial);
    let printed = initial.len();

    let (commands_tx, mut commands) = mpsc::unbounded_channel();
    let interrupts = tokio::spawn(forward_interrupts(commands_tx));

    let (done_tx, done_rx) = oneshot::channel();
    let echo = tokio::spawn(echo_deltas(
        editor.subscribe_preview(),
        field,
        printed,
        done_rx,
    ));

    let result = editor.generate(&connector, field, &mut commands).await;

    interrupts.abort();
    let _ = done_tx.send(());
    if let Err(e) = echo.await {
        warn!(error = %e, "Echo task failed");
    }
    println!();

    let status = result?;
    eprintln!("Generation {}.", status);

    if save {
        report_save(editor.save(&store).await?);
    }
    Ok(())
}

/// Fill `field` through the one-shot endpoint and print it.
pub async fn generate_once(
    config: &FolioConfig,
    id: &str,
    field: FieldName,
    model: Option<String>,
    save: bool,
) -> FolioResult<()> {
    let store = authenticated_store(config)?;
    let mut editor = open_editor(config, &store, id, field, model).await?;

    editor.generate_once(&store, field).await?;
    println!("{}", editor.document().text(field).unwrap_or_default());

    if save {
        report_save(editor.save(&store).await?);
    }
    Ok(())
}

fn report_save(outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::NothingChanged => eprintln!("Nothing changed."),
        SaveOutcome::Saved(patch) => {
            let names: Vec<String> = patch.names().map(|n| n.to_string()).collect();
            eprintln!("Saved {}.", names.join(", "));
        }
    }
}

/// Turn every Ctrl-C into a stop request until the editor stops listening.
async fn forward_interrupts(commands: mpsc::UnboundedSender<EditorCommand>) {
    while tokio::signal::ctrl_c().await.is_ok() {
        eprintln!("\nStopping…");
        if commands.send(EditorCommand::Stop).is_err() {
            break;
        }
    }
}

/// Print whatever text was added to `field` since the last frame.
async fn echo_deltas(
    mut preview: watch::Receiver<Option<PreviewFrame>>,
    field: FieldName,
    mut printed: usize,
    mut done: oneshot::Receiver<()>,
) {
    loop {
        let finished = tokio::select! {
            changed = preview.changed() => changed.is_err(),
            _ = &mut done => true,
        };
        print_new_text(&preview, field, &mut printed);
        if finished {
            break;
        }
    }
}

fn print_new_text(
    preview: &watch::Receiver<Option<PreviewFrame>>,
    field: FieldName,
    printed: &mut usize,
) {
    let frame = preview.borrow();
    let Some(frame) = frame.as_ref().filter(|f| f.field == field) else {
        return;
    };
    if frame.text.len() == *printed {
        return;
    }

    let mut stdout = std::io::stdout().lock();
    let written = match frame.text.get(*printed..) {
        Some(tail) => write!(stdout, "{}", tail),
        // The text was replaced rather than extended.
        None => write!(stdout, "\n{}", frame.text),
    };
    if let Err(e) = written.and_then(|()| stdout.flush()) {
        debug!(error = %e, "Failed to echo generated text");
    }
    *printed = frame.text.len();
}
