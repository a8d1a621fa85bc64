//! One open record and at most one generation writing into it.

use crate::{ReconcileOutcome, Reconciler, StatusContext};
use folio_client::GenerationChannel;
use folio_core::{
    Document, EditPolicy, FieldName, GenerationRequest, GenerationSession, GenerationStatus,
    RecordPatch,
};
use folio_error::{
    BuilderError, FieldError, FieldErrorKind, FolioError, FolioResult, GenerationError,
    GenerationErrorKind, ValidationError,
};
use folio_interface::{GenerationConnector, GenerationEvent, RecordStore};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// User input delivered while a generation is streaming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    /// Replace a field's text
    Edit {
        /// Field to edit
        field: FieldName,
        /// New text
        text: String,
    },
    /// Ask the server to stop the running generation
    Stop,
}

/// Result of [`Editor::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No field differed from its baseline; nothing was sent
    NothingChanged,
    /// The patch the store accepted
    Saved(RecordPatch),
}

/// Latest text of the field that last changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFrame {
    /// Field that changed
    pub field: FieldName,
    /// Its current text
    pub text: String,
}

/// Editing session over one record.
///
/// Owns the [`Document`], applies streamed generations through a
/// [`Reconciler`], and saves only the fields that changed. At most one
/// generation runs at a time.
///
/// # Example
///
/// ```no_run
/// use folio_client::{HttpRecordStore, WsConnector};
/// use folio_core::FieldName;
/// use folio_editor::{Editor, StatusContext};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = HttpRecordStore::new("http://localhost:8080/api", Some("token".into()))?;
/// let connector = WsConnector::new("ws://localhost:8080/api/gpt/stream");
///
/// let mut editor = Editor::open(&store, "b1", StatusContext::new()).await?;
/// editor.open_field(&store, FieldName::MdBody).await?;
///
/// let (_commands_tx, mut commands) = tokio::sync::mpsc::unbounded_channel();
/// editor.generate(&connector, FieldName::MdBody, &mut commands).await?;
/// editor.save(&store).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Editor {
    document: Document,
    status: StatusContext,
    reconciler: Reconciler,
    policy: EditPolicy,
    model: String,
    request_count: u64,
    session: Option<GenerationSession>,
    preview: watch::Sender<Option<PreviewFrame>>,
}

impl Editor {
    /// Editor over an already built document.
    pub fn new(document: Document, status: StatusContext) -> Self {
        let (preview, _) = watch::channel(None);
        Self {
            document,
            reconciler: Reconciler::new(status.clone()),
            status,
            policy: EditPolicy::default(),
            model: DEFAULT_MODEL.to_string(),
            request_count: 0,
            session: None,
            preview,
        }
    }

    /// Fetch a record and open an editor on it.
    ///
    /// Reports a server-side generation already in progress as loading status.
    ///
    /// # Errors
    ///
    /// Fails when the record cannot be fetched.
    #[instrument(skip(store, status))]
    pub async fn open<S>(store: &S, record_id: &str, status: StatusContext) -> FolioResult<Self>
    where
        S: RecordStore + ?Sized,
    {
        status.set_loading("Loading book");
        let record = match store.fetch_record(record_id).await {
            Ok(record) => record,
            Err(e) => {
                status.set_error(format!("Failed to load book: {}", e));
                return Err(e);
            }
        };

        info!(title = %record.title, generating = record.generating, "Opened record");
        if record.generating {
            status.set_loading("Generation in progress on the server");
        } else {
            status.clear();
        }
        Ok(Self::new(Document::from_record(&record), status))
    }

    /// Use `model` for later generations.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use `policy` for manual edits during generation.
    pub fn with_policy(mut self, policy: EditPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Document under edit.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Status handle this editor reports through.
    pub fn status(&self) -> &StatusContext {
        &self.status
    }

    /// Edit policy in effect.
    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    /// Model sent with generation requests.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Most recent generation session, if any.
    pub fn session(&self) -> Option<&GenerationSession> {
        self.session.as_ref()
    }

    /// Watch the text of whichever field changed last.
    pub fn subscribe_preview(&self) -> watch::Receiver<Option<PreviewFrame>> {
        self.preview.subscribe()
    }

    /// Load a large field the first time it is opened.
    ///
    /// Returns whether a fetch happened. A loaded field is never fetched again.
    ///
    /// # Errors
    ///
    /// Fails with a field-load error when the fetch fails; the field stays
    /// unloaded so opening it again retries.
    #[instrument(skip(self, store), fields(record_id = %self.document.record_id()))]
    pub async fn open_field<S>(&mut self, store: &S, name: FieldName) -> FolioResult<bool>
    where
        S: RecordStore + ?Sized,
    {
        let record_id = self.document.record_id().to_string();
        let result = self
            .document
            .load_lazy(name, || store.fetch_field(&record_id, name))
            .await;

        match result {
            Ok(fetched) => {
                if fetched {
                    self.publish(name);
                }
                Ok(fetched)
            }
            Err(e) => {
                self.status.set_error(e.kind.to_string());
                Err(e.into())
            }
        }
    }

    /// Replace a field's text by hand.
    ///
    /// # Errors
    ///
    /// Fails when the field is not loaded.
    pub fn edit(&mut self, name: FieldName, text: impl Into<String>) -> FolioResult<()> {
        self.apply_edit(name, text.into(), None)
    }

    /// Mark a running session left behind by a dropped [`Editor::generate`]
    /// future as failed, so a new generation can start.
    ///
    /// The remote generation may keep running. Returns whether a session was
    /// abandoned.
    pub fn abandon_generation(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.fail() {
            return false;
        }
        warn!(field = %session.field_name(), "Abandoned running generation");
        self.status.clear();
        true
    }

    /// Stream a generation into `name`.
    ///
    /// Interleaves server events with `commands` until the stream ends. Deltas
    /// that arrive after a stop are still applied. Edits to the generating
    /// field follow the editor's [`EditPolicy`].
    ///
    /// Returns the final session status: finished or stopped.
    ///
    /// # Errors
    ///
    /// - [`GenerationErrorKind::AlreadyRunning`] when a session is running
    /// - a field error when `name` is not loaded
    /// - the transport error when the stream breaks; the session is left
    ///   errored and text already applied is kept
    #[instrument(
        skip(self, connector, commands),
        fields(record_id = %self.document.record_id(), model = %self.model)
    )]
    pub async fn generate<C>(
        &mut self,
        connector: &C,
        name: FieldName,
        commands: &mut mpsc::UnboundedReceiver<EditorCommand>,
    ) -> FolioResult<GenerationStatus>
    where
        C: GenerationConnector,
    {
        self.ensure_idle()?;
        self.ensure_loaded(name)?;

        let request = self.next_request(name)?;
        let mut session = GenerationSession::for_request(&request);
        session.start();
        self.session = Some(session);
        self.status.set_loading(format!("Generating {}", name));

        let mut channel = match GenerationChannel::open(connector, request).await {
            Ok(channel) => channel,
            Err(e) => return Err(self.fail_generation(e)),
        };

        let mut commands_open = true;
        loop {
            tokio::select! {
                // Commands are polled before stream events.
                biased;

                command = commands.recv(), if commands_open => match command {
                    Some(EditorCommand::Stop) => match channel.stop().await {
                        Ok(true) => {
                            if let Some(session) = self.session.as_mut() {
                                session.stop();
                            }
                            self.status.set_loading("Stopping generation");
                        }
                        Ok(false) => debug!("Stop ignored"),
                        Err(e) => return Err(self.fail_generation(e)),
                    },
                    Some(EditorCommand::Edit { field, text }) => {
                        // Refused edits are reported through status; the stream goes on.
                        if let Err(e) = self.apply_edit(field, text, Some(name)) {
                            debug!(error = %e, "Edit refused during generation");
                        }
                    }
                    None => {
                        debug!("Command sender dropped");
                        commands_open = false;
                    }
                },
                event = channel.next_event() => {
                    let event = match event {
                        Some(Ok(event)) => event,
                        Some(Err(e)) => return Err(self.fail_generation(e)),
                        None => break,
                    };
                    let is_delta = matches!(event, GenerationEvent::Delta(_));
                    let applied = {
                        let Self { document, reconciler, session, .. } = self;
                        let Some(session) = session.as_mut() else { break };
                        reconciler.apply(document.field_mut(name), session, event)
                    };
                    let outcome = match applied {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            channel.close().await;
                            if let Some(session) = self.session.as_mut() {
                                session.fail();
                            }
                            self.status.set_error(e.kind.to_string());
                            return Err(e.into());
                        }
                    };
                    if is_delta {
                        self.publish(name);
                    }
                    if outcome != ReconcileOutcome::Continue {
                        debug!(%outcome, "Generation stream ended");
                        break;
                    }
                }
            }
        }

        let status = self
            .session
            .as_ref()
            .map(|session| *session.status())
            .unwrap_or_default();
        info!(%status, "Generation ended");
        Ok(status)
    }

    /// Fill a short field through the non-streaming endpoint.
    ///
    /// # Errors
    ///
    /// Fails when a streamed generation is running, the field is not loaded, or
    /// the store call fails; the field is left untouched on failure.
    #[instrument(skip(self, store), fields(record_id = %self.document.record_id(), model = %self.model))]
    pub async fn generate_once<S>(&mut self, store: &S, name: FieldName) -> FolioResult<()>
    where
        S: RecordStore + ?Sized,
    {
        self.ensure_idle()?;
        self.ensure_loaded(name)?;

        let request = self.next_request(name)?;
        self.status.set_loading(format!("Generating {}", name));
        let text = match store.generate_text(&request).await {
            Ok(text) => text,
            Err(e) => {
                self.status.set_error(format!("Generation failed: {}", e));
                return Err(e);
            }
        };

        self.document.field_mut(name).set_text(text)?;
        self.publish(name);
        self.status.set_success(format!("Generated {}", name));
        Ok(())
    }

    /// Send changed fields to the store.
    ///
    /// Baselines only move after the store accepts the patch.
    ///
    /// # Errors
    ///
    /// Fails validation before any network call when the title is blank, or
    /// with the store error when the update is rejected.
    #[instrument(skip(self, store), fields(record_id = %self.document.record_id()))]
    pub async fn save<S>(&mut self, store: &S) -> FolioResult<SaveOutcome>
    where
        S: RecordStore + ?Sized,
    {
        if self.document.title().trim().is_empty() {
            let e = ValidationError::new("A title is required");
            self.status.set_error(e.message.clone());
            return Err(e.into());
        }

        let patch = self.document.to_patch();
        if patch.is_empty() {
            self.status.set_warning("Nothing changed");
            return Ok(SaveOutcome::NothingChanged);
        }

        self.status.set_loading("Saving");
        if let Err(e) = store.update_record(self.document.record_id(), &patch).await {
            self.status.set_error(format!("Save failed: {}", e));
            return Err(e);
        }

        self.document.commit(&patch);
        info!(fields = patch.len(), "Saved record");
        self.status.set_success("Saved");
        Ok(SaveOutcome::Saved(patch))
    }

    /// Ask the store whether it is generating for this record right now.
    ///
    /// # Errors
    ///
    /// Fails when the store call fails.
    pub async fn refresh_server_generating<S>(&self, store: &S) -> FolioResult<bool>
    where
        S: RecordStore + ?Sized,
    {
        let generating = store
            .generation_in_progress(self.document.record_id())
            .await?;
        if generating {
            self.status.set_loading("Generation in progress on the server");
        }
        Ok(generating)
    }

    fn ensure_idle(&self) -> Result<(), GenerationError> {
        match &self.session {
            Some(session) if session.is_running() => Err(GenerationError::new(
                GenerationErrorKind::AlreadyRunning(session.field_name().to_string()),
            )),
            _ => Ok(()),
        }
    }

    fn ensure_loaded(&self, name: FieldName) -> Result<(), FieldError> {
        match self.document.field(name) {
            Some(field) if field.is_loaded() => Ok(()),
            _ => Err(FieldError::new(FieldErrorKind::NotLoaded(name.to_string()))),
        }
    }

    /// Build the next request. The table of contents seeds every other field.
    fn next_request(&mut self, name: FieldName) -> Result<GenerationRequest, BuilderError> {
        self.request_count += 1;

        let mut builder = GenerationRequest::builder();
        builder
            .id(self.document.record_id())
            .title(self.document.title())
            .model(self.model.as_str())
            .content_type(name)
            .count(self.request_count);
        if name != FieldName::Toc {
            if let Some(toc) = self.document.text(FieldName::Toc).filter(|t| !t.is_empty()) {
                builder.req_markdown(toc);
            }
        }
        builder.build().map_err(BuilderError::from)
    }

    fn apply_edit(
        &mut self,
        name: FieldName,
        text: String,
        generating: Option<FieldName>,
    ) -> FolioResult<()> {
        if self.policy == EditPolicy::LockWhileGenerating && generating == Some(name) {
            self.status
                .set_warning(format!("{} is locked while generating", name));
            return Err(FieldError::new(FieldErrorKind::Locked(name.to_string())).into());
        }

        if let Err(e) = self.document.field_mut(name).set_text(text) {
            self.status.set_warning(e.kind.to_string());
            return Err(e.into());
        }
        self.publish(name);
        Ok(())
    }

    fn fail_generation(&mut self, e: GenerationError) -> FolioError {
        if let Some(session) = self.session.as_mut() {
            session.fail();
        }
        self.status.set_error(format!("Generation failed: {}", e.kind));
        e.into()
    }

    fn publish(&self, name: FieldName) {
        if let Some(text) = self.document.text(name) {
            self.preview.send_replace(Some(PreviewFrame {
                field: name,
                text: text.to_string(),
            }));
        }
    }
}
