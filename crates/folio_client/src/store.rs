//! HTTP client for the book record store.

use async_trait::async_trait;
use folio_core::{FieldName, GenerationRequest, NewRecord, Record, RecordPatch};
use folio_error::{ConfigError, ConfigErrorKind, FolioResult, StoreError, StoreErrorKind};
use folio_interface::RecordStore;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::config::StoreConfig;

#[derive(Debug, Deserialize)]
struct GeneratingFlag {
    generating: bool,
}

/// [`RecordStore`] over the backend's REST API.
///
/// Authenticated calls carry `Authorization: Bearer <token>` when a token is
/// set.
///
/// # Example
///
/// ```no_run
/// use folio_client::HttpRecordStore;
/// use folio_interface::RecordStore;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = HttpRecordStore::new("http://localhost:8080/api", Some("token".into()))?;
/// let record = store.fetch_record("b1").await?;
/// println!("{}", record.title);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpRecordStore {
    /// Store client for `base_url` with default HTTP settings.
    ///
    /// # Errors
    ///
    /// Fails when `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str, token: Option<String>) -> FolioResult<Self> {
        Self::with_client(Client::new(), base_url, token)
    }

    /// Store client built from configuration.
    ///
    /// # Errors
    ///
    /// Fails on an invalid base URL or when the HTTP client cannot be built.
    pub fn from_config(config: &StoreConfig, token: Option<String>) -> FolioResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::HttpClient(e.to_string())))?;
        Self::with_client(client, &config.base_url, token)
    }

    fn with_client(client: Client, base_url: &str, token: Option<String>) -> FolioResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ConfigError::new(ConfigErrorKind::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::new(ConfigErrorKind::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "cannot have path segments".into(),
            })
            .into());
        }
        debug!(base_url = %base_url, authenticated = token.is_some(), "Created record store client");
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Whether a bearer token will be sent.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Absolute URL for path segments below the base URL; segments are
    /// percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> FolioResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ConfigError::new(ConfigErrorKind::InvalidBaseUrl {
                    url: self.base_url.to_string(),
                    reason: "cannot be a base".into(),
                })
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> FolioResult<Response> {
        let response = self.authorize(builder).send().await.map_err(|e| {
            error!(error = ?e, "Record store request failed");
            StoreError::new(StoreErrorKind::Request(e.to_string()))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Record store returned error");
            return Err(StoreError::new(StoreErrorKind::from_status(status.as_u16(), body)).into());
        }

        Ok(response)
    }

    async fn json<T: DeserializeOwned>(response: Response) -> FolioResult<T> {
        response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse record store response");
            StoreError::new(StoreErrorKind::Parse(e.to_string())).into()
        })
    }

    async fn text(response: Response) -> FolioResult<String> {
        response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read record store response");
            StoreError::new(StoreErrorKind::Parse(e.to_string())).into()
        })
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    #[instrument(skip(self))]
    async fn fetch_record(&self, id: &str) -> FolioResult<Record> {
        let url = self.endpoint(&["books", id])?;
        let response = self.execute(self.client.get(url)).await?;
        Self::json(response).await
    }

    #[instrument(skip(self))]
    async fn fetch_field(&self, id: &str, field: FieldName) -> FolioResult<String> {
        let url = self.endpoint(&["books", id, "fields", field.as_ref()])?;
        let response = self.execute(self.client.get(url)).await?;
        Self::text(response).await
    }

    #[instrument(skip(self, patch), fields(fields = patch.len()))]
    async fn update_record(&self, id: &str, patch: &RecordPatch) -> FolioResult<Record> {
        let url = self.endpoint(&["books", id])?;
        let response = self.execute(self.client.patch(url).json(patch)).await?;
        Self::json(response).await
    }

    #[instrument(skip(self, record), fields(title = %record.title))]
    async fn create_record(&self, record: &NewRecord) -> FolioResult<Record> {
        let url = self.endpoint(&["books"])?;
        let response = self.execute(self.client.post(url).json(record)).await?;
        Self::json(response).await
    }

    #[instrument(skip(self))]
    async fn delete_record(&self, id: &str) -> FolioResult<()> {
        let url = self.endpoint(&["books", id])?;
        self.execute(self.client.delete(url)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn generation_in_progress(&self, id: &str) -> FolioResult<bool> {
        let url = self.endpoint(&["books", id, "generating"])?;
        let response = self.execute(self.client.get(url)).await?;
        let flag: GeneratingFlag = Self::json(response).await?;
        Ok(flag.generating)
    }

    #[instrument(skip(self, request), fields(record_id = %request.id, field = %request.content_type))]
    async fn generate_text(&self, request: &GenerationRequest) -> FolioResult<String> {
        let url = self.endpoint(&["gpt", "generate"])?;
        let response = self
            .execute(self.client.post(url).json(&request.one_shot()))
            .await?;
        Self::text(response).await
    }
}
