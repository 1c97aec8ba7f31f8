//! REST client implementing the editor's collaborators.

use crate::config::{BackendConfig, redact};
use crate::error::BackendError;
use async_trait::async_trait;
use flowcanvas_editor::{CollaboratorError, RunReceipt, SaveReceipt, WorkflowRunner, WorkflowStore};
use flowcanvas_workflow::{Workflow, WorkflowGraph};
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::debug;

const SAVE_PATH: &str = "api/workflows";
const EXECUTE_PATH: &str = "api/workflows/execute";

/// HTTP persistence and execution collaborator.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
    bearer_token: Option<String>,
}

impl fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.base_url.as_str())
            .field("bearer_token", &redact(self.bearer_token.as_deref()))
            .finish_non_exhaustive()
    }
}

impl HttpBackend {
    /// Creates a backend client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL or
    /// the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> flowcanvas_core::Result<Self, BackendError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| BackendError::InvalidBaseUrl {
                url: config.base_url.clone(),
                details: e.to_string(),
            })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(BackendError::InvalidBaseUrl {
                url: config.base_url.clone(),
                details: "scheme must be http or https".to_string(),
            }
            .into());
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| BackendError::ClientBuild {
                details: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url,
            bearer_token: config.bearer_token.clone(),
        })
    }

    /// Full URL for a path below the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, CollaboratorError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!(%url, "posting to backend");

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CollaboratorError::Unavailable {
                details: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Rejected {
                status: status.as_u16(),
                details,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| CollaboratorError::Decode {
                details: e.to_string(),
            })
    }
}

#[async_trait]
impl WorkflowStore for HttpBackend {
    async fn save(&self, workflow: &Workflow) -> Result<SaveReceipt, CollaboratorError> {
        self.post(SAVE_PATH, workflow).await
    }
}

#[async_trait]
impl WorkflowRunner for HttpBackend {
    async fn execute(&self, graph: &WorkflowGraph) -> Result<RunReceipt, CollaboratorError> {
        self.post(EXECUTE_PATH, graph).await
    }
}
