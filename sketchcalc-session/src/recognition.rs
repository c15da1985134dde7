//! Client for the handwriting recognition service.
//!
//! Speaks the `/calculate` JSON protocol: a PNG data-URL snapshot plus
//! the session's variable bindings go up, an ordered list of recognized
//! records comes back. Failures propagate to the caller; there is no
//! retry at this layer.

use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use sketchcalc_core::VariableBindings;
use thiserror::Error;
use url::Url;

/// Errors that can occur when talking to the recognition service.
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The base URL provided by configuration is invalid.
    #[error("invalid recognition service URL: {0}")]
    InvalidUrl(String),

    /// HTTP layer failed (connection, timeout, etc.).
    #[error("recognition request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not parse as the expected structure.
    #[error("failed to parse recognition payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a non-success status.
    #[error("recognition service returned {status}: {body}")]
    Service {
        /// HTTP status code.
        status: reqwest::StatusCode,
        /// Response body, for diagnostics.
        body: String,
    },
}

/// One recognized record from the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recognized {
    /// The expression string as read from the drawing.
    pub expr: String,
    /// The evaluated (or assigned) result.
    pub result: String,
    /// Whether this record defines a variable binding.
    #[serde(default)]
    pub assign: bool,
}

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Serialize)]
struct CalculateRequest<'a> {
    /// PNG snapshot as a data URL.
    image: &'a str,
    /// Known variable bindings, as a flat string-to-string map.
    dict_of_vars: &'a VariableBindings,
}

/// Response body for the `/calculate` endpoint.
#[derive(Debug, Deserialize)]
struct CalculateResponse {
    data: Vec<Recognized>,
}

/// Asynchronous recognition service client.
///
/// Cheap to clone; the HTTP connection pool is shared.
#[derive(Clone, Debug)]
pub struct RecognitionClient {
    inner: Arc<InnerClient>,
}

#[derive(Debug)]
struct InnerClient {
    http: Client,
    endpoint: Url,
}

impl RecognitionClient {
    /// Create a new client.
    ///
    /// `base_url` may be either the calculate endpoint itself
    /// (`http://host:8900/calculate`) or just the host, in which case
    /// `/calculate` is appended automatically.
    ///
    /// # Errors
    ///
    /// Returns [`RecognitionError::InvalidUrl`] if the URL is malformed,
    /// or [`RecognitionError::Http`] if the HTTP client fails to build.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, RecognitionError> {
        let mut url = Url::parse(base_url.as_ref())
            .map_err(|e| RecognitionError::InvalidUrl(e.to_string()))?;

        if url.path().is_empty() || url.path() == "/" {
            url.set_path("/calculate");
        }

        let http = Client::builder()
            .user_agent(concat!("sketchcalc/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(InnerClient {
                http,
                endpoint: url,
            }),
        })
    }

    /// The resolved calculate endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Submit a snapshot and the current bindings for recognition.
    ///
    /// Returns the service's records in response order. The caller is
    /// responsible for applying assignment records to its bindings.
    ///
    /// # Errors
    ///
    /// Network failures, non-success statuses, and malformed response
    /// bodies all surface as [`RecognitionError`]; nothing is retried.
    pub async fn calculate(
        &self,
        image: &str,
        bindings: &VariableBindings,
    ) -> Result<Vec<Recognized>, RecognitionError> {
        let request = CalculateRequest {
            image,
            dict_of_vars: bindings,
        };

        let response = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RecognitionError::Service { status, body });
        }

        let parsed: CalculateResponse = serde_json::from_str(&body)?;
        tracing::debug!("recognition returned {} records", parsed.data.len());
        Ok(parsed.data)
    }
}
