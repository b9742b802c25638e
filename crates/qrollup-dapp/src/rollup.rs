//! Rollup coordinator client.
//!
//! The coordinator exposes three endpoints:
//!
//! | Endpoint | Body | Response |
//! |----------|------|----------|
//! | `POST /finish` | `{"status": "accept"}` | `202` when idle, otherwise one request |
//! | `POST /notice` | `{"payload": "0x.."}` | `{"index": n}` |
//! | `POST /report` | `{"payload": "0x.."}` | empty |

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Result type for coordinator calls.
pub type RollupResult<T> = Result<T, RollupError>;

/// Errors talking to the coordinator.
#[derive(Debug, Error)]
pub enum RollupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Coordinator returned {code} for {endpoint}: {message}")]
    Status {
        endpoint: &'static str,
        code: u16,
        message: String,
    },

    #[error("Malformed request from coordinator: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Outcome of handling a request, sent with the next `/finish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Accept,
    Reject,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Accept => write!(f, "accept"),
            Status::Reject => write!(f, "reject"),
        }
    }
}

/// Body of `POST /finish`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FinishRequest {
    pub status: Status,
}

/// Body of `POST /notice` and `POST /report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadBody {
    pub payload: String,
}

/// Response to `POST /notice`.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexResponse {
    pub index: u64,
}

/// Kind of pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    AdvanceState,
    InspectState,
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestType::AdvanceState => write!(f, "advance_state"),
            RequestType::InspectState => write!(f, "inspect_state"),
        }
    }
}

/// A pending request: `{"request_type": .., "data": {..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "request_type", content = "data", rename_all = "snake_case")]
pub enum RollupRequest {
    AdvanceState(AdvanceData),
    InspectState(InspectData),
}

impl RollupRequest {
    /// Kind of this request.
    pub fn request_type(&self) -> RequestType {
        match self {
            RollupRequest::AdvanceState(_) => RequestType::AdvanceState,
            RollupRequest::InspectState(_) => RequestType::InspectState,
        }
    }
}

/// Input metadata attached to advance requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub msg_sender: String,
    #[serde(default)]
    pub epoch_index: u64,
    #[serde(default)]
    pub input_index: u64,
    #[serde(default)]
    pub block_number: u64,
    #[serde(default)]
    pub timestamp: u64,
}

/// Data of an `advance_state` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub payload: String,
}

/// Data of an `inspect_state` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectData {
    pub payload: String,
}

/// Coordinator operations used by the request loop.
#[async_trait]
pub trait Rollup: Send + Sync {
    /// Report the previous status and fetch the next request, if any.
    async fn finish(&self, status: Status) -> RollupResult<Option<RollupRequest>>;

    /// Emit a notice.
    async fn notice(&self, payload: &str) -> RollupResult<()>;

    /// Emit a report.
    async fn report(&self, payload: &str) -> RollupResult<()>;
}

/// HTTP client for the coordinator.
pub struct RollupClient {
    client: Client,
    base_url: String,
}

impl RollupClient {
    /// Create a client for the coordinator at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> RollupResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Coordinator base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &'static str,
        body: &T,
    ) -> RollupResult<reqwest::Response> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(RollupError::Status {
                endpoint,
                code: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl Rollup for RollupClient {
    #[instrument(skip(self))]
    async fn finish(&self, status: Status) -> RollupResult<Option<RollupRequest>> {
        let response = self.post("finish", &FinishRequest { status }).await?;
        debug!("Received finish status {}", response.status());

        if response.status() == StatusCode::ACCEPTED {
            return Ok(None);
        }
        let body = response.text().await?;
        Ok(Some(serde_json::from_str(&body)?))
    }

    #[instrument(skip(self, payload))]
    async fn notice(&self, payload: &str) -> RollupResult<()> {
        let body = PayloadBody {
            payload: payload.to_string(),
        };
        let response = self.post("notice", &body).await?;
        let code = response.status();
        match response.json::<IndexResponse>().await {
            Ok(index) => debug!("Received notice status {} index {}", code, index.index),
            Err(_) => debug!("Received notice status {}", code),
        }
        Ok(())
    }

    #[instrument(skip(self, payload))]
    async fn report(&self, payload: &str) -> RollupResult<()> {
        let body = PayloadBody {
            payload: payload.to_string(),
        };
        let response = self.post("report", &body).await?;
        debug!("Received report status {}", response.status());
        Ok(())
    }
}
