//! HTTP client for the CLEARTHINK analysis service
//!
//! One endpoint matters to this client: `POST /api/analyze` with
//! `{"decision": ...}`, answering `{"agents": [...]}` on success or
//! `{"detail": ...}` on failure. The response may carry extra fields
//! (`input`, `agent_count`, `success`); they are ignored.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClearThinkError, Result, GENERIC_FAILURE_MESSAGE};

/// Path of the analysis endpoint, relative to the service base URL.
pub const ANALYZE_PATH: &str = "/api/analyze";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Request body for `POST /api/analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub decision: &'a str,
}

/// One agent's output, in pipeline order within [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSection {
    #[serde(rename = "agent")]
    pub name: String,
    pub emoji: String,
    #[serde(rename = "result")]
    pub result_text: String,
}

/// Ordered agent sections of one completed analysis.
///
/// The service sends exactly six entries in fixed stage order; the client
/// renders whatever arrives rather than rejecting an unexpected count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub agents: Vec<AgentSection>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Thin reqwest wrapper around the analysis endpoint.
#[derive(Debug, Clone)]
pub struct AnalyzeClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalyzeClient {
    /// Build a client against a service base URL like `http://localhost:8000`.
    ///
    /// # Errors
    ///
    /// Returns [`ClearThinkError::Request`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("clearthink/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a decision for analysis.
    ///
    /// # Errors
    ///
    /// - [`ClearThinkError::Service`] on a non-2xx response; `detail` carries
    ///   the service's message verbatim, or the generic fallback when the
    ///   body had none.
    /// - [`ClearThinkError::MalformedResponse`] when a 2xx body does not
    ///   match the agents contract.
    /// - [`ClearThinkError::Request`] on transport failures.
    pub async fn analyze(&self, decision: &str) -> Result<AnalysisResult> {
        let url = format!("{}{}", self.base_url, ANALYZE_PATH);
        let response = self
            .http
            .post(&url)
            .json(&AnalyzeRequest { decision })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail)
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
            return Err(ClearThinkError::Service {
                status: status.as_u16(),
                detail,
            });
        }

        // Read the body as text first so a contract mismatch reports as
        // malformed-response instead of a transport error.
        let body = response.text().await?;
        serde_json::from_str::<AnalysisResult>(&body)
            .map_err(|e| ClearThinkError::MalformedResponse {
                details: e.to_string(),
            })
    }
}
