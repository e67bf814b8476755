//! HTTP client for the translate endpoint

use crate::ui::ManualSelection;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
const TRANSLATE_PATH: &str = "/api/translate";

/// Any failure to get a usable answer; all are shown as "cannot reach server"
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(String),
}

#[derive(Debug, Serialize)]
struct TranslatePayload<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerReply {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    detected_source: Option<String>,
    #[serde(default)]
    target_used: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// What the server said about one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Translated {
        result: String,
        detected_source: Option<String>,
        target_used: Option<String>,
    },
    /// A success response carrying an `error` field
    Failed(String),
}

pub struct TranslateClient {
    client: reqwest::Client,
    endpoint: String,
}

impl TranslateClient {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", server_url.trim_end_matches('/'), TRANSLATE_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit text, with the manual languages when manual mode is on
    pub async fn translate(
        &self,
        text: &str,
        manual: Option<&ManualSelection>,
    ) -> Result<Outcome, ClientError> {
        let payload = TranslatePayload {
            text,
            source: manual.and_then(|m| m.source.as_deref()),
            target: manual.and_then(|m| m.target.as_deref()),
        };

        let response = self.client.post(&self.endpoint).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "Server answered with an error status");
            return Err(ClientError::Status(status.as_u16()));
        }

        let reply: ServerReply = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        if let Some(error) = reply.error {
            return Ok(Outcome::Failed(error));
        }

        Ok(Outcome::Translated {
            result: reply.result.unwrap_or_default(),
            detected_source: reply.detected_source,
            target_used: reply.target_used,
        })
    }
}
