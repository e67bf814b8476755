//! Google Cloud Translation API v2 provider
//!
//! Both endpoints are called with `POST`, the API key as the `key` query
//! parameter and a JSON body:
//!
//! - `{base}/detect` with `{"q": text}`
//! - `{base}` with `{"q": text, "target": code, "format": "text", "source"?: code}`
//!
//! # Authentication
//!
//! [`GoogleTranslateProvider::from_env`] reads the key from `GOOGLE_API_KEY`,
//! falling back to `GOOGLE_TRANSLATE_API_KEY`.

use crate::provider::error::{ProviderError, ProviderResult};
use crate::provider::translator::{TranslationProvider, TranslationResult};
use crate::resolver::LanguageCode;
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::warn;

/// Default endpoint of the v2 REST API
pub const DEFAULT_BASE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Error bodies longer than this are truncated in logs
const MAX_LOGGED_BODY_CHARS: usize = 2000;

/// Google Translate API v2 provider
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Create a provider with an explicit API key
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(ProviderError)` - If the key is empty or the HTTP client cannot be built
    pub fn new(api_key: String) -> ProviderResult<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a provider that talks to a different endpoint (proxy, test server)
    pub fn with_base_url(api_key: String, base_url: String) -> ProviderResult<Self> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::Config("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            api_key,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a provider from the `GOOGLE_API_KEY` environment variable
    pub fn from_env() -> ProviderResult<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_TRANSLATE_API_KEY"))
            .map_err(|_| {
                ProviderError::Config("GOOGLE_API_KEY environment variable not set".to_string())
            })?;

        Self::new(api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body to `url` and return the parsed success body
    async fn post_json(&self, operation: &str, url: &str, body: &Value) -> ProviderResult<Value> {
        let url = format!("{}?key={}", url, self.api_key);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e.without_url()));
            warn!(
                status = status.as_u16(),
                body = %truncate_chars(&error_text, MAX_LOGGED_BODY_CHARS),
                "Google {} failed",
                operation
            );
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        response.json().await.map_err(|e| {
            ProviderError::ResponseShape(format!(
                "failed to parse {} response: {}",
                operation,
                e.without_url()
            ))
        })
    }
}

/// Extract `data.detections[0][0].language`
fn parse_detection(json: &Value) -> ProviderResult<LanguageCode> {
    json["data"]["detections"][0][0]["language"]
        .as_str()
        .filter(|code| !code.trim().is_empty())
        .map(LanguageCode::new)
        .ok_or_else(|| {
            ProviderError::ResponseShape(
                "missing 'data.detections[0][0].language' in detect response".to_string(),
            )
        })
}

/// Extract `data.translations[0]`
fn parse_translation(json: &Value) -> ProviderResult<TranslationResult> {
    let first = &json["data"]["translations"][0];
    let translated_text = first["translatedText"].as_str().ok_or_else(|| {
        ProviderError::ResponseShape(
            "missing 'data.translations[0].translatedText' in translate response".to_string(),
        )
    })?;

    Ok(TranslationResult {
        translated_text: translated_text.to_string(),
        detected_source_language: first["detectedSourceLanguage"].as_str().map(str::to_string),
    })
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    async fn detect_language(&self, text: &str) -> ProviderResult<LanguageCode> {
        let url = format!("{}/detect", self.base_url);
        let json = self.post_json("detect", &url, &json!({ "q": text })).await?;
        parse_detection(&json)
    }

    async fn translate(
        &self,
        text: &str,
        target: &LanguageCode,
        source: Option<&LanguageCode>,
    ) -> ProviderResult<TranslationResult> {
        let mut body = json!({
            "q": text,
            "target": target.as_str(),
            "format": "text"
        });
        if let Some(source) = source {
            body["source"] = json!(source.as_str());
        }

        let json = self.post_json("translate", &self.base_url, &body).await?;
        parse_translation(&json)
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }
}
