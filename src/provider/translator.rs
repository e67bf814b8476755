//! Translation provider trait
//!
//! This module defines the `TranslationProvider` trait for provider abstraction,
//! so the request handler can run against Google Translate in production and a
//! deterministic mock in tests.
//!
//! # Example
//!
//! ```ignore
//! use phrasebridge::provider::{GoogleTranslateProvider, TranslationProvider};
//! use phrasebridge::LanguageCode;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::from_env()?;
//!
//!     let detected = provider.detect_language("Buenas noches").await?;
//!     println!("{}", detected); // "es"
//!
//!     let result = provider
//!         .translate("Buenas noches", &LanguageCode::english(), Some(&detected))
//!         .await?;
//!     println!("{}", result.translated_text); // "Good night"
//!     Ok(())
//! }
//! ```

use crate::provider::error::ProviderResult;
use crate::resolver::LanguageCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Text returned by a translate call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub translated_text: String,

    /// Source language the provider detected when no source was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_source_language: Option<String>,
}

impl TranslationResult {
    pub fn new(translated_text: impl Into<String>) -> Self {
        Self {
            translated_text: translated_text.into(),
            detected_source_language: None,
        }
    }
}

/// Generic trait for translation providers
///
/// Implementations issue a single request per call and never retry; failures
/// are surfaced to the caller, which decides whether to degrade or fail.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Guess the language of `text`
    ///
    /// # Returns
    ///
    /// * `Ok(LanguageCode)` - The provider's top detection
    /// * `Err(ProviderError)` - Non-success status, malformed body or network failure
    async fn detect_language(&self, text: &str) -> ProviderResult<LanguageCode>;

    /// Translate `text` into `target`
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `target` - Target language code
    /// * `source` - Source language code, or `None` to let the provider detect it
    async fn translate(
        &self,
        text: &str,
        target: &LanguageCode,
        source: Option<&LanguageCode>,
    ) -> ProviderResult<TranslationResult>;

    /// Name used in logs (e.g. "Google Translate")
    fn provider_name(&self) -> &str;
}
