//! Request handling: detection, intent parsing and fallback translation
//!
//! Each request walks a chain of independent, fallible steps. Every step except
//! the last degrades to a weaker fallback (unknown source, original text, no
//! direct answer) and logs why; only a failure of the final whole-text
//! translation reaches the caller.

use crate::intent::{IntentMatch, IntentParser};
use crate::provider::{ProviderError, TranslationProvider};
use crate::resolver::{LanguageCode, LanguageResolver};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Detected languages whose default target becomes Spanish
const REMAP_TO_SPANISH: [&str; 4] = ["fr", "hi", "zh", "vi"];

/// Characters of request text included in the fallback diagnostic log
const LOGGED_TEXT_CHARS: usize = 200;

/// Incoming request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Source language name as picked by the user
    #[serde(default)]
    pub source: Option<String>,
    /// Target language name as picked by the user
    #[serde(default)]
    pub target: Option<String>,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResponse {
    pub result: String,
    pub detected_source: Option<LanguageCode>,
    pub target_used: LanguageCode,
}

/// Language codes for one request, refined as detection runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub source_code: Option<LanguageCode>,
    pub target_code: LanguageCode,
    pub detected_source: Option<LanguageCode>,
    /// Whether the user named a target, even one that failed to resolve
    pub user_target_given: bool,
}

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Missing `text` in request body")]
    MissingText,

    #[error("Server: API key not configured")]
    NotConfigured,

    #[error("Translation provider error")]
    Provider(#[source] ProviderError),
}

impl HandlerError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::MissingText => 400,
            HandlerError::NotConfigured => 500,
            HandlerError::Provider(_) => 502,
        }
    }

    /// Extra diagnostic detail for the response body
    pub fn details(&self) -> Option<String> {
        match self {
            HandlerError::Provider(e) => Some(e.details()),
            _ => None,
        }
    }
}

/// Orchestrates resolver, provider and intent parser for each request
///
/// Holds no per-request state; one instance is shared by all requests.
pub struct TranslationService {
    provider: Option<Arc<dyn TranslationProvider>>,
    resolver: LanguageResolver,
    intents: IntentParser,
    default_target: LanguageCode,
}

impl TranslationService {
    /// Create a service; `provider` is `None` when no credential is configured
    pub fn new(provider: Option<Arc<dyn TranslationProvider>>, resolver: LanguageResolver) -> Self {
        Self {
            provider,
            resolver,
            intents: IntentParser::new(),
            default_target: LanguageCode::spanish(),
        }
    }

    /// Override the site-wide default target (Spanish otherwise)
    pub fn with_default_target(mut self, target: LanguageCode) -> Self {
        self.default_target = target;
        self
    }

    pub fn default_target(&self) -> &LanguageCode {
        &self.default_target
    }

    pub fn resolver(&self) -> &LanguageResolver {
        &self.resolver
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Handle one translation request
    ///
    /// # Errors
    ///
    /// * `NotConfigured` - No provider; no outbound call is made
    /// * `MissingText` - `text` absent or empty
    /// * `Provider` - The final whole-text translation failed
    pub async fn handle(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, HandlerError> {
        let provider = self.provider.as_deref().ok_or(HandlerError::NotConfigured)?;

        let text = match request.text.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => return Err(HandlerError::MissingText),
        };

        debug!(
            text = "[REDACTED]",
            source = ?request.source,
            target_lang = ?request.target,
            "Parsed request body"
        );

        let mut resolved = self.resolve_request(request);
        info!(
            source = ?resolved.source_code,
            target_lang = %resolved.target_code,
            "Resolved language codes"
        );

        if resolved.source_code.is_none() {
            self.detect_source(provider, text, &mut resolved).await;
        }

        let english = self
            .english_working_copy(provider, text, resolved.source_code.as_ref())
            .await;

        if let Some(intent) = self.intents.parse_with_fallback(&english, text) {
            if let Some(response) = self.direct_answer(provider, &intent, &resolved, text).await {
                return Ok(response);
            }
        }

        self.fallback_translation(provider, text, resolved).await
    }

    fn resolve_request(&self, request: &TranslationRequest) -> ResolvedRequest {
        let user_source = request.source.as_deref().filter(|s| !s.is_empty());
        let user_target = request.target.as_deref().filter(|t| !t.is_empty());

        let source_code = user_source.and_then(|name| {
            let code = self.resolver.resolve(name);
            if code.is_none() {
                warn!(source = name, "Could not map source language");
            }
            code
        });

        let mut target_code = self.default_target.clone();
        if let Some(name) = user_target {
            match self.resolver.resolve(name) {
                Some(code) => {
                    if !code.is_supported() {
                        debug!(target_lang = %code, "Passing through unsupported target code");
                    }
                    target_code = code;
                }
                None => warn!(
                    target_lang = name,
                    fallback = %target_code,
                    "Could not map target language"
                ),
            }
        }

        ResolvedRequest {
            detected_source: source_code.clone(),
            source_code,
            target_code,
            user_target_given: user_target.is_some(),
        }
    }

    async fn detect_source(
        &self,
        provider: &dyn TranslationProvider,
        text: &str,
        resolved: &mut ResolvedRequest,
    ) {
        let detected = match provider.detect_language(text).await {
            Ok(code) => code,
            Err(e) => {
                warn!(
                    error = %e,
                    status = ?e.status(),
                    "Language detection failed, continuing without it"
                );
                return;
            }
        };

        info!(
            detected = %detected,
            supported = detected.is_supported(),
            "Detected source language"
        );

        if !resolved.user_target_given {
            if detected.is("es") {
                resolved.target_code = LanguageCode::english();
            } else if REMAP_TO_SPANISH.contains(&detected.as_str()) {
                resolved.target_code = LanguageCode::spanish();
            }
        }

        resolved.detected_source = Some(detected.clone());
        resolved.source_code = Some(detected);
    }

    /// English version of the text for intent parsing; the original text when
    /// the source is unknown, already English, or translation fails
    async fn english_working_copy(
        &self,
        provider: &dyn TranslationProvider,
        text: &str,
        source: Option<&LanguageCode>,
    ) -> String {
        let Some(source) = source.filter(|s| !s.is("en")) else {
            return text.to_string();
        };

        match provider
            .translate(text, &LanguageCode::english(), Some(source))
            .await
        {
            Ok(result) => result.translated_text,
            Err(e) => {
                warn!(
                    error = %e,
                    status = ?e.status(),
                    "English pre-translation failed, parsing original text"
                );
                text.to_string()
            }
        }
    }

    /// Translate just the extracted phrase when the question names a usable
    /// target and the source is known and different
    async fn direct_answer(
        &self,
        provider: &dyn TranslationProvider,
        intent: &IntentMatch,
        resolved: &ResolvedRequest,
        text: &str,
    ) -> Option<TranslationResponse> {
        let name = intent.target_language_name.as_deref()?;
        let Some(target) = self.resolver.resolve_loose(name) else {
            debug!(name, "Intent target language not recognized");
            return None;
        };

        let source = resolved.source_code.as_ref()?;
        if source == &target {
            debug!(%source, "Intent target equals source, using full-text translation");
            return None;
        }

        debug!(
            pattern = intent.pattern_language,
            %source,
            target_lang = %target,
            "Answering matched question directly"
        );

        let phrase = if intent.phrase.is_empty() {
            text
        } else {
            intent.phrase.as_str()
        };

        match provider.translate(phrase, &target, Some(source)).await {
            Ok(result) => Some(TranslationResponse {
                result: result.translated_text,
                detected_source: resolved.detected_source.clone(),
                target_used: target,
            }),
            Err(e) => {
                warn!(
                    error = %truncate(&e.to_string(), LOGGED_TEXT_CHARS),
                    status = ?e.status(),
                    "Pattern-matched translation failed, falling back to full-text translation"
                );
                None
            }
        }
    }

    async fn fallback_translation(
        &self,
        provider: &dyn TranslationProvider,
        text: &str,
        resolved: ResolvedRequest,
    ) -> Result<TranslationResponse, HandlerError> {
        info!(
            text = truncate(text, LOGGED_TEXT_CHARS),
            target_lang = %resolved.target_code,
            source = ?resolved.source_code,
            "Calling {} for fallback",
            provider.provider_name()
        );

        let result = provider
            .translate(text, &resolved.target_code, resolved.source_code.as_ref())
            .await
            .map_err(HandlerError::Provider)?;

        Ok(TranslationResponse {
            result: result.translated_text,
            detected_source: resolved.detected_source,
            target_used: resolved.target_code,
        })
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
