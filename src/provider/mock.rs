//! Mock translation provider for testing
//!
//! Deterministic, API-free provider that records every call it receives, so
//! tests can assert both on results and on how many outbound calls the handler
//! made.
//!
//! # Example
//!
//! ```ignore
//! use phrasebridge::provider::{MockDetection, MockMode, MockProvider, TranslationProvider};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockProvider::new(MockMode::Suffix).with_detection(MockDetection::Fixed("es".into()));
//!     let result = mock.translate("hola", &LanguageCode::english(), None).await.unwrap();
//!     assert_eq!(result.translated_text, "hola_en");
//! }
//! ```

use crate::provider::error::{ProviderError, ProviderResult};
use crate::provider::translator::{TranslationProvider, TranslationResult};
use crate::resolver::LanguageCode;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// How the mock answers translate calls
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append the target code: "hello" → "hello_fr"
    Suffix,

    /// Use predefined mappings keyed by (text, target code), falling back to
    /// suffix mode for unknown keys
    Mappings(HashMap<(String, String), String>),

    /// Every translate call fails
    Error(String),

    /// Return input unchanged
    NoOp,
}

/// How the mock answers detect calls
#[derive(Debug, Clone)]
pub enum MockDetection {
    Fixed(String),
    Error(String),
}

/// A call received by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Detect {
        text: String,
    },
    Translate {
        text: String,
        target: String,
        source: Option<String>,
    },
}

#[derive(Debug)]
pub struct MockProvider {
    mode: MockMode,
    detection: MockDetection,
    /// (text, target) pairs whose translation fails regardless of mode
    failing: HashSet<(String, String)>,
    calls: Mutex<Vec<ProviderCall>>,
}

impl MockProvider {
    /// Create a mock that detects English and translates with `mode`
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            detection: MockDetection::Fixed("en".to_string()),
            failing: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_detection(mut self, detection: MockDetection) -> Self {
        self.detection = detection;
        self
    }

    /// Make translate calls for exactly `text` into `target` fail
    pub fn failing_for(mut self, text: impl Into<String>, target: impl Into<String>) -> Self {
        self.failing.insert((text.into(), target.into()));
        self
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    fn record(&self, call: ProviderCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn apply_translation(&self, text: &str, target: &str) -> ProviderResult<String> {
        if self.failing.contains(&(text.to_string(), target.to_string())) {
            return Err(ProviderError::Status {
                status: 500,
                body: format!("mock failure for '{}'", text),
            });
        }

        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Error(msg) => Err(ProviderError::Other(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn detect_language(&self, text: &str) -> ProviderResult<LanguageCode> {
        self.record(ProviderCall::Detect {
            text: text.to_string(),
        });

        match &self.detection {
            MockDetection::Fixed(code) => Ok(LanguageCode::new(code)),
            MockDetection::Error(msg) => Err(ProviderError::Other(msg.clone())),
        }
    }

    async fn translate(
        &self,
        text: &str,
        target: &LanguageCode,
        source: Option<&LanguageCode>,
    ) -> ProviderResult<TranslationResult> {
        self.record(ProviderCall::Translate {
            text: text.to_string(),
            target: target.to_string(),
            source: source.map(|s| s.to_string()),
        });

        self.apply_translation(text, target.as_str())
            .map(TranslationResult::new)
    }

    fn provider_name(&self) -> &str {
        "Mock Provider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_suffix_translation() {
        let mock = MockProvider::new(MockMode::Suffix);
        let result = mock
            .translate("hello", &LanguageCode::new("fr"), None)
            .await
            .unwrap();
        assert_eq!(result.translated_text, "hello_fr");
    }

    #[tokio::test]
    async fn test_mapping_translation_and_fallback() {
        let mut map = HashMap::new();
        map.insert(
            ("lo que sea".to_string(), "en".to_string()),
            "whatever".to_string(),
        );
        let mock = MockProvider::new(MockMode::Mappings(map));

        let en = LanguageCode::english();
        let result = mock.translate("lo que sea", &en, None).await.unwrap();
        assert_eq!(result.translated_text, "whatever");

        let result = mock.translate("unknown", &en, None).await.unwrap();
        assert_eq!(result.translated_text, "unknown_en");
    }

    #[tokio::test]
    async fn test_error_mode() {
        let mock = MockProvider::new(MockMode::Error("API unavailable".to_string()));
        let err = mock
            .translate("hello", &LanguageCode::spanish(), None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API unavailable");
    }

    #[tokio::test]
    async fn test_noop_mode() {
        let mock = MockProvider::new(MockMode::NoOp);
        let result = mock
            .translate("Hello world", &LanguageCode::spanish(), None)
            .await
            .unwrap();
        assert_eq!(result.translated_text, "Hello world");
    }

    #[tokio::test]
    async fn test_failing_for_specific_text() {
        let mock = MockProvider::new(MockMode::Suffix).failing_for("broken", "es");
        let es = LanguageCode::spanish();
        assert!(mock.translate("broken", &es, None).await.is_err());
        assert!(mock.translate("broken", &LanguageCode::english(), None).await.is_ok());
        assert!(mock.translate("fine", &es, None).await.is_ok());
    }

    #[tokio::test]
    async fn test_detection_modes() {
        let mock = MockProvider::new(MockMode::NoOp);
        assert_eq!(mock.detect_language("hi").await.unwrap().as_str(), "en");

        let mock =
            MockProvider::new(MockMode::NoOp).with_detection(MockDetection::Fixed("ES".into()));
        assert_eq!(mock.detect_language("hola").await.unwrap().as_str(), "es");

        let mock = MockProvider::new(MockMode::NoOp)
            .with_detection(MockDetection::Error("detect down".into()));
        assert!(mock.detect_language("hola").await.is_err());
    }

    #[tokio::test]
    async fn test_calls_are_recorded_in_order() {
        let mock = MockProvider::new(MockMode::Suffix);
        let es = LanguageCode::spanish();
        let en = LanguageCode::english();

        mock.detect_language("hello").await.unwrap();
        mock.translate("hello", &es, Some(&en)).await.unwrap();

        assert_eq!(mock.call_count(), 2);
        assert_eq!(
            mock.calls(),
            vec![
                ProviderCall::Detect {
                    text: "hello".to_string()
                },
                ProviderCall::Translate {
                    text: "hello".to_string(),
                    target: "es".to_string(),
                    source: Some("en".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_provider_name() {
        let mock = MockProvider::new(MockMode::Suffix);
        assert_eq!(mock.provider_name(), "Mock Provider");
    }
}
