//! End-to-end tests of the request pipeline against a fake Google endpoint
//!
//! The real-API test is ignored by default:
//!
//! ```bash
//! export GOOGLE_API_KEY=...
//! cargo test --lib integration_tests -- --ignored --nocapture
//! ```

use crate::aliases::load_alias_table;
use crate::handler::{HandlerError, TranslationRequest, TranslationService};
use crate::provider::{GoogleTranslateProvider, TranslationProvider};
use crate::resolver::{AliasTable, LanguageResolver};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

const BASE_PATH: &str = "/language/translate/v2";

fn service_for(server: &MockServer, table: AliasTable) -> TranslationService {
    let provider = GoogleTranslateProvider::with_base_url(
        "test-key".to_string(),
        format!("{}{}", server.uri(), BASE_PATH),
    )
    .unwrap();
    let provider: Arc<dyn TranslationProvider> = Arc::new(provider);
    TranslationService::new(Some(provider), LanguageResolver::new(Arc::new(table)))
}

async fn mount_detect(server: &MockServer, language: &str) {
    Mock::given(method("POST"))
        .and(path(format!("{}/detect", BASE_PATH)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"detections": [[{"language": language, "confidence": 0.98}]]}
        })))
        .mount(server)
        .await;
}

async fn mount_translation(server: &MockServer, q: &str, target: &str, translated: &str) {
    Mock::given(method("POST"))
        .and(path(BASE_PATH))
        .and(body_partial_json(json!({"q": q, "target": target})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"translations": [{"translatedText": translated}]}
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_e2e_spanish_question_about_english() {
    let server = MockServer::start().await;
    let text = "¿Qué significa lo que sea en inglés?";
    mount_detect(&server, "es").await;
    mount_translation(&server, text, "en", "What does whatever mean in English?").await;
    mount_translation(&server, "lo que sea", "en", "whatever").await;

    let service = service_for(&server, AliasTable::builtin());
    let response = service.handle(&TranslationRequest::new(text)).await.unwrap();

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"result": "whatever", "detectedSource": "es", "targetUsed": "en"})
    );
}

#[tokio::test]
async fn test_e2e_plain_english_text_goes_to_spanish() {
    let server = MockServer::start().await;
    mount_detect(&server, "en").await;
    mount_translation(&server, "good night", "es", "buenas noches").await;

    let service = service_for(&server, AliasTable::builtin());
    let response = service
        .handle(&TranslationRequest::new("good night"))
        .await
        .unwrap();

    assert_eq!(response.result, "buenas noches");
    assert_eq!(response.target_used.as_str(), "es");
}

#[tokio::test]
async fn test_e2e_alias_file_target() {
    let server = MockServer::start().await;
    mount_translation(&server, "good night", "zh", "晚安").await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(r#"{"mandarin": ["chinese", "中文"]}"#.as_bytes())
        .unwrap();
    let service = service_for(&server, load_alias_table(file.path()));

    let request = TranslationRequest::new("good night")
        .with_source("english")
        .with_target("Chinese");
    let response = service.handle(&request).await.unwrap();

    assert_eq!(response.result, "晚安");
    assert_eq!(response.target_used.as_str(), "zh");
    assert_eq!(response.detected_source.unwrap().as_str(), "en");
}

#[tokio::test]
async fn test_e2e_provider_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    mount_detect(&server, "en").await;
    Mock::given(method("POST"))
        .and(path(BASE_PATH))
        .respond_with(
            ResponseTemplate::new(403).set_body_string(r#"{"error": {"message": "API key not valid"}}"#),
        )
        .mount(&server)
        .await;

    let service = service_for(&server, AliasTable::builtin());
    let err = service
        .handle(&TranslationRequest::new("good night"))
        .await
        .unwrap_err();

    assert!(matches!(err, HandlerError::Provider(_)));
    assert_eq!(err.status_code(), 502);
    assert!(err.details().unwrap().contains("API key not valid"));
}

#[tokio::test]
async fn test_e2e_unreachable_provider_does_not_expose_key() {
    let server = MockServer::start().await;
    let base = format!("{}{}", server.uri(), BASE_PATH);
    drop(server);

    let provider =
        GoogleTranslateProvider::with_base_url("SECRET-KEY-abcdef123456".to_string(), base)
            .unwrap();
    let provider: Arc<dyn TranslationProvider> = Arc::new(provider);
    let service = TranslationService::new(
        Some(provider),
        LanguageResolver::new(Arc::new(AliasTable::builtin())),
    );

    let err = service
        .handle(&TranslationRequest::new("good night"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 502);
    let details = err.details().unwrap();
    assert!(details.starts_with("network error"));
    assert!(!details.contains("SECRET-KEY"));
}

#[tokio::test]
#[ignore]
async fn test_real_api_spanish_question() {
    let Ok(provider) = GoogleTranslateProvider::from_env() else {
        eprintln!("Skipping: GOOGLE_API_KEY not set");
        return;
    };
    let provider: Arc<dyn TranslationProvider> = Arc::new(provider);
    let service = TranslationService::new(
        Some(provider),
        LanguageResolver::new(Arc::new(AliasTable::builtin())),
    );

    let response = service
        .handle(&TranslationRequest::new("¿Cómo se dice gato en francés?"))
        .await
        .unwrap();

    println!("{:?}", response);
    assert_eq!(response.target_used.as_str(), "fr");
    assert_eq!(response.detected_source.unwrap().as_str(), "es");
}
