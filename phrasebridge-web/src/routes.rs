use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use phrasebridge::{HandlerError, TranslationRequest, TranslationResponse, TranslationService};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

pub const SERVER_ERROR_MESSAGE: &str = "Server error";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TranslationService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/translate", post(translate))
        .route("/.netlify/functions/translate", post(translate))
        .route("/health", get(health))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn translate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TranslationResponse>, ApiError> {
    // Configuration is reported before the body is looked at
    if !state.service.is_configured() {
        error!("GOOGLE_API_KEY is not configured");
        return Err(handler_error(HandlerError::NotConfigured));
    }

    let request = parse_body(&body)?;
    let response = state.service.handle(&request).await.map_err(handler_error)?;
    Ok(Json(response))
}

/// An empty body or a JSON `null` is treated as `{}`
fn parse_body(body: &[u8]) -> Result<TranslationRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TranslationRequest::default());
    }

    serde_json::from_slice::<Option<TranslationRequest>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| {
            warn!(error = %e, "Malformed request body");
            server_error(e.to_string())
        })
}

fn handler_error(err: HandlerError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if let HandlerError::Provider(e) = &err {
        error!(error = %e, status = ?e.status(), "Translation provider error");
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            details: err.details(),
        }),
    )
}

fn server_error(details: String) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: SERVER_ERROR_MESSAGE.to_string(),
            details: Some(details),
        }),
    )
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(details = %details, "Request handler panicked");

    server_error(details).into_response()
}
