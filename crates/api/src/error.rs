use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use listdesk_core::error::CoreError;
use listdesk_core::rate_limit::RateLimitDecision;
use listdesk_ocr::OcrError;
use listdesk_vaultre::VaultReError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain and integration errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses of
/// the form `{"error": <message>, "code": <CODE>}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `listdesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A VaultRE integration error.
    #[error(transparent)]
    VaultRe(#[from] VaultReError),

    /// An extraction error raised before streaming started.
    #[error(transparent)]
    Ocr(#[from] OcrError),

    /// A third-party service failed; the detail is logged, not returned.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),

    /// The client exceeded its request budget.
    #[error("Rate limit exceeded")]
    RateLimited(RateLimitDecision),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";
const UPSTREAM_MESSAGE: &str = "An upstream service request failed";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Integrations ---
            AppError::VaultRe(err) => classify_vaultre_error(err),
            AppError::Ocr(err) => match err {
                OcrError::UnsupportedMime(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
                }
                OcrError::Api { status, body } => {
                    tracing::error!(status, body = %body, "Model API error");
                    upstream()
                }
                other => {
                    tracing::error!(error = %other, "Extraction error");
                    upstream()
                }
            },
            AppError::Upstream(msg) => {
                tracing::error!(error = %msg, "Upstream error");
                upstream()
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
            AppError::RateLimited(decision) => return rate_limited_response(decision),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

fn upstream() -> (StatusCode, &'static str, String) {
    (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", UPSTREAM_MESSAGE.to_string())
}

/// Map a VaultRE error to an HTTP status, error code, and message.
///
/// - Reference-data misses (suburb, agent) and incomplete drafts map to 400.
/// - Non-2xx upstream responses and transport failures map to 502; the
///   upstream status and body are logged only.
fn classify_vaultre_error(err: &VaultReError) -> (StatusCode, &'static str, String) {
    match err {
        VaultReError::SuburbNotFound(_)
        | VaultReError::AgentNotMatched(_)
        | VaultReError::InvalidDraft(_) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
        }
        VaultReError::Api { status, body } => {
            tracing::error!(status, body = %body, "VaultRE API error");
            upstream()
        }
        VaultReError::Request(e) => {
            tracing::error!(error = %e, "VaultRE request failed");
            upstream()
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

/// 429 with `X-RateLimit-*` headers and the reset time in the body.
fn rate_limited_response(decision: &RateLimitDecision) -> Response {
    let reset_secs = decision.reset_in.as_secs() + u64::from(decision.reset_in.subsec_nanos() > 0);
    let reset_at = chrono::Utc::now()
        + chrono::Duration::from_std(decision.reset_in).unwrap_or_else(|_| chrono::Duration::zero());
    let reset_epoch = reset_at.timestamp().max(0) as u64;

    let body = json!({
        "error": format!("Too many requests, retry in {reset_secs} seconds"),
        "code": "RATE_LIMITED",
        "remaining": 0,
        "resetAt": reset_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, axum::Json(body)).into_response();
    let headers = response.headers_mut();
    headers.insert("x-ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(0u32));
    headers.insert("x-ratelimit-reset", HeaderValue::from(reset_epoch));
    response
}
