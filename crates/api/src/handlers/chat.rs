//! Chat-assistant session creation.
//!
//! The browser embed needs a short-lived client secret. The server creates
//! the session with its own API key so the key never reaches the browser.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Optional request body.
#[derive(Debug, Default, Deserialize)]
pub struct CreateChatSession {
    /// Stable end-user identifier; a random one is generated when absent.
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpstreamSession {
    client_secret: String,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ChatSession {
    pub client_secret: String,
    pub expires_at: Option<i64>,
}

/// POST /api/chat/session
pub async fn create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let input: CreateChatSession = if body.iter().all(u8::is_ascii_whitespace) {
        CreateChatSession::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?
    };

    let chat = &state.config.chat;
    let (api_key, workflow_id) = match (&chat.api_key, &chat.workflow_id) {
        (Some(key), Some(workflow)) => (key, workflow),
        _ => {
            return Err(AppError::InternalError(
                "CHAT_API_KEY / CHAT_WORKFLOW_ID are not configured".into(),
            ))
        }
    };

    let user = input
        .user
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let response = state
        .http
        .post(format!("{}/chatkit/sessions", chat.base_url.trim_end_matches('/')))
        .bearer_auth(api_key)
        .header("OpenAI-Beta", "chatkit_beta=v1")
        .json(&json!({ "workflow": { "id": workflow_id }, "user": user }))
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("Chat session request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Upstream(format!(
            "Chat session API returned {status}: {body}"
        )));
    }

    let session: UpstreamSession = response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("Invalid chat session response: {e}")))?;

    tracing::info!(user = %user, "Chat session created");
    Ok(Json(DataResponse {
        data: ChatSession {
            client_secret: session.client_secret,
            expires_at: session.expires_at,
        },
    }))
}
