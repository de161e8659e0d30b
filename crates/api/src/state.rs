use std::sync::Arc;
use std::time::Duration;

use listdesk_core::rate_limit::RateLimiter;
use listdesk_db::DbPool;
use listdesk_events::WebhookDelivery;
use listdesk_ocr::GeminiClient;
use listdesk_vaultre::VaultReApi;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Integrations whose credentials are missing are `None`; the accessors turn
/// that into a logged 500 for the request that needed them.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: Option<DbPool>,
    pub config: Arc<ServerConfig>,
    /// Per-client limiter shared by the rate-limited route groups.
    pub rate_limiter: Arc<RateLimiter>,
    pub vaultre: Option<Arc<VaultReApi>>,
    pub gemini: Option<GeminiClient>,
    pub webhook: Option<WebhookDelivery>,
    /// Client for ad-hoc upstream calls (chat sessions).
    pub http: reqwest::Client,
}

impl AppState {
    /// Build the state and its integration clients from configuration.
    pub fn from_config(config: ServerConfig, pool: Option<DbPool>) -> Self {
        let http = reqwest::Client::new();
        let rate_limiter = Arc::new(RateLimiter::new(
            config.rate_limit.max_requests,
            Duration::from_secs(config.rate_limit.window_secs),
        ));
        let vaultre = config
            .vaultre
            .clone()
            .map(|c| Arc::new(VaultReApi::with_client(http.clone(), c)));
        let gemini = config
            .gemini
            .clone()
            .map(|c| GeminiClient::with_client(http.clone(), c));
        let webhook = config
            .workflow_webhook_url
            .clone()
            .and_then(|url| match WebhookDelivery::new(url) {
                Ok(delivery) => Some(delivery),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to build workflow webhook client");
                    None
                }
            });

        Self {
            pool,
            config: Arc::new(config),
            rate_limiter,
            vaultre,
            gemini,
            webhook,
            http,
        }
    }

    pub fn db(&self) -> AppResult<&DbPool> {
        self.pool
            .as_ref()
            .ok_or_else(|| AppError::InternalError("DATABASE_URL is not configured".into()))
    }

    pub fn vaultre(&self) -> AppResult<&VaultReApi> {
        self.vaultre.as_deref().ok_or_else(|| {
            AppError::InternalError("VAULTRE_API_KEY / VAULTRE_BEARER_TOKEN are not configured".into())
        })
    }

    pub fn gemini(&self) -> AppResult<&GeminiClient> {
        self.gemini
            .as_ref()
            .ok_or_else(|| AppError::InternalError("GEMINI_API_KEY is not configured".into()))
    }
}
