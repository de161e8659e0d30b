use listdesk_core::rate_limit;
use listdesk_ocr::api::{DEFAULT_BASE_URL as GEMINI_DEFAULT_BASE_URL, DEFAULT_MODEL};
use listdesk_ocr::GeminiConfig;
use listdesk_vaultre::api::DEFAULT_BASE_URL as VAULTRE_DEFAULT_BASE_URL;
use listdesk_vaultre::VaultReConfig;

/// Default chat-assistant API base.
pub const CHAT_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Server configuration loaded from environment variables.
///
/// Credentials are optional: a server without them still starts, and the
/// endpoints that need them answer 500 until they are configured.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds for non-streaming routes (default: `30`).
    pub request_timeout_secs: u64,
    /// Postgres connection string.
    pub database_url: Option<String>,
    /// VaultRE credentials; `None` unless both key and token are set.
    pub vaultre: Option<VaultReConfig>,
    /// Vision model credentials; `None` without `GEMINI_API_KEY`.
    pub gemini: Option<GeminiConfig>,
    /// Workflow automation endpoint notified after saves.
    pub workflow_webhook_url: Option<String>,
    pub chat: ChatConfig,
    pub rate_limit: RateLimitConfig,
}

/// Chat-assistant session settings.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_key: Option<String>,
    pub workflow_id: Option<String>,
    pub base_url: String,
}

/// Per-client request limits for the expensive routes.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
    pub sweep_secs: u64,
    /// Key clients by `X-Forwarded-For` / `X-Real-IP`. Only safe behind a
    /// proxy that overwrites those headers; otherwise clients can pick
    /// their own key.
    pub trust_forwarded: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: rate_limit::DEFAULT_MAX_REQUESTS,
            window_secs: rate_limit::DEFAULT_WINDOW.as_secs(),
            sweep_secs: 60,
            trust_forwarded: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                                              |
    /// |---------------------------|------------------------------------------------------|
    /// | `HOST`                    | `0.0.0.0`                                            |
    /// | `PORT`                    | `3000`                                               |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`                              |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                                                 |
    /// | `DATABASE_URL`            | unset                                                |
    /// | `VAULTRE_API_KEY`         | unset                                                |
    /// | `VAULTRE_BEARER_TOKEN`    | unset                                                |
    /// | `VAULTRE_BASE_URL`        | `https://ap-southeast-2.api.vaultre.com.au/api/v1.3` |
    /// | `GEMINI_API_KEY`          | unset                                                |
    /// | `GEMINI_MODEL`            | `gemini-2.5-flash`                                   |
    /// | `GEMINI_BASE_URL`         | `https://generativelanguage.googleapis.com`          |
    /// | `WORKFLOW_WEBHOOK_URL`    | unset                                                |
    /// | `CHAT_API_KEY`            | unset                                                |
    /// | `CHAT_WORKFLOW_ID`        | unset                                                |
    /// | `CHAT_BASE_URL`           | `https://api.openai.com/v1`                          |
    /// | `RATE_LIMIT_MAX_REQUESTS` | `30`                                                 |
    /// | `RATE_LIMIT_WINDOW_SECS`  | `60`                                                 |
    /// | `RATE_LIMIT_SWEEP_SECS`   | `60`                                                 |
    /// | `TRUST_FORWARDED_HEADERS` | `true`                                               |
    ///
    /// Panics on malformed numeric values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let var_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let host = var_or("HOST", "0.0.0.0");

        let port: u16 = var_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = var_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = var_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let vaultre = match (var("VAULTRE_API_KEY"), var("VAULTRE_BEARER_TOKEN")) {
            (Some(api_key), Some(bearer_token)) => Some(VaultReConfig {
                api_key,
                bearer_token,
                base_url: var_or("VAULTRE_BASE_URL", VAULTRE_DEFAULT_BASE_URL),
            }),
            _ => None,
        };

        let gemini = var("GEMINI_API_KEY").map(|api_key| GeminiConfig {
            api_key,
            model: var_or("GEMINI_MODEL", DEFAULT_MODEL),
            base_url: var_or("GEMINI_BASE_URL", GEMINI_DEFAULT_BASE_URL),
        });

        let chat = ChatConfig {
            api_key: var("CHAT_API_KEY"),
            workflow_id: var("CHAT_WORKFLOW_ID"),
            base_url: var_or("CHAT_BASE_URL", CHAT_DEFAULT_BASE_URL),
        };

        let defaults = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            max_requests: var("RATE_LIMIT_MAX_REQUESTS")
                .map(|v| v.parse().expect("RATE_LIMIT_MAX_REQUESTS must be a valid u32"))
                .unwrap_or(defaults.max_requests),
            window_secs: var("RATE_LIMIT_WINDOW_SECS")
                .map(|v| v.parse().expect("RATE_LIMIT_WINDOW_SECS must be a valid u64"))
                .unwrap_or(defaults.window_secs),
            sweep_secs: var("RATE_LIMIT_SWEEP_SECS")
                .map(|v| v.parse().expect("RATE_LIMIT_SWEEP_SECS must be a valid u64"))
                .unwrap_or(defaults.sweep_secs),
            trust_forwarded: var("TRUST_FORWARDED_HEADERS")
                .map(|v| v.parse().expect("TRUST_FORWARDED_HEADERS must be true or false"))
                .unwrap_or(defaults.trust_forwarded),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url: var("DATABASE_URL"),
            vaultre,
            gemini,
            workflow_webhook_url: var("WORKFLOW_WEBHOOK_URL"),
            chat,
            rate_limit,
        }
    }
}
