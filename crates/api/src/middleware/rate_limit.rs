//! Per-client request limiting for the OCR, offer and VaultRE routes.
//!
//! Mounted with [`axum::middleware::from_fn_with_state`] on each limited
//! route group. All groups share the single limiter in [`AppState`], so a
//! client's budget covers every limited route together.
//!
//! Forwarded headers are honoured by default, which assumes the server runs
//! behind a proxy that sets them. Exposed directly, a client could rotate
//! `X-Forwarded-For` to get a fresh budget per request; set
//! `TRUST_FORWARDED_HEADERS=false` there so only the socket address counts.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::state::AppState;

/// Key used when no client address can be determined.
const UNKNOWN_CLIENT: &str = "unknown";

/// Identify the calling client.
///
/// With `trust_forwarded`, the first `X-Forwarded-For` entry wins, then
/// `X-Real-IP`, then the socket peer address. Without it only the peer
/// address is used.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, trust_forwarded: bool) -> String {
    let peer_ip = || {
        peer.map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
    };
    if !trust_forwarded {
        return peer_ip();
    }

    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(first) = header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return first.to_string();
    }
    if let Some(real) = header("x-real-ip") {
        return real.to_string();
    }
    peer_ip()
}

/// Reject with 429 once the client has used its window's budget.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_ip(
        request.headers(),
        peer,
        state.config.rate_limit.trust_forwarded,
    );

    let decision = state.rate_limiter.check(&client);
    if !decision.allowed {
        tracing::warn!(
            client = %client,
            path = %request.uri().path(),
            limit = decision.limit,
            reset_in_secs = decision.reset_in.as_secs(),
            "Rate limit exceeded"
        );
        return AppError::RateLimited(decision).into_response();
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("x-ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(decision.remaining));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(v));
        }
        map
    }

    fn peer() -> Option<SocketAddr> {
        Some("10.0.0.9:55000".parse().unwrap())
    }

    #[test]
    fn forwarded_for_first_entry_wins() {
        let h = headers(&[
            ("x-forwarded-for", "203.0.113.7, 10.0.0.1"),
            ("x-real-ip", "198.51.100.2"),
        ]);
        assert_eq!(client_ip(&h, peer(), true), "203.0.113.7");
    }

    #[test]
    fn real_ip_when_no_forwarded_for() {
        let h = headers(&[("x-real-ip", "198.51.100.2")]);
        assert_eq!(client_ip(&h, peer(), true), "198.51.100.2");
    }

    #[test]
    fn blank_forwarded_for_falls_through() {
        let h = headers(&[("x-forwarded-for", " , 10.0.0.1")]);
        assert_eq!(client_ip(&h, peer(), true), "10.0.0.9");
    }

    #[test]
    fn socket_address_then_unknown() {
        assert_eq!(client_ip(&HeaderMap::new(), peer(), true), "10.0.0.9");
        assert_eq!(client_ip(&HeaderMap::new(), None, true), "unknown");
    }

    #[test]
    fn untrusted_forwarded_headers_are_ignored() {
        let h = headers(&[
            ("x-forwarded-for", "203.0.113.7"),
            ("x-real-ip", "198.51.100.2"),
        ]);
        assert_eq!(client_ip(&h, peer(), false), "10.0.0.9");
        assert_eq!(client_ip(&h, None, false), "unknown");
    }
}
