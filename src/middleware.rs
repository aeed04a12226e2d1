//! Axum middleware surface.
//!
//! Hosts that want per-route limiting wire [`rate_limit_middleware`] with a
//! shared [`RateLimiter`]; everything else in the crate is callable directly
//! from handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use crate::audit::{SecurityAudit, Severity};
use crate::observability::metrics;
use crate::rate_limit::RateLimiter;

/// State for the rate-limit middleware.
#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: Arc<RateLimiter>,
    pub audit: Arc<SecurityAudit>,
    /// Feature name prefixed onto the client IP to form the identifier,
    /// e.g. `"login"` → `"login-1.2.3.4"`.
    pub feature: Arc<str>,
}

impl RateLimitState {
    pub fn new(limiter: Arc<RateLimiter>, audit: Arc<SecurityAudit>, feature: &str) -> Self {
        Self {
            limiter,
            audit,
            feature: Arc::from(feature),
        }
    }
}

/// Middleware enforcing the fixed-window limit per client IP.
///
/// Rejected requests get `429` with the JSON body the calling routes expect
/// and produce a medium severity audit event; no internal counter state is
/// exposed to the client.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<RateLimitState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let identifier = format!("{}-{}", state.feature, addr.ip());
    let decision = state.limiter.check(&identifier);

    if decision.allowed {
        return next.run(request).await;
    }

    tracing::warn!(client = %identifier, "rate limit exceeded");
    metrics::record_rate_limited("window_limit");

    let user_agent = request
        .headers()
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let mut details = Map::new();
    details.insert("identifier".to_string(), Value::from(identifier));
    state.audit.log_event_with_client(
        "rate_limit_exceeded",
        details,
        Severity::Medium,
        Some(addr.ip().to_string()),
        user_agent,
    );

    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({ "error": "Too many requests" })),
    )
        .into_response()
}
