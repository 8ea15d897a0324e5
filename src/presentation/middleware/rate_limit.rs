//! Rate Limiting Middleware
//!
//! In-process, per-client fixed window limiting. Each client gets a budget of
//! requests per one-minute window; the budget refills when the window rolls
//! over.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use dashmap::DashMap;
use serde::Serialize;

use crate::config::RateLimitSettings;
use crate::shared::error::ErrorResponse;
use crate::startup::AppState;

const WINDOW: Duration = Duration::from_secs(60);

// ============================================================================
// Rate Limit Response
// ============================================================================

/// Information about rate limit status returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the current window
    pub limit: u32,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Unix timestamp when the rate limit resets
    pub reset_at: i64,
    /// Seconds until the rate limit resets
    pub retry_after: u64,
}

/// Rate limit exceeded error response.
#[derive(Debug, Serialize)]
struct RateLimitExceededResponse {
    #[serde(flatten)]
    error: ErrorResponse,
    rate_limit: RateLimitInfo,
}

// ============================================================================
// Rate Limiter Implementation
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Window {
    /// Unix timestamp (seconds) the window opened at
    started_at: i64,
    count: u32,
}

/// Fixed window rate limiter keyed by client identifier.
///
/// Windows are tracked in a `DashMap`, so checks for different clients do not
/// contend on a single lock.
#[derive(Debug)]
pub struct RateLimiter {
    enabled: bool,
    limit: u32,
    window_secs: i64,
    windows: DashMap<String, Window>,
}

impl RateLimiter {
    /// Create a limiter allowing `limit` requests per client per minute.
    pub fn new(limit: u32) -> Self {
        Self {
            enabled: true,
            limit,
            window_secs: WINDOW.as_secs() as i64,
            windows: DashMap::new(),
        }
    }

    /// Create from application settings.
    pub fn from_settings(settings: &RateLimitSettings) -> Self {
        Self {
            enabled: settings.enabled,
            ..Self::new(settings.requests_per_minute)
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check if a request should be allowed.
    ///
    /// Returns `Ok(RateLimitInfo)` if allowed, `Err(RateLimitInfo)` if rate limited.
    pub fn check(&self, identifier: &str) -> Result<RateLimitInfo, RateLimitInfo> {
        self.check_at(identifier, Utc::now().timestamp())
    }

    fn check_at(&self, identifier: &str, now: i64) -> Result<RateLimitInfo, RateLimitInfo> {
        let mut window = self
            .windows
            .entry(identifier.to_string())
            .or_insert(Window {
                started_at: now,
                count: 0,
            });

        if now - window.started_at >= self.window_secs {
            *window = Window {
                started_at: now,
                count: 0,
            };
        }

        let reset_at = window.started_at + self.window_secs;
        let allowed = window.count < self.limit;
        if allowed {
            window.count += 1;
        }

        let info = RateLimitInfo {
            limit: self.limit,
            remaining: self.limit.saturating_sub(window.count),
            reset_at,
            retry_after: if allowed {
                0
            } else {
                (reset_at - now).max(1) as u64
            },
        };

        if allowed {
            Ok(info)
        } else {
            Err(info)
        }
    }

    /// Drop windows that have already expired.
    pub fn prune(&self) {
        let now = Utc::now().timestamp();
        self.windows
            .retain(|_, window| now - window.started_at < self.window_secs);
        tracing::debug!(tracked = self.windows.len(), "Pruned rate limit windows");
    }
}

// ============================================================================
// Identifier Extraction
// ============================================================================

/// Extract the rate limit identifier from a request.
///
/// Priority:
/// 1. X-Forwarded-For header (first hop, for reverse proxy setups)
/// 2. X-Real-IP header
/// 3. Client socket address
///
/// Forwarding headers can be spoofed by clients that are not behind a trusted
/// proxy.
fn extract_identifier(request: &Request) -> String {
    if let Some(forwarded_for) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(first_ip) = forwarded_for.split(',').next() {
            let ip = first_ip.trim();
            if ip.parse::<IpAddr>().is_ok() {
                return format!("ip:{}", ip);
            }
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
    {
        let real_ip = real_ip.trim();
        if real_ip.parse::<IpAddr>().is_ok() {
            return format!("ip:{}", real_ip);
        }
    }

    match request.extensions().get::<ConnectInfo<SocketAddr>>() {
        Some(ConnectInfo(addr)) => format!("ip:{}", addr.ip()),
        None => {
            tracing::warn!("Could not determine client identifier for rate limiting");
            "ip:unknown".to_string()
        }
    }
}

// ============================================================================
// Middleware Functions
// ============================================================================

/// Rate limiting middleware for API endpoints.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let limiter = &state.rate_limiter;
    if !limiter.is_enabled() {
        return next.run(request).await;
    }

    let identifier = extract_identifier(&request);

    match limiter.check(&identifier) {
        Ok(info) => {
            let mut response = next.run(request).await;
            add_rate_limit_headers(response.headers_mut(), &info);
            response
        }
        Err(info) => {
            tracing::warn!(identifier = %identifier, "Rate limit exceeded");
            create_rate_limit_response(info)
        }
    }
}

/// Add rate limit headers to a response.
fn add_rate_limit_headers(headers: &mut header::HeaderMap, info: &RateLimitInfo) {
    if let Ok(v) = header::HeaderValue::from_str(&info.limit.to_string()) {
        headers.insert("X-RateLimit-Limit", v);
    }
    if let Ok(v) = header::HeaderValue::from_str(&info.remaining.to_string()) {
        headers.insert("X-RateLimit-Remaining", v);
    }
    if let Ok(v) = header::HeaderValue::from_str(&info.reset_at.to_string()) {
        headers.insert("X-RateLimit-Reset", v);
    }
}

/// Create a 429 Too Many Requests response.
fn create_rate_limit_response(info: RateLimitInfo) -> Response {
    let body = RateLimitExceededResponse {
        error: ErrorResponse {
            code: 10006,
            message: "You are being rate limited. Please slow down.".to_string(),
            kind: Some("RATE_LIMITED"),
            errors: None,
        },
        rate_limit: info,
    };

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

    if let Ok(v) = header::HeaderValue::from_str(&info.retry_after.to_string()) {
        response.headers_mut().insert(header::RETRY_AFTER, v);
    }
    add_rate_limit_headers(response.headers_mut(), &info);

    response
}

// ============================================================================
// Tests
// ============================================================================
