//! Authentication Middleware
//!
//! HTTP basic authentication for API routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};

use crate::config::AuthSettings;
use crate::shared::error::AppError;
use crate::startup::AppState;

const CHALLENGE: &str = r#"Basic realm="Restricted""#;

/// Check a request's credentials against the configured ones.
fn authorize(settings: &AuthSettings, request: &Request) -> Result<(), AppError> {
    let credentials = request
        .headers()
        .typed_get::<Authorization<Basic>>()
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    if credentials.username() == settings.username && credentials.password() == settings.password
    {
        Ok(())
    } else {
        Err(AppError::Unauthorized("Invalid credentials".into()))
    }
}

/// Authentication middleware that validates basic auth credentials.
///
/// A no-op when auth is disabled. Rejections carry a `WWW-Authenticate`
/// challenge so browsers prompt for credentials.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let settings = &state.settings.auth;
    if !settings.enabled {
        return next.run(request).await;
    }

    match authorize(settings, &request) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected request");
            let mut response = e.into_response();
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
            response
        }
    }
}
