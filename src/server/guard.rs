// src/server/guard.rs
//! Shared-secret check and throttling in front of the guarded routes.

use super::AppState;
use crate::constants::API_KEY_HEADER;
use crate::error::AppError;
use crate::types::SharedSecret;
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;

/// Verifies the `x-api-key` header against the configured secret.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyGuard {
    secret: Option<SharedSecret>,
}

impl ApiKeyGuard {
    /// With no secret every request passes.
    pub fn new(secret: Option<SharedSecret>) -> Self {
        Self { secret }
    }

    pub fn verify(&self, supplied: Option<&str>) -> Result<(), AppError> {
        let Some(secret) = &self.secret else {
            return Ok(());
        };
        match supplied {
            Some(supplied) if secret.matches(supplied) => Ok(()),
            _ => Err(AppError::Unauthorized),
        }
    }
}

/// Client identity for throttling: the peer IP, or `"unknown"` when the
/// server was not started with connection info.
fn client_id(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware: API key first, then the rate limit.
pub async fn guard_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let supplied = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    state.api_key_guard.verify(supplied)?;

    let client = client_id(&request);
    if !state.rate_limiter.check_and_record(&client) {
        log::warn!("Rate limit exceeded for {}", client);
        return Err(AppError::RateLimitExceeded);
    }

    Ok(next.run(request).await)
}
