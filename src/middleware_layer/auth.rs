use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};

use crate::{
    error::{AppError, Result},
    services::tokens,
    state::AppState,
};

/// Extracts the raw session token from the request headers.
///
/// The token is carried as the bare value of the `authorization` header,
/// with no "Bearer " prefix.
fn extract_token(request: &Request<Body>) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

/// A middleware that requires a valid session token to be present.
///
/// A missing token is rejected as unauthenticated (401); a present but
/// invalid token as forbidden (403). On success the decoded claims are
/// attached to the request for downstream handlers.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// A `Response` or an `AppError`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    tracing::debug!("🔐 Checking authentication...");

    let token = extract_token(&request).ok_or_else(|| {
        tracing::warn!("❌ No authorization header found");
        AppError::Authentication("Missing authentication token".to_string())
    })?;

    let claims = tokens::verify(&state.config.jwt_secret, &token)?;

    tracing::debug!("✅ User authenticated: {}", claims.id);

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
