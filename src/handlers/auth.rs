use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Result,
    models::claims::Claims,
    services::{auth as auth_service, tokens},
    state::AppState,
};

/// The request payload for user registration.
#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// The request payload for user login.
#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// A simple confirmation message.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// The response payload for a successful login.
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "userID")]
    pub user_id: Uuid,
}

/// Handles user registration.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!("📝 Register attempt for username: {}", payload.username);

    auth_service::register_user(&state.db, &payload.username, &payload.password).await?;

    Ok(Json(MessageResponse {
        message: "User Registered Successfully.".to_string(),
    }))
}

/// Handles user login, issuing a session token on success.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    tracing::info!("🔐 Login attempt for username: {}", payload.username);

    let user =
        auth_service::authenticate_user(&state.db, &payload.username, &payload.password).await?;

    let claims = Claims {
        id: user.id,
        is_admin: user.is_admin,
    };
    let token = tokens::issue(&state.config.jwt_secret, &claims)?;

    tracing::info!("✅ User logged in: {}", user.id);

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
    }))
}

/// Handles deletion of the caller's own account.
///
/// The id in the verified token claims decides which account is deleted;
/// the path parameter is not consulted.
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(_user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    tracing::info!("👋 Account deletion requested by: {}", claims.id);

    auth_service::delete_account(&state.db, &claims.id).await?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully.".to_string(),
    }))
}
