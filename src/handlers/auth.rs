use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, instrument, warn};

use crate::cookies;
use crate::dtos::user::{LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::state::AppState;

#[instrument(skip(state, payload), fields(email = %payload.correo))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError> {
    if payload.correo.trim().is_empty() {
        warn!("Login rejected: missing email");
        return Err(AppError::validation("Email required"));
    }
    if payload.contrasena.is_empty() {
        warn!("Login rejected: missing password");
        return Err(AppError::validation("Password required"));
    }

    let outcome = state.api.login(&payload).await?;
    let token = state.signer.sign(&outcome.email)?;
    info!("Admin signed in");

    let cookie = cookies::set(cookies::ADMIN_AUTH, &token, state.signer.ttl_secs());
    let body = LoginResponse {
        message: outcome.message.unwrap_or_else(|| "Sesión iniciada".to_string()),
        expires_in_seconds: state.signer.ttl_secs(),
    };
    Ok(([(header::SET_COOKIE, cookie)], Json(body)).into_response())
}

pub async fn logout() -> Response {
    let cookie = cookies::expire(cookies::ADMIN_AUTH);
    ([(header::SET_COOKIE, cookie)], Json(serde_json::json!({ "message": "Sesión cerrada" }))).into_response()
}
