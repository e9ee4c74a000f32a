use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::middleware::Next;
use tracing::warn;

use crate::auth::session::SessionSigner;
use crate::cookies;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct AdminContext {
    pub email: String,
}

/// Admin identity carried by a valid `admin_auth` cookie.
pub fn admin_context(signer: &SessionSigner, headers: &HeaderMap) -> Result<AdminContext, AppError> {
    let token = match cookies::read(headers, cookies::ADMIN_AUTH) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(AppError::unauthorized("Admin session required")),
    };

    let claims = signer.verify(&token).map_err(|e| {
        warn!(error = %e, "Rejected admin session marker");
        e
    })?;
    Ok(AdminContext { email: claims.sub })
}

pub async fn require_admin(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let admin = match admin_context(&state.signer, req.headers()) {
        Ok(admin) => admin,
        Err(e) => return e.into_response(),
    };

    // Attach context
    req.extensions_mut().insert(admin);

    next.run(req).await
}
