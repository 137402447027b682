//! Session verification for protected routes.
//!
//! Token from the `jwt` cookie (or `Authorization: Bearer`), signature and
//! expiry checked, user loaded with the session projection and stored in the
//! request extensions for [`AuthUser`](super::extractors::AuthUser).

use axum::{
    extract::{FromRef, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{error, warn};

use crate::{
    auth::{jwt::JwtKeys, session::extract_token},
    error::ApiError,
    state::AppState,
};

pub async fn verify_jwt(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers())
        .ok_or_else(|| ApiError::authentication("Invalid User Token"))?;

    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify(&token).map_err(|e| {
        warn!(error = %e, "invalid or expired token");
        ApiError::authentication(e.to_string())
    })?;

    let user = state
        .users
        .find_session_user(claims.id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %claims.id, "session user lookup failed");
            ApiError::authentication("Invalid User Token")
        })?
        .ok_or_else(|| {
            warn!(user_id = %claims.id, "token for unknown user");
            ApiError::not_found("User not found")
        })?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
