use axum::{
    extract::{FromRef, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    middleware,
    routing::{get, post},
    Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{any_blank, LoginRequest, RegisterRequest},
        extractors::{ApiJson, AuthUser},
        jwt::JwtKeys,
        middleware::verify_jwt,
        password::{hash_password_blocking, verify_password_blocking},
        repo::StoreError,
        repo_types::{NewUser, SessionUser, User, UserRole},
        session::{clear_session_cookie, session_cookie},
    },
    error::ApiError,
    response::ApiResponse,
    state::AppState,
};

const FIELDS_REQUIRED: &str = "All fields are required to proceed";

pub fn user_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, verify_jwt));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
}

/// Signs a session token for `user` and returns it as a `Set-Cookie` header.
fn issue_session(state: &AppState, user: &User) -> Result<HeaderMap, ApiError> {
    let keys = JwtKeys::from_ref(state);
    let token = keys.sign(user.id).map_err(|e| {
        error!(error = %e, user_id = %user.id, "jwt sign failed");
        ApiError::internal(e)
    })?;
    let cookie = session_cookie(&token).map_err(ApiError::internal)?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    Ok(headers)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(HeaderMap, ApiResponse<User>), ApiError> {
    if any_blank(&[&payload.name, &payload.email, &payload.password]) {
        warn!("register with blank fields");
        return Err(ApiError::validation(FIELDS_REQUIRED).with_status(StatusCode::UNAUTHORIZED));
    }

    let taken = state
        .users
        .find_by_email(&payload.email)
        .await
        .map_err(ApiError::internal)?;
    if taken.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::conflict("Name or Email already exists"));
    }

    let password_hash = hash_password_blocking(payload.password).await?;

    let user = state
        .users
        .create(NewUser {
            name: payload.name,
            email: payload.email,
            password_hash,
            role: UserRole::User,
        })
        .await
        .map_err(|e| match e {
            StoreError::Conflict => {
                warn!("email registered concurrently");
                ApiError::conflict("Name or Email already exists")
            }
            other => ApiError::internal(other),
        })?;

    let headers = issue_session(&state, &user)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        headers,
        ApiResponse::created(user, "User Registered Successfully"),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<(HeaderMap, ApiResponse<User>), ApiError> {
    if any_blank(&[&payload.email, &payload.password]) {
        warn!("login with blank fields");
        return Err(ApiError::validation(FIELDS_REQUIRED));
    }

    let user = state
        .users
        .find_by_email(&payload.email)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login unknown email");
            ApiError::not_found("User credentials do not exist").with_status(StatusCode::UNAUTHORIZED)
        })?;

    let ok = verify_password_blocking(payload.password, user.password.clone()).await?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(
            ApiError::authentication("Invalid User credentials").with_status(StatusCode::BAD_REQUEST),
        );
    }

    let headers = issue_session(&state, &user)?;

    info!(user_id = %user.id, "user logged in");
    Ok((headers, ApiResponse::ok(user, "User LoggedIn Successfully")))
}

/// Clears the cookie only; the token stays valid until it expires.
#[instrument(skip_all)]
pub async fn logout(
    AuthUser(user): AuthUser,
) -> Result<(HeaderMap, ApiResponse<serde_json::Value>), ApiError> {
    let cookie = clear_session_cookie().map_err(|e| ApiError::authentication(e.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    info!(user_id = %user.id, "user logged out");
    Ok((
        headers,
        ApiResponse::ok(serde_json::json!({}), "User Logged Out Successfully"),
    ))
}

pub async fn me(AuthUser(user): AuthUser) -> ApiResponse<SessionUser> {
    ApiResponse::ok(user, "User fetched successfully")
}
