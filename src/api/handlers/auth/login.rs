//! Credential login.

use anyhow::Context;
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Json},
};
use sqlx::PgPool;
use std::sync::Arc;

use super::{
    password::verify_password,
    session::session_cookie,
    state::AuthState,
    storage::fetch_user_by_email,
    types::{AuthResponse, LoginRequest},
};
use crate::api::{
    error::Error,
    handlers::{normalize_email, theme::storage::fetch_theme},
};

// A single message for both unknown email and wrong password, so responses
// do not reveal which accounts exist.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation failed")
    ),
    tag = "auth"
)]
pub async fn login(
    Extension(pool): Extension<PgPool>,
    Extension(state): Extension<Arc<AuthState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, Error> {
    request.validate()?;

    let email = normalize_email(&request.email);
    let record = fetch_user_by_email(&pool, &email)
        .await?
        .ok_or_else(|| Error::unauthenticated(INVALID_CREDENTIALS))?;

    if !verify_password(request.password, record.password_hash).await? {
        return Err(Error::unauthenticated(INVALID_CREDENTIALS));
    }

    let user = record.user;
    let theme = fetch_theme(&pool, user.id, state.config()).await?;

    let token = state.tokens().issue(user.id, user.role, &user.email)?;
    let cookie =
        session_cookie(state.config(), &token).context("failed to build session cookie")?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    tracing::info!(user_id = %user.id, "user logged in");

    Ok((headers, Json(AuthResponse { user, theme })))
}
