//! User registration. A successful signup signs the user in immediately.

use anyhow::Context;
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use sqlx::PgPool;
use std::sync::Arc;

use super::{
    password::hash_password,
    session::session_cookie,
    state::AuthState,
    storage::{insert_user, SignupOutcome},
    types::{AuthResponse, SignupRequest},
};
use crate::api::{error::Error, handlers::theme::storage::upsert_theme};

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created and signed in", body = AuthResponse),
        (status = 409, description = "Email is already registered"),
        (status = 422, description = "Validation failed")
    ),
    tag = "auth"
)]
pub async fn signup(
    Extension(pool): Extension<PgPool>,
    Extension(state): Extension<Arc<AuthState>>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, Error> {
    let payload = request.validate()?;

    let password_hash = hash_password(payload.password.clone()).await?;

    let user = match insert_user(&pool, &payload, &password_hash).await? {
        SignupOutcome::Created(user) => user,
        SignupOutcome::Conflict => {
            return Err(Error::conflict("Email is already registered"));
        }
    };

    // Seed the theme row so later reads see what signup chose. Fields the
    // client omitted fall back to the defaults.
    let theme = upsert_theme(&pool, user.id, &payload.theme, state.config()).await?;

    let token = state.tokens().issue(user.id, user.role, &user.email)?;
    let cookie =
        session_cookie(state.config(), &token).context("failed to build session cookie")?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    tracing::info!(user_id = %user.id, "user signed up");

    Ok((
        StatusCode::CREATED,
        headers,
        Json(AuthResponse { user, theme }),
    ))
}
