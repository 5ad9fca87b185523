//! Per-user theme preferences.

pub(crate) mod storage;
pub mod types;

use axum::{
    extract::Extension,
    http::HeaderMap,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use utoipa::ToSchema;

use self::{
    storage::{fetch_theme, upsert_theme},
    types::{ThemeBody, ThemeRequest},
};
use crate::api::{
    error::Error,
    handlers::auth::{principal::require_auth, state::AuthState},
};

/// Envelope for theme responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ThemeResponse {
    pub theme: ThemeBody,
}

#[utoipa::path(
    get,
    path = "/api/theme",
    responses(
        (status = 200, description = "Saved theme, or the defaults when none is saved", body = ThemeResponse),
        (status = 401, description = "Missing, invalid, or expired session")
    ),
    tag = "theme"
)]
pub async fn get_theme(
    headers: HeaderMap,
    Extension(pool): Extension<PgPool>,
    Extension(state): Extension<Arc<AuthState>>,
) -> Result<impl IntoResponse, Error> {
    let user = require_auth(&headers, &pool, &state).await?;
    let theme = fetch_theme(&pool, user.id, state.config()).await?;

    Ok(Json(ThemeResponse { theme }))
}

#[utoipa::path(
    post,
    path = "/api/theme",
    request_body = ThemeRequest,
    responses(
        (status = 200, description = "Theme after applying the update", body = ThemeResponse),
        (status = 401, description = "Missing, invalid, or expired session"),
        (status = 422, description = "Validation failed")
    ),
    tag = "theme"
)]
pub async fn save_theme(
    headers: HeaderMap,
    Extension(pool): Extension<PgPool>,
    Extension(state): Extension<Arc<AuthState>>,
    Json(request): Json<ThemeRequest>,
) -> Result<impl IntoResponse, Error> {
    let user = require_auth(&headers, &pool, &state).await?;

    let update = request.validate("")?;
    let theme = upsert_theme(&pool, user.id, &update, state.config()).await?;

    Ok(Json(ThemeResponse { theme }))
}
