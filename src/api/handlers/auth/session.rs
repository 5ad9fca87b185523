//! Session cookie handling plus the `/auth/me` and `/auth/logout` endpoints.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Json},
};
use sqlx::PgPool;
use std::sync::Arc;

use super::{
    principal::require_auth,
    state::{AuthConfig, AuthState},
    types::AuthResponse,
};
use crate::api::{error::Error, handlers::theme::storage::fetch_theme};

/// Build the session cookie carrying a freshly issued token.
pub(super) fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let name = config.cookie_name();
    let max_age = config.cookie_max_age_seconds();
    let mut cookie = format!("{name}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if config.cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Clear the session cookie by re-setting it with `Max-Age=0`.
pub(super) fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let name = config.cookie_name();
    let mut cookie = format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if config.cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Pull the session token out of the request's `Cookie` header.
pub(super) fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == cookie_name && !val.is_empty() {
            return Some(val.to_string());
        }
    }
    None
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user and their theme", body = AuthResponse),
        (status = 401, description = "Missing, invalid, or expired session")
    ),
    tag = "auth"
)]
pub async fn me(
    headers: HeaderMap,
    Extension(pool): Extension<PgPool>,
    Extension(state): Extension<Arc<AuthState>>,
) -> Result<impl IntoResponse, Error> {
    let user = require_auth(&headers, &pool, &state).await?;
    let theme = fetch_theme(&pool, user.id, state.config()).await?;

    Ok(Json(AuthResponse { user, theme }))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cookie cleared"),
        (status = 401, description = "Missing, invalid, or expired session")
    ),
    tag = "auth"
)]
pub async fn logout(
    headers: HeaderMap,
    Extension(pool): Extension<PgPool>,
    Extension(state): Extension<Arc<AuthState>>,
) -> Result<impl IntoResponse, Error> {
    require_auth(&headers, &pool, &state).await?;

    // Stateless tokens cannot be revoked server-side; clearing the cookie is
    // all logout does, so repeating it is harmless.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(state.config()) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    Ok((StatusCode::NO_CONTENT, response_headers))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig::new("http://localhost:3000".to_string())
    }

    #[test]
    fn session_cookie_has_expected_attributes() {
        let cookie = session_cookie(&config(), "tok123").unwrap();
        let value = cookie.to_str().unwrap();
        assert!(value.starts_with("snapsearch_session=tok123;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Max-Age=604800"));
        assert!(value.contains("Path=/"));
        assert!(!value.contains("Secure"));
    }

    #[test]
    fn session_cookie_secure_over_https() {
        let config = AuthConfig::new("https://app.snapsearch.dev".to_string());
        let cookie = session_cookie(&config, "tok").unwrap();
        assert!(cookie.to_str().unwrap().contains("; Secure"));
    }

    #[test]
    fn clear_cookie_zeroes_max_age() {
        let cookie = clear_session_cookie(&config()).unwrap();
        let value = cookie.to_str().unwrap();
        assert!(value.starts_with("snapsearch_session=;"));
        assert!(value.contains("Max-Age=0"));
    }

    #[test]
    fn extract_token_finds_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("other=1; snapsearch_session=abc123; theme=dark"),
        );
        assert_eq!(
            extract_session_token(&headers, "snapsearch_session"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn extract_token_ignores_other_names_and_empty_values() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("snapsearch_session="));
        assert_eq!(extract_session_token(&headers, "snapsearch_session"), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session=abc"));
        assert_eq!(extract_session_token(&headers, "snapsearch_session"), None);

        assert_eq!(
            extract_session_token(&HeaderMap::new(), "snapsearch_session"),
            None
        );
    }
}
