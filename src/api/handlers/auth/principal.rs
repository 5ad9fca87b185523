//! Session middleware: resolve the cookie into the current user.
//!
//! Runs fresh on every authenticated request; nothing is cached. Every
//! failure mode collapses to 401 so clients learn nothing about why a
//! session was rejected; the cause is only logged server-side.

use axum::http::HeaderMap;
use sqlx::PgPool;
use tracing::{debug, error};

use super::{
    session::extract_session_token, state::AuthState, storage::fetch_user_by_id, types::UserBody,
};
use crate::api::error::Error;

/// Resolve the session cookie into the current user.
///
/// # Errors
/// Returns `Error::Unauthenticated` when the cookie is missing, the token
/// fails verification, or the referenced user no longer exists.
pub async fn require_auth(
    headers: &HeaderMap,
    pool: &PgPool,
    state: &AuthState,
) -> Result<UserBody, Error> {
    let token = extract_session_token(headers, state.config().cookie_name())
        .ok_or_else(|| Error::unauthenticated("Authentication required"))?;

    let claims = state.tokens().verify(&token).map_err(|err| {
        debug!("Session token rejected: {err}");
        Error::unauthenticated("Invalid or expired token")
    })?;

    match fetch_user_by_id(pool, claims.sub).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(Error::unauthenticated(
            "Session expired, please login again",
        )),
        Err(err) => {
            // The auth step never leaks internal causes to the client.
            error!("Failed to load user for session: {err:?}");
            Err(Error::unauthenticated("Invalid or expired token"))
        }
    }
}
