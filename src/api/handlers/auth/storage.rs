//! Database helpers for users.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::types::{Role, SignupPayload, UserBody};
use crate::api::handlers::is_unique_violation;

/// Outcome when attempting to create a new user.
#[derive(Debug)]
pub(crate) enum SignupOutcome {
    Created(UserBody),
    Conflict,
}

/// Full user row, including the password hash. Only the login flow sees this.
pub(crate) struct UserRecord {
    pub(crate) user: UserBody,
    pub(crate) password_hash: String,
}

fn role_from_row(row: &sqlx::postgres::PgRow) -> Result<Role> {
    let raw: String = row.get("role");
    Role::parse(&raw).ok_or_else(|| anyhow!("unknown role in database: {raw}"))
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> Result<UserBody> {
    Ok(UserBody {
        id: row.get("id"),
        full_name: row.get("full_name"),
        email: row.get("email"),
        role: role_from_row(row)?,
        avatar_url: row.get("avatar_url"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    })
}

/// Insert a new user; a duplicate email maps to [`SignupOutcome::Conflict`]
/// via the unique-violation SQLSTATE rather than a racy pre-check.
pub(crate) async fn insert_user(
    pool: &PgPool,
    payload: &SignupPayload,
    password_hash: &str,
) -> Result<SignupOutcome> {
    let query = r"
        INSERT INTO users (full_name, email, password_hash, role, avatar_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, full_name, email, role, avatar_url, created_at, updated_at
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(&payload.full_name)
        .bind(&payload.email)
        .bind(password_hash)
        .bind(payload.role.as_str())
        .bind(&payload.avatar_url)
        .fetch_one(pool)
        .instrument(span)
        .await;

    match row {
        Ok(row) => Ok(SignupOutcome::Created(user_from_row(&row)?)),
        Err(err) if is_unique_violation(&err) => Ok(SignupOutcome::Conflict),
        Err(err) => Err(err).context("failed to insert user"),
    }
}

/// Load a user by id without the password hash. Used by the session
/// middleware on every authenticated request.
pub(crate) async fn fetch_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserBody>> {
    let query = r"
        SELECT id, full_name, email, role, avatar_url, created_at, updated_at
        FROM users
        WHERE id = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to fetch user by id")?;

    row.map(|row| user_from_row(&row)).transpose()
}

/// Load a user by normalized email, including the password hash, for login.
pub(crate) async fn fetch_user_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
    let query = r"
        SELECT id, full_name, email, password_hash, role, avatar_url, created_at, updated_at
        FROM users
        WHERE email = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to fetch user by email")?;

    row.map(|row| {
        Ok(UserRecord {
            password_hash: row.get("password_hash"),
            user: user_from_row(&row)?,
        })
    })
    .transpose()
}
