//! Database helpers for theme preferences.

use anyhow::{anyhow, Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::types::{ThemeBody, ThemeMode, ThemeUpdate};
use crate::api::handlers::auth::state::AuthConfig;

fn theme_from_row(row: &sqlx::postgres::PgRow) -> Result<ThemeBody> {
    let raw_mode: String = row.get("mode");
    let mode =
        ThemeMode::parse(&raw_mode).ok_or_else(|| anyhow!("unknown theme mode in database: {raw_mode}"))?;

    Ok(ThemeBody {
        accent: row.get("accent"),
        highlight: row.get("highlight"),
        base: row.get("base"),
        surface: row.get("surface"),
        glow: row.get("glow"),
        mode,
    })
}

/// Fetch the saved theme, falling back to the defaults when the user has
/// never saved one. Reads never persist the defaults.
pub(crate) async fn fetch_theme(
    pool: &PgPool,
    user_id: Uuid,
    config: &AuthConfig,
) -> Result<ThemeBody> {
    let query = r"
        SELECT accent, highlight, base, surface, glow, mode
        FROM theme_preferences
        WHERE user_id = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(user_id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to fetch theme")?;

    match row {
        Some(row) => theme_from_row(&row),
        None => Ok(ThemeBody::defaults(config)),
    }
}

// Single-statement upsert: on insert, omitted fields take the defaults
// ($8..$13); on conflict, omitted fields keep their stored values.
const UPSERT_THEME_SQL: &str = r"
    INSERT INTO theme_preferences (user_id, accent, highlight, base, surface, glow, mode)
    VALUES (
        $1,
        COALESCE($2, $8),
        COALESCE($3, $9),
        COALESCE($4, $10),
        COALESCE($5, $11),
        COALESCE($6, $12),
        COALESCE($7, $13)
    )
    ON CONFLICT (user_id) DO UPDATE SET
        accent = COALESCE($2, theme_preferences.accent),
        highlight = COALESCE($3, theme_preferences.highlight),
        base = COALESCE($4, theme_preferences.base),
        surface = COALESCE($5, theme_preferences.surface),
        glow = COALESCE($6, theme_preferences.glow),
        mode = COALESCE($7, theme_preferences.mode),
        updated_at = now()
    RETURNING accent, highlight, base, surface, glow, mode
";

/// Upsert the user's theme in a single statement. Returns the resulting row.
pub(crate) async fn upsert_theme(
    pool: &PgPool,
    user_id: Uuid,
    update: &ThemeUpdate,
    config: &AuthConfig,
) -> Result<ThemeBody> {
    let query = UPSERT_THEME_SQL;
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(user_id)
        .bind(&update.accent)
        .bind(&update.highlight)
        .bind(&update.base)
        .bind(&update.surface)
        .bind(&update.glow)
        .bind(update.mode.map(ThemeMode::as_str))
        .bind(config.theme_accent())
        .bind(config.theme_highlight())
        .bind(config.theme_base())
        .bind(config.theme_surface())
        .bind(config.theme_glow())
        .bind(config.theme_mode())
        .fetch_one(pool)
        .instrument(span)
        .await
        .context("failed to upsert theme")?;

    theme_from_row(&row)
}
