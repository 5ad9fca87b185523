//! Database helpers for items.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::types::{ItemBody, ItemPayload, ItemStatus, ItemUpdate};

const ITEM_COLUMNS: &str =
    "id, owner_id, title, description, status, due_date, xp_reward, created_at, updated_at";

fn item_from_row(row: &sqlx::postgres::PgRow) -> Result<ItemBody> {
    let raw_status: String = row.get("status");
    let status = ItemStatus::parse(&raw_status)
        .ok_or_else(|| anyhow!("unknown item status in database: {raw_status}"))?;

    Ok(ItemBody {
        id: row.get("id"),
        owner: row.get("owner_id"),
        title: row.get("title"),
        description: row.get("description"),
        status,
        due_date: row.get::<Option<DateTime<Utc>>, _>("due_date"),
        xp_reward: row.get("xp_reward"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    })
}

/// List an owner's items, newest first, optionally filtered by status.
pub(crate) async fn list_items(
    pool: &PgPool,
    owner_id: Uuid,
    status: Option<ItemStatus>,
) -> Result<Vec<ItemBody>> {
    let query = format!(
        r"
        SELECT {ITEM_COLUMNS}
        FROM items
        WHERE owner_id = $1 AND ($2::text IS NULL OR status = $2)
        ORDER BY created_at DESC
    "
    );
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query.as_str()
    );
    let rows = sqlx::query(&query)
        .bind(owner_id)
        .bind(status.map(ItemStatus::as_str))
        .fetch_all(pool)
        .instrument(span)
        .await
        .context("failed to list items")?;

    rows.iter().map(item_from_row).collect()
}

pub(crate) async fn insert_item(
    pool: &PgPool,
    owner_id: Uuid,
    payload: &ItemPayload,
) -> Result<ItemBody> {
    let query = format!(
        r"
        INSERT INTO items (owner_id, title, description, status, due_date, xp_reward)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {ITEM_COLUMNS}
    "
    );
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(owner_id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.status.as_str())
        .bind(payload.due_date)
        .bind(payload.xp_reward)
        .fetch_one(pool)
        .instrument(span)
        .await
        .context("failed to insert item")?;

    item_from_row(&row)
}

/// Fetch an item by id regardless of owner, so handlers can distinguish a
/// missing item from a forbidden one.
pub(crate) async fn fetch_item(pool: &PgPool, id: Uuid) -> Result<Option<ItemBody>> {
    let query = format!(
        r"
        SELECT {ITEM_COLUMNS}
        FROM items
        WHERE id = $1
    "
    );
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query.as_str()
    );
    let row = sqlx::query(&query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to fetch item")?;

    row.map(|row| item_from_row(&row)).transpose()
}

// Partial update in one statement; omitted fields keep their stored values.
const UPDATE_ITEM_SQL: &str = r"
    UPDATE items SET
        title = COALESCE($2, title),
        description = COALESCE($3, description),
        status = COALESCE($4, status),
        due_date = COALESCE($5, due_date),
        xp_reward = COALESCE($6, xp_reward),
        updated_at = now()
    WHERE id = $1
    RETURNING id, owner_id, title, description, status, due_date, xp_reward, created_at, updated_at
";

/// Apply a partial update. Returns `None` when the row vanished between the
/// ownership check and the update.
pub(crate) async fn update_item(
    pool: &PgPool,
    id: Uuid,
    update: &ItemUpdate,
) -> Result<Option<ItemBody>> {
    let query = UPDATE_ITEM_SQL;
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.status.map(ItemStatus::as_str))
        .bind(update.due_date)
        .bind(update.xp_reward)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to update item")?;

    row.map(|row| item_from_row(&row)).transpose()
}

pub(crate) async fn delete_item(pool: &PgPool, id: Uuid) -> Result<()> {
    let query = "DELETE FROM items WHERE id = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(id)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to delete item")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(sql: &str) -> String {
        sql.chars()
            .filter(|ch| !ch.is_whitespace())
            .map(|ch| ch.to_ascii_lowercase())
            .collect()
    }

    #[test]
    fn update_keeps_stored_values_for_omitted_fields() {
        let canonical = canonical(UPDATE_ITEM_SQL);
        for (column, provided) in [
            ("title", "$2"),
            ("description", "$3"),
            ("status", "$4"),
            ("due_date", "$5"),
            ("xp_reward", "$6"),
        ] {
            assert!(
                canonical.contains(&format!("{column}=coalesce({provided},{column})")),
                "update must preserve stored {column} when {provided} is null"
            );
        }
        assert!(canonical.contains("whereid=$1"));
        assert!(canonical.contains("updated_at=now()"));
    }

    #[test]
    fn update_never_touches_the_owner() {
        let canonical = canonical(UPDATE_ITEM_SQL);
        assert!(!canonical.contains("owner_id=coalesce"));
        assert!(!canonical.contains("setowner_id"));
    }
}
