//! Item CRUD endpoints. Every route requires a session; ownership or the
//! ADMIN role gates mutation.

pub(crate) mod storage;
pub mod types;

use axum::{
    extract::{Extension, Path, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use self::{
    storage::{delete_item, fetch_item, insert_item, list_items, update_item},
    types::{CreateItemRequest, ItemBody, ItemStatus, UpdateItemRequest},
};
use crate::api::{
    error::{Error, Issue},
    handlers::auth::{
        policy::{can_modify, list_scope},
        principal::require_auth,
        state::AuthState,
        types::UserBody,
    },
};

/// Envelope for list responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemsResponse {
    pub items: Vec<ItemBody>,
}

/// Envelope for single-item responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemResponse {
    pub item: ItemBody,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListItemsQuery {
    /// Filter by lifecycle status.
    pub status: Option<String>,
    /// Owner to list items for. Only honored for admins.
    pub owner: Option<String>,
}

fn parse_item_id(raw: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw)
        .map_err(|_| Error::Validation(vec![Issue::new("id", "Invalid item identifier")]))
}

impl ListItemsQuery {
    fn validate(&self) -> Result<(Option<ItemStatus>, Option<Uuid>), Error> {
        let mut issues = Vec::new();

        let status = match self.status.as_deref() {
            None => None,
            Some(raw) => match ItemStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    issues.push(Issue::new(
                        "status",
                        "Status must be one of PENDING, IN_PROGRESS, or COMPLETED",
                    ));
                    None
                }
            },
        };

        let owner = match self.owner.as_deref() {
            None => None,
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(owner) => Some(owner),
                Err(_) => {
                    issues.push(Issue::new("owner", "Invalid owner identifier"));
                    None
                }
            },
        };

        if issues.is_empty() {
            Ok((status, owner))
        } else {
            Err(Error::Validation(issues))
        }
    }
}

// The row can vanish between the ownership check and the update; that race
// is still a 404, not a server error.
fn item_or_not_found(item: Option<ItemBody>) -> Result<ItemBody, Error> {
    item.ok_or_else(|| Error::not_found("Item not found"))
}

/// Load an item and enforce the ownership-or-admin rule. A missing item is
/// reported before a permission failure.
async fn fetch_item_for_modification(
    pool: &PgPool,
    id: Uuid,
    user: &UserBody,
    action: &str,
) -> Result<ItemBody, Error> {
    let item = fetch_item(pool, id)
        .await?
        .ok_or_else(|| Error::not_found("Item not found"))?;

    if !can_modify(item.owner, user) {
        return Err(Error::forbidden(format!(
            "You do not have permission to {action} this item"
        )));
    }

    Ok(item)
}

#[utoipa::path(
    get,
    path = "/api/items",
    params(ListItemsQuery),
    responses(
        (status = 200, description = "Items visible to the caller, newest first", body = ItemsResponse),
        (status = 401, description = "Missing, invalid, or expired session"),
        (status = 422, description = "Validation failed")
    ),
    tag = "items"
)]
pub async fn list(
    headers: HeaderMap,
    Query(query): Query<ListItemsQuery>,
    Extension(pool): Extension<PgPool>,
    Extension(state): Extension<Arc<AuthState>>,
) -> Result<impl IntoResponse, Error> {
    let user = require_auth(&headers, &pool, &state).await?;

    let (status, requested_owner) = query.validate()?;
    let owner = list_scope(&user, requested_owner);

    let items = list_items(&pool, owner, status).await?;
    Ok(Json(ItemsResponse { items }))
}

#[utoipa::path(
    post,
    path = "/api/items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created, owned by the caller", body = ItemResponse),
        (status = 401, description = "Missing, invalid, or expired session"),
        (status = 422, description = "Validation failed")
    ),
    tag = "items"
)]
pub async fn create(
    headers: HeaderMap,
    Extension(pool): Extension<PgPool>,
    Extension(state): Extension<Arc<AuthState>>,
    Json(request): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, Error> {
    let user = require_auth(&headers, &pool, &state).await?;

    let payload = request.validate()?;
    // The owner is always the caller; the request cannot assign one.
    let item = insert_item(&pool, user.id, &payload).await?;

    tracing::info!(item_id = %item.id, owner_id = %user.id, "item created");

    Ok((StatusCode::CREATED, Json(ItemResponse { item })))
}

#[utoipa::path(
    patch,
    path = "/api/items/{id}",
    params(("id" = String, Path, description = "Item identifier")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item after applying the patch", body = ItemResponse),
        (status = 401, description = "Missing, invalid, or expired session"),
        (status = 403, description = "Caller is neither the owner nor an admin"),
        (status = 404, description = "No such item"),
        (status = 422, description = "Validation failed")
    ),
    tag = "items"
)]
pub async fn update(
    headers: HeaderMap,
    Path(id): Path<String>,
    Extension(pool): Extension<PgPool>,
    Extension(state): Extension<Arc<AuthState>>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<impl IntoResponse, Error> {
    let user = require_auth(&headers, &pool, &state).await?;

    let id = parse_item_id(&id)?;
    let update = request.validate()?;

    fetch_item_for_modification(&pool, id, &user, "modify").await?;
    let item = item_or_not_found(update_item(&pool, id, &update).await?)?;

    Ok(Json(ItemResponse { item }))
}

#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(("id" = String, Path, description = "Item identifier")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 401, description = "Missing, invalid, or expired session"),
        (status = 403, description = "Caller is neither the owner nor an admin"),
        (status = 404, description = "No such item"),
        (status = 422, description = "Validation failed")
    ),
    tag = "items"
)]
pub async fn delete(
    headers: HeaderMap,
    Path(id): Path<String>,
    Extension(pool): Extension<PgPool>,
    Extension(state): Extension<Arc<AuthState>>,
) -> Result<impl IntoResponse, Error> {
    let user = require_auth(&headers, &pool, &state).await?;

    let id = parse_item_id(&id)?;

    fetch_item_for_modification(&pool, id, &user, "delete").await?;
    delete_item(&pool, id).await?;

    tracing::info!(item_id = %id, "item deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_must_be_a_uuid() {
        assert!(parse_item_id("123e4567-e89b-12d3-a456-426614174000").is_ok());
        let err = parse_item_id("not-a-uuid").unwrap_err();
        let Error::Validation(issues) = err else {
            panic!("expected validation error");
        };
        assert_eq!(issues[0].path, "id");
    }

    #[test]
    fn list_query_validates_status_and_owner() {
        let query = ListItemsQuery {
            status: Some("IN_PROGRESS".to_string()),
            owner: Some(Uuid::new_v4().to_string()),
        };
        let (status, owner) = query.validate().unwrap();
        assert_eq!(status, Some(ItemStatus::InProgress));
        assert!(owner.is_some());
    }

    #[test]
    fn list_query_rejects_bad_values() {
        let query = ListItemsQuery {
            status: Some("DONE".to_string()),
            owner: Some("nope".to_string()),
        };
        let Error::Validation(issues) = query.validate().unwrap_err() else {
            panic!("expected validation error");
        };
        let paths: Vec<&str> = issues.iter().map(|issue| issue.path.as_str()).collect();
        assert!(paths.contains(&"status"));
        assert!(paths.contains(&"owner"));
    }

    #[test]
    fn vanished_item_maps_to_not_found() {
        let err = item_or_not_found(None).unwrap_err();
        let Error::NotFound(message) = err else {
            panic!("expected not found");
        };
        assert_eq!(message, "Item not found");
    }

    #[test]
    fn empty_list_query_is_fine() {
        let (status, owner) = ListItemsQuery::default().validate().unwrap();
        assert!(status.is_none());
        assert!(owner.is_none());
    }
}
