//! Item wire types and validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::error::{Error, Issue};

const TITLE_MIN_CHARS: usize = 2;
const TITLE_MAX_CHARS: usize = 120;
const DESCRIPTION_MAX_CHARS: usize = 500;

/// Lifecycle state of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Pending,
    InProgress,
    Completed,
}

impl ItemStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(Self::Pending),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Item as sent to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    pub id: Uuid,
    pub owner: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: ItemStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub xp_reward: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
    pub xp_reward: Option<i64>,
}

/// Validated item creation payload with defaults applied.
#[derive(Debug)]
pub struct ItemPayload {
    pub title: String,
    pub description: Option<String>,
    pub status: ItemStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub xp_reward: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
    pub xp_reward: Option<i64>,
}

/// Validated partial update; `None` fields keep their stored values.
#[derive(Debug, Default)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ItemStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub xp_reward: Option<i32>,
}

fn validate_title(title: &str, issues: &mut Vec<Issue>) -> String {
    let trimmed = title.trim().to_string();
    let chars = trimmed.chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&chars) {
        issues.push(Issue::new(
            "title",
            "Title must be between 2 and 120 characters",
        ));
    }
    trimmed
}

fn validate_description(description: &str, issues: &mut Vec<Issue>) {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        issues.push(Issue::new(
            "description",
            "Description must be at most 500 characters",
        ));
    }
}

fn validate_status(raw: &str, issues: &mut Vec<Issue>) -> Option<ItemStatus> {
    let status = ItemStatus::parse(raw);
    if status.is_none() {
        issues.push(Issue::new(
            "status",
            "Status must be one of PENDING, IN_PROGRESS, or COMPLETED",
        ));
    }
    status
}

fn validate_due_date(raw: &str, issues: &mut Vec<Issue>) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(date) => Some(date.with_timezone(&Utc)),
        Err(_) => {
            issues.push(Issue::new(
                "dueDate",
                "Due date must be an RFC 3339 datetime",
            ));
            None
        }
    }
}

fn validate_xp_reward(raw: i64, issues: &mut Vec<Issue>) -> Option<i32> {
    match i32::try_from(raw) {
        Ok(value) if value >= 0 => Some(value),
        _ => {
            issues.push(Issue::new(
                "xpReward",
                "XP reward must be a non-negative integer",
            ));
            None
        }
    }
}

impl CreateItemRequest {
    /// Validate every field, applying the documented defaults.
    ///
    /// # Errors
    /// Returns `Error::Validation` listing every failed field.
    pub fn validate(self) -> Result<ItemPayload, Error> {
        let mut issues = Vec::new();

        let title = validate_title(&self.title, &mut issues);

        if let Some(description) = self.description.as_deref() {
            validate_description(description, &mut issues);
        }

        let status = match self.status.as_deref() {
            None => ItemStatus::Pending,
            Some(raw) => validate_status(raw, &mut issues).unwrap_or(ItemStatus::Pending),
        };

        let due_date = self
            .due_date
            .as_deref()
            .and_then(|raw| validate_due_date(raw, &mut issues));

        let xp_reward = match self.xp_reward {
            None => 0,
            Some(raw) => validate_xp_reward(raw, &mut issues).unwrap_or(0),
        };

        if !issues.is_empty() {
            return Err(Error::Validation(issues));
        }

        Ok(ItemPayload {
            title,
            description: self.description,
            status,
            due_date,
            xp_reward,
        })
    }
}

impl UpdateItemRequest {
    /// Validate the provided fields only.
    ///
    /// # Errors
    /// Returns `Error::Validation` listing every failed field.
    pub fn validate(self) -> Result<ItemUpdate, Error> {
        let mut issues = Vec::new();

        let title = self
            .title
            .as_deref()
            .map(|title| validate_title(title, &mut issues));

        if let Some(description) = self.description.as_deref() {
            validate_description(description, &mut issues);
        }

        let status = self
            .status
            .as_deref()
            .and_then(|raw| validate_status(raw, &mut issues));

        let due_date = self
            .due_date
            .as_deref()
            .and_then(|raw| validate_due_date(raw, &mut issues));

        let xp_reward = self
            .xp_reward
            .and_then(|raw| validate_xp_reward(raw, &mut issues));

        if !issues.is_empty() {
            return Err(Error::Validation(issues));
        }

        Ok(ItemUpdate {
            title,
            description: self.description,
            status,
            due_date,
            xp_reward,
        })
    }
}
