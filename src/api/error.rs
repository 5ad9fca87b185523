//! API error taxonomy and the single translator to HTTP responses.
//!
//! Every handler failure is an [`Error`] and ends up here; nothing recovers
//! locally. The wire shape is `{message, statusCode, issues?}` where `issues`
//! only appears for validation failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// A single field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Issue {
    /// Dotted path of the offending field, e.g. `theme.mode`.
    pub path: String,
    pub message: String,
}

impl Issue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation failed")]
    Validation(Vec<Issue>),
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Unexpected server error")]
    Internal(#[from] anyhow::Error),
}

impl Error {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

/// JSON error body returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<Issue>>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        // The internal cause is logged server-side only; clients get the
        // generic message from Display.
        if let Self::Internal(cause) = &self {
            error!("Unhandled error: {cause:?}");
        }

        let issues = match self {
            Self::Validation(issues) => Some(issues),
            _ => None,
        };

        let body = ErrorBody {
            message,
            status_code: status.as_u16(),
            issues,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            Error::Validation(vec![]).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            Error::unauthenticated("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(Error::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(Error::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            Error::Internal(anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_message_is_genericized() {
        let err = Error::Internal(anyhow!("connection refused to 10.0.0.3:5432"));
        assert_eq!(err.to_string(), "Unexpected server error");
    }

    #[test]
    fn validation_body_carries_issues() {
        let body = ErrorBody {
            message: "Validation failed".to_string(),
            status_code: 422,
            issues: Some(vec![Issue::new("title", "too short")]),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["statusCode"], 422);
        assert_eq!(json["issues"][0]["path"], "title");
    }

    #[tokio::test]
    async fn into_response_keeps_message_and_issues() {
        let err = Error::Validation(vec![Issue::new("title", "too short")]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["message"], "Validation failed");
        assert_eq!(json["statusCode"], 422);
        assert_eq!(json["issues"][0]["path"], "title");
    }

    #[test]
    fn issues_omitted_when_absent() {
        let body = ErrorBody {
            message: "Item not found".to_string(),
            status_code: 404,
            issues: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("issues").is_none());
    }
}
