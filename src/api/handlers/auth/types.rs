//! Request/response types and validation for auth endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::{
    error::{Error, Issue},
    handlers::{
        normalize_email,
        theme::types::{ThemeBody, ThemeRequest, ThemeUpdate},
        valid_email, valid_password,
    },
};

/// Access role. `ADMIN` bypasses ownership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// User profile as sent to clients. Never carries the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: Option<ThemeRequest>,
}

/// Validated signup payload; email is normalized to lowercase.
#[derive(Debug)]
pub struct SignupPayload {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub avatar_url: Option<String>,
    pub theme: ThemeUpdate,
}

impl SignupRequest {
    /// Validate every field and normalize the email.
    ///
    /// # Errors
    /// Returns `Error::Validation` listing every failed field.
    pub fn validate(self) -> Result<SignupPayload, Error> {
        let mut issues = Vec::new();

        let full_name = self.full_name.trim().to_string();
        if full_name.chars().count() < 2 {
            issues.push(Issue::new(
                "fullName",
                "Full name must contain at least 2 characters",
            ));
        }

        let email = normalize_email(&self.email);
        if !valid_email(&email) {
            issues.push(Issue::new("email", "Invalid email address"));
        }

        if !valid_password(&self.password) {
            issues.push(Issue::new(
                "password",
                "Password must be at least 8 characters with a letter and a number",
            ));
        }

        let role = match self.role.as_deref() {
            None => Role::User,
            Some(raw) => Role::parse(raw).unwrap_or_else(|| {
                issues.push(Issue::new("role", "Role must be USER or ADMIN"));
                Role::User
            }),
        };

        if let Some(avatar_url) = self.avatar_url.as_deref() {
            if Url::parse(avatar_url).is_err() {
                issues.push(Issue::new("avatarUrl", "Avatar must be a valid URL"));
            }
        }

        let theme = match self.theme.unwrap_or_default().validate("theme.") {
            Ok(update) => update,
            Err(Error::Validation(theme_issues)) => {
                issues.extend(theme_issues);
                ThemeUpdate::default()
            }
            Err(other) => return Err(other),
        };

        if !issues.is_empty() {
            return Err(Error::Validation(issues));
        }

        Ok(SignupPayload {
            full_name,
            email,
            password: self.password,
            role,
            avatar_url: self.avatar_url,
            theme,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Validate shape only; credential checks happen against the store.
    ///
    /// # Errors
    /// Returns `Error::Validation` for a malformed email or empty password.
    pub fn validate(&self) -> Result<(), Error> {
        let mut issues = Vec::new();

        if !valid_email(&normalize_email(&self.email)) {
            issues.push(Issue::new("email", "Invalid email address"));
        }
        if self.password.is_empty() {
            issues.push(Issue::new("password", "Password is required"));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(issues))
        }
    }
}

/// Body returned by signup, login, and `/auth/me`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserBody,
    pub theme: ThemeBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_request() -> SignupRequest {
        SignupRequest {
            full_name: "Alice Cooper".to_string(),
            email: "Alice@Example.com".to_string(),
            password: "abcdef12".to_string(),
            role: None,
            avatar_url: None,
            theme: None,
        }
    }

    #[test]
    fn role_wire_names_are_uppercase() {
        assert_eq!(serde_json::to_value(Role::User).unwrap(), "USER");
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "ADMIN");
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn signup_normalizes_email_and_defaults_role() {
        let payload = signup_request().validate().unwrap();
        assert_eq!(payload.email, "alice@example.com");
        assert_eq!(payload.role, Role::User);
    }

    #[test]
    fn signup_rejects_short_name_and_weak_password() {
        let request = SignupRequest {
            full_name: "A".to_string(),
            password: "short".to_string(),
            ..signup_request()
        };
        let Error::Validation(issues) = request.validate().unwrap_err() else {
            panic!("expected validation error");
        };
        let paths: Vec<&str> = issues.iter().map(|issue| issue.path.as_str()).collect();
        assert!(paths.contains(&"fullName"));
        assert!(paths.contains(&"password"));
    }

    #[test]
    fn signup_rejects_bad_avatar_url_and_role() {
        let request = SignupRequest {
            role: Some("ROOT".to_string()),
            avatar_url: Some("not a url".to_string()),
            ..signup_request()
        };
        let Error::Validation(issues) = request.validate().unwrap_err() else {
            panic!("expected validation error");
        };
        let paths: Vec<&str> = issues.iter().map(|issue| issue.path.as_str()).collect();
        assert!(paths.contains(&"role"));
        assert!(paths.contains(&"avatarUrl"));
    }

    #[test]
    fn signup_surfaces_theme_issues_with_prefix() {
        let request = SignupRequest {
            theme: Some(ThemeRequest {
                mode: Some("sepia".to_string()),
                ..ThemeRequest::default()
            }),
            ..signup_request()
        };
        let Error::Validation(issues) = request.validate().unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(issues[0].path, "theme.mode");
    }

    #[test]
    fn signup_accepts_explicit_admin_role() {
        let request = SignupRequest {
            role: Some("ADMIN".to_string()),
            ..signup_request()
        };
        let payload = request.validate().unwrap();
        assert_eq!(payload.role, Role::Admin);
    }

    #[test]
    fn login_validates_shape() {
        let ok = LoginRequest {
            email: "a@x.com".to_string(),
            password: "whatever".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = LoginRequest {
            email: "nope".to_string(),
            password: String::new(),
        };
        let Error::Validation(issues) = bad.validate().unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn user_body_never_exposes_password_hash() {
        let body = UserBody {
            id: Uuid::new_v4(),
            full_name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            role: Role::User,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "USER");
        assert!(json.get("fullName").is_some());
    }
}
