use utoipa::openapi::{Contact, InfoBuilder, License, Tag};
use utoipa::OpenApi;

use super::handlers::{auth, health, items, theme};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::signup::signup,
        auth::login::login,
        auth::session::me,
        auth::session::logout,
        items::list,
        items::create,
        items::update,
        items::delete,
        theme::get_theme,
        theme::save_theme,
    ),
    components(schemas(
        crate::api::error::ErrorBody,
        crate::api::error::Issue,
        health::Health,
        auth::types::Role,
        auth::types::UserBody,
        auth::types::SignupRequest,
        auth::types::LoginRequest,
        auth::types::AuthResponse,
        items::types::ItemStatus,
        items::types::ItemBody,
        items::types::CreateItemRequest,
        items::types::UpdateItemRequest,
        items::ItemsResponse,
        items::ItemResponse,
        theme::types::ThemeMode,
        theme::types::ThemeBody,
        theme::types::ThemeRequest,
        theme::ThemeResponse,
    ))
)]
struct ApiDoc;

/// Build the `OpenAPI` document with info taken from Cargo.toml metadata
/// instead of the derive defaults.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut spec = ApiDoc::openapi();

    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();
    info.contact = cargo_contact();
    info.license = cargo_license();
    spec.info = info;

    let mut auth_tag = Tag::new("auth");
    auth_tag.description = Some("Signup, login, and sessions".to_string());

    let mut items_tag = Tag::new("items");
    items_tag.description = Some("Owner-scoped item CRUD".to_string());

    let mut theme_tag = Tag::new("theme");
    theme_tag.description = Some("Per-user theme preferences".to_string());

    let mut health_tag = Tag::new("health");
    health_tag.description = Some("Liveness and database reachability".to_string());

    spec.tags = Some(vec![auth_tag, items_tag, theme_tag, health_tag]);

    spec
}

fn cargo_contact() -> Option<Contact> {
    // Cargo authors are `;` separated and may include "Name <email>".
    let authors = env!("CARGO_PKG_AUTHORS");
    let primary = authors.split(';').next().map(str::trim)?;
    if primary.is_empty() {
        return None;
    }

    let (name, email) = parse_author(primary);
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn cargo_license() -> Option<License> {
    let identifier = optional_str(env!("CARGO_PKG_LICENSE"))?;
    let mut license = License::new(identifier);
    license.identifier = Some(identifier.to_string());
    Some(license)
}

fn optional_str(value: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_author(author: &str) -> (Option<&str>, Option<&str>) {
    if let Some(start) = author.find('<') {
        let name = author[..start].trim();
        let email = author[start + 1..].trim_end_matches('>').trim();
        let name = if name.is_empty() { None } else { Some(name) };
        let email = if email.is_empty() { None } else { Some(email) };
        (name, email)
    } else {
        let name = author.trim();
        (if name.is_empty() { None } else { Some(name) }, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_from_cargo() {
        let spec = openapi();
        assert_eq!(spec.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(spec.info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(
            spec.info.description.as_deref(),
            Some(env!("CARGO_PKG_DESCRIPTION"))
        );

        let contact = spec.info.contact;
        assert!(contact.is_some());
        if let Some(contact) = contact {
            assert_eq!(contact.name.as_deref(), Some("SnapSearch Team"));
            assert_eq!(contact.email.as_deref(), Some("team@snapsearch.dev"));
        }

        let license = spec.info.license;
        assert!(license.is_some());
        if let Some(license) = license {
            assert_eq!(license.name, "BSD-3-Clause");
            assert_eq!(license.identifier.as_deref(), Some("BSD-3-Clause"));
        }
    }

    #[test]
    fn openapi_tags_and_paths() {
        let spec = openapi();
        let tags = spec.tags.clone().unwrap_or_default();
        assert!(tags.iter().any(|tag| tag.name == "auth"));
        assert!(tags.iter().any(|tag| tag.name == "items"));
        assert!(tags.iter().any(|tag| tag.name == "theme"));
        assert!(spec.paths.paths.contains_key("/api/auth/signup"));
        assert!(spec.paths.paths.contains_key("/api/items/{id}"));
        assert!(spec.paths.paths.contains_key("/health"));
    }
}
