//! Immutable application configuration and shared auth state.

use super::token::TokenService;

const DEFAULT_COOKIE_NAME: &str = "snapsearch_session";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 15;
const COOKIE_MAX_AGE_SECONDS: i64 = 7 * 24 * 60 * 60;

const DEFAULT_THEME_ACCENT: &str = "#0091ff";
const DEFAULT_THEME_HIGHLIGHT: &str = "#ff00b7";
const DEFAULT_THEME_BASE: &str = "rgba(17, 24, 39, 0.78)";
const DEFAULT_THEME_SURFACE: &str = "rgba(30, 41, 59, 0.66)";
const DEFAULT_THEME_GLOW: &str = "rgba(0, 145, 255, 0.45)";
const DEFAULT_THEME_MODE: &str = "dark";

/// Configuration built once at startup and read-only afterwards.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    frontend_url: String,
    cookie_name: String,
    token_ttl_minutes: i64,
    theme_accent: String,
    theme_highlight: String,
}

impl AuthConfig {
    #[must_use]
    pub fn new(frontend_url: String) -> Self {
        Self {
            frontend_url,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
            theme_accent: DEFAULT_THEME_ACCENT.to_string(),
            theme_highlight: DEFAULT_THEME_HIGHLIGHT.to_string(),
        }
    }

    #[must_use]
    pub fn with_cookie_name(mut self, name: String) -> Self {
        self.cookie_name = name;
        self
    }

    #[must_use]
    pub fn with_token_ttl_minutes(mut self, minutes: i64) -> Self {
        self.token_ttl_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_theme_defaults(mut self, accent: String, highlight: String) -> Self {
        self.theme_accent = accent;
        self.theme_highlight = highlight;
        self
    }

    #[must_use]
    pub fn frontend_url(&self) -> &str {
        &self.frontend_url
    }

    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    #[must_use]
    pub fn token_ttl_minutes(&self) -> i64 {
        self.token_ttl_minutes
    }

    /// Cookies are only marked `Secure` when the frontend is served over HTTPS.
    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }

    #[must_use]
    pub const fn cookie_max_age_seconds(&self) -> i64 {
        COOKIE_MAX_AGE_SECONDS
    }

    #[must_use]
    pub fn theme_accent(&self) -> &str {
        &self.theme_accent
    }

    #[must_use]
    pub fn theme_highlight(&self) -> &str {
        &self.theme_highlight
    }

    #[must_use]
    pub fn theme_base(&self) -> &str {
        DEFAULT_THEME_BASE
    }

    #[must_use]
    pub fn theme_surface(&self) -> &str {
        DEFAULT_THEME_SURFACE
    }

    #[must_use]
    pub fn theme_glow(&self) -> &str {
        DEFAULT_THEME_GLOW
    }

    #[must_use]
    pub fn theme_mode(&self) -> &str {
        DEFAULT_THEME_MODE
    }
}

/// Shared state handed to handlers through an `Extension`.
pub struct AuthState {
    config: AuthConfig,
    tokens: TokenService,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, tokens: TokenService) -> Self {
        Self { config, tokens }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_overrides() {
        let config = AuthConfig::new("http://localhost:3000".to_string());
        assert_eq!(config.cookie_name(), "snapsearch_session");
        assert_eq!(config.token_ttl_minutes(), 15);
        assert_eq!(config.theme_accent(), "#0091ff");
        assert_eq!(config.theme_highlight(), "#ff00b7");
        assert_eq!(config.theme_mode(), "dark");
        assert!(!config.cookie_secure());

        let config = config
            .with_cookie_name("sid".to_string())
            .with_token_ttl_minutes(30)
            .with_theme_defaults("#111111".to_string(), "#222222".to_string());
        assert_eq!(config.cookie_name(), "sid");
        assert_eq!(config.token_ttl_minutes(), 30);
        assert_eq!(config.theme_accent(), "#111111");
        assert_eq!(config.theme_highlight(), "#222222");
    }

    #[test]
    fn secure_cookie_follows_frontend_scheme() {
        let config = AuthConfig::new("https://app.snapsearch.dev".to_string());
        assert!(config.cookie_secure());
    }

    #[test]
    fn cookie_max_age_is_seven_days() {
        let config = AuthConfig::new("http://localhost:3000".to_string());
        assert_eq!(config.cookie_max_age_seconds(), 604_800);
    }
}
