use crate::api::{
    self,
    handlers::auth::{
        state::{AuthConfig, AuthState},
        token::TokenService,
    },
};
use anyhow::Result;
use secrecy::SecretString;
use std::sync::Arc;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub session_secret: SecretString,
    pub token_ttl_minutes: i64,
    pub cookie_name: String,
    pub frontend_url: String,
    pub theme_accent: String,
    pub theme_highlight: String,
}

/// Build the application state and run the HTTP server.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let config = AuthConfig::new(args.frontend_url)
        .with_cookie_name(args.cookie_name)
        .with_token_ttl_minutes(args.token_ttl_minutes)
        .with_theme_defaults(args.theme_accent, args.theme_highlight);

    let tokens = TokenService::new(args.session_secret, config.token_ttl_minutes());
    let state = Arc::new(AuthState::new(config, tokens));

    api::new(args.port, args.dsn, state).await
}
