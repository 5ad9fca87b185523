use crate::cli::actions::{server::Args, Action};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Turn parsed CLI matches into an [`Action`].
///
/// # Errors
/// Returns an error when a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let required = |name: &str| -> Result<String> {
        matches
            .get_one::<String>(name)
            .cloned()
            .with_context(|| format!("missing required argument: --{name}"))
    };

    Ok(Action::Server(Args {
        port: matches.get_one::<u16>("port").copied().unwrap_or(4000),
        dsn: required("dsn")?,
        session_secret: SecretString::from(required("session-secret")?),
        token_ttl_minutes: matches
            .get_one::<i64>("token-ttl-minutes")
            .copied()
            .unwrap_or(15),
        cookie_name: required("cookie-name")?,
        frontend_url: required("frontend-url")?,
        theme_accent: required("theme-accent")?,
        theme_highlight: required("theme-highlight")?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    #[test]
    fn handler_builds_server_action() -> Result<()> {
        let matches = commands::new().try_get_matches_from([
            "snapsearch",
            "--dsn",
            "postgres://localhost/snapsearch",
            "--session-secret",
            "sekret",
            "--port",
            "8099",
            "--cookie-name",
            "sid",
        ])?;

        let Action::Server(args) = handler(&matches)?;
        assert_eq!(args.port, 8099);
        assert_eq!(args.dsn, "postgres://localhost/snapsearch");
        assert_eq!(args.session_secret.expose_secret(), "sekret");
        assert_eq!(args.cookie_name, "sid");
        assert_eq!(args.token_ttl_minutes, 15);
        Ok(())
    }
}
