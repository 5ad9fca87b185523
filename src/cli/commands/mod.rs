use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("snapsearch")
        .about("SnapSearch dashboard API")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("4000")
                .env("SNAPSEARCH_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("dsn")
                .short('d')
                .long("dsn")
                .help("Database connection string")
                .env("SNAPSEARCH_DSN")
                .required(true),
        )
        .arg(
            Arg::new("session-secret")
                .long("session-secret")
                .help("Secret used to sign session tokens")
                .env("SNAPSEARCH_SESSION_SECRET")
                .required(true),
        )
        .arg(
            Arg::new("token-ttl-minutes")
                .long("token-ttl-minutes")
                .help("Session token lifetime in minutes")
                .default_value("15")
                .env("SNAPSEARCH_TOKEN_TTL_MINUTES")
                .value_parser(clap::value_parser!(i64).range(1..)),
        )
        .arg(
            Arg::new("cookie-name")
                .long("cookie-name")
                .help("Name of the session cookie")
                .default_value("snapsearch_session")
                .env("SNAPSEARCH_COOKIE_NAME"),
        )
        .arg(
            Arg::new("frontend-url")
                .long("frontend-url")
                .help("Frontend base URL, used for the CORS allow-origin and cookie security")
                .default_value("http://localhost:3000")
                .env("SNAPSEARCH_FRONTEND_URL"),
        )
        .arg(
            Arg::new("theme-accent")
                .long("theme-accent")
                .help("Default theme accent color")
                .default_value("#0091ff")
                .env("SNAPSEARCH_THEME_ACCENT"),
        )
        .arg(
            Arg::new("theme-highlight")
                .long("theme-highlight")
                .help("Default theme highlight color")
                .default_value("#ff00b7")
                .env("SNAPSEARCH_THEME_HIGHLIGHT"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("SNAPSEARCH_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
