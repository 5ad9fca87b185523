//! Theme wire types, validation, and defaulting.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::{
    error::{Error, Issue},
    handlers::auth::state::AuthConfig,
};

/// Display mode for the dashboard palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
    System,
}

impl ThemeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::System => "system",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// Theme palette as sent to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ThemeBody {
    pub accent: String,
    pub highlight: String,
    pub base: String,
    pub surface: String,
    pub glow: Option<String>,
    pub mode: ThemeMode,
}

impl ThemeBody {
    /// The hard-coded default palette, with accent/highlight taken from
    /// configuration. Returned on reads when nothing is saved; never
    /// persisted by a read.
    #[must_use]
    pub fn defaults(config: &AuthConfig) -> Self {
        Self {
            accent: config.theme_accent().to_string(),
            highlight: config.theme_highlight().to_string(),
            base: config.theme_base().to_string(),
            surface: config.theme_surface().to_string(),
            glow: Some(config.theme_glow().to_string()),
            mode: ThemeMode::Dark,
        }
    }
}

/// Partial theme payload accepted by save and signup.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ThemeRequest {
    pub accent: Option<String>,
    pub highlight: Option<String>,
    pub base: Option<String>,
    pub surface: Option<String>,
    pub glow: Option<String>,
    pub mode: Option<String>,
}

/// Validated partial theme update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ThemeUpdate {
    pub accent: Option<String>,
    pub highlight: Option<String>,
    pub base: Option<String>,
    pub surface: Option<String>,
    pub glow: Option<String>,
    pub mode: Option<ThemeMode>,
}

impl ThemeRequest {
    /// Validate the partial payload.
    ///
    /// # Errors
    /// Returns `Error::Validation` when `mode` is not one of
    /// `dark`/`light`/`system`.
    pub fn validate(self, path_prefix: &str) -> Result<ThemeUpdate, Error> {
        let mode = match self.mode.as_deref() {
            None => None,
            Some(raw) => match ThemeMode::parse(raw) {
                Some(mode) => Some(mode),
                None => {
                    return Err(Error::Validation(vec![Issue::new(
                        format!("{path_prefix}mode"),
                        "Mode must be one of dark, light, or system",
                    )]))
                }
            },
        };

        Ok(ThemeUpdate {
            accent: self.accent,
            highlight: self.highlight,
            base: self.base,
            surface: self.surface,
            glow: self.glow,
            mode,
        })
    }
}
