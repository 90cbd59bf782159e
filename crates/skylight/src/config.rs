//! Client configuration.

use std::env;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::error::SkylightError;

/// Default zone for date resolution when none is configured.
const DEFAULT_TIMEZONE: &str = "America/New_York";

/// How the token is presented in the `Authorization` header.
/// Fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Bearer,
    Basic,
}

impl FromStr for AuthMode {
    type Err = SkylightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bearer" => Ok(Self::Bearer),
            "basic" => Ok(Self::Basic),
            other => Err(SkylightError::Config(format!(
                "unknown auth mode {other:?}: expected 'bearer' or 'basic'"
            ))),
        }
    }
}

/// Configuration for [`SkylightClient`](crate::SkylightClient).
///
/// Constructed once at startup and handed to the client; there is no
/// process-global instance.
#[derive(Debug, Clone)]
pub struct Config {
    /// API token captured from the Skylight mobile app.
    pub token: String,
    /// Frame (household) identifier, substituted into every request path.
    pub frame_id: String,
    /// Authorization header scheme.
    pub auth: AuthMode,
    /// Zone used to resolve relative date phrases.
    pub timezone: Tz,
}

impl Config {
    /// Build a config from explicit values, validating the zone name.
    ///
    /// # Errors
    /// Returns `Config` errors for empty required values or an unknown zone.
    pub fn new(
        token: impl Into<String>,
        frame_id: impl Into<String>,
        auth: AuthMode,
        timezone: &str,
    ) -> Result<Self, SkylightError> {
        let token = token.into();
        let frame_id = frame_id.into();
        if token.is_empty() {
            return Err(SkylightError::Config("API token must not be empty".into()));
        }
        if frame_id.is_empty() {
            return Err(SkylightError::Config("frame ID must not be empty".into()));
        }
        let timezone = timezone
            .parse::<Tz>()
            .map_err(|_| SkylightError::Config(format!("unknown timezone {timezone:?}")))?;

        Ok(Self {
            token,
            frame_id,
            auth,
            timezone,
        })
    }

    /// Load configuration from the environment.
    ///
    /// Reads `SKYLIGHT_TOKEN` (required), `SKYLIGHT_FRAME_ID` (required),
    /// `SKYLIGHT_AUTH_TYPE` (`bearer` | `basic`, default bearer) and
    /// `SKYLIGHT_TIMEZONE` (default `America/New_York`). Fails before any
    /// request is attempted.
    ///
    /// # Errors
    /// Returns a `Config` error naming the missing or invalid variable.
    pub fn from_env() -> Result<Self, SkylightError> {
        let token = required_var("SKYLIGHT_TOKEN")?;
        let frame_id = required_var("SKYLIGHT_FRAME_ID")?;
        let auth = match env::var("SKYLIGHT_AUTH_TYPE") {
            Ok(raw) if !raw.is_empty() => raw.parse()?,
            _ => AuthMode::default(),
        };
        let timezone = env::var("SKYLIGHT_TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.into());

        Self::new(token, frame_id, auth, &timezone)
    }
}

fn required_var(name: &str) -> Result<String, SkylightError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(SkylightError::Config(format!(
            "{name} is required but not set"
        ))),
    }
}
