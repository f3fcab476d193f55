use std::fmt;
use std::time::Duration;

use reqwest::Url;

pub const SERVICE_URL_VAR: &str = "LOCATION_SERVICE_URL";
pub const SERVICE_TOKEN_VAR: &str = "LOCATION_SERVICE_TOKEN";
pub const TIMEOUT_SECS_VAR: &str = "LOCATION_SERVICE_TIMEOUT_SECS";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const BEARER_SCHEME: &str = "Bearer";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct LocationServiceConfig {
    pub base_url: String,
    bearer_token: String,
    pub request_timeout: Duration,
}

impl LocationServiceConfig {
    pub fn new(
        base_url: impl Into<String>,
        bearer_token: impl AsRef<str>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: normalize_token(bearer_token.as_ref()),
            request_timeout,
        }
    }

    /// Reads configuration through `lookup`, normally `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = required(&lookup, SERVICE_URL_VAR)?;
        validate_base_url(&base_url)?;

        let token = required(&lookup, SERVICE_TOKEN_VAR)?;
        if normalize_token(&token).is_empty() {
            return Err(ConfigError::Missing(SERVICE_TOKEN_VAR));
        }

        let request_timeout = match lookup(TIMEOUT_SECS_VAR) {
            Some(raw) if !raw.trim().is_empty() => parse_timeout(&raw)?,
            _ => DEFAULT_TIMEOUT,
        };

        Ok(Self::new(base_url, token, request_timeout))
    }

    /// Value for the `Authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("{BEARER_SCHEME} {}", self.bearer_token)
    }
}

impl fmt::Debug for LocationServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationServiceConfig")
            .field("base_url", &self.base_url)
            .field("bearer_token", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn validate_base_url(raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw).map_err(|error| ConfigError::Invalid {
        name: SERVICE_URL_VAR,
        reason: error.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid {
            name: SERVICE_URL_VAR,
            reason: format!("unsupported scheme `{other}`, expected http or https"),
        }),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            name: TIMEOUT_SECS_VAR,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(error) => Err(ConfigError::Invalid {
            name: TIMEOUT_SECS_VAR,
            reason: error.to_string(),
        }),
    }
}

fn normalize_token(token: &str) -> String {
    let trimmed = token.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => {
            rest.trim().to_string()
        }
        _ if trimmed.eq_ignore_ascii_case(BEARER_SCHEME) => String::new(),
        _ => trimmed.to_string(),
    }
}
