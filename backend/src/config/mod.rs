//! Central module for application-wide configuration settings.
//!
//! This module loads the gateway's parameters (bind address, REST backend
//! base URL, timeouts, cookie policy) from `PORTAL_*` environment variables,
//! falling back to defaults for anything unset.

use std::env;
use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use adapters::CookieOptions;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Timeout of the per-student profile fetch.
    pub profile_timeout: Duration,
    pub cookie_secure: bool,
    pub session_max_age_secs: u64,
    pub allowed_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            api_base_url: "http://127.0.0.1:5000/api".to_string(),
            request_timeout: Duration::from_millis(15_000),
            profile_timeout: Duration::from_millis(5_000),
            cookie_secure: false,
            session_max_age_secs: 30 * 24 * 60 * 60,
            allowed_origin: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let lookup = &lookup;

        Ok(Self {
            host: try_load(lookup, "PORTAL_HOST", defaults.host)?,
            port: try_load(lookup, "PORTAL_PORT", defaults.port)?,
            api_base_url: try_load(lookup, "PORTAL_API_BASE_URL", defaults.api_base_url)?,
            request_timeout: Duration::from_millis(try_load(
                lookup,
                "PORTAL_REQUEST_TIMEOUT_MS",
                millis(defaults.request_timeout),
            )?),
            profile_timeout: Duration::from_millis(try_load(
                lookup,
                "PORTAL_PROFILE_TIMEOUT_MS",
                millis(defaults.profile_timeout),
            )?),
            cookie_secure: try_load(lookup, "PORTAL_COOKIE_SECURE", defaults.cookie_secure)?,
            session_max_age_secs: try_load(
                lookup,
                "PORTAL_SESSION_MAX_AGE_SECS",
                defaults.session_max_age_secs,
            )?,
            allowed_origin: lookup("PORTAL_ALLOWED_ORIGIN").filter(|v| !v.trim().is_empty()),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn cookie_options(&self) -> CookieOptions {
        CookieOptions {
            secure: self.cookie_secure,
            max_age_secs: self.session_max_age_secs,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
