use std::{env, fmt::Display, str::FromStr, time::Duration};

use axum::http::{
    HeaderName, HeaderValue, Method,
    header::CONTENT_TYPE,
};
use secrecy::SecretString;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

use crate::auth::SECRET_HEADER;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug)]
pub struct Config {
    pub database_url: String,
    pub app_secret: SecretString,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let app_secret = required(&lookup, "APP_SECRET")?;

        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            app_secret: SecretString::from(app_secret),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3001)?,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            cors_origin: lookup("CORS_ORIGIN").filter(|origin| !origin.trim().is_empty()),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn cors_layer(&self) -> Result<CorsLayer, ConfigError> {
        let origin = match &self.cors_origin {
            Some(origin) => {
                let value = HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                    key: "CORS_ORIGIN",
                    reason: e.to_string(),
                })?;
                AllowOrigin::exact(value)
            }
            None => AllowOrigin::any(),
        };

        Ok(CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([CONTENT_TYPE, HeaderName::from_static(SECRET_HEADER)])
            .max_age(Duration::from_secs(60 * 60)))
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parse_or<T>(
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
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
