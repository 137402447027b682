use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;
use time::OffsetDateTime;

use crate::parse::parse_duration;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Origin allowed by CORS; credentials are sent cross-origin only to it.
    pub base_url: HeaderValue,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let expiry_raw = std::env::var("JWT_EXPIRY").unwrap_or_else(|_| "7d".into());
        let expiry = parse_duration(&expiry_raw).context("JWT_EXPIRY")?;
        time::Duration::try_from(expiry)
            .ok()
            .and_then(|ttl| OffsetDateTime::now_utc().checked_add(ttl))
            .context("JWT_EXPIRY puts token expiry beyond the supported date range")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            expiry,
        };

        let base_url = std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".into());
        let base_url = HeaderValue::from_str(&base_url).context("BASE_URL is not a valid origin")?;

        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>().context("APP_PORT must be a port number")?,
            Err(_) => 8080,
        };

        Ok(Self {
            database_url,
            jwt,
            base_url,
            host,
            port,
        })
    }
}
