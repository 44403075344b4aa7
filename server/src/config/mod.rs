use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::services::BookingSettings;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/bookit";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("expected 'postgres' or 'memory', got '{other}'")),
        }
    }
}

/// Settings for the HTTP layers wrapped around the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Comma separated list of allowed CORS origins.
    pub allowed_origins: String,
    /// Send `Strict-Transport-Security`; only meaningful behind HTTPS.
    pub include_hsts: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            allowed_origins: cors::DEFAULT_ALLOWED_ORIGINS.to_string(),
            include_hsts: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    pub http: HttpConfig,
    pub booking: BookingSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source; unset variables
    /// fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = BookingSettings::default();
        let production = lookup("RUST_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse_var(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            bind_addr: parse_var(&lookup, "BIND_ADDR", default_bind_addr())?,
            store: parse_var(&lookup, "STORE", StoreBackend::Postgres)?,
            http: HttpConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|| cors::DEFAULT_ALLOWED_ORIGINS.to_string()),
                include_hsts: production,
            },
            booking: BookingSettings {
                verify_pricing: parse_var(&lookup, "VERIFY_PRICING", defaults.verify_pricing)?,
                tax_rate: parse_var(&lookup, "TAX_RATE", defaults.tax_rate)?,
                ref_id_attempts: parse_var(
                    &lookup,
                    "REF_ID_ATTEMPTS",
                    defaults.ref_id_attempts,
                )?,
            },
        })
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3001))
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::Invalid {
                name,
                reason: e.to_string(),
                value,
            }),
        },
    }
}
