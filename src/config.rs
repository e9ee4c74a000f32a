// src/config.rs
use std::{env, fmt::Display, net::IpAddr, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_API_BASE_URL: &str = "https://minimarket-jk-backend.onrender.com/api";

#[derive(Debug, Error)]
#[error("Invalid {key} value: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub api_base_url: String,
    pub session_secret: String,
    pub session_ttl_secs: u64,
    pub cart_idle_secs: u64,
    pub allowed_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: try_load("HOST", "127.0.0.1")?,
            port: try_load("PORT", "3000")?,
            api_base_url: try_load::<String>("API_BASE_URL", DEFAULT_API_BASE_URL)?
                .trim_end_matches('/')
                .to_string(),
            session_secret: session_secret(),
            session_ttl_secs: try_load("SESSION_TTL_SECS", "7200")?,
            cart_idle_secs: try_load("CART_IDLE_SECS", "86400")?,
            allowed_origin: try_load("ALLOWED_ORIGIN", "http://localhost:3000")?,
        })
    }
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e: T::Err| ConfigError {
        key,
        reason: e.to_string(),
    })
}

// Without a configured secret the markers only live as long as the process.
fn session_secret() -> String {
    match env::var("SESSION_SECRET") {
        Ok(secret) if !secret.trim().is_empty() => secret,
        _ => {
            warn!("SESSION_SECRET not set, admin sessions will not survive a restart");
            uuid::Uuid::new_v4().simple().to_string()
        }
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            api_base_url: "http://backend.test/api".to_string(),
            session_secret: "test-secret".to_string(),
            session_ttl_secs: 7200,
            cart_idle_secs: 86400,
            allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_key_falls_back_to_default() {
        let port: u16 = try_load("MINIMARKET_TEST_UNSET_PORT", "4100").unwrap();
        assert_eq!(port, 4100);
    }

    #[test]
    fn unparsable_default_reports_the_key() {
        let err = try_load::<u16>("MINIMARKET_TEST_UNSET_TTL", "two hours").unwrap_err();
        assert_eq!(err.key, "MINIMARKET_TEST_UNSET_TTL");
    }
}
