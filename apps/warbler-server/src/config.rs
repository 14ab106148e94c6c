//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

#[cfg(feature = "postgres")]
use warbler_infra::database::DatabaseConfig;
#[cfg(feature = "redis")]
use warbler_infra::RedisConfig;
use warbler_infra::session::DEFAULT_SESSION_TTL;
use warbler_infra::{PasswordConfig, RateLimitConfig};

/// Session cookie settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ttl: Duration,
    /// Only send the cookie over HTTPS.
    pub cookie_secure: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_SESSION_TTL,
            cookie_secure: false,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    #[cfg(feature = "redis")]
    pub redis: Option<RedisConfig>,
    pub session: SessionConfig,
    pub password: PasswordConfig,
    pub auth_rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(20),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(2),
            sqlx_logging: parse_flag("DB_SQL_LOGGING").unwrap_or(false),
            ..DatabaseConfig::new(url)
        });

        let session = SessionConfig {
            ttl: parse_var("SESSION_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_SESSION_TTL),
            cookie_secure: parse_flag("SESSION_COOKIE_SECURE").unwrap_or(false),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            #[cfg(feature = "postgres")]
            database,
            #[cfg(feature = "redis")]
            redis: RedisConfig::from_env(),
            session,
            password: PasswordConfig::from_env(),
            auth_rate_limit: RateLimitConfig::from_env(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

fn parse_flag(key: &str) -> Option<bool> {
    env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
}
