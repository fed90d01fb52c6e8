//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use quill_infra::{DatabaseConfig, JwtConfig};

/// Application configuration. Every environment variable the server reads
/// is resolved here, once, at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", 20),
            min_connections: parse_or("DB_MIN_CONNECTIONS", 2),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080),
            database,
            jwt: jwt_from_env(),
        }
    }
}

fn jwt_from_env() -> JwtConfig {
    let secret =
        env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string());

    if secret == "change-me-in-production" {
        let is_production = env::var("RUST_ENV")
            .map(|v| v == "production" || v == "prod")
            .unwrap_or(false);

        if is_production {
            tracing::error!(
                "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
            );
        } else {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }
    }

    JwtConfig {
        secret,
        expiration_hours: positive_hours(env::var("JWT_EXPIRATION_HOURS").ok(), 24),
        issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "quill-api".to_string()),
    }
}

fn parse_or<T: FromStr>(var: &str, default: T) -> T {
    env::var(var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Token lifetimes must be positive: a zero or negative value would turn
/// into a bogus unsigned `expires_in` in the auth responses.
fn positive_hours(value: Option<String>, default: i64) -> i64 {
    value
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|hours| *hours > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_expiration_falls_back_to_default() {
        assert_eq!(positive_hours(Some("-5".into()), 24), 24);
        assert_eq!(positive_hours(Some("0".into()), 24), 24);
        assert_eq!(positive_hours(Some("junk".into()), 24), 24);
        assert_eq!(positive_hours(None, 24), 24);
        assert_eq!(positive_hours(Some("12".into()), 24), 12);
    }
}
