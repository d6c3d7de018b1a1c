use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
///
/// The secret is required and never logged. TTLs default to one hour for
/// access tokens and seven days for refresh tokens.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,

    #[serde(default = "JwtConfig::default_access_ttl_secs")]
    pub access_ttl_secs: i64,

    #[serde(default = "JwtConfig::default_refresh_ttl_secs")]
    pub refresh_ttl_secs: i64,
}

impl JwtConfig {
    fn default_access_ttl_secs() -> i64 {
        60 * 60
    }

    fn default_refresh_ttl_secs() -> i64 {
        7 * 24 * 60 * 60
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_ttls_default_when_omitted() {
        let jwt: JwtConfig =
            serde_json::from_str(r#"{"secret": "test-secret-at-least-32-bytes-long!"}"#)
                .expect("Failed to deserialize JwtConfig");

        assert_eq!(jwt.access_ttl_secs, 3600);
        assert_eq!(jwt.refresh_ttl_secs, 604800);
    }

    #[test]
    fn test_jwt_ttls_honour_overrides() {
        let jwt: JwtConfig = serde_json::from_str(
            r#"{"secret": "s", "access_ttl_secs": 60, "refresh_ttl_secs": 120}"#,
        )
        .expect("Failed to deserialize JwtConfig");

        assert_eq!(jwt.access_ttl_secs, 60);
        assert_eq!(jwt.refresh_ttl_secs, 120);
    }
}
