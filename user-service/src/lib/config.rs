use std::env;
use std::time::Duration;

use chrono::Utc;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

/// PostgreSQL connection settings. Without a URL the service keeps users in memory.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime, e.g. "1h", "30m" or a number of seconds
    pub expires_in: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    /// Argon2 iteration count
    pub hash_cost: u32,
}

impl JwtConfig {
    pub const MIN_SECRET_LENGTH: usize = 20;

    /// Parse `expires_in` into a duration.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Not a duration, or zero
    pub fn lifetime(&self) -> Result<Duration, ConfigError> {
        let raw = self.expires_in.trim();
        let lifetime = if raw.chars().all(|c| c.is_ascii_digit()) {
            raw.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError::Message(format!("jwt.expires_in: {}", e)))?
        } else {
            humantime::parse_duration(raw)
                .map_err(|e| ConfigError::Message(format!("jwt.expires_in: {}", e)))?
        };

        if lifetime.is_zero() {
            return Err(ConfigError::Message(
                "jwt.expires_in: must be greater than zero".to_string(),
            ));
        }

        // Tokens issued from now on must carry a representable expiry
        let representable = chrono::Duration::from_std(lifetime)
            .ok()
            .and_then(|d| Utc::now().checked_add_signed(d))
            .is_some();
        if !representable {
            return Err(ConfigError::Message(
                "jwt.expires_in: too large".to_string(),
            ));
        }

        Ok(lifetime)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults (port 3000, 1h tokens, hash cost 2)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 3000_i64)?
            .set_default("jwt.expires_in", "1h")?
            .set_default(
                "password.hash_cost",
                i64::from(auth::PasswordHasher::DEFAULT_COST),
            )?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < JwtConfig::MIN_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "jwt.secret: must be at least {} bytes",
                JwtConfig::MIN_SECRET_LENGTH
            )));
        }

        self.jwt.lifetime()?;

        let cost_range = auth::PasswordHasher::MIN_COST..=auth::PasswordHasher::MAX_COST;
        if !cost_range.contains(&self.password.hash_cost) {
            return Err(ConfigError::Message(format!(
                "password.hash_cost: must be between {} and {}, got {}",
                cost_range.start(),
                cost_range.end(),
                self.password.hash_cost
            )));
        }

        Ok(())
    }
}
