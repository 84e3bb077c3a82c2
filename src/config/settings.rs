//! Configuration settings for the support bot.

use crate::auth::password;
use crate::classifier::RulesetKind;
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
    pub classifier: ClassifierConfig,
    pub chat: ChatConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            PathBuf::from("supportbot.toml"),
            PathBuf::from("config.toml"),
            dirs::config_dir()
                .map(|p| p.join("supportbot/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.is_file() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Apply overrides from environment variables, then re-validate.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SUPPORTBOT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_env("PORT", &port)?;
        }
        if let Some(secret) = lookup("SUPPORTBOT_JWT_SECRET") {
            self.auth.jwt.secret = secret;
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(max) = lookup("RATE_LIMIT_MAX_REQUESTS") {
            self.rate_limit.max_requests = parse_env("RATE_LIMIT_MAX_REQUESTS", &max)?;
        }
        if let Some(window) = lookup("RATE_LIMIT_WINDOW_SECS") {
            self.rate_limit.window_secs = parse_env("RATE_LIMIT_WINDOW_SECS", &window)?;
        }

        self.validate()
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".to_string()).into());
        }

        if self.rate_limit.enabled {
            if self.rate_limit.max_requests == 0 {
                return Err(
                    ConfigError::Invalid("rate_limit.max_requests must be > 0".to_string()).into(),
                );
            }
            if self.rate_limit.window_secs == 0 {
                return Err(
                    ConfigError::Invalid("rate_limit.window_secs must be > 0".to_string()).into(),
                );
            }
        }

        if self.chat.max_message_chars == 0 {
            return Err(
                ConfigError::Invalid("chat.max_message_chars must be > 0".to_string()).into(),
            );
        }

        if self.auth.jwt.expiry_secs == 0 {
            return Err(ConfigError::Invalid("auth.jwt.expiry_secs must be > 0".to_string()).into());
        }

        if !(password::MIN_COST..=password::MAX_COST).contains(&self.auth.password_cost) {
            return Err(ConfigError::Invalid(format!(
                "auth.password_cost must be between {} and {}",
                password::MIN_COST,
                password::MAX_COST
            ))
            .into());
        }

        if !self.auth.enabled && self.auth.anonymous_user_id.is_empty() {
            return Err(ConfigError::MissingField("auth.anonymous_user_id".to_string()).into());
        }

        Ok(())
    }

    /// Socket address string for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{key}: cannot parse '{value}'")).into())
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// HTTP port
    pub port: u16,
    /// Allowed CORS origins ("*" allows any)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
            ],
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Require bearer tokens on protected routes
    pub enabled: bool,
    /// JWT settings
    pub jwt: JwtConfig,
    /// bcrypt work factor for new password hashes
    pub password_cost: u32,
    /// Identity attached to requests when auth is disabled
    pub anonymous_user_id: String,
    pub anonymous_email: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            jwt: JwtConfig::default(),
            password_cost: password::DEFAULT_COST,
            anonymous_user_id: "demo1".to_string(),
            anonymous_email: "demo@example.com".to_string(),
        }
    }
}

/// JWT configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// HMAC secret (falls back to SUPPORTBOT_JWT_SECRET when empty)
    pub secret: String,
    /// Token lifetime in seconds
    pub expiry_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expiry_secs: 24 * 60 * 60,
        }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests allowed per caller per window
    pub max_requests: u32,
    /// Window length in seconds
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 100,
            window_secs: 15 * 60,
        }
    }
}

/// Classifier configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Built-in rule table
    pub ruleset: RulesetKind,
    /// TOML rule file; overrides `ruleset` when set
    pub rules_file: Option<String>,
}

/// Chat endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Maximum accepted message length in characters
    pub max_message_chars: usize,
    /// Exchanges kept per user
    pub history_limit: usize,
    /// Histories idle for longer than this are dropped (0 keeps them forever)
    pub history_retention_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_chars: 1000,
            history_limit: 100,
            history_retention_secs: 24 * 60 * 60,
        }
    }
}

/// Seed data configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub seed_demo_users: bool,
    pub seed_demo_orders: bool,
    /// JSON file with orders to load at startup
    pub orders_file: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed_demo_users: true,
            seed_demo_orders: true,
            orders_file: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    pub level: String,
    /// Emit JSON lines
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
