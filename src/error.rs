//! Error types for the support bot.

use thiserror::Error;

/// Main error type for support bot operations.
#[derive(Error, Debug)]
pub enum SupportError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Authentication-related errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No token provided")]
    MissingCredentials,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("Failed to generate token: {0}")]
    TokenGeneration(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

/// Storage-related errors (users, orders, conversation history).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Rule table errors.
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),

    #[error("Rule '{0}' has an empty intent")]
    EmptyIntent(String),

    #[error("Rule '{0}' has an empty keyword")]
    EmptyKeyword(String),

    #[error("Unknown ruleset: {0}")]
    UnknownRuleset(String),

    #[error("Failed to read rule file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse rule file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type alias for support bot operations.
pub type Result<T> = std::result::Result<T, SupportError>;
