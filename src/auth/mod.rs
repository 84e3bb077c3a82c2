//! Authentication for the support bot.
//!
//! Bearer JWTs (HS256) carrying `{ userId, email }`, bcrypt password
//! hashing, and a tower middleware that attaches the caller identity to
//! each request.

mod middleware;
pub mod password;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{AuthError, Result, SupportError};

pub use middleware::{AuthLayer, AuthMiddleware};
pub use password::{hash_password, verify_password};

/// Environment variable consulted when no secret is configured.
pub const JWT_SECRET_ENV: &str = "SUPPORTBOT_JWT_SECRET";

/// Identity of the caller, attached to request extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    pub user_id: String,
    pub email: String,
}

impl AuthContext {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = SupportError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| AuthError::MissingCredentials.into())
    }
}

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JwtClaims {
    pub user_id: String,
    pub email: String,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

/// Issues and validates bearer tokens.
#[derive(Clone)]
pub struct Authenticator {
    config: AuthConfig,
    secret: Option<String>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("enabled", &self.config.enabled)
            .field("has_secret", &self.secret.is_some())
            .finish()
    }
}

impl Authenticator {
    /// Create a new authenticator from config.
    ///
    /// The secret comes from `auth.jwt.secret`, else `SUPPORTBOT_JWT_SECRET`.
    pub fn new(config: AuthConfig) -> Self {
        let secret = if config.jwt.secret.is_empty() {
            std::env::var(JWT_SECRET_ENV)
                .ok()
                .filter(|s| !s.is_empty())
        } else {
            Some(config.jwt.secret.clone())
        };

        if secret.is_none() && config.enabled {
            tracing::warn!("No JWT secret configured; token issuance will fail");
        }

        Self { config, secret }
    }

    /// Check if authentication is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Whether a signing secret is available.
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Identity used for every request when authentication is disabled.
    pub fn anonymous_context(&self) -> AuthContext {
        AuthContext::new(
            self.config.anonymous_user_id.clone(),
            self.config.anonymous_email.clone(),
        )
    }

    /// Authenticate a request from its `Authorization` header.
    pub fn authenticate(&self, auth_header: Option<&str>) -> Result<AuthContext> {
        if !self.config.enabled {
            return Ok(self.anonymous_context());
        }

        let header = auth_header
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(AuthError::MissingCredentials)?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingCredentials)?;

        self.verify_token(token)
    }

    /// Issue a token for a user, valid from now.
    pub fn issue_token(&self, user_id: &str, email: &str) -> Result<String> {
        self.issue_token_at(user_id, email, Utc::now())
    }

    /// Issue a token with an explicit issue time.
    pub fn issue_token_at(
        &self,
        user_id: &str,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String> {
        let secret = self.secret()?;
        let expiry = issued_at + Duration::seconds(self.config.jwt.expiry_secs as i64);

        let claims = JwtClaims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGeneration(e.to_string()).into())
    }

    /// Validate a token and return the identity it carries.
    pub fn verify_token(&self, token: &str) -> Result<AuthContext> {
        let secret = self.secret()?;
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken(e.to_string()),
        })?;

        let claims = token_data.claims;
        if claims.user_id.is_empty() || claims.email.is_empty() {
            return Err(AuthError::InvalidToken("missing identity claims".to_string()).into());
        }

        Ok(AuthContext::new(claims.user_id, claims.email))
    }

    fn secret(&self) -> Result<&str> {
        self.secret
            .as_deref()
            .ok_or_else(|| AuthError::MissingSecret.into())
    }
}
