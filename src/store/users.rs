//! User accounts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{KeyValueStore, MemoryStore};
use crate::auth::password::{self, hash_password_with_cost, verify_password};
use crate::error::{AuthError, Result, StoreError, SupportError};

/// Stored user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

/// Public view of a user (no credentials).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// User accounts keyed by lower-cased email.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn KeyValueStore<User>>,
    password_cost: u32,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn KeyValueStore<User>>) -> Self {
        Self {
            store,
            password_cost: password::DEFAULT_COST,
        }
    }

    /// Set the bcrypt work factor used for new accounts.
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    /// Directory backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Create an account. Fails with a conflict if the email is taken.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<User> {
        let key = email_key(email);
        if self.store.contains(&key).await? {
            return Err(conflict());
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: key.clone(),
            name: name.trim().to_string(),
            password_hash: self.hash(password).await?,
            created_at: Utc::now(),
        };

        // Re-checked on insert: another registration may have won the race
        // while the hash was being computed.
        if !self.store.insert_if_absent(&key, user.clone()).await? {
            return Err(conflict());
        }

        tracing::info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    /// Check credentials. Unknown email and wrong password fail identically.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let Some(user) = self.store.get(&email_key(email)).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let password = password.to_string();
        let stored = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?;

        if valid {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials.into())
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.store.get(&email_key(email)).await
    }

    /// Look up the account behind an authenticated identity.
    pub async fn find_for_identity(&self, user_id: &str, email: &str) -> Result<User> {
        self.find_by_email(email)
            .await?
            .filter(|u| u.id == user_id)
            .ok_or_else(|| StoreError::NotFound("User not found".to_string()).into())
    }

    pub async fn len(&self) -> Result<usize> {
        self.store.len().await
    }

    /// Install the demo accounts, replacing any existing entries.
    pub async fn seed_demo_users(&self) -> Result<()> {
        let demo = [
            ("demo1", "demo@example.com", "demo", "Demo User"),
            ("demo2", "demo@istqb.com", "demo123", "Demo Tester"),
        ];

        for (id, email, password, name) in demo {
            let user = User {
                id: id.to_string(),
                email: email.to_string(),
                name: name.to_string(),
                password_hash: self.hash(password).await?,
                created_at: Utc::now(),
            };
            self.store.set(email, user).await?;
        }

        tracing::debug!("Seeded {} demo users", demo.len());
        Ok(())
    }

    /// bcrypt is CPU-bound; keep it off the async workers.
    async fn hash(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        let cost = self.password_cost;
        tokio::task::spawn_blocking(move || hash_password_with_cost(&password, cost))
            .await
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?
    }
}

fn conflict() -> SupportError {
    StoreError::Conflict("User with this email already exists".to_string()).into()
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}
