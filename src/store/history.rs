//! Per-user conversation history.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// One user message and the bot's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatExchange {
    pub session_id: String,
    pub user_message: String,
    pub bot_message: String,
    pub intent: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded history per user. The oldest exchange is dropped once a user
/// reaches `limit` entries.
pub struct ConversationLog {
    limit: usize,
    by_user: RwLock<HashMap<String, VecDeque<ChatExchange>>>,
}

impl ConversationLog {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    pub fn record(&self, user_id: &str, exchange: ChatExchange) {
        let mut by_user = self.by_user.write();
        let entries = by_user.entry(user_id.to_string()).or_default();
        while entries.len() >= self.limit {
            entries.pop_front();
        }
        entries.push_back(exchange);
    }

    /// Oldest-first history, optionally restricted to one session.
    pub fn history(&self, user_id: &str, session_id: Option<&str>) -> Vec<ChatExchange> {
        self.by_user
            .read()
            .get(user_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| session_id.map_or(true, |s| e.session_id == s))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Drop every user whose latest exchange is older than `cutoff`.
    /// Returns how many users were removed.
    pub fn prune_idle(&self, cutoff: DateTime<Utc>) -> usize {
        let mut by_user = self.by_user.write();
        let before = by_user.len();
        by_user.retain(|_, entries| entries.back().is_some_and(|e| e.timestamp >= cutoff));
        by_user.shrink_to_fit();
        before - by_user.len()
    }

    /// Number of users with recorded history.
    pub fn user_count(&self) -> usize {
        self.by_user.read().len()
    }

    /// Drop a user's history. Returns how many exchanges were removed.
    pub fn clear(&self, user_id: &str) -> usize {
        self.by_user
            .write()
            .remove(user_id)
            .map_or(0, |entries| entries.len())
    }
}
