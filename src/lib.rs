//! supportbot: Rule-Based Customer Support Chatbot
//!
//! Classifies free-text support messages into intents with an ordered,
//! first-match-wins keyword rule table and answers with canned replies.
//! Served over a JWT-protected REST API with per-client rate limiting.

pub mod api;
pub mod auth;
pub mod certifications;
pub mod classifier;
pub mod config;
pub mod error;
pub mod metrics;
pub mod ratelimit;
pub mod server;
pub mod store;

pub use api::{create_router, ApiState, ErrorResponse, RestApiConfig};
pub use auth::{AuthContext, AuthLayer, AuthMiddleware, Authenticator};
pub use certifications::{Certification, CertificationId, ProviderFilter, TrainingProvider};
pub use classifier::{
    classify, normalize, ClassificationResult, IntentRule, Predicate, ResponseTemplate,
    RuleEngine, RuleFile, RulesetKind, UNKNOWN_INTENT,
};
pub use config::Config;
pub use error::{AuthError, ClassifierError, ConfigError, Result, StoreError, SupportError};
pub use metrics::{HealthCheck, HealthState, HealthStatus, Metrics};
pub use ratelimit::{RateLimitLayer, RateLimitService};
pub use server::{build_engine, SupportServer};
pub use store::{
    ChatExchange, ConversationLog, KeyValueStore, MemoryStore, Order, OrderBook, OrderItem,
    OrderStatus, ShippingInfo, User, UserDirectory, UserProfile,
};
