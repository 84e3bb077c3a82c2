//! REST API request handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{AuthContext, Authenticator};
use crate::certifications::{
    self, CertificationId, CertificationSummary, ProviderFilter, Recommendation, TrainingProvider,
};
use crate::classifier::RuleEngine;
use crate::config::ChatConfig;
use crate::error::{Result, SupportError};
use crate::metrics::{HealthCheck, HealthStatus, Metrics};
use crate::store::{ChatExchange, ConversationLog, Order, OrderBook, User, UserDirectory, UserProfile};

/// Application state shared across handlers.
pub struct ApiState {
    pub engine: Arc<RuleEngine>,
    pub authenticator: Arc<Authenticator>,
    pub users: UserDirectory,
    pub orders: OrderBook,
    pub history: ConversationLog,
    pub metrics: Arc<Metrics>,
    pub chat: ChatConfig,
}

impl ApiState {
    pub fn new(
        engine: Arc<RuleEngine>,
        authenticator: Arc<Authenticator>,
        users: UserDirectory,
        orders: OrderBook,
        metrics: Arc<Metrics>,
        chat: ChatConfig,
    ) -> Self {
        Self {
            engine,
            authenticator,
            users,
            orders,
            history: ConversationLog::new(chat.history_limit),
            metrics,
            chat,
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response to a successful register or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserProfile,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub session_id: String,
    pub message: String,
    pub intent: String,
    pub suggestions: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationQuery {
    /// Years of testing experience
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderQuery {
    #[serde(default)]
    pub certification: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub user_id: String,
    pub exchanges: Vec<ChatExchange>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub message: String,
    pub removed: usize,
}

/// One entry of the active rule table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentInfo {
    pub priority: usize,
    pub id: String,
    pub intent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentsResponse {
    pub rules: Vec<IntentInfo>,
    pub fallback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
    pub total: usize,
}

// ============================================================================
// Validation
// ============================================================================

/// Unwrap a JSON body, reporting malformed input as a validation error.
fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| SupportError::Validation(rejection.body_text()))
}

fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(SupportError::Validation("A valid email is required".to_string()))
    }
}

fn validate_registration(req: &RegisterRequest) -> Result<()> {
    validate_email(&req.email)?;
    if req.password.chars().count() < 6 {
        return Err(SupportError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    if req.name.trim().chars().count() < 2 {
        return Err(SupportError::Validation(
            "Name must be at least 2 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_chat_message(message: &str, max_chars: usize) -> Result<()> {
    if message.is_empty() {
        return Err(SupportError::Validation("Message is required".to_string()));
    }
    if message.chars().count() > max_chars {
        return Err(SupportError::Validation(format!(
            "Message must be at most {} characters",
            max_chars
        )));
    }
    Ok(())
}

/// Blank query parameters count as absent.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_experience(value: Option<&str>) -> Result<Option<i64>> {
    value
        .map(|v| {
            v.parse().map_err(|_| {
                SupportError::Validation(format!(
                    "experience must be a whole number of years, got '{}'",
                    v
                ))
            })
        })
        .transpose()
}

fn auth_response(state: &ApiState, user: &User, message: &str) -> Result<AuthResponse> {
    let token = state.authenticator.issue_token(&user.id, &user.email)?;
    Ok(AuthResponse {
        message: message.to_string(),
        user: user.profile(),
        token,
    })
}

// ============================================================================
// Handler Functions
// ============================================================================

/// GET / - Service info.
pub async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "supportbot",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Rule-based customer support chatbot API",
        "endpoints": {
            "health": "GET /health",
            "metrics": "GET /metrics",
            "register": "POST /api/auth/register",
            "login": "POST /api/auth/login",
            "me": "GET /api/auth/me",
            "chat": "POST /api/chat",
            "history": "GET|DELETE /api/chat/history",
            "intents": "GET /api/chat/intents",
            "orders": "GET /api/orders",
            "order": "GET /api/orders/:id",
            "certifications": "GET /api/certifications",
            "recommendations": "GET /api/certifications/recommendations",
            "trainingProviders": "GET /api/certifications/training-providers"
        }
    }))
}

/// GET /health - Liveness and component checks.
pub async fn health_handler(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    let mut checks = vec![HealthCheck::healthy("classifier")];
    if state.authenticator.is_enabled() && !state.authenticator.has_secret() {
        checks.push(HealthCheck::degraded("auth", "JWT secret is not configured"));
    } else {
        checks.push(HealthCheck::healthy("auth"));
    }

    let health = HealthStatus::from_checks(
        env!("CARGO_PKG_VERSION"),
        state.metrics.uptime(),
        checks,
    );
    let status = StatusCode::from_u16(health.status.to_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(health))
}

/// GET /metrics - Prometheus text exposition.
pub async fn metrics_handler(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    match state.metrics.export_prometheus() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to export metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// POST /api/auth/register - Create an account and return a token.
pub async fn register_handler(
    State(state): State<Arc<ApiState>>,
    body: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let request = json_body(body)?;
    validate_registration(&request)?;

    let user = state
        .users
        .register(&request.email, &request.password, &request.name)
        .await?;
    state.metrics.registrations_total.inc();

    let response = auth_response(&state, &user, "User registered successfully")?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login - Exchange credentials for a token.
pub async fn login_handler(
    State(state): State<Arc<ApiState>>,
    body: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>> {
    let request = json_body(body)?;
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(SupportError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let user = match state.users.authenticate(&request.email, &request.password).await {
        Ok(user) => user,
        Err(e) => {
            state.metrics.auth_failures_total.inc();
            return Err(e);
        }
    };
    state.metrics.logins_total.inc();
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(auth_response(&state, &user, "Login successful")?))
}

/// GET /api/auth/me - Profile of the caller.
pub async fn me_handler(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
) -> Result<Json<UserProfile>> {
    let user = state
        .users
        .find_for_identity(&auth.user_id, &auth.email)
        .await?;
    Ok(Json(user.profile()))
}

/// POST /api/chat - Classify a message and reply.
pub async fn chat_handler(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
    body: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let request = json_body(body)?;
    validate_chat_message(&request.message, state.chat.max_message_chars)?;

    let session_id = request
        .session_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let result = {
        let _timer = Metrics::start_timer(&state.metrics.classify_duration_seconds);
        state.engine.classify(&request.message)
    };
    state.metrics.record_chat_message(&result.intent);

    tracing::info!(
        user_id = %auth.user_id,
        session_id = %session_id,
        intent = %result.intent,
        "Classified chat message"
    );

    state.history.record(
        &auth.user_id,
        ChatExchange {
            session_id: session_id.clone(),
            user_message: request.message,
            bot_message: result.message.clone(),
            intent: result.intent.clone(),
            timestamp: result.timestamp,
        },
    );

    Ok(Json(ChatResponse {
        session_id,
        message: result.message,
        intent: result.intent,
        suggestions: result.suggestions,
        timestamp: result.timestamp,
    }))
}

/// GET /api/chat/history - The caller's conversation history.
pub async fn history_handler(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let exchanges = state
        .history
        .history(&auth.user_id, query.session_id.as_deref());
    let total = exchanges.len();

    Json(HistoryResponse {
        user_id: auth.user_id,
        exchanges,
        total,
    })
}

/// DELETE /api/chat/history - Forget the caller's conversation history.
pub async fn clear_history_handler(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
) -> Json<ClearHistoryResponse> {
    let removed = state.history.clear(&auth.user_id);
    tracing::debug!(user_id = %auth.user_id, removed, "Cleared chat history");

    Json(ClearHistoryResponse {
        message: "Chat history cleared".to_string(),
        removed,
    })
}

/// GET /api/chat/intents - Active rules in priority order.
pub async fn intents_handler(State(state): State<Arc<ApiState>>) -> Json<IntentsResponse> {
    let rules = state
        .engine
        .rules()
        .iter()
        .enumerate()
        .map(|(priority, rule)| IntentInfo {
            priority,
            id: rule.id.clone(),
            intent: rule.response.intent.clone(),
        })
        .collect();

    Json(IntentsResponse {
        rules,
        fallback: state.engine.fallback().intent.clone(),
    })
}

/// GET /api/orders - The caller's orders, newest first.
pub async fn list_orders_handler(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
) -> Result<Json<OrdersResponse>> {
    let orders = state.orders.list_for_user(&auth.user_id).await?;
    let total = orders.len();
    Ok(Json(OrdersResponse { orders, total }))
}

/// GET /api/orders/:id - One of the caller's orders.
pub async fn get_order_handler(
    State(state): State<Arc<ApiState>>,
    auth: AuthContext,
    Path(order_id): Path<String>,
) -> Result<Json<Order>> {
    let order = state.orders.get_for_user(&auth.user_id, &order_id).await?;
    Ok(Json(order))
}

/// GET /api/certifications - Every certification in catalog order.
pub async fn list_certifications_handler() -> Json<Vec<CertificationSummary>> {
    Json(
        certifications::certifications()
            .iter()
            .map(|c| c.summary())
            .collect(),
    )
}

/// GET /api/certifications/recommendations - Suggestions from experience and role.
pub async fn recommendations_handler(
    auth: AuthContext,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<Vec<Recommendation>>> {
    let experience = parse_experience(non_empty(&query.experience))?;
    let role = non_empty(&query.role);
    let recommendations = certifications::recommend(experience, role);

    tracing::debug!(
        user_id = %auth.user_id,
        experience = ?experience,
        role = ?role,
        count = recommendations.len(),
        "Recommended certifications"
    );
    Ok(Json(recommendations))
}

/// GET /api/certifications/training-providers - Providers matching the filters.
pub async fn training_providers_handler(
    Query(query): Query<ProviderQuery>,
) -> Result<Json<Vec<&'static TrainingProvider>>> {
    let filter = ProviderFilter {
        certification: non_empty(&query.certification)
            .map(str::parse::<CertificationId>)
            .transpose()?,
        format: non_empty(&query.format),
        region: non_empty(&query.region),
    };
    Ok(Json(certifications::training_providers(&filter)))
}
