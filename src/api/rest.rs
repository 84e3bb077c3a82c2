//! REST API router and configuration.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    chat_handler, clear_history_handler, get_order_handler, health_handler, history_handler,
    intents_handler, list_certifications_handler, list_orders_handler, login_handler, me_handler,
    metrics_handler, recommendations_handler, register_handler, root_handler,
    training_providers_handler, ApiState,
};
use crate::auth::AuthLayer;
use crate::ratelimit::RateLimitLayer;

/// REST API configuration.
#[derive(Debug, Clone)]
pub struct RestApiConfig {
    /// Allowed origins for CORS ("*" allows any).
    pub cors_origins: Vec<String>,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// Create the REST API router.
///
/// Endpoints:
/// - GET    /                      - Service info
/// - GET    /health                - Health checks
/// - GET    /metrics               - Prometheus metrics
/// - POST   /api/auth/register     - Create an account
/// - POST   /api/auth/login        - Log in
/// - GET    /api/auth/me           - Caller profile
/// - POST   /api/chat              - Send a chat message
/// - GET    /api/chat/history      - Conversation history
/// - DELETE /api/chat/history      - Clear conversation history
/// - GET    /api/chat/intents      - Active rules
/// - GET    /api/orders            - Caller's orders
/// - GET    /api/orders/:id        - One order
/// - GET    /api/certifications    - Certification catalog
/// - GET    /api/certifications/recommendations   - Suggested certifications
/// - GET    /api/certifications/training-providers - Training providers
///
/// Everything under `/api` is rate limited; everything except register and
/// login requires a bearer token.
pub fn create_router(
    state: Arc<ApiState>,
    config: &RestApiConfig,
    rate_limit: RateLimitLayer,
) -> Router {
    let auth_layer = AuthLayer::new(state.authenticator.clone(), state.metrics.clone());

    let protected = Router::new()
        .route("/auth/me", get(me_handler))
        .route("/chat", post(chat_handler))
        .route(
            "/chat/history",
            get(history_handler).delete(clear_history_handler),
        )
        .route("/chat/intents", get(intents_handler))
        .route("/orders", get(list_orders_handler))
        .route("/orders/:id", get(get_order_handler))
        .route("/certifications", get(list_certifications_handler))
        .route(
            "/certifications/recommendations",
            get(recommendations_handler),
        )
        .route(
            "/certifications/training-providers",
            get(training_providers_handler),
        )
        .route_layer(auth_layer);

    let api_routes = Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .merge(protected)
        .layer(rate_limit);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}
