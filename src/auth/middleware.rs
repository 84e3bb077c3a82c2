//! Authentication middleware for HTTP transport.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{HeaderMap, Request};
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;
use tower::{Layer, Service};

use super::{AuthContext, Authenticator};
use crate::error::Result;
use crate::metrics::Metrics;

/// Auth middleware layer.
#[derive(Clone)]
pub struct AuthLayer {
    authenticator: Arc<Authenticator>,
    metrics: Arc<Metrics>,
}

impl AuthLayer {
    /// Create a new auth layer.
    pub fn new(authenticator: Arc<Authenticator>, metrics: Arc<Metrics>) -> Self {
        Self {
            authenticator,
            metrics,
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            authenticator: self.authenticator.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

/// Auth middleware service.
///
/// Rejects requests without a valid bearer token with a 401 JSON body and
/// stores the caller's [`AuthContext`] in request extensions otherwise.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    authenticator: Arc<Authenticator>,
    metrics: Arc<Metrics>,
}

impl<S> AuthMiddleware<S> {
    fn extract_auth_context(&self, headers: &HeaderMap) -> Result<AuthContext> {
        let auth_header = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        self.authenticator.authenticate(auth_header)
    }
}

impl<S, ReqBody> Service<Request<ReqBody>> for AuthMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let auth_ctx = match self.extract_auth_context(req.headers()) {
            Ok(ctx) => ctx,
            Err(err) => {
                self.metrics.auth_failures_total.inc();
                tracing::debug!(path = %req.uri().path(), error = %err, "Rejected request");
                return Box::pin(async move { Ok(err.into_response()) });
            }
        };

        req.extensions_mut().insert(auth_ctx);

        let inner = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, inner);

        Box::pin(async move { inner.call(req).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, JwtConfig};
    use axum::body::Body;
    use axum::http::StatusCode;
    use std::convert::Infallible;
    use tower::{service_fn, ServiceExt};

    fn layer() -> (AuthLayer, Arc<Authenticator>, Arc<Metrics>) {
        let authenticator = Arc::new(Authenticator::new(AuthConfig {
            jwt: JwtConfig {
                secret: "middleware-secret".to_string(),
                expiry_secs: 60,
            },
            ..AuthConfig::default()
        }));
        let metrics = Arc::new(Metrics::new().unwrap());
        (
            AuthLayer::new(authenticator.clone(), metrics.clone()),
            authenticator,
            metrics,
        )
    }

    async fn echo_user(req: Request<Body>) -> std::result::Result<Response, Infallible> {
        let user = req
            .extensions()
            .get::<AuthContext>()
            .map(|ctx| ctx.user_id.clone())
            .unwrap_or_default();
        Ok(user.into_response())
    }

    #[tokio::test]
    async fn test_rejects_missing_token() {
        let (layer, _, metrics) = layer();
        let svc = layer.layer(service_fn(echo_user));

        let response = svc
            .oneshot(Request::get("/api/chat").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(metrics.auth_failures_total.get(), 1);
    }

    #[tokio::test]
    async fn test_attaches_context() {
        let (layer, authenticator, _) = layer();
        let token = authenticator.issue_token("user-7", "u7@example.com").unwrap();
        let svc = layer.layer(service_fn(echo_user));

        let response = svc
            .oneshot(
                Request::get("/api/chat")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
