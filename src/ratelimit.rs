//! Per-client request rate limiting.
//!
//! Clients are keyed by the first `X-Forwarded-For` entry, falling back to
//! the peer address and finally to a shared `"unknown"` bucket.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::extract::ConnectInfo;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::time::Instant;
use tower::{Layer, Service};

use crate::config::RateLimitConfig;
use crate::error::{ConfigError, Result, SupportError};
use crate::metrics::Metrics;

/// Requests counted for one client in the current window.
#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window counter per client key.
///
/// A client's window opens with its first request and admits at most
/// `max_requests` until `window` has elapsed; the next request after that
/// opens a fresh window.
#[derive(Debug)]
struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    /// Count a request. On rejection returns the time left in the window.
    fn check(&self, key: &str, now: Instant) -> std::result::Result<(), Duration> {
        let mut windows = self.windows.lock();
        let fresh = Window {
            started: now,
            count: 0,
        };
        let current = windows.entry(key.to_string()).or_insert(fresh);

        let elapsed = now.saturating_duration_since(current.started);
        if elapsed >= self.window {
            *current = fresh;
        }

        if current.count >= self.max_requests {
            return Err(self.window.saturating_sub(elapsed));
        }
        current.count += 1;
        Ok(())
    }

    fn prune(&self, now: Instant) -> usize {
        let mut windows = self.windows.lock();
        let before = windows.len();
        windows.retain(|_, w| now.saturating_duration_since(w.started) < self.window);
        windows.shrink_to_fit();
        before - windows.len()
    }

    fn tracked_clients(&self) -> usize {
        self.windows.lock().len()
    }
}

/// Rate limiting layer.
#[derive(Clone)]
pub struct RateLimitLayer {
    limiter: Option<Arc<FixedWindowLimiter>>,
    metrics: Arc<Metrics>,
}

impl RateLimitLayer {
    /// Create a layer allowing `max_requests` per `window_secs` per client.
    pub fn new(config: &RateLimitConfig, metrics: Arc<Metrics>) -> Result<Self> {
        if !config.enabled {
            return Ok(Self {
                limiter: None,
                metrics,
            });
        }

        if config.max_requests == 0 {
            return Err(
                ConfigError::Invalid("rate_limit.max_requests must be > 0".to_string()).into(),
            );
        }
        if config.window_secs == 0 {
            return Err(ConfigError::Invalid("rate_limit.window_secs must be > 0".to_string()).into());
        }

        Ok(Self {
            limiter: Some(Arc::new(FixedWindowLimiter {
                max_requests: config.max_requests,
                window: Duration::from_secs(config.window_secs),
                windows: Mutex::new(HashMap::new()),
            })),
            metrics,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Forget clients whose window has closed. Returns how many were dropped.
    pub fn prune(&self) -> usize {
        self.limiter
            .as_ref()
            .map_or(0, |limiter| limiter.prune(Instant::now()))
    }

    /// Number of clients with an open window.
    pub fn tracked_clients(&self) -> usize {
        self.limiter
            .as_ref()
            .map_or(0, |limiter| limiter.tracked_clients())
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitService {
            inner,
            limiter: self.limiter.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

/// Rate limiting service.
#[derive(Clone)]
pub struct RateLimitService<S> {
    inner: S,
    limiter: Option<Arc<FixedWindowLimiter>>,
    metrics: Arc<Metrics>,
}

/// Key identifying the calling client.
pub fn client_key<B>(req: &Request<B>) -> String {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return forwarded.to_string();
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

impl<S, ReqBody> Service<Request<ReqBody>> for RateLimitService<S>
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

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        if let Some(limiter) = &self.limiter {
            let key = client_key(&req);
            if let Err(wait) = limiter.check(&key, Instant::now()) {
                let retry_after_secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);

                self.metrics.rate_limited_total.inc();
                tracing::warn!(client = %key, retry_after_secs, "Rate limit exceeded");

                let err = SupportError::RateLimited {
                    retry_after_secs: retry_after_secs.max(1),
                };
                return Box::pin(async move { Ok(err.into_response()) });
            }
        }

        let inner = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, inner);

        Box::pin(async move { inner.call(req).await })
    }
}
