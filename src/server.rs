//! Server assembly: state from configuration, listener, shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chrono::{DateTime, Utc};
use tokio::net::TcpListener;

use crate::api::{create_router, ApiState, RestApiConfig};
use crate::auth::Authenticator;
use crate::classifier::RuleEngine;
use crate::config::{ClassifierConfig, Config};
use crate::error::Result;
use crate::metrics::Metrics;
use crate::ratelimit::RateLimitLayer;
use crate::store::{OrderBook, UserDirectory};

const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Build the rule engine selected by configuration.
///
/// A rule file takes precedence over the named built-in ruleset.
pub fn build_engine(config: &ClassifierConfig) -> Result<RuleEngine> {
    match &config.rules_file {
        Some(path) => {
            let engine = RuleEngine::from_file(path)?;
            tracing::info!(rules = engine.rules().len(), "Loaded rule file {}", path);
            Ok(engine)
        }
        None => Ok(RuleEngine::from_ruleset(config.ruleset)),
    }
}

/// The support bot HTTP server.
pub struct SupportServer {
    config: Config,
    state: Arc<ApiState>,
    rate_limit: RateLimitLayer,
}

impl SupportServer {
    /// Assemble state from configuration, seeding demo data as configured.
    pub async fn new(config: Config) -> Result<Self> {
        let metrics = Arc::new(Metrics::new()?);
        let engine = Arc::new(build_engine(&config.classifier)?);
        let authenticator = Arc::new(Authenticator::new(config.auth.clone()));

        let users = UserDirectory::in_memory().with_password_cost(config.auth.password_cost);
        if config.data.seed_demo_users {
            users.seed_demo_users().await?;
        }

        let orders = OrderBook::in_memory();
        if config.data.seed_demo_orders {
            orders.seed_demo_orders().await?;
        }
        if let Some(path) = &config.data.orders_file {
            orders.load_json(path).await?;
        }

        let rate_limit = RateLimitLayer::new(&config.rate_limit, metrics.clone())?;

        let state = Arc::new(ApiState::new(
            engine,
            authenticator,
            users,
            orders,
            metrics,
            config.chat.clone(),
        ));

        Ok(Self {
            config,
            state,
            rate_limit,
        })
    }

    pub fn state(&self) -> Arc<ApiState> {
        self.state.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The complete application router.
    pub fn router(&self) -> Router {
        let rest_config = RestApiConfig {
            cors_origins: self.config.server.cors_origins.clone(),
        };
        create_router(self.state.clone(), &rest_config, self.rate_limit.clone())
    }

    /// Bind and serve until ctrl-c or SIGTERM.
    pub async fn run(self) -> Result<()> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(
            addr = %addr,
            auth = self.config.auth.enabled,
            rate_limit = self.rate_limit.is_enabled(),
            rules = self.state.engine.rules().len(),
            "Support bot listening"
        );

        let pruner = {
            let rate_limit = self.rate_limit.clone();
            let state = self.state.clone();
            let retention_secs = self.config.chat.history_retention_secs;
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(PRUNE_INTERVAL);
                loop {
                    interval.tick().await;
                    rate_limit.prune();
                    prune_history(&state, retention_secs, Utc::now());
                }
            })
        };

        let result = axum::serve(
            listener,
            self.router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await;

        pruner.abort();
        tracing::info!("Server stopped");
        result.map_err(Into::into)
    }
}

/// Forget conversation histories idle for longer than `retention_secs`.
fn prune_history(state: &ApiState, retention_secs: u64, now: DateTime<Utc>) -> usize {
    if retention_secs == 0 {
        return 0;
    }
    let Some(cutoff) = i64::try_from(retention_secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .and_then(|retention| now.checked_sub_signed(retention))
    else {
        return 0;
    };
    let removed = state.history.prune_idle(cutoff);
    if removed > 0 {
        tracing::debug!(removed, "Pruned idle chat histories");
    }
    removed
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
