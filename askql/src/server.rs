use std::net::SocketAddr;

use askql_core::{AskqlConfig, ConfigError, ConfigProperties};
use askql_data::QueryExecutor;
use askql_llm::LanguageModel;
use askql_observability::{catch_panic_layer, default_trace};
use axum::routing::{get, post};
use axum::Router;

use crate::controllers::{api, health, page};
use crate::state::AppState;

pub const DEFAULT_BIND: &str = "0.0.0.0:8501";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

impl ConfigProperties for ServerConfig {
    fn prefix() -> &'static str {
        "server"
    }

    fn from_config(config: &AskqlConfig) -> Result<Self, ConfigError> {
        let raw = config.get_or("server.bind", DEFAULT_BIND.to_string());
        let bind = raw.parse().map_err(|_| ConfigError::TypeMismatch {
            key: "server.bind".to_string(),
            expected: "socket address (host:port)",
        })?;
        Ok(Self { bind })
    }
}

/// All routes of the application.
pub fn router<M, E>(state: AppState<M, E>) -> Router
where
    M: LanguageModel + 'static,
    E: QueryExecutor + 'static,
{
    Router::new()
        .route("/", get(page::show).post(page::ask::<M, E>))
        .route("/api/query", post(api::query::<M, E>))
        .route("/health", get(health))
        .layer(catch_panic_layer())
        .layer(default_trace())
        .with_state(state)
}

/// Serve `router` on `addr` until Ctrl-C or SIGTERM.
pub async fn serve(router: Router, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "askql listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("askql stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
