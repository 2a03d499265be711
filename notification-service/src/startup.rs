//! Application startup and lifecycle management.
//!
//! Builds the HTTP router (send-email, health, metrics) and owns the bound
//! listener until the server is stopped.

use crate::config::NotificationConfig;
use crate::handlers::{health_check, metrics_endpoint, send_email};
use crate::services::{EmailProvider, MockEmailProvider, SmtpProvider};
use axum::{
    body::Body,
    http::Method,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: NotificationConfig,
    pub email_provider: Arc<dyn EmailProvider>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/send-email", post(send_email))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Pick the mail transport described by the configuration.
pub fn email_provider_from_config(
    config: &NotificationConfig,
) -> Result<Arc<dyn EmailProvider>, AppError> {
    if !config.smtp.enabled {
        tracing::info!("SMTP provider disabled, using mock email provider");
        return Ok(Arc::new(MockEmailProvider::new(true)));
    }

    let provider = SmtpProvider::new(config.smtp.clone()).map_err(|e| {
        tracing::error!("Failed to initialize SMTP provider: {}", e);
        AppError::ConfigError(anyhow::anyhow!(e))
    })?;

    tracing::info!(
        host = %config.smtp.host,
        port = config.smtp.port,
        from = %config.smtp.from_email,
        "SMTP email provider initialized"
    );

    Ok(Arc::new(provider))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the transport selected by `config`.
    pub async fn build(config: NotificationConfig) -> Result<Self, AppError> {
        let email_provider = email_provider_from_config(&config)?;
        Self::build_with_provider(config, email_provider).await
    }

    /// Build the application around an already constructed transport.
    pub async fn build_with_provider(
        config: NotificationConfig,
        email_provider: Arc<dyn EmailProvider>,
    ) -> Result<Self, AppError> {
        if let Err(e) = email_provider.health_check().await {
            // Delivery errors surface per request; startup carries on.
            tracing::warn!(provider = email_provider.name(), "Mail transport check failed: {}", e);
        }

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            provider = email_provider.name(),
            enabled = email_provider.is_enabled(),
            "Email server running at http://localhost:{}",
            port
        );
        tracing::info!("Available endpoints: POST /send-email, GET /health, GET /metrics");

        Ok(Self {
            port,
            listener,
            state: AppState {
                config,
                email_provider,
            },
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
