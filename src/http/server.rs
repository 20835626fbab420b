//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the echo handler
//! - Put the validation stage in front of the handler
//! - Register the exception bypass plugin around that stack
//! - Wire up outer middleware (tracing, timeout)
//! - Bind server to listener with graceful shutdown

use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, Uri},
    middleware::from_fn_with_state,
    routing::any,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::bypass::BypassValidation;
use crate::http::middleware::{validation_middleware, ValidationState};
use crate::plugin::HandlerRegisterer;

/// Demonstration gateway hosting the exception bypass plugin.
pub struct GatewayServer {
    router: Router,
    bypass_enabled: bool,
}

impl GatewayServer {
    /// Build the gateway.
    ///
    /// A plugin registration failure is logged and the gateway serves
    /// without the bypass layer, so every request is validated.
    pub fn new(config: GatewayConfig, registerer: &HandlerRegisterer) -> Self {
        let inner = Self::build_inner(&config);

        let (app, bypass_enabled) = match registerer.build(&config.extra_config, inner) {
            Ok(wrapped) => (Router::new().fallback_service(wrapped), true),
            Err(rejected) => {
                tracing::error!(
                    plugin = registerer.name(),
                    error = %rejected.error,
                    "Plugin registration failed, serving without exceptions"
                );
                (rejected.inner, false)
            }
        };

        let router = Self::build_router(&config, app);
        Self {
            router,
            bypass_enabled,
        }
    }

    /// Validation stage plus echo handler.
    fn build_inner(config: &GatewayConfig) -> Router {
        let required_header =
            match HeaderName::from_bytes(config.validation.required_header.as_bytes()) {
                Ok(name) => name,
                Err(_) => {
                    tracing::warn!(
                        required_header = %config.validation.required_header,
                        fallback = %header::AUTHORIZATION,
                        "Invalid required header name, using fallback"
                    );
                    header::AUTHORIZATION
                }
            };
        let state = ValidationState { required_header };

        Router::new()
            .route("/{*path}", any(echo_handler))
            .route("/", any(echo_handler))
            .layer(from_fn_with_state(state, validation_middleware))
    }

    /// Outer middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, app: Router) -> Router {
        app.layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            bypass_enabled = self.bypass_enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for driving the gateway without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Whether the exception bypass plugin was installed.
    pub fn bypass_enabled(&self) -> bool {
        self.bypass_enabled
    }
}

/// Reports what the gateway saw.
async fn echo_handler(
    BypassValidation(bypassed): BypassValidation,
    method: Method,
    uri: Uri,
) -> Json<Value> {
    Json(json!({
        "method": method.as_str(),
        "path": uri.path(),
        "bypass_validation": bypassed,
    }))
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
