//! Structured logging.
//!
//! # Responsibilities
//! - Define the six-level logger contract the plugin is handed by its host
//! - Provide a discard-everything default
//! - Bridge the contract onto `tracing`
//! - Initialize the tracing subscriber for the binaries

use std::fmt;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Logger supplied to the plugin by its host.
///
/// Every level defaults to discarding its message, so hosts only override
/// what they care about.
pub trait Logger: Send + Sync {
    fn debug(&self, _message: fmt::Arguments<'_>) {}
    fn info(&self, _message: fmt::Arguments<'_>) {}
    fn warning(&self, _message: fmt::Arguments<'_>) {}
    fn error(&self, _message: fmt::Arguments<'_>) {}
    fn critical(&self, _message: fmt::Arguments<'_>) {}
    /// Logs only; never terminates the process.
    fn fatal(&self, _message: fmt::Arguments<'_>) {}
}

/// Logger used until a host supplies one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {}

/// Forwards plugin log calls to `tracing`.
///
/// `critical` and `fatal` have no tracing level of their own; they are
/// emitted at `ERROR` with a `severity` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: fmt::Arguments<'_>) {
        tracing::debug!("{}", message);
    }

    fn info(&self, message: fmt::Arguments<'_>) {
        tracing::info!("{}", message);
    }

    fn warning(&self, message: fmt::Arguments<'_>) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: fmt::Arguments<'_>) {
        tracing::error!("{}", message);
    }

    fn critical(&self, message: fmt::Arguments<'_>) {
        tracing::error!(severity = "critical", "{}", message);
    }

    fn fatal(&self, message: fmt::Arguments<'_>) {
        tracing::error!(severity = "fatal", "{}", message);
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init(log_level: &str) {
    let default_filter = format!(
        "exception_gateway={level},exceptions_cli={level},tower_http={level}",
        level = log_level
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
