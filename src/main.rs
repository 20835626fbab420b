//! Exception gateway (demonstration host)
//!
//! Serves an echo endpoint behind a header-validation stage, with the
//! exception bypass plugin registered in front of it.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                    GATEWAY                       │
//!                      │                                                  │
//!     Client Request   │  ┌─────────┐   ┌────────────┐   ┌────────────┐   │
//!     ─────────────────┼─▶│ trace + │──▶│ exception  │──▶│ validation │   │
//!                      │  │ timeout │   │  bypass    │   │   stage    │   │
//!                      │  └─────────┘   └─────┬──────┘   └─────┬──────┘   │
//!                      │                      │ flag            │         │
//!                      │                      ▼                 ▼         │
//!     Client Response  │               ┌────────────┐   ┌────────────┐    │
//!     ◀────────────────┼───────────────│  matcher   │   │    echo    │    │
//!                      │               │    set     │   │  handler   │    │
//!                      │               └────────────┘   └────────────┘    │
//!                      └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use exception_gateway::config::loader::load_config;
use exception_gateway::observability::{logging, metrics, TracingLogger};
use exception_gateway::{GatewayConfig, GatewayServer, HandlerRegisterer};

#[derive(Parser)]
#[command(name = "exception-gateway")]
#[command(about = "Gateway demo for the exception bypass middleware", long_about = None)]
struct Args {
    /// Path to the gateway TOML configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!("exception-gateway v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        required_header = %config.validation.required_header,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let registerer = HandlerRegisterer::with_logger(Arc::new(TracingLogger));
    registerer.register_handlers(|name, _| {
        tracing::info!(plugin = name, "Handler registered");
    });

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = GatewayServer::new(config, &registerer);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
