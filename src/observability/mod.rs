//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Plugin and gateway produce:
//!     → logging.rs (six-level plugin logger, tracing bridge)
//!     → metrics.rs (bypass decision counters)
//!
//! Consumers:
//!     → tracing-subscriber (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - The plugin logs only through an injected `Logger`; none means no output
//! - The host side logs with `tracing` directly
//! - Metrics are cheap (atomic increments) and a no-op without a recorder

pub mod logging;
pub mod metrics;

pub use logging::{Logger, NoopLogger, TracingLogger};
