//! Plugin registration.
//!
//! # Data Flow
//! ```text
//! Host startup
//!     → HandlerRegisterer::register_handlers (plugin announces its name)
//!     → HandlerRegisterer::build(extra_config, inner)
//!         → config/validation.rs (typed section)
//!         → exceptions (MatcherSet)
//!         → ExceptionBypass<inner>
//! ```
//!
//! # Design Decisions
//! - The logger is handed to the registerer, not stored globally
//! - On failure the host gets its inner handler back with the error

pub mod error;
pub mod registerer;

pub use error::{Rejected, RegistrationError};
pub use registerer::HandlerRegisterer;

/// Name the plugin registers under; also the key of its config section.
pub const PLUGIN_NAME: &str = "krakend-common-middleware";
