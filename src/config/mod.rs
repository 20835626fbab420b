//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! gateway file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!
//! plugin section (extra_config, untyped JSON)
//!     → validation.rs (typed ExceptionConfig + field-level issues)
//!     → plugin registerer
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the matcher set is built once at startup
//! - All gateway fields have defaults to allow minimal configs
//! - Validation reports every problem it finds, not just the first
//! - Unusable exception entries are skipped and reported, the rest still apply

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{
    ExceptionConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig,
    ValidationConfig,
};
pub use validation::{ValidatedExceptions, ValidationError};
