//! Path exception matching for API gateways.
//!
//! Requests whose path matches a configured exception template are flagged
//! so that a downstream validation stage can skip its checks.

pub mod config;
pub mod exceptions;
pub mod http;
pub mod observability;
pub mod plugin;

pub use config::schema::GatewayConfig;
pub use exceptions::{CompiledMatcher, Dialect, MatcherSet};
pub use http::{BypassExt, BypassValidation, ExceptionBypass, ExceptionBypassLayer, GatewayServer};
pub use plugin::{HandlerRegisterer, RegistrationError, PLUGIN_NAME};
