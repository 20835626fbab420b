//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → middleware/exception_bypass.rs (path matched against exceptions)
//!     → middleware/validation.rs (reads the bypass flag)
//!     → echo handler
//! ```

pub mod bypass;
pub mod middleware;
pub mod server;

pub use bypass::{mark_bypassed, BypassExt, BypassValidation};
pub use middleware::{ExceptionBypass, ExceptionBypassLayer};
pub use server::GatewayServer;
