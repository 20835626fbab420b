//! Request middleware.
//!
//! ```text
//! exception_bypass.rs (flag exception paths)
//!     → validation.rs (skip checks for flagged requests)
//!     → handler
//! ```

pub mod exception_bypass;
pub mod validation;

pub use exception_bypass::{ExceptionBypass, ExceptionBypassLayer};
pub use validation::{validation_middleware, ValidationState};
