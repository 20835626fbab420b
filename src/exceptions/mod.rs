//! Exception pattern subsystem.
//!
//! # Data Flow
//! ```text
//! Exception templates (from plugin config)
//!     → pattern.rs (dialect substitution, anchoring, regex compile)
//!     → set.rs (ordered MatcherSet, first match wins)
//!     → shared via Arc with the bypass middleware
//! ```
//!
//! # Design Decisions
//! - Matchers compiled once at startup, immutable at runtime
//! - Anchored at both ends, so no prefix or suffix matches
//! - One dialect per deployment (glob `*` or segment `{name}`)
//! - A template that fails to compile is reported and skipped, never fatal
//! - Literal template text is handed to the regex engine unescaped

pub mod pattern;
pub mod set;

pub use pattern::{CompiledMatcher, Dialect, PatternError};
pub use set::MatcherSet;
