//! Registration errors.

use std::fmt;

use thiserror::Error;

use crate::config::validation::ValidationError;

/// Why the plugin could not be registered.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// No usable section for the plugin in the host's extra config.
    #[error("configuration not found for {plugin}")]
    ConfigurationNotFound { plugin: String },

    /// The section exists but cannot be used.
    #[error("invalid configuration for {plugin}: {}", join(.issues))]
    InvalidConfiguration {
        plugin: String,
        issues: Vec<ValidationError>,
    },
}

fn join(issues: &[ValidationError]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A failed registration: the untouched inner handler plus the reason.
pub struct Rejected<S> {
    pub inner: S,
    pub error: RegistrationError,
}

impl<S> Rejected<S> {
    pub fn into_parts(self) -> (S, RegistrationError) {
        (self.inner, self.error)
    }
}

impl<S> fmt::Debug for Rejected<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<S> fmt::Display for Rejected<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<S> std::error::Error for Rejected<S> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
