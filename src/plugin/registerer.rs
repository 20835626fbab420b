//! Handler registerer: the host-facing entry point of the plugin.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tower::Layer;

use crate::config::validation::validate_exceptions;
use crate::exceptions::MatcherSet;
use crate::http::middleware::{ExceptionBypass, ExceptionBypassLayer};
use crate::observability::logging::{Logger, NoopLogger};
use crate::plugin::error::{Rejected, RegistrationError};
use crate::plugin::PLUGIN_NAME;

/// Registers the exception bypass handler with a host and builds it.
#[derive(Clone)]
pub struct HandlerRegisterer {
    logger: Arc<dyn Logger>,
}

impl HandlerRegisterer {
    /// Registerer that logs nothing.
    pub fn new() -> Self {
        Self {
            logger: Arc::new(NoopLogger),
        }
    }

    /// Registerer that logs through the host's logger.
    pub fn with_logger(logger: Arc<dyn Logger>) -> Self {
        logger.debug(format_args!("[PLUGIN: {}] Logger loaded", PLUGIN_NAME));
        Self { logger }
    }

    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// Announce the plugin to the host under its registered name.
    pub fn register_handlers<F>(&self, register: F)
    where
        F: FnOnce(&str, &Self),
    {
        register(PLUGIN_NAME, self);
    }

    /// Wrap `inner` using the plugin's section of `extra`.
    ///
    /// On error `inner` comes back untouched inside [`Rejected`]; whether
    /// that stops startup is the host's call.
    pub fn build<S>(
        &self,
        extra: &Map<String, Value>,
        inner: S,
    ) -> Result<ExceptionBypass<S>, Rejected<S>> {
        match self.layer(extra) {
            Ok(layer) => Ok(layer.layer(inner)),
            Err(error) => {
                self.logger.error(format_args!("[PLUGIN: {}] {}", PLUGIN_NAME, error));
                Err(Rejected { inner, error })
            }
        }
    }

    /// Build only the layer, for hosts that assemble their own stacks.
    pub fn layer(&self, extra: &Map<String, Value>) -> Result<ExceptionBypassLayer, RegistrationError> {
        let validated = validate_exceptions(extra, PLUGIN_NAME)?;

        self.logger.info(format_args!(
            "[PLUGIN: {}] Extracting exception list...",
            PLUGIN_NAME
        ));
        for issue in &validated.skipped {
            self.logger.warning(format_args!(
                "[PLUGIN: {}] skipping exception entry {}",
                PLUGIN_NAME, issue
            ));
        }

        let config = validated.config;
        let (matchers, errors) = MatcherSet::compile(config.dialect, &config.exceptions);
        for error in &errors {
            self.logger.warning(format_args!("[PLUGIN: {}] skipping {}", PLUGIN_NAME, error));
        }

        let layer = ExceptionBypassLayer::with_logger(matchers, self.logger.clone());
        self.logger.debug(format_args!(
            "[PLUGIN: {}] Validation-bypass middleware registered ({} dialect, {} patterns)",
            PLUGIN_NAME,
            config.dialect,
            layer.matchers().len()
        ));

        Ok(layer)
    }
}

impl Default for HandlerRegisterer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlerRegisterer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegisterer")
            .field("name", &PLUGIN_NAME)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extra(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_registers_under_plugin_name() {
        let registerer = HandlerRegisterer::new();
        let mut seen = None;
        registerer.register_handlers(|name, r| seen = Some((name.to_string(), r.name())));
        assert_eq!(
            seen,
            Some((PLUGIN_NAME.to_string(), PLUGIN_NAME))
        );
    }

    #[test]
    fn test_missing_config_returns_inner() {
        let registerer = HandlerRegisterer::new();
        let rejected = registerer.build(&Map::new(), "inner-handler").unwrap_err();

        let (inner, error) = rejected.into_parts();
        assert_eq!(inner, "inner-handler");
        assert_eq!(error.to_string(), format!("configuration not found for {}", PLUGIN_NAME));
    }

    #[test]
    fn test_builds_layer_skipping_bad_entries() {
        let registerer = HandlerRegisterer::new();
        let extra = extra(json!({
            PLUGIN_NAME: { "exceptions": ["/v1/login", 7, "/v1/(", "/v1/users/{id}"] }
        }));

        let layer = registerer.layer(&extra).unwrap();
        let templates: Vec<&str> = layer.matchers().iter().map(|m| m.template()).collect();
        assert_eq!(templates, ["/v1/login", "/v1/users/{id}"]);
    }

    #[test]
    fn test_invalid_dialect_rejected() {
        let registerer = HandlerRegisterer::new();
        let extra = extra(json!({
            PLUGIN_NAME: { "dialect": "regex", "exceptions": [] }
        }));

        let rejected = registerer.build(&extra, ()).unwrap_err();
        assert!(matches!(rejected.error, RegistrationError::InvalidConfiguration { .. }));
        assert!(rejected.to_string().contains("dialect"));
    }
}
