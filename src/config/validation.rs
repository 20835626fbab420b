//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation of the gateway file (serde handles syntactic)
//! - Convert the untyped plugin section into an [`ExceptionConfig`]
//! - Report problems per field, e.g. `exceptions[2]`
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - A missing or non-object plugin section is "configuration not found"
//! - A non-string exception entry is skipped, not fatal

use std::net::SocketAddr;

use axum::http::HeaderName;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::schema::{ExceptionConfig, GatewayConfig};
use crate::exceptions::Dialect;
use crate::plugin::RegistrationError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A problem with one configuration field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Plugin section after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedExceptions {
    pub config: ExceptionConfig,
    /// Entries that were dropped from `exceptions`.
    pub skipped: Vec<ValidationError>,
}

/// Validate the gateway file.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("not a socket address: {:?}", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("expected one of {:?}", LOG_LEVELS),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("not a socket address: {:?}", config.observability.metrics_address),
        ));
    }

    if HeaderName::from_bytes(config.validation.required_header.as_bytes()).is_err() {
        errors.push(ValidationError::new(
            "validation.required_header",
            format!("not a valid header name: {:?}", config.validation.required_header),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Extract and validate the section registered as `plugin` from `extra`.
///
/// Hard failures (no section, no usable `exceptions` list, bad `dialect`)
/// return an error. Non-string entries only land in
/// [`ValidatedExceptions::skipped`].
pub fn validate_exceptions(
    extra: &Map<String, Value>,
    plugin: &str,
) -> Result<ValidatedExceptions, RegistrationError> {
    let not_found = || RegistrationError::ConfigurationNotFound {
        plugin: plugin.to_string(),
    };

    let section = extra.get(plugin).and_then(Value::as_object).ok_or_else(not_found)?;
    let raw = section.get("exceptions").ok_or_else(not_found)?;

    let mut issues = Vec::new();

    let dialect = match section.get("dialect") {
        None => Dialect::default(),
        Some(Value::String(s)) => match s.parse::<Dialect>() {
            Ok(d) => d,
            Err(message) => {
                issues.push(ValidationError::new("dialect", message));
                Dialect::default()
            }
        },
        Some(other) => {
            issues.push(ValidationError::new(
                "dialect",
                format!("expected string, found {}", json_type(other)),
            ));
            Dialect::default()
        }
    };

    let entries: &[Value] = match raw.as_array() {
        Some(entries) => entries.as_slice(),
        None => {
            issues.push(ValidationError::new(
                "exceptions",
                format!("expected a list of strings, found {}", json_type(raw)),
            ));
            &[]
        }
    };

    if !issues.is_empty() {
        return Err(RegistrationError::InvalidConfiguration {
            plugin: plugin.to_string(),
            issues,
        });
    }

    let mut exceptions = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        match entry {
            Value::String(s) => exceptions.push(s.clone()),
            other => skipped.push(ValidationError::new(
                format!("exceptions[{}]", i),
                format!("expected string, found {}", json_type(other)),
            )),
        }
    }

    Ok(ValidatedExceptions {
        config: ExceptionConfig { dialect, exceptions },
        skipped,
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PLUGIN: &str = "krakend-common-middleware";

    fn extra(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn test_valid_section() {
        let extra = extra(json!({
            PLUGIN: {
                "dialect": "glob",
                "exceptions": ["/v1/login", "/static/*"]
            }
        }));

        let validated = validate_exceptions(&extra, PLUGIN).unwrap();
        assert_eq!(validated.config.dialect, Dialect::Glob);
        assert_eq!(validated.config.exceptions, ["/v1/login", "/static/*"]);
        assert!(validated.skipped.is_empty());
    }

    #[test]
    fn test_dialect_defaults_to_segment() {
        let extra = extra(json!({ PLUGIN: { "exceptions": [] } }));
        let validated = validate_exceptions(&extra, PLUGIN).unwrap();
        assert_eq!(validated.config.dialect, Dialect::Segment);
        assert!(validated.config.exceptions.is_empty());
    }

    #[test]
    fn test_missing_section_is_not_found() {
        let extra = extra(json!({ "some-other-plugin": { "exceptions": [] } }));
        let err = validate_exceptions(&extra, PLUGIN).unwrap_err();
        assert!(matches!(err, RegistrationError::ConfigurationNotFound { .. }));
    }

    #[test]
    fn test_section_of_wrong_type_is_not_found() {
        let extra = extra(json!({ PLUGIN: ["/v1/login"] }));
        let err = validate_exceptions(&extra, PLUGIN).unwrap_err();
        assert!(matches!(err, RegistrationError::ConfigurationNotFound { .. }));
    }

    #[test]
    fn test_missing_exceptions_is_not_found() {
        let extra = extra(json!({ PLUGIN: { "dialect": "segment" } }));
        let err = validate_exceptions(&extra, PLUGIN).unwrap_err();
        assert!(matches!(err, RegistrationError::ConfigurationNotFound { .. }));
    }

    #[test]
    fn test_all_hard_issues_reported() {
        let extra = extra(json!({
            PLUGIN: { "dialect": "regex", "exceptions": "/v1/login" }
        }));

        match validate_exceptions(&extra, PLUGIN).unwrap_err() {
            RegistrationError::InvalidConfiguration { issues, .. } => {
                let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
                assert_eq!(fields, ["dialect", "exceptions"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_non_string_entries_skipped() {
        let extra = extra(json!({
            PLUGIN: { "exceptions": ["/v1/login", 42, null, "/v1/{id}"] }
        }));

        let validated = validate_exceptions(&extra, PLUGIN).unwrap();
        assert_eq!(validated.config.exceptions, ["/v1/login", "/v1/{id}"]);
        assert_eq!(
            validated.skipped,
            vec![
                ValidationError::new("exceptions[1]", "expected string, found number"),
                ValidationError::new("exceptions[2]", "expected string, found null"),
            ]
        );
    }

    #[test]
    fn test_gateway_defaults_are_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_gateway_errors_collected() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.timeouts.request_secs = 0;
        config.validation.required_header = "bad header".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            ["listener.bind_address", "timeouts.request_secs", "validation.required_header"]
        );
    }
}
