//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check seed data for duplicate ids and names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    let base_path = &config.http.base_path;
    if !base_path.starts_with('/') || base_path.len() < 2 || base_path.ends_with('/') {
        errors.push(ValidationError::new(
            "http.base_path",
            "must start with '/', not end with '/', and not be the root path",
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for (i, group) in config.seed.groups.iter().enumerate() {
        let field = format!("seed.groups[{}]", i);
        if group.id <= 0 {
            errors.push(ValidationError::new(format!("{}.id", field), "must be positive"));
        }
        if !ids.insert(group.id) {
            errors.push(ValidationError::new(
                format!("{}.id", field),
                format!("duplicate id {}", group.id),
            ));
        }
        if group.name.trim().is_empty() {
            errors.push(ValidationError::new(format!("{}.name", field), "must not be empty"));
        } else if !names.insert(group.name.trim().to_uppercase()) {
            errors.push(ValidationError::new(
                format!("{}.name", field),
                format!("duplicate name '{}'", group.name),
            ));
        }
        if !group.role && !group.legacy {
            errors.push(ValidationError::new(
                field,
                "must create at least one of the role or legacy records",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
