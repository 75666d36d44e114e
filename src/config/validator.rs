//! Validation of resolved connection settings.
//!
//! Catches values clap accepts but the PCE client cannot use, before any
//! network traffic happens.

use crate::error::{ConfigError, Result};
use tracing::debug;

use super::settings::PceSettings;

/// Validator for [`PceSettings`].
#[derive(Debug, Default)]
pub struct SettingsValidator;

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The setting that failed validation.
    pub field: &'static str,
    /// The error message.
    pub message: String,
}

impl SettingsValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates connection settings.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure as a [`ConfigError`].
    pub fn validate(&self, settings: &PceSettings) -> Result<()> {
        let errors = Self::collect_errors(settings);

        match errors.into_iter().next() {
            None => {
                debug!("Settings validation passed");
                Ok(())
            }
            Some(first) => Err(ConfigError::validation(first.message, first.field).into()),
        }
    }

    /// Collects every problem with the settings.
    fn collect_errors(settings: &PceSettings) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if settings.host.contains("://") || settings.host.contains('/') {
            errors.push(ValidationError {
                field: "pce_host",
                message: format!(
                    "'{}' must be a bare hostname without scheme or path",
                    settings.host
                ),
            });
        } else if settings.host.chars().any(char::is_whitespace) {
            errors.push(ValidationError {
                field: "pce_host",
                message: format!("'{}' contains whitespace", settings.host),
            });
        }

        if settings.port == 0 {
            errors.push(ValidationError {
                field: "port",
                message: String::from("port must be between 1 and 65535"),
            });
        }

        if settings.org_id == 0 {
            errors.push(ValidationError {
                field: "org_id",
                message: String::from("organization ID must be positive"),
            });
        }

        errors
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;

    fn settings() -> PceSettings {
        PceSettings {
            host: String::from("pce.example.com"),
            port: 443,
            org_id: 1,
            org_id_defaulted: true,
            api_key: String::from("api_123"),
            api_secret: String::from("s3cret"),
            verify_tls: true,
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(SettingsValidator::new().validate(&settings()).is_ok());
    }

    #[test]
    fn test_rejects_url_as_host() {
        let mut s = settings();
        s.host = String::from("https://pce.example.com");

        let err = SettingsValidator::new().validate(&s).expect_err("url host");

        assert!(matches!(
            err,
            SyncError::Config(ConfigError::ValidationError { ref field, .. }) if field == "pce_host"
        ));
    }

    #[test]
    fn test_rejects_zero_port_and_org() {
        let mut s = settings();
        s.port = 0;
        s.org_id = 0;

        let errors = SettingsValidator::collect_errors(&s);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].to_string(), "port: port must be between 1 and 65535");
        assert_eq!(errors[1].field, "org_id");
    }
}
