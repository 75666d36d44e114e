//! PCE connection settings.
//!
//! Settings are resolved from command-line flags, which in turn fall back to
//! `ILLUMIO_*` environment variables (see [`crate::cli::Cli`]).

use crate::cli::Cli;
use crate::error::{ConfigError, Result};

/// Organization used when neither `--org-id` nor `ILLUMIO_ORG_ID` is set.
pub const DEFAULT_ORG_ID: u32 = 1;

/// Default PCE HTTPS port.
pub const DEFAULT_PORT: u16 = 443;

/// Everything needed to talk to one PCE organization.
#[derive(Clone, PartialEq, Eq)]
pub struct PceSettings {
    /// PCE hostname, without scheme or port.
    pub host: String,
    /// PCE HTTPS port.
    pub port: u16,
    /// Organization ID.
    pub org_id: u32,
    /// Whether `org_id` fell back to [`DEFAULT_ORG_ID`].
    pub org_id_defaulted: bool,
    /// API key username.
    pub api_key: String,
    /// API key secret. Never logged.
    pub api_secret: String,
    /// Whether the PCE certificate is verified.
    pub verify_tls: bool,
}

// Hand-written so the secret never reaches logs.
impl std::fmt::Debug for PceSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PceSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("org_id", &self.org_id)
            .field("org_id_defaulted", &self.org_id_defaulted)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<REDACTED>")
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

impl PceSettings {
    /// Resolves settings from parsed command-line arguments.
    ///
    /// Credentials are checked in the order host, key, secret; an empty value
    /// counts as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] for the first credential that
    /// was not supplied.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let host = required(cli.pce_host.as_deref(), "--pce-host", "ILLUMIO_PCE_HOST")?;
        let api_key = required(cli.api_key.as_deref(), "--api-key", "ILLUMIO_API_KEY")?;
        let api_secret =
            required(cli.api_secret.as_deref(), "--api-secret", "ILLUMIO_API_SECRET")?;

        Ok(Self {
            host,
            port: cli.port,
            org_id: cli.org_id.unwrap_or(DEFAULT_ORG_ID),
            org_id_defaulted: cli.org_id.is_none(),
            api_key,
            api_secret,
            verify_tls: !cli.no_verify_ssl,
        })
    }

    /// Returns the REST API root for these settings.
    #[must_use]
    pub fn api_base_url(&self) -> String {
        format!("https://{}:{}/api/v2", self.host, self.port)
    }
}

/// Returns a trimmed, non-empty credential or the matching error.
fn required(value: Option<&str>, flag: &'static str, env: &'static str) -> Result<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .ok_or_else(|| ConfigError::MissingCredential { flag, env }.into())
}
