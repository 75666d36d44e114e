//! CLI argument definitions.
//!
//! Every PCE setting can be given as a flag or through its `ILLUMIO_*`
//! environment variable; the flag wins.

use clap::Parser;

use crate::config::DEFAULT_PORT;

/// Sync Zscaler IP ranges to an Illumio PCE IP list.
#[derive(Parser, Debug)]
#[command(name = "iplist-sync")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
Environment variables:
  ILLUMIO_PCE_HOST    PCE hostname
  ILLUMIO_PORT        PCE port (default: 443)
  ILLUMIO_ORG_ID      Organization ID (default: 1)
  ILLUMIO_API_KEY     API key username
  ILLUMIO_API_SECRET  API key secret

Variables are also read from a .env file in the working directory.")]
pub struct Cli {
    /// PCE hostname.
    #[arg(long, env = "ILLUMIO_PCE_HOST")]
    pub pce_host: Option<String>,

    /// PCE port.
    #[arg(long, env = "ILLUMIO_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Organization ID.
    #[arg(long, env = "ILLUMIO_ORG_ID")]
    pub org_id: Option<u32>,

    /// API key username.
    #[arg(long, env = "ILLUMIO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API key secret.
    #[arg(long, env = "ILLUMIO_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    /// Name of the IP list to create or update.
    #[arg(long)]
    pub iplist_name: String,

    /// Disable TLS certificate verification.
    #[arg(long)]
    pub no_verify_ssl: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_iplist_name_is_required() {
        let err = Cli::try_parse_from(["iplist-sync", "--pce-host", "pce.example.com"])
            .expect_err("missing --iplist-name");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_flags_are_parsed() {
        let cli = Cli::try_parse_from([
            "iplist-sync",
            "--iplist-name",
            "Zscaler IPs",
            "--pce-host",
            "pce.example.com",
            "--port",
            "8443",
            "--org-id",
            "7",
            "--no-verify-ssl",
            "--output",
            "json",
            "-v",
        ])
        .expect("valid arguments");

        assert_eq!(cli.iplist_name, "Zscaler IPs");
        assert_eq!(cli.pce_host.as_deref(), Some("pce.example.com"));
        assert_eq!(cli.port, 8443);
        assert_eq!(cli.org_id, Some(7));
        assert!(cli.no_verify_ssl);
        assert!(cli.verbose);
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Cli::try_parse_from([
            "iplist-sync",
            "--iplist-name",
            "x",
            "--port",
            "70000",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_help_lists_environment_variables() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("ILLUMIO_API_SECRET"));
        assert!(help.contains(".env"));
    }
}
