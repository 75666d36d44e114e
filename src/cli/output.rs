//! Output formatting for CLI commands.
//!
//! This module renders a [`SyncReport`] either as a human-readable summary
//! or as JSON for scripting.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::pce::ProvisionStatus;
use crate::planner::SyncAction;
use crate::sync::SyncReport;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Report field row for table display.
#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Returns the configured format.
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Formats a synchronization report for display.
    #[must_use]
    pub fn format_report(&self, report: &SyncReport) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
            OutputFormat::Text => Self::format_report_text(report),
        }
    }

    /// Formats a report as text.
    fn format_report_text(report: &SyncReport) -> String {
        let mut output = String::new();

        let rows = vec![
            ReportRow {
                field: "IP list",
                value: report.iplist_name.clone(),
            },
            ReportRow {
                field: "Href",
                value: report.href.clone(),
            },
            ReportRow {
                field: "Action",
                value: report.action.to_string(),
            },
            ReportRow {
                field: "Ranges",
                value: report.range_count.to_string(),
            },
            ReportRow {
                field: "Added / removed",
                value: format!("+{} / -{}", report.added, report.removed),
            },
            ReportRow {
                field: "Fingerprint",
                value: Self::truncate(&report.fingerprint, 12),
            },
            ReportRow {
                field: "Provisioning",
                value: report.provisioning.to_string(),
            },
            ReportRow {
                field: "Completed",
                value: report.completed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            },
        ];

        let _ = writeln!(output, "\nSync summary");
        output.push_str(&Table::new(rows).to_string());
        output.push('\n');

        let action = match report.action {
            SyncAction::Create => report.action.to_string().green(),
            SyncAction::Update => report.action.to_string().yellow(),
            SyncAction::NoChange => report.action.to_string().dimmed(),
        };
        let _ = writeln!(output, "\nIP list {action}: {}", report.iplist_name);

        if let ProvisionStatus::Failed { message } = &report.provisioning {
            let _ = writeln!(
                output,
                "{} Provisioning failed, the IP list change is still in draft: {message}",
                "⚠".yellow()
            );
        }

        if report.was_changed() {
            let _ = writeln!(output, "\n{} Sync completed successfully!", "✓".green());
        } else {
            let _ = writeln!(
                output,
                "\n{} Sync completed successfully! (no changes to provision)",
                "✓".green()
            );
        }

        output
    }

    /// Truncates a string to a maximum length.
    fn truncate(s: &str, max_len: usize) -> String {
        if s.len() <= max_len {
            s.to_string()
        } else {
            format!("{}...", &s[..max_len])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn report(action: SyncAction, provisioning: ProvisionStatus) -> SyncReport {
        SyncReport {
            iplist_name: String::from("Zscaler IPs"),
            href: String::from("/orgs/1/sec_policy/draft/ip_lists/42"),
            action,
            range_count: 2,
            added: 1,
            removed: 1,
            fingerprint: String::from(
                "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            ),
            provisioning,
            completed_at: Utc
                .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn test_text_report_for_update() {
        colored::control::set_override(false);
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let text = formatter.format_report(&report(
            SyncAction::Update,
            ProvisionStatus::Provisioned {
                version: String::from("8"),
                workloads_affected: String::from("0"),
            },
        ));

        assert!(text.contains("IP list updated: Zscaler IPs"));
        assert!(text.contains("+1 / -1"));
        assert!(text.contains("e3b0c44298fc..."));
        assert!(text.contains("version 8, 0 workload(s) affected"));
        assert!(text.contains("2024-05-01 12:00:00 UTC"));
        assert!(text.trim_end().ends_with("Sync completed successfully!"));
    }

    #[test]
    fn test_text_report_for_no_change() {
        colored::control::set_override(false);
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let text = formatter.format_report(&report(
            SyncAction::NoChange,
            ProvisionStatus::NotRequired,
        ));

        assert!(text.contains("(no changes to provision)"));
        assert!(text.contains("not required"));
    }

    #[test]
    fn test_text_report_mentions_provisioning_failure() {
        colored::control::set_override(false);
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let text = formatter.format_report(&report(
            SyncAction::Create,
            ProvisionStatus::Failed {
                message: String::from("HTTP 409"),
            },
        ));

        assert!(text.contains("Provisioning failed"));
        assert!(text.trim_end().ends_with("Sync completed successfully!"));
    }

    #[test]
    fn test_json_report() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let json = formatter.format_report(&report(
            SyncAction::Update,
            ProvisionStatus::Provisioned {
                version: String::from("8"),
                workloads_affected: String::from("0"),
            },
        ));

        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["action"], "update");
        assert_eq!(value["range_count"], 2);
        assert_eq!(value["provisioning"]["status"], "provisioned");
        assert_eq!(value["provisioning"]["version"], "8");
        assert_eq!(formatter.format(), OutputFormat::Json);
    }
}
