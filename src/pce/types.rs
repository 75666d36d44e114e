//! Illumio PCE API types and data structures.
//!
//! This module defines the types exchanged with the PCE REST API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::feed::RangeSet;

/// Description written on every IP list this tool creates or updates.
pub const IPLIST_DESCRIPTION: &str = "Zscaler IP ranges - Auto-updated";

/// A single entry of an IP list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpRange {
    /// Start address, or the whole CIDR block.
    #[serde(default)]
    pub from_ip: Option<String>,
    /// End address for address-range entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_ip: Option<String>,
    /// Whether the entry is excluded from the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusion: Option<bool>,
}

impl IpRange {
    /// Creates an entry holding a single CIDR block.
    #[must_use]
    pub fn cidr(range: impl Into<String>) -> Self {
        Self {
            from_ip: Some(range.into()),
            to_ip: None,
            exclusion: None,
        }
    }
}

/// An IP list as stored on the PCE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpList {
    /// Stable resource locator, e.g. `/orgs/1/sec_policy/draft/ip_lists/42`.
    pub href: String,
    /// IP list name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Entries; the PCE omits the field for an empty list.
    #[serde(default)]
    pub ip_ranges: Option<Vec<IpRange>>,
}

impl IpList {
    /// Returns the non-empty `from_ip` values of the list, in stored order.
    ///
    /// An absent entry collection yields an empty set.
    #[must_use]
    pub fn range_values(&self) -> RangeSet {
        self.ip_ranges
            .iter()
            .flatten()
            .filter_map(|r| r.from_ip.as_deref())
            .filter(|ip| !ip.is_empty())
            .collect()
    }
}

/// Body of an IP list create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpListSpec {
    /// IP list name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Full replacement set of entries.
    pub ip_ranges: Vec<IpRange>,
}

impl IpListSpec {
    /// Builds the desired IP list carrying every range of `ranges`.
    #[must_use]
    pub fn new(name: impl Into<String>, ranges: &RangeSet) -> Self {
        Self {
            name: name.into(),
            description: IPLIST_DESCRIPTION.to_string(),
            ip_ranges: ranges.iter().map(IpRange::cidr).collect(),
        }
    }

    /// Returns the `from_ip` values of the spec, in order.
    #[must_use]
    pub fn range_values(&self) -> Vec<&str> {
        self.ip_ranges
            .iter()
            .filter_map(|r| r.from_ip.as_deref())
            .collect()
    }
}

/// Reference to another PCE object by href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrefRef {
    /// Object href.
    pub href: String,
}

/// Objects selected for provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSubset {
    /// IP lists to provision.
    pub ip_lists: Vec<HrefRef>,
}

/// A request to provision pending draft changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionRequest {
    /// Human-readable reason recorded with the new policy version.
    pub update_description: String,
    /// Objects whose draft changes are activated.
    pub change_subset: ChangeSubset,
}

impl ProvisionRequest {
    /// Builds a request provisioning a single IP list.
    #[must_use]
    pub fn for_ip_list(href: &str) -> Self {
        Self {
            update_description: format!("Provision Zscaler IPList: {href}"),
            change_subset: ChangeSubset {
                ip_lists: vec![HrefRef {
                    href: href.to_string(),
                }],
            },
        }
    }

    /// Returns the hrefs selected by this request.
    #[must_use]
    pub fn hrefs(&self) -> Vec<&str> {
        self.change_subset
            .ip_lists
            .iter()
            .map(|r| r.href.as_str())
            .collect()
    }
}

/// The policy version produced by a provisioning request.
///
/// Both values are opaque to this tool and only reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Policy version.
    #[serde(default)]
    pub version: Value,
    /// Number of workloads affected by the change.
    #[serde(default)]
    pub workloads_affected: Value,
}

impl ChangeSet {
    /// Returns the policy version as display text.
    #[must_use]
    pub fn version_text(&self) -> String {
        opaque_text(&self.version)
    }

    /// Returns the affected workload count as display text.
    #[must_use]
    pub fn workloads_affected_text(&self) -> String {
        opaque_text(&self.workloads_affected)
    }
}

/// Renders an opaque JSON value without quoting strings.
fn opaque_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::from("unknown"),
        other => other.to_string(),
    }
}
