//! Policy provisioner.
//!
//! Provisioning activates a draft change on the PCE. It runs after the IP list
//! write has already succeeded, so its failure is reported but never turned
//! into an error for the caller.

use serde::Serialize;
use tracing::{error, info};

use super::engine::PolicyEngine;
use super::types::{ChangeSet, ProvisionRequest};

/// Outcome of the provisioning step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProvisionStatus {
    /// The IP list was not modified, so nothing was provisioned.
    NotRequired,
    /// A new policy version was created.
    Provisioned {
        /// Policy version, as reported by the PCE.
        version: String,
        /// Workloads affected, as reported by the PCE.
        workloads_affected: String,
    },
    /// The provisioning request failed.
    Failed {
        /// Error reported by the PCE client.
        message: String,
    },
}

impl ProvisionStatus {
    /// Returns true if provisioning was attempted and failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl From<&ChangeSet> for ProvisionStatus {
    fn from(change_set: &ChangeSet) -> Self {
        Self::Provisioned {
            version: change_set.version_text(),
            workloads_affected: change_set.workloads_affected_text(),
        }
    }
}

impl std::fmt::Display for ProvisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRequired => write!(f, "not required"),
            Self::Provisioned {
                version,
                workloads_affected,
            } => write!(f, "version {version}, {workloads_affected} workload(s) affected"),
            Self::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}

/// Provisioner for pending IP list changes.
#[derive(Debug)]
pub struct PolicyProvisioner<'a, E: PolicyEngine + ?Sized> {
    /// Policy engine.
    engine: &'a E,
}

impl<'a, E: PolicyEngine + ?Sized> PolicyProvisioner<'a, E> {
    /// Creates a new provisioner.
    #[must_use]
    pub const fn new(engine: &'a E) -> Self {
        Self { engine }
    }

    /// Provisions the draft changes of one IP list.
    ///
    /// Failures are logged at error level and returned as
    /// [`ProvisionStatus::Failed`].
    pub async fn provision(&self, href: &str) -> ProvisionStatus {
        info!("Provisioning policy changes for IPList: {href}...");

        let request = ProvisionRequest::for_ip_list(href);

        match self.engine.provision(&request).await {
            Ok(change_set) => {
                info!("Successfully provisioned policy changes");
                info!("Policy version: {}", change_set.version_text());
                info!("Workloads affected: {}", change_set.workloads_affected_text());
                ProvisionStatus::from(&change_set)
            }
            Err(e) => {
                error!("Error provisioning policy changes: {e}");
                ProvisionStatus::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}
