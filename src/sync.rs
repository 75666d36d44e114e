//! End-to-end synchronization run.
//!
//! Fetch, reconcile, then provision if the list was written. The first two
//! steps are fatal on failure; provisioning is best effort.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::feed::RangeSource;
use crate::pce::{PolicyEngine, PolicyProvisioner, ProvisionStatus};
use crate::planner::{RangeFingerprint, SyncAction};
use crate::reconciler::Reconciler;

/// Drives one synchronization run.
pub struct Synchronizer<'a, S: RangeSource + ?Sized, E: PolicyEngine + ?Sized> {
    /// Range feed.
    source: &'a S,
    /// Policy engine.
    engine: &'a E,
}

/// Summary of a synchronization run.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// IP list name.
    pub iplist_name: String,
    /// IP list href after the run.
    pub href: String,
    /// What was done to the list.
    pub action: SyncAction,
    /// Number of fetched ranges.
    pub range_count: usize,
    /// Number of ranges added to the list.
    pub added: usize,
    /// Number of ranges removed from the list.
    pub removed: usize,
    /// SHA-256 of the sorted fetched ranges.
    pub fingerprint: String,
    /// Provisioning outcome.
    pub provisioning: ProvisionStatus,
    /// When the run finished.
    pub completed_at: DateTime<Utc>,
}

impl SyncReport {
    /// Returns true if the IP list was created or updated.
    #[must_use]
    pub const fn was_changed(&self) -> bool {
        self.action.is_write()
    }
}

impl<'a, S: RangeSource + ?Sized, E: PolicyEngine + ?Sized> Synchronizer<'a, S, E> {
    /// Creates a new synchronizer.
    #[must_use]
    pub const fn new(source: &'a S, engine: &'a E) -> Self {
        Self { source, engine }
    }

    /// Runs fetch, reconcile and, when the list changed, provisioning.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch or the reconciliation fails. A failed
    /// provisioning is recorded in the report instead.
    pub async fn run(&self, iplist_name: &str) -> Result<SyncReport> {
        let ranges = self.source.fetch().await?;
        let fingerprint = RangeFingerprint::new().of(&ranges);
        debug!("Range set fingerprint: {fingerprint}");

        let outcome = Reconciler::new(self.engine)
            .reconcile(iplist_name, &ranges)
            .await?;

        let provisioning = if outcome.was_changed() {
            PolicyProvisioner::new(self.engine)
                .provision(&outcome.ip_list.href)
                .await
        } else {
            ProvisionStatus::NotRequired
        };

        Ok(SyncReport {
            iplist_name: iplist_name.to_string(),
            href: outcome.ip_list.href,
            action: outcome.action,
            range_count: ranges.len(),
            added: outcome.diff.added.len(),
            removed: outcome.diff.removed.len(),
            fingerprint,
            provisioning,
            completed_at: Utc::now(),
        })
    }
}
