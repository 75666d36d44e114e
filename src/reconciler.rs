//! Reconciler for a single IP list.
//!
//! This module compares the fetched ranges with the IP list stored on the
//! policy engine and creates or replaces the list when they differ. After an
//! update the list is read back by href, and that read is what the caller
//! gets: the update response is not trusted to reflect the stored state.

use tracing::{debug, info};

use crate::error::Result;
use crate::feed::RangeSet;
use crate::pce::{IpList, IpListSpec, PolicyEngine};
use crate::planner::{RangeDiff, SyncAction};

/// Reconciler for one named IP list.
pub struct Reconciler<'a, E: PolicyEngine + ?Sized> {
    /// Policy engine.
    engine: &'a E,
}

/// Result of a reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// The IP list as stored after reconciliation.
    pub ip_list: IpList,
    /// What was done to the list.
    pub action: SyncAction,
    /// Diff between the previously stored ranges and the fetched ones.
    ///
    /// On the create path the previous ranges are taken as empty.
    pub diff: RangeDiff,
}

impl ReconcileOutcome {
    /// Returns true if the list was created or updated.
    #[must_use]
    pub const fn was_changed(&self) -> bool {
        self.action.is_write()
    }
}

impl<'a, E: PolicyEngine + ?Sized> Reconciler<'a, E> {
    /// Creates a new reconciler.
    #[must_use]
    pub const fn new(engine: &'a E) -> Self {
        Self { engine }
    }

    /// Makes the IP list called `name` hold exactly `ranges`.
    ///
    /// # Errors
    ///
    /// Returns an error if the search, create, update or read-back fails.
    pub async fn reconcile(&self, name: &str, ranges: &RangeSet) -> Result<ReconcileOutcome> {
        info!("Searching for existing IPList: {name}...");

        let existing = self.find_existing(name).await?;

        match existing {
            None => self.create(name, ranges).await,
            Some(list) => self.update_if_changed(name, list, ranges).await,
        }
    }

    /// Looks up the list by exact name; the first match wins.
    async fn find_existing(&self, name: &str) -> Result<Option<IpList>> {
        let candidates = self.engine.search_ip_lists(name).await?;
        debug!("Search returned {} candidate(s)", candidates.len());

        Ok(candidates.into_iter().find(|list| list.name == name))
    }

    /// Create path.
    async fn create(&self, name: &str, ranges: &RangeSet) -> Result<ReconcileOutcome> {
        info!("IPList not found. Creating new IPList: {name}...");

        let spec = IpListSpec::new(name, ranges);
        let created = self.engine.create_ip_list(&spec).await?;

        info!("Successfully created IPList: {name}");
        info!("IPList href: {}", created.href);

        Ok(ReconcileOutcome {
            ip_list: created,
            action: SyncAction::Create,
            diff: RangeDiff::between(&RangeSet::default(), ranges),
        })
    }

    /// Update-decision path.
    async fn update_if_changed(
        &self,
        name: &str,
        existing: IpList,
        ranges: &RangeSet,
    ) -> Result<ReconcileOutcome> {
        info!("Found existing IPList (href: {})", existing.href);

        let diff = RangeDiff::between(&existing.range_values(), ranges);
        for line in diff.to_string().lines() {
            info!("{line}");
        }

        let action = SyncAction::decide(Some(&existing), &diff);
        if action == SyncAction::NoChange {
            info!("IPList '{name}' is already up to date. No update needed.");
            return Ok(ReconcileOutcome {
                ip_list: existing,
                action,
                diff,
            });
        }

        info!("Updating IPList with {} IP ranges...", ranges.len());

        let spec = IpListSpec::new(name, ranges);
        if let Some(acknowledged) = self.engine.update_ip_list(&existing.href, &spec).await? {
            debug!("Update acknowledged for {}, re-reading", acknowledged.href);
        }

        let updated = self.engine.get_ip_list(&existing.href).await?;

        info!("Successfully updated IPList: {name}");
        info!("IPList href: {}", updated.href);

        Ok(ReconcileOutcome {
            ip_list: updated,
            action,
            diff,
        })
    }
}
