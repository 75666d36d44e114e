//! Diff computation between stored and fetched ranges.
//!
//! Whether anything changed is decided on sorted sequences with duplicates
//! kept. The added and removed sets are only computed for reporting.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::feed::RangeSet;

/// Maximum number of added or removed ranges listed in a summary.
pub const MAX_LISTED_RANGES: usize = 10;

/// Difference between the stored ranges and the fetched ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeDiff {
    /// Whether the sorted sequences differ.
    pub changed: bool,
    /// Ranges fetched but not stored.
    pub added: BTreeSet<String>,
    /// Ranges stored but no longer fetched.
    pub removed: BTreeSet<String>,
    /// Number of stored ranges.
    pub existing_count: usize,
    /// Number of fetched ranges.
    pub new_count: usize,
}

impl RangeDiff {
    /// Computes the diff from `existing` to `new`.
    #[must_use]
    pub fn between(existing: &RangeSet, new: &RangeSet) -> Self {
        let existing_sorted = existing.sorted();
        let new_sorted = new.sorted();
        let changed = existing_sorted != new_sorted;

        let (added, removed) = if changed {
            let existing_set: BTreeSet<&str> = existing_sorted.into_iter().collect();
            let new_set: BTreeSet<&str> = new_sorted.into_iter().collect();
            (
                new_set.difference(&existing_set).map(|s| (*s).to_string()).collect(),
                existing_set.difference(&new_set).map(|s| (*s).to_string()).collect(),
            )
        } else {
            (BTreeSet::new(), BTreeSet::new())
        };

        Self {
            changed,
            added,
            removed,
            existing_count: existing.len(),
            new_count: new.len(),
        }
    }

    /// Returns true if the stored ranges must be replaced.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.changed
    }

    /// Writes one side of the diff, listing at most [`MAX_LISTED_RANGES`] entries.
    fn write_side(
        f: &mut std::fmt::Formatter<'_>,
        label: &str,
        marker: char,
        ranges: &BTreeSet<String>,
    ) -> std::fmt::Result {
        if ranges.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        write!(f, "  {label}: {} IP range(s)", ranges.len())?;
        for range in ranges.iter().take(MAX_LISTED_RANGES) {
            write!(f, "\n    {marker} {range}")?;
        }
        if ranges.len() > MAX_LISTED_RANGES {
            write!(f, "\n    ... and {} more", ranges.len() - MAX_LISTED_RANGES)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for RangeDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.changed {
            return write!(f, "IP ranges are unchanged ({} IP ranges)", self.existing_count);
        }

        writeln!(f, "IP ranges have changed:")?;
        writeln!(f, "  Existing: {} IP ranges", self.existing_count)?;
        write!(f, "  New: {} IP ranges", self.new_count)?;
        Self::write_side(f, "Added", '+', &self.added)?;
        Self::write_side(f, "Removed", '-', &self.removed)
    }
}
