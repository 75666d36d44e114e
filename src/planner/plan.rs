//! Synchronization actions.

use serde::Serialize;

use crate::pce::IpList;

use super::diff::RangeDiff;

/// What a reconciliation does to the stored IP list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    /// No list with the name exists; create one.
    Create,
    /// The list exists with different ranges; replace them.
    Update,
    /// The list already holds the fetched ranges.
    NoChange,
}

impl SyncAction {
    /// Decides the action from the lookup result and, when a list was found,
    /// the diff against it.
    #[must_use]
    pub const fn decide(existing: Option<&IpList>, diff: &RangeDiff) -> Self {
        match existing {
            None => Self::Create,
            Some(_) if diff.has_changes() => Self::Update,
            Some(_) => Self::NoChange,
        }
    }

    /// Returns true if the action writes to the policy engine.
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::NoChange => "unchanged",
        };
        write!(f, "{s}")
    }
}
