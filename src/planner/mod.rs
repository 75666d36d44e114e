//! Planning module for IP list synchronization.
//!
//! This module provides diff computation between stored and fetched ranges
//! and the decision of what to do with the stored list.

mod diff;
mod fingerprint;
mod plan;

pub use diff::{RangeDiff, MAX_LISTED_RANGES};
pub use fingerprint::RangeFingerprint;
pub use plan::SyncAction;
