//! Range set fingerprinting.
//!
//! A fingerprint identifies the content of a range set independently of its
//! order, so two runs can be compared from their reports alone.

use sha2::{Digest, Sha256};

use crate::feed::RangeSet;

/// Computes order-independent fingerprints of range sets.
#[derive(Debug, Default, Clone, Copy)]
pub struct RangeFingerprint;

impl RangeFingerprint {
    /// Creates a new fingerprinter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the hex SHA-256 of the sorted ranges, one per line.
    #[must_use]
    pub fn of(&self, ranges: &RangeSet) -> String {
        let mut hasher = Sha256::new();
        for range in ranges.sorted() {
            hasher.update(range.as_bytes());
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize())
    }

    /// Returns the first eight hex digits of [`Self::of`].
    #[must_use]
    pub fn short(&self, ranges: &RangeSet) -> String {
        let full = self.of(ranges);
        full[..8].to_string()
    }
}
