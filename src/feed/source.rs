//! Range source trait definition.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::range_set::RangeSet;
use crate::error::Result;

/// Trait for anything that can produce the current published range list.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RangeSource: Send + Sync {
    /// Fetches the current range list.
    ///
    /// A successful fetch always yields a complete list, possibly empty.
    async fn fetch(&self) -> Result<RangeSet>;
}
