//! Published IP range feed.
//!
//! This module fetches the list of CIDR ranges a cloud-security provider
//! publishes and hands it to the reconciler as a [`RangeSet`].

mod range_set;
mod source;
mod zscaler;

pub use range_set::RangeSet;
pub use source::RangeSource;
pub use zscaler::{ZscalerFeed, ZSCALER_FEED_URL};

#[cfg(test)]
pub use source::MockRangeSource;
