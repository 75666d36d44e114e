//! Policy engine trait definition.
//!
//! This module defines the operations the synchronizer needs from the policy
//! engine. [`super::PceClient`] binds them to the Illumio REST API.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::error::Result;

use super::types::{ChangeSet, IpList, IpListSpec, ProvisionRequest};

/// Trait for policy engine backends holding IP lists.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PolicyEngine: Send + Sync {
    /// Searches draft IP lists by name.
    ///
    /// The backend may match loosely; callers pick the exact match.
    async fn search_ip_lists(&self, name: &str) -> Result<Vec<IpList>>;

    /// Creates a draft IP list.
    async fn create_ip_list(&self, spec: &IpListSpec) -> Result<IpList>;

    /// Replaces a draft IP list.
    ///
    /// The returned value, if any, is not guaranteed to reflect the stored
    /// state; read the list back with [`PolicyEngine::get_ip_list`].
    async fn update_ip_list(&self, href: &str, spec: &IpListSpec) -> Result<Option<IpList>>;

    /// Reads an IP list by href.
    async fn get_ip_list(&self, href: &str) -> Result<IpList>;

    /// Provisions pending draft changes.
    async fn provision(&self, request: &ProvisionRequest) -> Result<ChangeSet>;
}
