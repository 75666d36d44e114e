//! Illumio PCE integration module.
//!
//! This module provides everything needed to read, write and provision IP
//! lists on an Illumio Policy Compute Engine.

mod client;
mod engine;
mod provisioner;
mod types;

pub use client::PceClient;
pub use engine::PolicyEngine;
pub use provisioner::{PolicyProvisioner, ProvisionStatus};
pub use types::{
    ChangeSet, ChangeSubset, HrefRef, IpList, IpListSpec, IpRange, ProvisionRequest,
    IPLIST_DESCRIPTION,
};

#[cfg(test)]
pub use engine::MockPolicyEngine;
