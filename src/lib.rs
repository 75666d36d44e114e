// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # IP List Sync
//!
//! Keeps an Illumio PCE IP list in step with the IP ranges Zscaler publishes.
//!
//! ## Overview
//!
//! One run of the tool:
//!
//! 1. Fetches the published Zscaler CIDR ranges
//! 2. Looks up the named IP list in the PCE draft policy
//! 3. Creates the list, or replaces its ranges when they differ
//! 4. Provisions the draft change when the list was written
//!
//! Running it again with an unchanged feed makes no writes and provisions
//! nothing.
//!
//! ## Modules
//!
//! - [`config`]: Settings resolution, `.env` loading and validation
//! - [`feed`]: Published range feed
//! - [`pce`]: PCE REST client and provisioning
//! - [`planner`]: Range diffs and action decisions
//! - [`reconciler`]: IP list reconciliation
//! - [`sync`]: End-to-end run and report
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```text
//! export ILLUMIO_PCE_HOST=pce.example.com
//! export ILLUMIO_API_KEY=api_1234
//! export ILLUMIO_API_SECRET=...
//! iplist-sync --iplist-name "Zscaler IPs"
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod pce;
pub mod planner;
pub mod reconciler;
pub mod sync;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, OutputFormat, OutputFormatter};
pub use config::{load_dotenv, PceSettings, SettingsValidator};
pub use error::{Result, SyncError};
pub use feed::{RangeSet, RangeSource, ZscalerFeed};
pub use pce::{PceClient, PolicyEngine, PolicyProvisioner, ProvisionStatus};
pub use planner::{RangeDiff, RangeFingerprint, SyncAction};
pub use reconciler::{ReconcileOutcome, Reconciler};
pub use sync::{SyncReport, Synchronizer};
