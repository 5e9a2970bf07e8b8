//! Optimistic interchain security.
//!
//! This crate contains the optimistic verification gate: a security module
//! that delegates message verification to a pluggable submodule immediately,
//! while a committee of watchers has a fraud window to flag that submodule
//! as compromised. Once flagged, the owner rotates the gate to a new
//! submodule.
//!
//! A message passes through the gate in two steps: [`OptimisticIsm::pre_verify`]
//! checks the message against the active submodule and records a proposal,
//! and [`OptimisticIsm::verify`] renders the final decision once the fraud
//! window has elapsed.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]
#![forbid(unsafe_code)]

/// Gate settings
pub mod config;

/// Error types for the optimistic gate
pub mod error;

/// The optimistic verification gate
pub mod gate;

/// Capability seams consumed by the gate
pub mod traits;

/// Shared types
pub mod types;

/// Utilities to match on-chain hashing
pub mod utils;

/// Testing utilities
pub mod test_utils;

pub use config::OptimisticIsmConfig;
pub use error::{IsmResult, OptimisticIsmError};
pub use gate::OptimisticIsm;
pub use traits::{Clock, InterchainSecurityModule, SystemClock};
pub use types::{ModuleType, Verification};

pub use primitive_types::H256;
