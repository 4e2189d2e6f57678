//! Reconciliation Engine
//!
//! Drives periodic convergence between the host's discovered public IP
//! address and the address published at the DNS provider, for any number of
//! independently scheduled records.
//!
//! The engine is provider-agnostic: it only talks to the two capability
//! seams defined in [`traits`], so new discovery backends and DNS providers
//! plug in without touching the loop.

pub mod errors;
pub mod impls;
pub mod traits;
pub mod types;

pub use errors::SyncError;
pub use traits::{BoxError, DomainSyncer, PublicDiscover};
pub use types::{AddressPair, SyncEngine, SyncOutcome, Task};
