//! # Domain Module
//!
//! Core domain types for the DA signers subsystem.

pub mod errors;
pub mod genesis;
pub mod invariants;
pub mod params;
pub mod quorum;
pub mod signer;

pub use errors::*;
pub use genesis::*;
pub use invariants::*;
pub use params::*;
pub use quorum::*;
pub use signer::*;
