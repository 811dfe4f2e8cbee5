//! # DA Signers
//!
//! Data-availability signer registry and stake-weighted quorum formation.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Maintain the set of DA signers and, once per epoch, partition them into
//! quorums weighted by bonded stake:
//! - Signers register an account, a socket and BN254 G1/G2 public keys
//! - Stake is converted to votes (`floor(bonded / TokensPerVote)`, capped)
//! - Votes become seats across at most `MaxQuorums` quorums via rendezvous
//!   hashing, deterministically on every replica
//! - Params change only through the governance authority
//!
//! ## Determinism Guarantees
//!
//! | Concern | Guarantee |
//! |---------|-----------|
//! | Vote allocation | integer arithmetic only |
//! | Seat assignment | keccak256 over `(epoch, account, quorum_id)` |
//! | Member order | lexicographic within each quorum |
//! | Storage | ordered keys, canonical bincode values |
//!
//! ## Module Structure
//!
//! ```text
//! da-signers/
//! ├── domain/          # Signer, Params, Quorum, GenesisState, errors, invariants
//! ├── algorithms/      # Vote allocation, quorum formation
//! ├── ports/           # Messages, queries, lifecycle + stake/governance/KV traits
//! ├── adapters/        # In-memory and cache stores, codec, governance
//! ├── store/           # Typed accessors over the key-value layout
//! └── service/         # Block-synchronous state machine
//! ```

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;
pub mod store;
pub mod telemetry;

// Re-exports
pub use adapters::{CacheStore, InMemoryKVStore, StaticGovernanceAuthority, WriteSet};
pub use algorithms::{
    allocate_votes, form_quorums, keccak256, quorum_count, rendezvous_rank, votes_for_stake,
    VoteMap,
};
pub use config::{DaSignersConfig, DEFAULT_GOVERNANCE_AUTHORITY};
pub use domain::{
    DaSignersError, DaSignersResult, Epoch, GenesisState, Hash, KVStoreError, Params, Quorum,
    QuorumId, QuorumsSnapshot, Signer, ValidationError, PUBKEY_G1_LEN, PUBKEY_G2_LEN,
};
pub use ports::{
    BatchOperation, DaSignersMsgServer, DaSignersQuery, GovernanceAuthority, KeyValueStore,
    MockStakeLedger, ModuleLifecycle, Msg, MsgChangeParams, MsgRegisterSigner, MsgUpdateSocket,
    StakeLedger,
};
pub use service::{CommittedView, DaSignersDependencies, DaSignersService};
pub use telemetry::{init_tracing, TelemetryError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
