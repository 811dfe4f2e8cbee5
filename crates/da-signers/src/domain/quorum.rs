//! # Quorum Value Objects
//!
//! Committee snapshots recorded once per epoch.

use serde::{Deserialize, Serialize};

/// Quorum identifier within a snapshot.
pub type QuorumId = u64;

/// Epoch index.
pub type Epoch = u64;

/// A set of signer accounts jointly responsible for a DA sampling task.
///
/// Members are kept in the order they were formed (or imported) so the
/// encoding is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quorum {
    /// Member accounts.
    pub signers: Vec<String>,
}

impl Quorum {
    /// Create a quorum.
    pub fn new(signers: Vec<String>) -> Self {
        Self { signers }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.signers.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    /// Check membership.
    pub fn contains(&self, account: &str) -> bool {
        self.signers.iter().any(|s| s == account)
    }
}

/// All quorums active as of an epoch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumsSnapshot {
    /// Epoch the snapshot belongs to.
    pub epoch: Epoch,
    /// Active quorums.
    pub quorums: Vec<Quorum>,
}

impl QuorumsSnapshot {
    /// Create a snapshot.
    pub fn new(epoch: Epoch, quorums: Vec<Quorum>) -> Self {
        Self { epoch, quorums }
    }

    /// Snapshot with no quorums.
    pub fn empty(epoch: Epoch) -> Self {
        Self::new(epoch, Vec::new())
    }

    /// True when no quorum has a member.
    pub fn is_empty(&self) -> bool {
        self.quorums.iter().all(Quorum::is_empty)
    }

    /// Number of quorums.
    pub fn quorum_count(&self) -> usize {
        self.quorums.len()
    }

    /// Quorum by id.
    pub fn get(&self, quorum_id: QuorumId) -> Option<&Quorum> {
        usize::try_from(quorum_id)
            .ok()
            .and_then(|idx| self.quorums.get(idx))
    }

    /// Number of seats `account` holds across all quorums.
    pub fn seats_of(&self, account: &str) -> usize {
        self.quorums.iter().filter(|q| q.contains(account)).count()
    }
}
