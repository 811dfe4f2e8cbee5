//! # Outbound Ports
//!
//! Collaborators the host injects: the staking ledger, the governance
//! authority and the key-value store backing module state.

use crate::domain::KVStoreError;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Read-only view into the staking subsystem.
///
/// Reads come from the same chain-state snapshot as the rest of the block,
/// so implementations must be deterministic and must not block.
pub trait StakeLedger: Send + Sync {
    /// Bonded token amount delegated by `account`.
    fn bonded_amount(&self, account: &str) -> Result<u128, String>;
}

/// Source of the on-chain governance identity.
pub trait GovernanceAuthority: Send + Sync {
    /// Account allowed to change module parameters.
    fn authority(&self) -> String;
}

/// Key/value pairs returned by a prefix scan, sorted by key.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for key-value database operations.
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Delete a key.
    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError>;

    /// Apply every operation or none of them.
    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// All pairs whose key starts with `prefix`, in ascending key order.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put {
        /// Key to write.
        key: Vec<u8>,
        /// Value stored under `key`.
        value: Vec<u8>,
    },
    /// Delete a key.
    Delete {
        /// Key to remove.
        key: Vec<u8>,
    },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// In-memory stake ledger keyed by account.
#[derive(Default)]
pub struct MockStakeLedger {
    bonded: RwLock<BTreeMap<String, u128>>,
    failing: RwLock<Vec<String>>,
}

impl MockStakeLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bonded amount for an account.
    pub fn set_bonded(&self, account: &str, amount: u128) {
        self.bonded.write().insert(account.to_string(), amount);
    }

    /// Make lookups for `account` fail.
    pub fn fail_for(&self, account: &str) {
        self.failing.write().push(account.to_string());
    }
}

impl StakeLedger for MockStakeLedger {
    fn bonded_amount(&self, account: &str) -> Result<u128, String> {
        if self.failing.read().iter().any(|a| a == account) {
            return Err(format!("ledger unavailable for {}", account));
        }
        Ok(self.bonded.read().get(account).copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_ledger_unknown_account_is_zero() {
        let ledger = MockStakeLedger::new();
        assert_eq!(ledger.bonded_amount("unknown").unwrap(), 0);
    }

    #[test]
    fn test_mock_ledger_failure() {
        let ledger = MockStakeLedger::new();
        ledger.set_bonded("a", 100);
        ledger.fail_for("a");
        assert!(ledger.bonded_amount("a").is_err());
    }

    #[test]
    fn test_batch_operation_constructors() {
        assert_eq!(
            BatchOperation::put(b"k".to_vec(), b"v".to_vec()),
            BatchOperation::Put {
                key: b"k".to_vec(),
                value: b"v".to_vec()
            }
        );
        assert_eq!(
            BatchOperation::delete(b"k".to_vec()),
            BatchOperation::Delete { key: b"k".to_vec() }
        );
    }
}
