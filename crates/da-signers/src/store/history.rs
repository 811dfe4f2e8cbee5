//! Quorum history: append-only, epoch-indexed committee snapshots.

use super::{keys, read, registry, write};
use crate::adapters::codec;
use crate::domain::{
    invariant_monotonic_epoch, invariant_non_empty_committee, DaSignersError, DaSignersResult,
    Epoch, Quorum, QuorumId, QuorumsSnapshot,
};
use crate::ports::KeyValueStore;

/// Append `snapshot`. Its epoch must follow the latest one and it must not
/// be empty while signers are registered.
pub fn append<S: KeyValueStore + ?Sized>(
    store: &mut S,
    snapshot: &QuorumsSnapshot,
) -> DaSignersResult<()> {
    invariant_monotonic_epoch(latest_epoch(store)?, snapshot.epoch)?;
    invariant_non_empty_committee(snapshot, registry::has_signers(store)?)?;
    write(store, &keys::history(snapshot.epoch), snapshot)?;
    write(store, keys::HISTORY_HEAD, &snapshot.epoch)
}

/// Write validated genesis history. Only epoch ordering is re-checked: older
/// snapshots may legitimately predate the first registered signer.
pub fn restore<S: KeyValueStore + ?Sized>(
    store: &mut S,
    snapshots: &[QuorumsSnapshot],
) -> DaSignersResult<()> {
    let mut latest = latest_epoch(store)?;
    for snapshot in snapshots {
        invariant_monotonic_epoch(latest, snapshot.epoch)?;
        write(store, &keys::history(snapshot.epoch), snapshot)?;
        latest = Some(snapshot.epoch);
    }
    match latest {
        Some(epoch) => write(store, keys::HISTORY_HEAD, &epoch),
        None => Ok(()),
    }
}

/// Snapshot recorded for `epoch`.
pub fn get_by_epoch<S: KeyValueStore + ?Sized>(
    store: &S,
    epoch: Epoch,
) -> DaSignersResult<QuorumsSnapshot> {
    read(store, &keys::history(epoch))?
        .ok_or_else(|| DaSignersError::NotFound(format!("quorums for epoch {}", epoch)))
}

/// Epoch of the most recent snapshot, if any.
pub fn latest_epoch<S: KeyValueStore + ?Sized>(store: &S) -> DaSignersResult<Option<Epoch>> {
    read(store, keys::HISTORY_HEAD)
}

/// Most recent snapshot. History always holds the genesis entry, so absence
/// is corrupted state.
pub fn latest<S: KeyValueStore + ?Sized>(store: &S) -> DaSignersResult<QuorumsSnapshot> {
    let epoch = latest_epoch(store)?.ok_or_else(|| {
        DaSignersError::InvariantViolation("quorum history is empty".to_string())
    })?;
    get_by_epoch(store, epoch)
}

/// One quorum of `epoch`.
pub fn get_quorum<S: KeyValueStore + ?Sized>(
    store: &S,
    epoch: Epoch,
    quorum_id: QuorumId,
) -> DaSignersResult<Quorum> {
    get_by_epoch(store, epoch)?
        .get(quorum_id)
        .cloned()
        .ok_or_else(|| {
            DaSignersError::NotFound(format!("quorum {} at epoch {}", quorum_id, epoch))
        })
}

/// Account seated at `row` of a quorum.
pub fn get_quorum_row<S: KeyValueStore + ?Sized>(
    store: &S,
    epoch: Epoch,
    quorum_id: QuorumId,
    row: u64,
) -> DaSignersResult<String> {
    let quorum = get_quorum(store, epoch, quorum_id)?;
    usize::try_from(row)
        .ok()
        .and_then(|idx| quorum.signers.get(idx))
        .cloned()
        .ok_or_else(|| {
            DaSignersError::NotFound(format!(
                "row {} of quorum {} at epoch {} (size {})",
                row,
                quorum_id,
                epoch,
                quorum.len()
            ))
        })
}

/// Every snapshot in epoch order.
pub fn all<S: KeyValueStore + ?Sized>(store: &S) -> DaSignersResult<Vec<QuorumsSnapshot>> {
    store
        .prefix_scan(keys::HISTORY_PREFIX)?
        .into_iter()
        .map(|(_, value)| codec::decode(&value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKVStore;
    use crate::domain::{KVStoreError, Quorum, Signer, PUBKEY_G1_LEN, PUBKEY_G2_LEN};
    use crate::ports::{BatchOperation, ScanResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store that counts prefix scans.
    #[derive(Default)]
    struct ScanCountingStore {
        inner: InMemoryKVStore,
        scans: AtomicUsize,
    }

    impl KeyValueStore for ScanCountingStore {
        fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
            self.inner.get(key)
        }

        fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
            self.inner.put(key, value)
        }

        fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
            self.inner.delete(key)
        }

        fn atomic_batch_write(&mut self, ops: Vec<BatchOperation>) -> Result<(), KVStoreError> {
            self.inner.atomic_batch_write(ops)
        }

        fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
            self.scans.fetch_add(1, Ordering::SeqCst);
            self.inner.prefix_scan(prefix)
        }
    }

    fn account() -> String {
        format!("{:040x}", 1)
    }

    fn snapshot(epoch: Epoch) -> QuorumsSnapshot {
        QuorumsSnapshot::new(epoch, vec![Quorum::new(vec![account()])])
    }

    fn store_with_signer() -> InMemoryKVStore {
        let mut store = InMemoryKVStore::new();
        let signer = Signer::new(account(), "", vec![0; PUBKEY_G1_LEN], vec![0; PUBKEY_G2_LEN]);
        registry::upsert_signer(&mut store, &signer).unwrap();
        store
    }

    #[test]
    fn test_append_and_read() {
        let mut store = store_with_signer();
        append(&mut store, &snapshot(0)).unwrap();
        append(&mut store, &snapshot(1)).unwrap();

        assert_eq!(latest(&store).unwrap().epoch, 1);
        assert_eq!(get_by_epoch(&store, 0).unwrap(), snapshot(0));
        assert_eq!(all(&store).unwrap().len(), 2);
    }

    #[test]
    fn test_non_monotonic_append_rejected() {
        let mut store = store_with_signer();
        append(&mut store, &snapshot(0)).unwrap();

        let err = append(&mut store, &snapshot(0)).unwrap_err();
        assert!(matches!(err, DaSignersError::InvariantViolation(_)));
        assert!(append(&mut store, &snapshot(2)).is_err());
    }

    #[test]
    fn test_empty_snapshot_with_signers_rejected() {
        let mut store = store_with_signer();
        assert!(append(&mut store, &QuorumsSnapshot::empty(0)).is_err());
    }

    #[test]
    fn test_empty_snapshot_without_signers_allowed() {
        let mut store = InMemoryKVStore::new();
        append(&mut store, &QuorumsSnapshot::empty(0)).unwrap();
        assert!(latest(&store).unwrap().is_empty());
    }

    #[test]
    fn test_restore_keeps_early_empty_snapshot() {
        let mut store = store_with_signer();
        restore(&mut store, &[QuorumsSnapshot::empty(0), snapshot(1)]).unwrap();
        assert_eq!(latest_epoch(&store).unwrap(), Some(1));
        assert!(get_by_epoch(&store, 0).unwrap().is_empty());
    }

    #[test]
    fn test_append_and_restore_do_not_scan_history() {
        let mut store = ScanCountingStore::default();
        let history: Vec<_> = (0..64).map(QuorumsSnapshot::empty).collect();
        restore(&mut store, &history).unwrap();
        append(&mut store, &QuorumsSnapshot::empty(64)).unwrap();

        assert_eq!(store.scans.load(Ordering::SeqCst), 0);
        assert_eq!(latest_epoch(&store).unwrap(), Some(64));
        assert_eq!(latest(&store).unwrap().epoch, 64);
    }

    #[test]
    fn test_restore_onto_existing_history_must_continue_it() {
        let mut store = InMemoryKVStore::new();
        restore(&mut store, &[QuorumsSnapshot::empty(0)]).unwrap();
        assert!(restore(&mut store, &[QuorumsSnapshot::empty(0)]).is_err());
        restore(&mut store, &[QuorumsSnapshot::empty(1)]).unwrap();
        assert_eq!(latest_epoch(&store).unwrap(), Some(1));
    }

    #[test]
    fn test_quorum_row_lookup() {
        let mut store = store_with_signer();
        append(&mut store, &snapshot(0)).unwrap();

        assert_eq!(get_quorum_row(&store, 0, 0, 0).unwrap(), account());
        assert!(matches!(get_quorum_row(&store, 0, 0, 1), Err(DaSignersError::NotFound(_))));
        assert!(matches!(get_quorum(&store, 0, 1), Err(DaSignersError::NotFound(_))));
    }

    #[test]
    fn test_missing_epoch_not_found() {
        let store = InMemoryKVStore::new();
        assert!(matches!(get_by_epoch(&store, 3), Err(DaSignersError::NotFound(_))));
        assert!(latest(&store).unwrap_err().is_fatal());
    }
}
