//! Write-buffering store layered over a parent.
//!
//! Gives per-message and per-block all-or-nothing semantics: writes stay in
//! the buffer until the caller hands them to the parent as one batch.

use crate::domain::KVStoreError;
use crate::ports::{BatchOperation, KeyValueStore, ScanResult};
use std::collections::BTreeMap;

/// Buffered writes: `Some` is a put, `None` a delete.
pub type WriteSet = BTreeMap<Vec<u8>, Option<Vec<u8>>>;

/// Cache store over a read-only parent.
pub struct CacheStore<'a, P: KeyValueStore + ?Sized> {
    parent: &'a P,
    writes: WriteSet,
}

impl<'a, P: KeyValueStore + ?Sized> CacheStore<'a, P> {
    /// Empty buffer over `parent`.
    pub fn new(parent: &'a P) -> Self {
        Self::with_writes(parent, WriteSet::new())
    }

    /// Buffer seeded with writes already pending above `parent`.
    pub fn with_writes(parent: &'a P, writes: WriteSet) -> Self {
        Self { parent, writes }
    }

    /// Surrender the buffered writes.
    pub fn into_writes(self) -> WriteSet {
        self.writes
    }

    /// Buffered writes as a batch for the parent.
    pub fn into_batch(self) -> Vec<BatchOperation> {
        into_batch(self.writes)
    }
}

/// Convert a write set into batch operations in key order.
pub fn into_batch(writes: WriteSet) -> Vec<BatchOperation> {
    writes
        .into_iter()
        .map(|(key, value)| match value {
            Some(value) => BatchOperation::Put { key, value },
            None => BatchOperation::Delete { key },
        })
        .collect()
}

impl<'a, P: KeyValueStore + ?Sized> KeyValueStore for CacheStore<'a, P> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        match self.writes.get(key) {
            Some(value) => Ok(value.clone()),
            None => self.parent.get(key),
        }
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.writes.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.writes.insert(key.to_vec(), None);
        Ok(())
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.writes.insert(key, Some(value));
                }
                BatchOperation::Delete { key } => {
                    self.writes.insert(key, None);
                }
            }
        }
        Ok(())
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.parent.prefix_scan(prefix)?.into_iter().collect();

        for (key, value) in self
            .writes
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
        {
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        Ok(merged.into_iter().collect())
    }
}
