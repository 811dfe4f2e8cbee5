//! Persisted key layout.
//!
//! | Key | Value |
//! |-----|-------|
//! | `params` | [`Params`](crate::domain::Params) |
//! | `epoch_number` | `u64` |
//! | `epoch_start_height` | `u64` |
//! | `signer_seq` | next insertion sequence, `u64` |
//! | `signers/<account>` | [`Signer`](crate::domain::Signer) |
//! | `signer_order/<seq BE>` | account |
//! | `history/<epoch BE>` | [`QuorumsSnapshot`](crate::domain::QuorumsSnapshot) |
//! | `history_head` | epoch of the latest snapshot, `u64` |
//!
//! Sequence numbers and epochs are big-endian so prefix scans return them in
//! numeric order.

use crate::domain::Epoch;

/// Module parameters.
pub const PARAMS: &[u8] = b"params";
/// Current epoch counter.
pub const EPOCH_NUMBER: &[u8] = b"epoch_number";
/// Height the current epoch began at.
pub const EPOCH_START_HEIGHT: &[u8] = b"epoch_start_height";
/// Next signer insertion sequence.
pub const SIGNER_SEQ: &[u8] = b"signer_seq";
/// Signer records by account.
pub const SIGNERS_PREFIX: &[u8] = b"signers/";
/// Insertion order index.
pub const SIGNER_ORDER_PREFIX: &[u8] = b"signer_order/";
/// Quorum snapshots by epoch.
pub const HISTORY_PREFIX: &[u8] = b"history/";
/// Epoch of the most recent snapshot.
pub const HISTORY_HEAD: &[u8] = b"history_head";

fn prefixed(prefix: &[u8], suffix: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + suffix.len());
    key.extend_from_slice(prefix);
    key.extend_from_slice(suffix);
    key
}

/// Key of a signer record.
pub fn signer(account: &str) -> Vec<u8> {
    prefixed(SIGNERS_PREFIX, account.as_bytes())
}

/// Key of the `seq`-th registered account.
pub fn signer_order(seq: u64) -> Vec<u8> {
    prefixed(SIGNER_ORDER_PREFIX, &seq.to_be_bytes())
}

/// Key of the snapshot for `epoch`.
pub fn history(epoch: Epoch) -> Vec<u8> {
    prefixed(HISTORY_PREFIX, &epoch.to_be_bytes())
}
