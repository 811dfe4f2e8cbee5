//! Epoch bookkeeping.

use super::{keys, read, write};
use crate::domain::{DaSignersResult, Epoch};
use crate::ports::KeyValueStore;

/// Current epoch counter (0 before the first transition).
pub fn epoch_number<S: KeyValueStore + ?Sized>(store: &S) -> DaSignersResult<Epoch> {
    Ok(read(store, keys::EPOCH_NUMBER)?.unwrap_or(0))
}

/// Persist the epoch counter.
pub fn set_epoch_number<S: KeyValueStore + ?Sized>(
    store: &mut S,
    epoch: Epoch,
) -> DaSignersResult<()> {
    write(store, keys::EPOCH_NUMBER, &epoch)
}

/// Height at which the current epoch began.
pub fn epoch_start_height<S: KeyValueStore + ?Sized>(store: &S) -> DaSignersResult<u64> {
    Ok(read(store, keys::EPOCH_START_HEIGHT)?.unwrap_or(0))
}

/// Persist the height at which the current epoch began.
pub fn set_epoch_start_height<S: KeyValueStore + ?Sized>(
    store: &mut S,
    height: u64,
) -> DaSignersResult<()> {
    write(store, keys::EPOCH_START_HEIGHT, &height)
}

/// Whether `height` closes the current epoch.
pub fn is_epoch_boundary(start_height: u64, epoch_blocks: u64, height: u64) -> bool {
    match start_height.checked_add(epoch_blocks) {
        Some(boundary) => height >= boundary,
        None => false,
    }
}
