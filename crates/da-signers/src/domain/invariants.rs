//! # Domain Invariants
//!
//! Rules the quorum history must satisfy at all times. Violations are fatal.

use super::errors::{DaSignersError, DaSignersResult};
use super::quorum::{Epoch, Quorum, QuorumsSnapshot};
use std::collections::BTreeSet;

/// Invariant: history epochs advance by exactly one, starting at 0.
pub fn invariant_monotonic_epoch(latest: Option<Epoch>, next: Epoch) -> DaSignersResult<()> {
    let expected = match latest {
        None => 0,
        Some(epoch) => epoch.checked_add(1).ok_or_else(|| {
            DaSignersError::InvariantViolation("epoch counter overflow".to_string())
        })?,
    };

    if next != expected {
        return Err(DaSignersError::InvariantViolation(format!(
            "non-monotonic epoch: expected {}, got {}",
            expected, next
        )));
    }
    Ok(())
}

/// Invariant: once a signer exists the committee is never empty.
pub fn invariant_non_empty_committee(
    snapshot: &QuorumsSnapshot,
    signers_exist: bool,
) -> DaSignersResult<()> {
    if signers_exist && snapshot.is_empty() {
        return Err(DaSignersError::InvariantViolation(format!(
            "empty quorum snapshot at epoch {} while signers are registered",
            snapshot.epoch
        )));
    }
    Ok(())
}

/// Invariant: an account sits in a quorum at most once.
pub fn invariant_unique_members(quorum: &Quorum) -> Result<(), String> {
    let mut seen = BTreeSet::new();
    for account in &quorum.signers {
        if !seen.insert(account) {
            return Err(format!("duplicate quorum member {}", account));
        }
    }
    Ok(())
}
