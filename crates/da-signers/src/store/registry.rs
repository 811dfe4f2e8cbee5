//! Signer registry.
//!
//! Signers are keyed by account and listed in insertion order. Re-registering
//! an account rotates its record in place without moving it in the order.

use super::{keys, read, write};
use crate::adapters::codec;
use crate::domain::{validate_account, DaSignersError, DaSignersResult, Signer};
use crate::ports::KeyValueStore;

/// Validate and upsert a signer. Returns `true` when the account is new.
pub fn upsert_signer<S: KeyValueStore + ?Sized>(
    store: &mut S,
    signer: &Signer,
) -> DaSignersResult<bool> {
    signer.validate()?;

    let key = keys::signer(&signer.account);
    let is_new = !store.exists(&key)?;
    if is_new {
        let seq = signer_count(store)?;
        write(store, &keys::signer_order(seq), &signer.account)?;
        write(store, keys::SIGNER_SEQ, &(seq + 1))?;
    }

    write(store, &key, signer)?;
    Ok(is_new)
}

/// Signer by account.
pub fn get_signer<S: KeyValueStore + ?Sized>(store: &S, account: &str) -> DaSignersResult<Signer> {
    validate_account(account)?;
    read(store, &keys::signer(account))?
        .ok_or_else(|| DaSignersError::NotFound(format!("signer {}", account)))
}

/// All signers in insertion order.
pub fn list_signers<S: KeyValueStore + ?Sized>(store: &S) -> DaSignersResult<Vec<Signer>> {
    store
        .prefix_scan(keys::SIGNER_ORDER_PREFIX)?
        .into_iter()
        .map(|(_, value)| {
            let account: String = codec::decode(&value)?;
            read(store, &keys::signer(&account))?.ok_or_else(|| {
                DaSignersError::InvariantViolation(format!(
                    "signer order references missing signer {}",
                    account
                ))
            })
        })
        .collect()
}

/// Number of registered signers.
pub fn signer_count<S: KeyValueStore + ?Sized>(store: &S) -> DaSignersResult<u64> {
    Ok(read(store, keys::SIGNER_SEQ)?.unwrap_or(0))
}

/// Whether any signer is registered.
pub fn has_signers<S: KeyValueStore + ?Sized>(store: &S) -> DaSignersResult<bool> {
    Ok(signer_count(store)? > 0)
}
