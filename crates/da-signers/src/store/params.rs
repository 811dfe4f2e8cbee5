//! Parameter store.

use super::{keys, read, write};
use crate::domain::{DaSignersError, DaSignersResult, Params};
use crate::ports::KeyValueStore;

/// Current params. Missing params mean genesis never ran.
pub fn get_params<S: KeyValueStore + ?Sized>(store: &S) -> DaSignersResult<Params> {
    read(store, keys::PARAMS)?.ok_or_else(|| {
        DaSignersError::InvariantViolation(
            "params not initialized: genesis has not run".to_string(),
        )
    })
}

/// Whether genesis has written params.
pub fn is_initialized<S: KeyValueStore + ?Sized>(store: &S) -> DaSignersResult<bool> {
    Ok(store.exists(keys::PARAMS)?)
}

/// Validate and persist params. Takes effect at the next epoch computation.
pub fn set_params<S: KeyValueStore + ?Sized>(
    store: &mut S,
    params: &Params,
) -> DaSignersResult<()> {
    params.validate()?;
    write(store, keys::PARAMS, params)
}
