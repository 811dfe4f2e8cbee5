//! # Typed Store Layer
//!
//! Accessors over a [`KeyValueStore`] for each slice of module state.
//! Every function takes the store explicitly so the same code runs against
//! committed state, a pending block or a single message's cache.

pub mod epoch;
pub mod history;
pub mod keys;
pub mod params;
pub mod registry;

use crate::adapters::codec;
use crate::domain::DaSignersResult;
use crate::ports::KeyValueStore;
use serde::{de::DeserializeOwned, Serialize};

/// Read and decode the value at `key`.
pub(crate) fn read<T, S>(store: &S, key: &[u8]) -> DaSignersResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    store
        .get(key)?
        .map(|bytes| codec::decode(&bytes))
        .transpose()
}

/// Encode and store `value` at `key`.
pub(crate) fn write<T, S>(store: &mut S, key: &[u8], value: &T) -> DaSignersResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let bytes = codec::encode(value)?;
    store.put(key, &bytes)?;
    Ok(())
}
