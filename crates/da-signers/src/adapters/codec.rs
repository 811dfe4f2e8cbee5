//! Canonical value codec.
//!
//! bincode's default configuration is fixed-width and field-ordered, so equal
//! values always produce equal bytes on every replica.

use crate::domain::{DaSignersError, DaSignersResult};
use serde::{de::DeserializeOwned, Serialize};

/// Encode a value for storage.
pub fn encode<T: Serialize>(value: &T) -> DaSignersResult<Vec<u8>> {
    bincode::serialize(value).map_err(|e| DaSignersError::Codec(e.to_string()))
}

/// Decode a stored value. Undecodable bytes mean corrupted state.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> DaSignersResult<T> {
    bincode::deserialize(bytes).map_err(|e| DaSignersError::Codec(e.to_string()))
}
