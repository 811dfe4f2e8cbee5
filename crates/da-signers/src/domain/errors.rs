//! # Domain Errors
//!
//! Error taxonomy for the DA signers module.
//!
//! | Class | Variant | Effect |
//! |-------|---------|--------|
//! | Validation | [`DaSignersError::Validation`] | message aborted, block continues |
//! | Authorization | [`DaSignersError::Unauthorized`] | message rejected, no state change |
//! | Invariant | [`DaSignersError::InvariantViolation`] | fatal, block rejected |
//! | Query miss | [`DaSignersError::NotFound`] | absent result |

use thiserror::Error;

/// Hash type (32-byte keccak256).
pub type Hash = [u8; 32];

/// Malformed input supplied by a submitter or a genesis file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Account is not 40 lower-case hex characters without prefix.
    #[error(
        "Invalid signer account {0:?}: \
         expected 40 lower-case hex characters without 0x prefix"
    )]
    InvalidAccount(String),

    /// G1 public key has the wrong width.
    #[error("Invalid pubkey_g1 length: expected {expected} bytes, got {got}")]
    InvalidPubkeyG1Length {
        /// Required length
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// G2 public key has the wrong width.
    #[error("Invalid pubkey_g2 length: expected {expected} bytes, got {got}")]
    InvalidPubkeyG2Length {
        /// Required length
        expected: usize,
        /// Supplied length
        got: usize,
    },

    /// A parameter violates its bounds.
    #[error("Invalid param {field}: {reason}")]
    InvalidParam {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Structural problem in a genesis state.
    #[error("Invalid genesis state: {0}")]
    InvalidGenesis(String),
}

/// Key-value store failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError {
        /// Backend message
        message: String,
    },
    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError {
        /// Backend message
        message: String,
    },
}

/// DA signers error type.
#[derive(Debug, Error)]
pub enum DaSignersError {
    /// Malformed account, key, param or genesis.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Governance message signed by someone other than the authority.
    #[error(
        "Unauthorized: expected gov account as only signer for proposal message; \
         expected {expected}, got {got}"
    )]
    Unauthorized {
        /// Governance authority
        expected: String,
        /// Requesting identity
        got: String,
    },

    /// Impossible or corrupted internal state.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Query miss.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(#[from] KVStoreError),

    /// Persisted bytes could not be (de)serialized.
    #[error("Codec error: {0}")]
    Codec(String),
}

impl DaSignersError {
    /// Whether the error must halt block processing.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvariantViolation(_) | Self::Storage(_) | Self::Codec(_)
        )
    }
}

/// Result type for DA signers operations.
pub type DaSignersResult<T> = Result<T, DaSignersError>;
