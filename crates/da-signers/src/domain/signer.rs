//! # Signer Entity
//!
//! Registered DA signer: identity, network address and BLS-style key material.

use super::errors::{DaSignersResult, ValidationError};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

/// Account length in hex characters (20 bytes).
pub const ACCOUNT_HEX_LEN: usize = 40;

/// G1 public key width.
pub const PUBKEY_G1_LEN: usize = 64;

/// G2 public key width.
pub const PUBKEY_G2_LEN: usize = 128;

/// Raw account bytes.
pub type AccountBytes = [u8; 20];

/// Check that `account` is canonical: 40 lower-case hex chars, no prefix.
pub fn validate_account(account: &str) -> DaSignersResult<()> {
    let canonical = account.len() == ACCOUNT_HEX_LEN
        && account
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));

    if !canonical {
        return Err(ValidationError::InvalidAccount(account.to_string()).into());
    }
    Ok(())
}

/// Decode a canonical account into its 20 bytes.
pub fn account_bytes(account: &str) -> DaSignersResult<AccountBytes> {
    validate_account(account)?;
    let mut out = [0u8; 20];
    hex::decode_to_slice(account, &mut out)
        .map_err(|_| ValidationError::InvalidAccount(account.to_string()))?;
    Ok(out)
}

/// A registered signer.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
    /// 20-byte address, lower-case hex without prefix.
    pub account: String,
    /// Network address the signer serves shards on.
    pub socket: String,
    /// G1 public key.
    #[serde_as(as = "Base64")]
    pub pubkey_g1: Vec<u8>,
    /// G2 public key.
    #[serde_as(as = "Base64")]
    pub pubkey_g2: Vec<u8>,
}

impl Signer {
    /// Create a signer (unvalidated).
    pub fn new(
        account: impl Into<String>,
        socket: impl Into<String>,
        pubkey_g1: Vec<u8>,
        pubkey_g2: Vec<u8>,
    ) -> Self {
        Self {
            account: account.into(),
            socket: socket.into(),
            pubkey_g1,
            pubkey_g2,
        }
    }

    /// Validate account format and key widths.
    pub fn validate(&self) -> DaSignersResult<()> {
        validate_account(&self.account)?;

        if self.pubkey_g1.len() != PUBKEY_G1_LEN {
            return Err(ValidationError::InvalidPubkeyG1Length {
                expected: PUBKEY_G1_LEN,
                got: self.pubkey_g1.len(),
            }
            .into());
        }

        if self.pubkey_g2.len() != PUBKEY_G2_LEN {
            return Err(ValidationError::InvalidPubkeyG2Length {
                expected: PUBKEY_G2_LEN,
                got: self.pubkey_g2.len(),
            }
            .into());
        }

        Ok(())
    }
}
