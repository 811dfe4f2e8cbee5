//! # Genesis State
//!
//! Full exportable module state: params, epoch counter, signer registry and
//! quorum history. `import(export(s)) == s` for every valid `s`, compared by
//! canonical JSON.

use super::errors::{DaSignersError, DaSignersResult, ValidationError};
use super::invariants::invariant_unique_members;
use super::params::Params;
use super::quorum::{Epoch, QuorumsSnapshot};
use super::signer::Signer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// DA signers genesis state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    /// Module parameters.
    pub params: Params,
    /// Current epoch counter.
    pub epoch_number: Epoch,
    /// Registered signers in insertion order.
    pub signers: Vec<Signer>,
    /// Quorum snapshots indexed by epoch.
    pub quorums_by_epoch: Vec<QuorumsSnapshot>,
}

impl Default for GenesisState {
    fn default() -> Self {
        Self {
            params: Params::default(),
            epoch_number: 0,
            signers: Vec::new(),
            quorums_by_epoch: vec![QuorumsSnapshot::empty(0)],
        }
    }
}

impl GenesisState {
    /// Create a genesis state.
    pub fn new(
        params: Params,
        epoch_number: Epoch,
        signers: Vec<Signer>,
        quorums_by_epoch: Vec<QuorumsSnapshot>,
    ) -> Self {
        Self {
            params,
            epoch_number,
            signers,
            quorums_by_epoch,
        }
    }

    /// Validate the whole state. Any failure must halt chain initialization.
    pub fn validate(&self) -> DaSignersResult<()> {
        self.params.validate()?;

        let mut accounts = BTreeSet::new();
        for signer in &self.signers {
            signer.validate()?;
            if !accounts.insert(signer.account.as_str()) {
                return Err(invalid(format!("duplicate signer {}", signer.account)));
            }
        }

        let latest = self
            .quorums_by_epoch
            .last()
            .ok_or_else(|| invalid("quorum history is empty".to_string()))?;

        for (index, snapshot) in self.quorums_by_epoch.iter().enumerate() {
            if snapshot.epoch != index as Epoch {
                return Err(invalid(format!(
                    "history entry {} carries epoch {}",
                    index, snapshot.epoch
                )));
            }

            for quorum in &snapshot.quorums {
                invariant_unique_members(quorum).map_err(invalid)?;
                if let Some(unknown) = quorum
                    .signers
                    .iter()
                    .find(|a| !accounts.contains(a.as_str()))
                {
                    return Err(invalid(format!(
                        "epoch {} references unregistered signer {}",
                        snapshot.epoch, unknown
                    )));
                }
            }
        }

        if latest.epoch != self.epoch_number {
            return Err(invalid(format!(
                "epoch number {} does not match latest history epoch {}",
                self.epoch_number, latest.epoch
            )));
        }

        Ok(())
    }

    /// Canonical JSON encoding.
    pub fn to_json(&self) -> DaSignersResult<String> {
        serde_json::to_string(self).map_err(|e| DaSignersError::Codec(e.to_string()))
    }

    /// Decode from JSON. Malformed documents are validation failures.
    pub fn from_json(json: &str) -> DaSignersResult<Self> {
        serde_json::from_str(json).map_err(|e| invalid(e.to_string()))
    }
}

fn invalid(reason: String) -> DaSignersError {
    ValidationError::InvalidGenesis(reason).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Quorum, PUBKEY_G1_LEN, PUBKEY_G2_LEN};

    const ACCOUNT: &str = "0000000000000000000000000000000000000001";

    fn signer() -> Signer {
        Signer::new(
            ACCOUNT,
            "0.0.0.0:1234",
            vec![1u8; PUBKEY_G1_LEN],
            vec![1u8; PUBKEY_G2_LEN],
        )
    }

    fn genesis() -> GenesisState {
        GenesisState::new(
            Params {
                tokens_per_vote: 10,
                max_votes_per_signer: 1024,
                max_quorums: 10,
                epoch_blocks: 5760,
                encoded_slices: 1,
            },
            0,
            vec![signer()],
            vec![QuorumsSnapshot::new(0, vec![Quorum::new(vec![ACCOUNT.to_string()])])],
        )
    }

    #[test]
    fn test_default_genesis_valid() {
        assert!(GenesisState::default().validate().is_ok());
    }

    #[test]
    fn test_valid_genesis() {
        assert!(genesis().validate().is_ok());
    }

    #[test]
    fn test_empty_history_rejected() {
        let mut state = genesis();
        state.quorums_by_epoch.clear();
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_signer_registered_before_first_committee_accepted() {
        // Signers registered mid-epoch are seated only at the next boundary.
        let mut state = genesis();
        state.quorums_by_epoch = vec![QuorumsSnapshot::empty(0)];
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_epoch_gap_rejected() {
        let mut state = genesis();
        state.quorums_by_epoch[0].epoch = 1;
        state.epoch_number = 1;
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_epoch_number_mismatch_rejected() {
        let mut state = genesis();
        state.epoch_number = 3;
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_unregistered_member_rejected() {
        let mut state = genesis();
        state.quorums_by_epoch[0].quorums[0]
            .signers
            .push("0000000000000000000000000000000000000002".to_string());
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_duplicate_signer_rejected() {
        let mut state = genesis();
        state.signers.push(signer());
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let state = genesis();
        let json = state.to_json().unwrap();
        let decoded = GenesisState::from_json(&json).unwrap();
        assert_eq!(decoded, state);
        assert_eq!(decoded.to_json().unwrap(), json);
    }

    #[test]
    fn test_malformed_json_is_validation_error() {
        let err = GenesisState::from_json("{\"params\":").unwrap_err();
        assert!(matches!(err, DaSignersError::Validation(_)));
    }
}
