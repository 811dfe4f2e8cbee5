//! # Vote Allocation
//!
//! Bonded stake → discrete votes. Integer-only and independent of iteration
//! order, so every replica computes the same map.

use crate::domain::{Params, Signer};
use crate::ports::StakeLedger;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Allocated votes keyed by account, in lexicographic account order.
pub type VoteMap = BTreeMap<String, u64>;

/// `floor(bonded / tokens_per_vote)`, clamped to `max_votes_per_signer`.
pub fn votes_for_stake(bonded: u128, params: &Params) -> u64 {
    if params.tokens_per_vote == 0 {
        return 0;
    }
    let votes = bonded / u128::from(params.tokens_per_vote);
    votes.min(u128::from(params.max_votes_per_signer)) as u64
}

/// Allocate votes to every signer.
///
/// Ledger failures count as zero stake: an account the ledger cannot answer
/// for simply gets no votes. Zero-vote signers stay in the map so callers can
/// tell "no signers" apart from "no eligible signers".
pub fn allocate_votes<L>(signers: &[Signer], ledger: &L, params: &Params) -> VoteMap
where
    L: StakeLedger + ?Sized,
{
    signers
        .iter()
        .map(|signer| {
            let bonded = ledger.bonded_amount(&signer.account).unwrap_or_else(|e| {
                warn!(
                    "[da-signers] Stake lookup failed for {}: {}; assuming zero",
                    signer.account, e
                );
                0
            });
            let votes = votes_for_stake(bonded, params);
            debug!(
                "[da-signers] Signer {} bonded {} -> {} votes",
                signer.account, bonded, votes
            );
            (signer.account.clone(), votes)
        })
        .collect()
}

/// Signers with at least one vote.
pub fn eligible(votes: &VoteMap) -> impl Iterator<Item = (&String, u64)> {
    votes.iter().filter(|(_, v)| **v > 0).map(|(a, v)| (a, *v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PUBKEY_G1_LEN, PUBKEY_G2_LEN};
    use crate::ports::MockStakeLedger;

    fn signer(n: u8) -> Signer {
        Signer::new(
            format!("{:040x}", n),
            "",
            vec![0u8; PUBKEY_G1_LEN],
            vec![0u8; PUBKEY_G2_LEN],
        )
    }

    #[test]
    fn test_floor_division() {
        let params = Params::default();
        assert_eq!(votes_for_stake(35, &params), 3);
        assert_eq!(votes_for_stake(9, &params), 0);
    }

    #[test]
    fn test_clamped_to_max_votes() {
        let params = Params::default();
        assert_eq!(votes_for_stake(40_000, &params), 1024);
        assert_eq!(votes_for_stake(u128::MAX, &params), 1024);
    }

    #[test]
    fn test_allocate_votes() {
        let ledger = MockStakeLedger::new();
        ledger.set_bonded(&signer(1).account, 35);
        ledger.set_bonded(&signer(2).account, 40_000);

        let votes = allocate_votes(&[signer(2), signer(1), signer(3)], &ledger, &Params::default());

        assert_eq!(votes.len(), 3);
        assert_eq!(votes[&signer(1).account], 3);
        assert_eq!(votes[&signer(2).account], 1024);
        assert_eq!(votes[&signer(3).account], 0);
        assert_eq!(eligible(&votes).count(), 2);
    }

    #[test]
    fn test_ledger_failure_counts_as_zero() {
        let ledger = MockStakeLedger::new();
        ledger.set_bonded(&signer(1).account, 1_000);
        ledger.fail_for(&signer(1).account);

        let votes = allocate_votes(&[signer(1)], &ledger, &Params::default());
        assert_eq!(votes[&signer(1).account], 0);
    }
}
