//! # Quorum Formation
//!
//! Deterministic stake-weighted committee assignment.
//!
//! 1. `quorum_count = min(max_quorums, highest vote count)`.
//! 2. Each eligible signer takes `min(votes, quorum_count)` seats.
//! 3. Seats are picked by rendezvous (highest random weight) hashing of
//!    `(epoch, account, quorum_id)`, so committees rotate every epoch while
//!    staying a pure function of the inputs.
//!
//! The highest-vote signer sits in every quorum, so no quorum is empty.

use super::vote_allocation::{eligible, VoteMap};
use crate::domain::{
    account_bytes, DaSignersError, DaSignersResult, Epoch, Hash, Params, Quorum, QuorumId,
    QuorumsSnapshot, MAX_QUORUMS_LIMIT,
};
use sha3::{Digest, Keccak256};
use tracing::{debug, error};

/// Number of quorums for the given eligible vote counts.
pub fn quorum_count(votes: &VoteMap, params: &Params) -> u64 {
    eligible(votes)
        .map(|(_, v)| v)
        .max()
        .map_or(0, |max_votes| max_votes.min(params.max_quorums))
}

/// Form the committee for `epoch`.
///
/// `votes` must cover every registered signer, zero-vote ones included.
/// An empty map yields an empty snapshot; a non-empty map with no eligible
/// signer is an invariant violation.
pub fn form_quorums(
    epoch: Epoch,
    votes: &VoteMap,
    params: &Params,
) -> DaSignersResult<QuorumsSnapshot> {
    if votes.is_empty() {
        debug!("[da-signers] No signers registered, epoch {} committee is empty", epoch);
        return Ok(QuorumsSnapshot::empty(epoch));
    }

    let count = quorum_count(votes, params);
    if count == 0 {
        error!(
            "[da-signers] {} signers registered but none holds a vote at epoch {}",
            votes.len(),
            epoch
        );
        return Err(DaSignersError::InvariantViolation(format!(
            "no eligible signers for epoch {}: all {} registered signers have zero votes",
            epoch,
            votes.len()
        )));
    }

    if count > MAX_QUORUMS_LIMIT {
        return Err(DaSignersError::InvariantViolation(format!(
            "quorum count {} exceeds limit {}",
            count, MAX_QUORUMS_LIMIT
        )));
    }
    let size = count as usize;
    let mut quorums = vec![Quorum::default(); size];

    // BTreeMap order: members land in each quorum lexicographically sorted.
    for (account, votes) in eligible(votes) {
        let seats = votes.min(count) as usize;
        for quorum_id in rendezvous_rank(epoch, account, count)?.into_iter().take(seats) {
            quorums[quorum_id as usize].signers.push(account.clone());
        }
    }

    debug!(
        "[da-signers] Formed {} quorums for epoch {} (sizes: {:?})",
        size,
        epoch,
        quorums.iter().map(Quorum::len).collect::<Vec<_>>()
    );

    Ok(QuorumsSnapshot::new(epoch, quorums))
}

/// Quorum ids ordered by descending rendezvous weight for `account`.
///
/// Ties (vanishingly unlikely) fall back to the lower quorum id.
pub fn rendezvous_rank(
    epoch: Epoch,
    account: &str,
    count: u64,
) -> DaSignersResult<Vec<QuorumId>> {
    let address = account_bytes(account).map_err(|_| {
        DaSignersError::InvariantViolation(format!(
            "registry holds malformed account {:?}",
            account
        ))
    })?;

    // 8 bytes epoch + 20 bytes account + 8 bytes quorum id
    let mut input = [0u8; 36];
    input[..8].copy_from_slice(&epoch.to_be_bytes());
    input[8..28].copy_from_slice(&address);

    let mut weighted: Vec<(Hash, QuorumId)> = (0..count)
        .map(|quorum_id| {
            input[28..36].copy_from_slice(&quorum_id.to_be_bytes());
            (keccak256(&input), quorum_id)
        })
        .collect();

    weighted.sort_by(|(ha, qa), (hb, qb)| hb.cmp(ha).then(qa.cmp(qb)));
    Ok(weighted.into_iter().map(|(_, quorum_id)| quorum_id).collect())
}

/// Helper: keccak256 hash.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}
