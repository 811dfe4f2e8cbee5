//! # Algorithms Module
//!
//! Pure, deterministic committee-selection functions.

pub mod quorum_formation;
pub mod vote_allocation;

pub use quorum_formation::{form_quorums, keccak256, quorum_count, rendezvous_rank};
pub use vote_allocation::{allocate_votes, eligible, votes_for_stake, VoteMap};
