//! # Inbound Ports
//!
//! What the DA signers subsystem offers the host: authenticated messages,
//! read-only queries and block lifecycle hooks.

use crate::domain::{
    DaSignersResult, Epoch, GenesisState, Params, Quorum, QuorumId, QuorumsSnapshot, Signer,
};
use serde::{Deserialize, Serialize};

/// Register a new signer or rotate an existing signer's keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRegisterSigner {
    /// Signer record to upsert.
    pub signer: Signer,
}

/// Replace the socket of an existing signer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateSocket {
    /// Signer account.
    pub account: String,
    /// New network address.
    pub socket: String,
}

/// Governance-gated parameter change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgChangeParams {
    /// Identity that signed the proposal.
    pub authority: String,
    /// Replacement parameters.
    pub params: Params,
}

/// Any message the module accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Msg {
    /// See [`MsgRegisterSigner`].
    RegisterSigner(MsgRegisterSigner),
    /// See [`MsgUpdateSocket`].
    UpdateSocket(MsgUpdateSocket),
    /// See [`MsgChangeParams`].
    ChangeParams(MsgChangeParams),
}

/// Message handlers. Each call is all-or-nothing.
pub trait DaSignersMsgServer {
    /// Upsert a signer after validating account and key widths.
    fn register_signer(&self, msg: MsgRegisterSigner) -> DaSignersResult<()>;

    /// Update the socket of a registered signer.
    fn update_socket(&self, msg: MsgUpdateSocket) -> DaSignersResult<()>;

    /// Replace params if `msg.authority` is the governance account.
    fn change_params(&self, msg: MsgChangeParams) -> DaSignersResult<()>;

    /// Dispatch a message to its handler.
    fn deliver(&self, msg: Msg) -> DaSignersResult<()> {
        match msg {
            Msg::RegisterSigner(m) => self.register_signer(m),
            Msg::UpdateSocket(m) => self.update_socket(m),
            Msg::ChangeParams(m) => self.change_params(m),
        }
    }
}

/// Read-only queries over committed state.
pub trait DaSignersQuery {
    /// Current parameters.
    fn get_params(&self) -> DaSignersResult<Params>;

    /// Signer by account.
    fn get_signer(&self, account: &str) -> DaSignersResult<Signer>;

    /// All signers in insertion order.
    fn list_signers(&self) -> DaSignersResult<Vec<Signer>>;

    /// Current epoch counter.
    fn get_epoch_number(&self) -> DaSignersResult<Epoch>;

    /// Snapshot recorded for `epoch`.
    fn get_quorums_by_epoch(&self, epoch: Epoch) -> DaSignersResult<QuorumsSnapshot>;

    /// Most recent snapshot.
    fn get_latest_quorums(&self) -> DaSignersResult<QuorumsSnapshot>;

    /// Number of quorums formed for `epoch`.
    fn get_quorum_count(&self, epoch: Epoch) -> DaSignersResult<u64> {
        Ok(self.get_quorums_by_epoch(epoch)?.quorum_count() as u64)
    }

    /// One quorum of `epoch`.
    fn get_epoch_quorum(&self, epoch: Epoch, quorum_id: QuorumId) -> DaSignersResult<Quorum>;

    /// Account seated at `row` of a quorum.
    fn get_epoch_quorum_row(
        &self,
        epoch: Epoch,
        quorum_id: QuorumId,
        row: u64,
    ) -> DaSignersResult<String>;
}

/// Hooks the host calls around block execution.
pub trait ModuleLifecycle {
    /// Load module state at chain start.
    fn init_genesis(&self, genesis: GenesisState) -> DaSignersResult<()>;

    /// Snapshot committed module state.
    fn export_genesis(&self) -> DaSignersResult<GenesisState>;

    /// Run the epoch-boundary check for `height`.
    ///
    /// Returns the new epoch when a transition happened.
    fn on_block_begin(&self, height: u64) -> DaSignersResult<Option<Epoch>>;

    /// Make the pending block's writes visible to queries.
    fn commit(&self) -> DaSignersResult<()>;

    /// Drop the pending block's writes.
    fn discard_block(&self);
}
