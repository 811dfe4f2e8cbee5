//! DA Signers Service - block-synchronous state machine
//!
//! # Architecture
//! - Committed state is an immutable `Arc<S>` snapshot, swapped on commit
//!   (copy-on-write). Queries clone the `Arc` and never observe a block in
//!   progress.
//! - The block being executed lives in a pending [`WriteSet`]. Each message
//!   runs in its own [`CacheStore`] over committed + pending and only merges
//!   into pending on success.
//! - Invariant violations discard the pending block.

use crate::adapters::{cache_store, CacheStore, WriteSet};
use crate::algorithms::{allocate_votes, form_quorums};
use crate::domain::{
    DaSignersError, DaSignersResult, Epoch, GenesisState, Hash, Params, Quorum, QuorumId,
    QuorumsSnapshot, Signer,
};
use crate::ports::{
    DaSignersMsgServer, DaSignersQuery, GovernanceAuthority, KeyValueStore, ModuleLifecycle,
    MsgChangeParams, MsgRegisterSigner, MsgUpdateSocket, StakeLedger,
};
use crate::store::{epoch, history, params, registry};
use parking_lot::{Mutex, RwLock};
use sha3::{Digest, Keccak256};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// DA Signers Service
pub struct DaSignersService<S, L, G>
where
    S: KeyValueStore + Clone,
    L: StakeLedger,
    G: GovernanceAuthority,
{
    committed: RwLock<Arc<S>>,
    pending: Mutex<WriteSet>,
    stake_ledger: Arc<L>,
    governance: Arc<G>,
}

/// Dependencies for DaSignersService
pub struct DaSignersDependencies<S, L, G> {
    /// Committed store the service starts from.
    pub store: S,
    /// Source of bonded stake per account.
    pub stake_ledger: Arc<L>,
    /// Account allowed to change params.
    pub governance: Arc<G>,
}

impl<S, L, G> DaSignersService<S, L, G>
where
    S: KeyValueStore + Clone,
    L: StakeLedger,
    G: GovernanceAuthority,
{
    /// Create a service over an uninitialised store.
    pub fn new(deps: DaSignersDependencies<S, L, G>) -> Self {
        Self {
            committed: RwLock::new(Arc::new(deps.store)),
            pending: Mutex::new(WriteSet::new()),
            stake_ledger: deps.stake_ledger,
            governance: deps.governance,
        }
    }

    /// Read-only view of the last committed block.
    pub fn committed_view(&self) -> CommittedView<S> {
        CommittedView {
            store: Arc::clone(&*self.committed.read()),
        }
    }

    /// Whether the current block has uncommitted writes.
    pub fn has_pending_writes(&self) -> bool {
        !self.pending.lock().is_empty()
    }

    /// Keccak-256 over every committed key/value pair in key order.
    ///
    /// Replicas that processed the same blocks report the same digest.
    pub fn state_digest(&self) -> DaSignersResult<Hash> {
        let snapshot = self.committed_view().store;
        let mut hasher = Keccak256::new();
        for (key, value) in snapshot.prefix_scan(b"")? {
            hasher.update((key.len() as u64).to_be_bytes());
            hasher.update(&key);
            hasher.update((value.len() as u64).to_be_bytes());
            hasher.update(&value);
        }
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&hasher.finalize());
        Ok(digest)
    }

    /// Run `op` against committed + pending state. Its writes join the
    /// pending block only if it succeeds.
    fn execute<T, F>(&self, op: F) -> DaSignersResult<T>
    where
        F: FnOnce(&mut dyn KeyValueStore) -> DaSignersResult<T>,
    {
        let snapshot = Arc::clone(&*self.committed.read());
        let mut pending = self.pending.lock();
        let mut cache = CacheStore::with_writes(snapshot.as_ref(), pending.clone());
        let out = op(&mut cache)?;
        *pending = cache.into_writes();
        Ok(out)
    }

    fn transition_epoch(
        &self,
        store: &mut dyn KeyValueStore,
        height: u64,
    ) -> DaSignersResult<Option<Epoch>> {
        if !params::is_initialized(store)? {
            return Err(DaSignersError::InvariantViolation(
                "block processed before genesis".to_string(),
            ));
        }
        let params = params::get_params(store)?;
        let start_height = epoch::epoch_start_height(store)?;
        if !epoch::is_epoch_boundary(start_height, params.epoch_blocks, height) {
            return Ok(None);
        }

        let current = epoch::epoch_number(store)?;
        let next = current.checked_add(1).ok_or_else(|| {
            DaSignersError::InvariantViolation(format!("epoch counter overflow at {}", current))
        })?;

        let signers = registry::list_signers(store)?;
        let votes = allocate_votes(&signers, self.stake_ledger.as_ref(), &params);
        let snapshot = form_quorums(next, &votes, &params)?;
        let quorum_count = snapshot.quorum_count();

        history::append(store, &snapshot)?;
        epoch::set_epoch_number(store, next)?;
        epoch::set_epoch_start_height(store, height)?;

        info!(
            "[da-signers] Epoch {} -> {} at height {}: {} signers, {} quorums",
            current,
            next,
            height,
            signers.len(),
            quorum_count
        );
        Ok(Some(next))
    }
}

impl<S, L, G> DaSignersMsgServer for DaSignersService<S, L, G>
where
    S: KeyValueStore + Clone,
    L: StakeLedger,
    G: GovernanceAuthority,
{
    fn register_signer(&self, msg: MsgRegisterSigner) -> DaSignersResult<()> {
        let account = msg.signer.account.clone();
        match self.execute(|store| registry::upsert_signer(store, &msg.signer)) {
            Ok(true) => {
                info!("[da-signers] Registered signer {}", account);
                Ok(())
            }
            Ok(false) => {
                info!("[da-signers] Rotated keys for signer {}", account);
                Ok(())
            }
            Err(e) => {
                warn!("[da-signers] Rejected registration of {:?}: {}", account, e);
                Err(e)
            }
        }
    }

    fn update_socket(&self, msg: MsgUpdateSocket) -> DaSignersResult<()> {
        self.execute(|store| {
            let mut signer = registry::get_signer(store, &msg.account)?;
            signer.socket = msg.socket.clone();
            registry::upsert_signer(store, &signer).map(|_| ())
        })
        .map(|()| debug!("[da-signers] Signer {} socket -> {}", msg.account, msg.socket))
        .map_err(|e| {
            warn!("[da-signers] Rejected socket update for {:?}: {}", msg.account, e);
            e
        })
    }

    fn change_params(&self, msg: MsgChangeParams) -> DaSignersResult<()> {
        let expected = self.governance.authority();
        if msg.authority != expected {
            warn!(
                "[da-signers] ChangeParams from {:?} rejected, authority is {}",
                msg.authority, expected
            );
            return Err(DaSignersError::Unauthorized {
                expected,
                got: msg.authority,
            });
        }

        self.execute(|store| params::set_params(store, &msg.params))?;
        info!("[da-signers] Params changed: {:?}", msg.params);
        Ok(())
    }
}

impl<S, L, G> DaSignersQuery for DaSignersService<S, L, G>
where
    S: KeyValueStore + Clone,
    L: StakeLedger,
    G: GovernanceAuthority,
{
    fn get_params(&self) -> DaSignersResult<Params> {
        self.committed_view().get_params()
    }

    fn get_signer(&self, account: &str) -> DaSignersResult<Signer> {
        self.committed_view().get_signer(account)
    }

    fn list_signers(&self) -> DaSignersResult<Vec<Signer>> {
        self.committed_view().list_signers()
    }

    fn get_epoch_number(&self) -> DaSignersResult<Epoch> {
        self.committed_view().get_epoch_number()
    }

    fn get_quorums_by_epoch(&self, epoch: Epoch) -> DaSignersResult<QuorumsSnapshot> {
        self.committed_view().get_quorums_by_epoch(epoch)
    }

    fn get_latest_quorums(&self) -> DaSignersResult<QuorumsSnapshot> {
        self.committed_view().get_latest_quorums()
    }

    fn get_epoch_quorum(&self, epoch: Epoch, quorum_id: QuorumId) -> DaSignersResult<Quorum> {
        self.committed_view().get_epoch_quorum(epoch, quorum_id)
    }

    fn get_epoch_quorum_row(
        &self,
        epoch: Epoch,
        quorum_id: QuorumId,
        row: u64,
    ) -> DaSignersResult<String> {
        self.committed_view().get_epoch_quorum_row(epoch, quorum_id, row)
    }
}

impl<S, L, G> ModuleLifecycle for DaSignersService<S, L, G>
where
    S: KeyValueStore + Clone,
    L: StakeLedger,
    G: GovernanceAuthority,
{
    fn init_genesis(&self, genesis: GenesisState) -> DaSignersResult<()> {
        genesis.validate().map_err(|e| {
            error!("[da-signers] Genesis rejected: {}", e);
            e
        })?;

        let mut committed = self.committed.write();
        if params::is_initialized(committed.as_ref())? {
            return Err(DaSignersError::InvariantViolation(
                "genesis imported twice".to_string(),
            ));
        }

        let batch = {
            let mut cache = CacheStore::new(committed.as_ref());
            params::set_params(&mut cache, &genesis.params)?;
            for signer in &genesis.signers {
                registry::upsert_signer(&mut cache, signer)?;
            }
            history::restore(&mut cache, &genesis.quorums_by_epoch)?;
            epoch::set_epoch_number(&mut cache, genesis.epoch_number)?;
            epoch::set_epoch_start_height(&mut cache, 0)?;
            cache.into_batch()
        };

        let mut next = S::clone(committed.as_ref());
        next.atomic_batch_write(batch)?;
        *committed = Arc::new(next);
        self.pending.lock().clear();

        info!(
            "[da-signers] Genesis imported: epoch {}, {} signers, {} snapshots",
            genesis.epoch_number,
            genesis.signers.len(),
            genesis.quorums_by_epoch.len()
        );
        Ok(())
    }

    fn export_genesis(&self) -> DaSignersResult<GenesisState> {
        let view = self.committed_view();
        Ok(GenesisState::new(
            view.get_params()?,
            view.get_epoch_number()?,
            view.list_signers()?,
            history::all(view.store.as_ref())?,
        ))
    }

    fn on_block_begin(&self, height: u64) -> DaSignersResult<Option<Epoch>> {
        let result = self.execute(|store| self.transition_epoch(store, height));
        if let Err(e) = &result {
            if e.is_fatal() {
                error!("[da-signers] Block at height {} halted: {}", height, e);
                self.discard_block();
            }
        }
        result
    }

    fn commit(&self) -> DaSignersResult<()> {
        let mut committed = self.committed.write();
        let mut pending = self.pending.lock();
        if pending.is_empty() {
            return Ok(());
        }

        let writes = pending.len();
        let mut next = S::clone(committed.as_ref());
        next.atomic_batch_write(cache_store::into_batch(pending.clone()))?;
        *committed = Arc::new(next);
        pending.clear();

        debug!("[da-signers] Committed {} writes", writes);
        Ok(())
    }

    fn discard_block(&self) {
        let mut pending = self.pending.lock();
        if !pending.is_empty() {
            debug!("[da-signers] Discarding {} pending writes", pending.len());
            pending.clear();
        }
    }
}

/// Snapshot of committed state, unaffected by later commits.
#[derive(Clone)]
pub struct CommittedView<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> DaSignersQuery for CommittedView<S> {
    fn get_params(&self) -> DaSignersResult<Params> {
        params::get_params(self.store.as_ref())
    }

    fn get_signer(&self, account: &str) -> DaSignersResult<Signer> {
        registry::get_signer(self.store.as_ref(), account)
    }

    fn list_signers(&self) -> DaSignersResult<Vec<Signer>> {
        registry::list_signers(self.store.as_ref())
    }

    fn get_epoch_number(&self) -> DaSignersResult<Epoch> {
        epoch::epoch_number(self.store.as_ref())
    }

    fn get_quorums_by_epoch(&self, epoch: Epoch) -> DaSignersResult<QuorumsSnapshot> {
        history::get_by_epoch(self.store.as_ref(), epoch)
    }

    fn get_latest_quorums(&self) -> DaSignersResult<QuorumsSnapshot> {
        history::latest(self.store.as_ref())
    }

    fn get_epoch_quorum(&self, epoch: Epoch, quorum_id: QuorumId) -> DaSignersResult<Quorum> {
        history::get_quorum(self.store.as_ref(), epoch, quorum_id)
    }

    fn get_epoch_quorum_row(
        &self,
        epoch: Epoch,
        quorum_id: QuorumId,
        row: u64,
    ) -> DaSignersResult<String> {
        history::get_quorum_row(self.store.as_ref(), epoch, quorum_id, row)
    }
}
