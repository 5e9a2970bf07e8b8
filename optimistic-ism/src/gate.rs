use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, instrument, warn};

use primitive_types::H256;

use crate::{
    utils::message_id, Clock, InterchainSecurityModule, IsmResult, ModuleType,
    OptimisticIsmConfig, OptimisticIsmError, SystemClock, Verification,
};

/// Registries shared by every gate operation.
///
/// All access goes through the single lock in [`OptimisticIsm`]; the lock
/// is never held across a submodule invocation.
#[derive(Debug, Default)]
struct GateState {
    owner: H256,
    submodule: Option<Arc<dyn InterchainSecurityModule>>,
    watchers: HashSet<H256>,
    fraudulent_at: HashMap<H256, u64>,
    verifications: HashMap<H256, Verification>,
}

/// An optimistic verification gate.
///
/// The gate answers verification queries through a pluggable submodule that
/// can be used immediately, while watchers have a fraud window to flag the
/// submodule as compromised. A message is first proposed via
/// [`pre_verify`](Self::pre_verify), which consults the submodule and opens
/// the window; once the window has elapsed, [`verify`](Self::verify)
/// renders the final decision against the live fraud registry.
#[derive(Debug)]
pub struct OptimisticIsm {
    fraud_window: u64,
    clock: Arc<dyn Clock>,
    state: RwLock<GateState>,
}

impl OptimisticIsm {
    /// Instantiate a gate from settings, reading the wall clock.
    pub fn new(config: OptimisticIsmConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Instantiate a gate with an explicit time source.
    pub fn with_clock(config: OptimisticIsmConfig, clock: Arc<dyn Clock>) -> Self {
        let state = GateState {
            owner: config.owner,
            watchers: config.watchers.into_iter().collect(),
            ..Default::default()
        };
        Self {
            fraud_window: config.fraud_window,
            clock,
            state: RwLock::new(state),
        }
    }

    /// The kind of verification this gate performs.
    pub fn module_type(&self) -> ModuleType {
        ModuleType::Optimistic
    }

    /// Seconds a proposal must wait before final verification.
    pub fn fraud_window(&self) -> u64 {
        self.fraud_window
    }

    /// Current owner identity.
    pub fn owner(&self) -> H256 {
        self.state.read().owner
    }

    /// Whether `id` currently holds the watcher role.
    pub fn is_watcher(&self, id: H256) -> bool {
        self.state.read().watchers.contains(&id)
    }

    /// Unix time at which `ism` was last flagged fraudulent; 0 if never.
    pub fn flagged_at(&self, ism: H256) -> u64 {
        self.state
            .read()
            .fraudulent_at
            .get(&ism)
            .copied()
            .unwrap_or(0)
    }

    /// The proposal-ledger entry recorded for a message identity, if any.
    pub fn proposal(&self, id: H256) -> Option<Verification> {
        self.state.read().verifications.get(&id).copied()
    }

    /// The active submodule. The message argument is unused; it is kept so
    /// the accessor lines up with module kinds that route per message.
    pub fn sub_module(&self, _message: &[u8]) -> Option<Arc<dyn InterchainSecurityModule>> {
        self.state.read().submodule.clone()
    }

    /// Grant the watcher role to `watcher`.
    ///
    /// Owner-only. Adding an identity that already holds the role succeeds
    /// silently.
    pub fn add_watcher(&self, caller: H256, watcher: H256) -> IsmResult<()> {
        let mut state = self.state.write();
        if state.owner != caller {
            return Err(OptimisticIsmError::NotOwner(caller));
        }
        if watcher.is_zero() {
            return Err(OptimisticIsmError::InvalidAddress);
        }
        if state.watchers.insert(watcher) {
            info!(watcher = %watcher, "watcher added");
        }
        Ok(())
    }

    /// Revoke the watcher role from `watcher`.
    ///
    /// Owner-only. Removing an absent identity succeeds silently.
    pub fn remove_watcher(&self, caller: H256, watcher: H256) -> IsmResult<()> {
        let mut state = self.state.write();
        if state.owner != caller {
            return Err(OptimisticIsmError::NotOwner(caller));
        }
        if watcher.is_zero() {
            return Err(OptimisticIsmError::InvalidAddress);
        }
        if state.watchers.remove(&watcher) {
            info!(watcher = %watcher, "watcher removed");
        }
        Ok(())
    }

    /// Hand the owner role to `new_owner`. Owner-only.
    pub fn transfer_ownership(&self, caller: H256, new_owner: H256) -> IsmResult<()> {
        let mut state = self.state.write();
        if state.owner != caller {
            return Err(OptimisticIsmError::NotOwner(caller));
        }
        if new_owner.is_zero() {
            return Err(OptimisticIsmError::InvalidAddress);
        }
        state.owner = new_owner;
        info!(owner = %new_owner, "ownership transferred");
        Ok(())
    }

    /// Unconditionally install `ism` as the active submodule.
    ///
    /// Owner-only. This is the initial/administrative override path; it
    /// performs no fraud check. Rotation away from a flagged submodule goes
    /// through [`switch_ism`](Self::switch_ism).
    pub fn set_submodule(
        &self,
        caller: H256,
        ism: Arc<dyn InterchainSecurityModule>,
    ) -> IsmResult<()> {
        let mut state = self.state.write();
        if state.owner != caller {
            return Err(OptimisticIsmError::NotOwner(caller));
        }
        info!(ism = %ism.address(), "submodule set");
        state.submodule = Some(ism);
        Ok(())
    }

    /// Record a fraud flag against `ism` at the current time.
    ///
    /// Watcher-only. Flags are set or overwritten, never cleared; with a
    /// non-decreasing clock the stored timestamp never moves backwards.
    pub fn mark_fraudulent(&self, caller: H256, ism: H256) -> IsmResult<()> {
        let mut state = self.state.write();
        if !state.watchers.contains(&caller) {
            return Err(OptimisticIsmError::NotWatcher(caller));
        }
        if ism.is_zero() {
            return Err(OptimisticIsmError::InvalidAddress);
        }
        let now = self.clock.now();
        state.fraudulent_at.insert(ism, now);
        warn!(ism = %ism, watcher = %caller, flagged_at = now, "submodule flagged as fraudulent");
        Ok(())
    }

    /// Rotate the gate to `new_ism`.
    ///
    /// Owner-only, and permitted only once the currently active submodule
    /// carries a non-zero fraud flag. The replacement is installed
    /// unchecked: flags on the new module do not gate rotation.
    pub fn switch_ism(
        &self,
        caller: H256,
        new_ism: Arc<dyn InterchainSecurityModule>,
    ) -> IsmResult<()> {
        let mut state = self.state.write();
        if state.owner != caller {
            return Err(OptimisticIsmError::NotOwner(caller));
        }
        let flagged_at = state
            .submodule
            .as_ref()
            .and_then(|ism| state.fraudulent_at.get(&ism.address()))
            .copied()
            .unwrap_or(0);
        if flagged_at == 0 {
            return Err(OptimisticIsmError::NotFlagged);
        }
        info!(ism = %new_ism.address(), "submodule switched");
        state.submodule = Some(new_ism);
        Ok(())
    }

    /// Propose `message` for optimistic verification.
    ///
    /// Consults the active submodule (if one is set) and records a
    /// proposal-ledger entry naming the submodule consulted and the current
    /// time, opening the fraud window. The ledger takes a single entry per
    /// message identity, ever; a repeat proposal fails with
    /// [`AlreadyProposed`](OptimisticIsmError::AlreadyProposed) regardless
    /// of metadata. Either the full sequence commits or no state changes.
    #[instrument(skip(self, metadata, message))]
    pub async fn pre_verify(&self, metadata: &[u8], message: &[u8]) -> IsmResult<()> {
        let id = message_id(message);
        let submodule = self.state.read().submodule.clone();

        if let Some(ism) = &submodule {
            if !ism.verify(metadata, message).await? {
                return Err(OptimisticIsmError::VerificationFailed(id));
            }
        }

        let mut state = self.state.write();
        if state.verifications.contains_key(&id) {
            return Err(OptimisticIsmError::AlreadyProposed(id));
        }
        let verification =
            Verification::new(submodule.map(|ism| ism.address()), self.clock.now());
        debug!(%id, ism = ?verification.ism, time = verification.time, "proposal recorded");
        state.verifications.insert(id, verification);
        Ok(())
    }

    /// Final verification decision for `message`.
    ///
    /// Read-only; the decision is recomputed on every call against the live
    /// fraud registry and may change over time. A message that was never
    /// proposed reads as the default ledger entry (`ism: None`, `time: 0`)
    /// and flows through the same checks as any other. Any internal
    /// inconsistency degrades to `false` rather than erroring.
    #[instrument(skip(self, metadata, message))]
    pub async fn verify(&self, metadata: &[u8], message: &[u8]) -> bool {
        let id = message_id(message);
        let (verification, flagged_at, submodule) = {
            let state = self.state.read();
            let verification = state
                .verifications
                .get(&id)
                .copied()
                .unwrap_or_default();
            let flagged_at = verification
                .ism
                .and_then(|ism| state.fraudulent_at.get(&ism))
                .copied()
                .unwrap_or(0);
            (verification, flagged_at, state.submodule.clone())
        };

        // Fraud-window disqualification. Both comparisons must hold; this
        // is the historical check, preserved as-is (see the fraud-window
        // note in DESIGN.md).
        if flagged_at > verification.time
            && flagged_at.saturating_add(self.fraud_window) < verification.time
        {
            debug!(%id, flagged_at, "rejected: proposal disqualified by fraud flag");
            return false;
        }

        // The window must have elapsed since the proposal.
        if self.clock.now().saturating_sub(verification.time) < self.fraud_window {
            debug!(%id, time = verification.time, "rejected: fraud window still open");
            return false;
        }

        match submodule {
            Some(ism) => match ism.verify(metadata, message).await {
                Ok(verified) => verified,
                Err(err) => {
                    warn!(%id, %err, "submodule call failed; rejecting");
                    false
                }
            },
            None => true,
        }
    }
}
