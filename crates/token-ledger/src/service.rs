//! # Token Ledger Service
//!
//! `TokenLedger` composes the domain components behind one lock and decides,
//! per call, whether to answer locally or forward to a successor ledger.
//!
//! ## Locking
//!
//! Every operation validates, mutates and emits its events inside a single
//! critical section on the ledger's own `Mutex`. Forwarded calls clone the
//! successor handle under the lock and invoke it after the lock is released,
//! so a ledger never holds its lock while another ledger runs.
//!
//! ## Routing
//!
//! | Operation | Local | Forwarding |
//! |-----------|-------|------------|
//! | `total_supply`, `balance_of` | local stores | successor's delegate reads |
//! | `transfer` | local plain transfer | successor's `delegate_transfer` |
//! | everything else | local stores | local stores |

use crate::adapters::{ClaimableAdmin, EcdsaAuthorizationVerifier, InMemoryEventLog};
use crate::config::LedgerConfig;
use crate::domain::authorization::{authorization_digest, AuthorizationArtifact, ReplayGuard};
use crate::domain::balance_store::BalanceStore;
use crate::domain::delegation::{check_mandator, check_successor, DelegationState, Mandate};
use crate::domain::invariants::{
    check_structural_invariants, check_supply_matches_balances, InvariantViolation,
};
use crate::domain::pause::PauseGate;
use crate::domain::supply::{MintOutcome, SupplyController};
use crate::domain::transfer::{AuthorizedTransferEngine, TransferOutcome};
use crate::domain::value_objects::{Address, Hash, U256, U512};
use crate::errors::{LedgerError, Result};
use crate::events::{LedgerEvent, LedgerEventRecord};
use crate::ports::inbound::{DelegateLedger, TokenLedgerApi};
use crate::ports::outbound::{AdminAuthority, AuthorizationVerifier, EventSink, Whitelist};

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Handle to a successor ledger.
pub type SuccessorHandle = Arc<dyn DelegateLedger>;

// =============================================================================
// COLLABORATORS
// =============================================================================

/// External predicates and sinks a ledger consults.
#[derive(Clone)]
pub struct Collaborators {
    /// Administrator capability check.
    pub admin: Arc<dyn AdminAuthority>,
    /// Allow-list for authorized transfers.
    pub whitelist: Arc<dyn Whitelist>,
    /// Resolves authorization artifacts to accounts.
    pub verifier: Arc<dyn AuthorizationVerifier>,
    /// Event output channel.
    pub events: Arc<dyn EventSink>,
}

impl Collaborators {
    /// Collaborators built from the bundled adapters, with secp256k1
    /// recovery for authorization artifacts.
    pub fn in_memory(
        admin: Arc<ClaimableAdmin>,
        whitelist: Arc<dyn Whitelist>,
        events: Arc<InMemoryEventLog>,
    ) -> Self {
        Self {
            admin,
            whitelist,
            verifier: Arc::new(EcdsaAuthorizationVerifier::new()),
            events,
        }
    }
}

// =============================================================================
// LEDGER STATE
// =============================================================================

/// Everything guarded by the ledger lock.
struct LedgerState {
    balances: BalanceStore,
    supply: SupplyController,
    gate: PauseGate,
    delegation: DelegationState<SuccessorHandle>,
    delegated_from: Option<Address>,
    name: String,
    symbol: String,
    replay: ReplayGuard,
    next_sequence: u64,
}

impl LedgerState {
    fn new(config: &LedgerConfig) -> Self {
        Self {
            balances: BalanceStore::new(),
            supply: SupplyController::new(config.total_tokens),
            gate: PauseGate::new(),
            delegation: DelegationState::Local,
            delegated_from: None,
            name: config.name.clone(),
            symbol: config.symbol.clone(),
            replay: ReplayGuard::new(),
            next_sequence: 0,
        }
    }

    fn successor_handle(&self) -> Option<SuccessorHandle> {
        match &self.delegation {
            DelegationState::Local => None,
            DelegationState::Forwarding { handle, .. } => Some(Arc::clone(handle)),
        }
    }
}

// =============================================================================
// TOKEN LEDGER
// =============================================================================

/// A mintable, pausable token ledger that can forward to a successor.
pub struct TokenLedger {
    address: Address,
    config: LedgerConfig,
    engine: AuthorizedTransferEngine,
    state: Mutex<LedgerState>,
    admin: Arc<dyn AdminAuthority>,
    whitelist: Arc<dyn Whitelist>,
    verifier: Arc<dyn AuthorizationVerifier>,
    events: Arc<dyn EventSink>,
}

impl std::fmt::Debug for TokenLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenLedger")
            .field("address", &self.address)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TokenLedger {
    /// Create a ledger living at `address`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `config` fails validation.
    pub fn new(
        address: Address,
        config: LedgerConfig,
        collaborators: Collaborators,
    ) -> Result<Self> {
        config.validate()?;

        info!(
            ledger = %address,
            token = %config.name,
            cap = %config.total_tokens,
            "[ledger] created"
        );

        Ok(Self {
            address,
            engine: AuthorizedTransferEngine::new(address),
            state: Mutex::new(LedgerState::new(&config)),
            config,
            admin: collaborators.admin,
            whitelist: collaborators.whitelist,
            verifier: collaborators.verifier,
            events: collaborators.events,
        })
    }

    // =========================================================================
    // VIEWS
    // =========================================================================

    /// Address of this ledger.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Configuration the ledger was built with.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Current token name.
    pub fn name(&self) -> String {
        self.state.lock().name.clone()
    }

    /// Current token symbol.
    pub fn symbol(&self) -> String {
        self.state.lock().symbol.clone()
    }

    /// Display precision.
    pub fn decimals(&self) -> u8 {
        self.config.decimals
    }

    /// Issuance cap (TOTAL_TOKENS).
    pub fn total_tokens(&self) -> U256 {
        self.config.total_tokens
    }

    /// Whether transfers are blocked.
    pub fn paused(&self) -> bool {
        self.state.lock().gate.is_paused()
    }

    /// Whether minting is closed.
    pub fn minting_finished(&self) -> bool {
        self.state.lock().supply.minting_finished()
    }

    /// Successor this ledger forwards to, if any.
    pub fn delegate(&self) -> Option<Address> {
        self.state.lock().delegation.successor()
    }

    /// Predecessor allowed to call the delegate-facing entry points.
    pub fn delegated_from(&self) -> Option<Address> {
        self.state.lock().delegated_from
    }

    /// Locally issued supply, ignoring delegation.
    pub fn local_total_supply(&self) -> U256 {
        self.state.lock().supply.total_supply()
    }

    /// Locally stored balance, ignoring delegation.
    pub fn local_balance_of(&self, who: Address) -> U256 {
        self.state.lock().balances.balance_of(&who)
    }

    /// Number of registered holders.
    pub fn get_the_number_of_holders(&self) -> usize {
        self.state.lock().balances.holder_count()
    }

    /// Holder at `index` in registration order.
    pub fn get_holder(&self, index: usize) -> Result<Address> {
        self.state.lock().balances.holder(index)
    }

    /// `(holder, balance)` pairs in registration order.
    ///
    /// Used to seed a successor during migration.
    pub fn holder_snapshot(&self) -> Vec<(Address, U256)> {
        self.state.lock().balances.snapshot()
    }

    /// Structural invariant violations, plus the supply/balance mismatch
    /// when `include_supply` is set.
    ///
    /// Administrative balance writes legitimately break supply equality, so
    /// callers opt in to that check.
    pub fn invariant_violations(&self, include_supply: bool) -> Vec<InvariantViolation> {
        let state = self.state.lock();
        let mut violations = check_structural_invariants(&state.supply, &state.balances);
        if include_supply {
            violations.extend(check_supply_matches_balances(&state.supply, &state.balances));
        }
        violations
    }

    // =========================================================================
    // ADMINISTRATIVE BALANCE WRITES
    // =========================================================================

    /// Overwrite the balance of `account`.
    #[instrument(skip(self), fields(ledger = %self.address))]
    pub fn set_balance(&self, caller: Address, account: Address, amount: U256) -> Result<()> {
        self.ensure_admin(caller, "set_balance")?;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        state
            .balances
            .set_balance(account, amount)
            .map_err(|e| self.rejected("set_balance", e))?;

        info!(account = %account, amount = %amount, "[ledger] balance set");
        self.emit(state, LedgerEvent::BalanceSet { account, amount });
        Ok(())
    }

    /// Credit `account` by `delta`. Returns the new balance.
    #[instrument(skip(self), fields(ledger = %self.address))]
    pub fn add_balance(&self, caller: Address, account: Address, delta: U256) -> Result<U256> {
        self.ensure_admin(caller, "add_balance")?;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        let balance = state
            .balances
            .add_balance(account, delta)
            .map_err(|e| self.rejected("add_balance", e))?;

        info!(account = %account, delta = %delta, balance = %balance, "[ledger] balance added");
        self.emit(
            state,
            LedgerEvent::BalanceAdded {
                account,
                amount: delta,
            },
        );
        Ok(balance)
    }

    /// Debit `account` by `delta`. Returns the new balance.
    #[instrument(skip(self), fields(ledger = %self.address))]
    pub fn sub_balance(&self, caller: Address, account: Address, delta: U256) -> Result<U256> {
        self.ensure_admin(caller, "sub_balance")?;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        let balance = state
            .balances
            .sub_balance(account, delta)
            .map_err(|e| self.rejected("sub_balance", e))?;

        info!(account = %account, delta = %delta, balance = %balance, "[ledger] balance subtracted");
        self.emit(
            state,
            LedgerEvent::BalanceSubtracted {
                account,
                amount: delta,
            },
        );
        Ok(balance)
    }

    /// Set many balances at once. Either every pair applies or none does.
    #[instrument(skip(self, accounts, amounts), fields(ledger = %self.address, pairs = accounts.len()))]
    pub fn set_balance_batch(
        &self,
        caller: Address,
        accounts: &[Address],
        amounts: &[U256],
    ) -> Result<()> {
        self.ensure_admin(caller, "set_balance_batch")?;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        state
            .balances
            .set_balance_batch(accounts, amounts)
            .map_err(|e| self.rejected("set_balance_batch", e))?;

        info!(pairs = accounts.len(), "[ledger] balance batch set");
        for (account, amount) in accounts.iter().zip(amounts) {
            self.emit(
                state,
                LedgerEvent::BalanceSet {
                    account: *account,
                    amount: *amount,
                },
            );
        }
        Ok(())
    }

    // =========================================================================
    // METADATA
    // =========================================================================

    /// Rename the token.
    #[instrument(skip(self), fields(ledger = %self.address))]
    pub fn change_token_name(&self, caller: Address, name: &str, symbol: &str) -> Result<()> {
        self.ensure_admin(caller, "change_token_name")?;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.name = name.to_string();
        state.symbol = symbol.to_string();

        info!(new_name = name, new_symbol = symbol, "[ledger] token renamed");
        self.emit(
            state,
            LedgerEvent::ChangeTokenName {
                new_name: name.to_string(),
                new_symbol: symbol.to_string(),
            },
        );
        Ok(())
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn ensure_admin(&self, caller: Address, operation: &'static str) -> Result<()> {
        if self.admin.is_admin(&caller) {
            return Ok(());
        }
        Err(self.rejected(operation, LedgerError::Unauthorized { caller }))
    }

    fn rejected(&self, operation: &'static str, error: LedgerError) -> LedgerError {
        warn!(ledger = %self.address, operation, error = %error, "[ledger] rejected");
        error
    }

    /// Publish `event` with the next sequence number. Runs under the lock,
    /// after the mutation it reports.
    fn emit(&self, state: &mut LedgerState, event: LedgerEvent) {
        debug_assert!(
            check_structural_invariants(&state.supply, &state.balances).is_empty(),
            "structural invariant broken before emitting {}",
            event.kind()
        );

        let record = LedgerEventRecord {
            ledger: self.address,
            sequence: state.next_sequence,
            event,
        };
        state.next_sequence += 1;
        self.events.publish(record);
    }

    /// Mandate for the next outbound hop, bounded by the configured depth.
    fn outbound_mandate(&self, inbound: Option<Mandate>) -> Result<Mandate> {
        let mandate = match inbound {
            None => Mandate::first_hop(self.address),
            Some(inbound) => inbound
                .next_hop(self.address)
                .map_err(|e| self.rejected("forward", e))?,
        };
        mandate
            .check_depth(self.config.max_delegation_depth)
            .map_err(|e| self.rejected("forward", e))?;
        Ok(mandate)
    }

    /// Admits a forwarded call. Runs under the same lock acquisition that
    /// reads the routing state, so the mandator cannot change in between.
    fn admit(
        &self,
        state: &LedgerState,
        inbound: Option<&Mandate>,
        operation: &'static str,
    ) -> Result<()> {
        match inbound {
            None => Ok(()),
            Some(mandate) => check_mandator(state.delegated_from, mandate)
                .map_err(|e| self.rejected(operation, e)),
        }
    }

    fn route_total_supply(&self, inbound: Option<Mandate>) -> Result<U256> {
        let successor = {
            let state = self.state.lock();
            self.admit(&state, inbound.as_ref(), "delegate_total_supply")?;
            match state.successor_handle() {
                None => return Ok(state.supply.total_supply()),
                Some(handle) => handle,
            }
        };

        let mandate = self.outbound_mandate(inbound)?;
        debug!(
            ledger = %self.address,
            successor = %successor.ledger_address(),
            depth = mandate.depth,
            "[ledger] forwarding total_supply"
        );
        successor.delegate_total_supply(mandate)
    }

    fn route_balance_of(&self, inbound: Option<Mandate>, who: Address) -> Result<U256> {
        let successor = {
            let state = self.state.lock();
            self.admit(&state, inbound.as_ref(), "delegate_balance_of")?;
            match state.successor_handle() {
                None => return Ok(state.balances.balance_of(&who)),
                Some(handle) => handle,
            }
        };

        let mandate = self.outbound_mandate(inbound)?;
        debug!(
            ledger = %self.address,
            successor = %successor.ledger_address(),
            account = %who,
            depth = mandate.depth,
            "[ledger] forwarding balance_of"
        );
        successor.delegate_balance_of(mandate, who)
    }

    fn route_transfer(
        &self,
        inbound: Option<Mandate>,
        origin: Address,
        to: Address,
        amount: U256,
    ) -> Result<()> {
        let successor = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            self.admit(state, inbound.as_ref(), "delegate_transfer")?;
            match state.successor_handle() {
                None => return self.transfer_locally(state, origin, to, amount),
                Some(handle) => handle,
            }
        };

        let mandate = self.outbound_mandate(inbound)?;
        debug!(
            ledger = %self.address,
            successor = %successor.ledger_address(),
            origin = %origin,
            to = %to,
            amount = %amount,
            depth = mandate.depth,
            "[ledger] forwarding transfer"
        );
        successor.delegate_transfer(mandate, to, amount, origin)
    }

    fn transfer_locally(
        &self,
        state: &mut LedgerState,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<()> {
        let value = self
            .engine
            .plain_transfer(&mut state.balances, &state.gate, from, to, amount)
            .map_err(|e| self.rejected("transfer", e))?;

        info!(from = %from, to = %to, amount = %value, "[ledger] transfer");
        self.emit(state, LedgerEvent::Transfer { from, to, value });
        Ok(())
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

impl TokenLedgerApi for TokenLedger {
    fn total_supply(&self) -> Result<U256> {
        self.route_total_supply(None)
    }

    fn balance_of(&self, who: Address) -> Result<U256> {
        self.route_balance_of(None, who)
    }

    #[instrument(skip(self), fields(ledger = %self.address))]
    fn transfer(&self, caller: Address, to: Address, amount: U256) -> Result<()> {
        self.route_transfer(None, caller, to, amount)
    }

    #[instrument(skip(self, artifact), fields(ledger = %self.address))]
    fn transfer_to(
        &self,
        caller: Address,
        to: Address,
        amount: U512,
        nonce: u64,
        artifact: &AuthorizationArtifact,
    ) -> Result<TransferOutcome> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        // A paused ledger refuses before looking at the artifact.
        state
            .gate
            .assert_not_paused()
            .map_err(|e| self.rejected("transfer_to", e))?;

        let digest = self.calc_hash(caller, to, amount, nonce);
        if self.verifier.recover_authorizer(&digest, artifact) != Some(caller) {
            return Err(self.rejected("transfer_to", LedgerError::InvalidAuthorization));
        }
        if state.replay.is_consumed(&digest) {
            return Err(self.rejected("transfer_to", LedgerError::AuthorizationReplayed));
        }

        let whitelisted = self.whitelist.is_whitelisted(&caller);
        let outcome = self
            .engine
            .authorized_transfer(
                &mut state.balances,
                &state.gate,
                caller,
                whitelisted,
                to,
                amount,
            )
            .map_err(|e| self.rejected("transfer_to", e))?;
        state.replay.consume(digest);

        match outcome {
            TransferOutcome::Moved { amount: value } => {
                info!(from = %caller, to = %to, amount = %value, nonce, "[ledger] authorized transfer");
                self.emit(
                    state,
                    LedgerEvent::Transfer {
                        from: caller,
                        to,
                        value,
                    },
                );
            }
            TransferOutcome::Collapsed => {
                info!(from = %caller, to = %to, nonce, "[ledger] authorized transfer collapsed to zero");
            }
        }
        Ok(outcome)
    }

    fn calc_hash(&self, caller: Address, to: Address, amount: U512, nonce: u64) -> Hash {
        authorization_digest(self.address, caller, to, amount, nonce)
    }

    #[instrument(skip(self), fields(ledger = %self.address))]
    fn transfer_from_to(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U512,
    ) -> Result<TransferOutcome> {
        self.ensure_admin(caller, "transfer_from_to")?;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        let outcome = self
            .engine
            .privileged_transfer(&mut state.balances, from, to, amount)
            .map_err(|e| self.rejected("transfer_from_to", e))?;

        match outcome {
            TransferOutcome::Moved { amount: value } => {
                info!(from = %from, to = %to, amount = %value, "[ledger] privileged transfer");
                self.emit(state, LedgerEvent::Transfer { from, to, value });
            }
            TransferOutcome::Collapsed => {
                info!(from = %from, to = %to, "[ledger] privileged transfer collapsed to zero");
            }
        }
        Ok(outcome)
    }

    #[instrument(skip(self), fields(ledger = %self.address))]
    fn mint(&self, caller: Address, to: Address, amount: U512) -> Result<MintOutcome> {
        self.ensure_admin(caller, "mint")?;
        self.engine
            .check_recipient(to)
            .map_err(|e| self.rejected("mint", e))?;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        let outcome = state
            .supply
            .mint(&mut state.balances, to, amount)
            .map_err(|e| self.rejected("mint", e))?;

        match outcome {
            MintOutcome::Minted {
                amount,
                total_supply,
            } => {
                info!(to = %to, amount = %amount, total_supply = %total_supply, "[ledger] minted");
                self.emit(state, LedgerEvent::Mint { to, amount });
                self.emit(
                    state,
                    LedgerEvent::Transfer {
                        from: Address::ZERO,
                        to,
                        value: amount,
                    },
                );
            }
            MintOutcome::Collapsed { total_supply } => {
                info!(to = %to, total_supply = %total_supply, "[ledger] mint collapsed to zero");
            }
        }
        Ok(outcome)
    }

    #[instrument(skip(self), fields(ledger = %self.address))]
    fn finish_minting(&self, caller: Address) -> Result<()> {
        self.ensure_admin(caller, "finish_minting")?;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.supply.finish_minting() {
            info!(total_supply = %state.supply.total_supply(), "[ledger] minting finished");
            self.emit(state, LedgerEvent::MintFinished);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(ledger = %self.address))]
    fn pause(&self, caller: Address) -> Result<()> {
        self.ensure_admin(caller, "pause")?;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.gate.pause() {
            info!("[ledger] paused");
            self.emit(state, LedgerEvent::Pause);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(ledger = %self.address))]
    fn unpause(&self, caller: Address) -> Result<()> {
        self.ensure_admin(caller, "unpause")?;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.gate.unpause() {
            info!("[ledger] unpaused");
            self.emit(state, LedgerEvent::Unpause);
        }
        Ok(())
    }

    #[instrument(skip(self, successor), fields(ledger = %self.address))]
    fn delegate_to_new_contract(
        &self,
        caller: Address,
        successor: Option<SuccessorHandle>,
    ) -> Result<()> {
        self.ensure_admin(caller, "delegate_to_new_contract")?;

        let new_contract = successor.as_ref().map(|handle| handle.ledger_address());
        check_successor(self.address, new_contract)
            .map_err(|e| self.rejected("delegate_to_new_contract", e))?;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        state.delegation = match successor {
            None => DelegationState::Local,
            Some(handle) => DelegationState::Forwarding {
                successor: handle.ledger_address(),
                handle,
            },
        };

        match new_contract {
            Some(address) => info!(successor = %address, "[ledger] delegating"),
            None => info!("[ledger] delegation cleared"),
        }
        self.emit(state, LedgerEvent::DelegateToNewContract { new_contract });
        Ok(())
    }

    #[instrument(skip(self), fields(ledger = %self.address))]
    fn set_delegated_from(&self, caller: Address, predecessor: Address) -> Result<()> {
        self.ensure_admin(caller, "set_delegated_from")?;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        // The null account clears the link.
        state.delegated_from = (!predecessor.is_zero()).then_some(predecessor);

        info!(predecessor = %predecessor, "[ledger] delegated-from set");
        self.emit(state, LedgerEvent::DelegatedFromSet { addr: predecessor });
        Ok(())
    }
}

// =============================================================================
// DELEGATE-FACING API
// =============================================================================

impl DelegateLedger for TokenLedger {
    fn ledger_address(&self) -> Address {
        self.address
    }

    fn delegate_total_supply(&self, mandate: Mandate) -> Result<U256> {
        self.route_total_supply(Some(mandate))
    }

    fn delegate_balance_of(&self, mandate: Mandate, who: Address) -> Result<U256> {
        self.route_balance_of(Some(mandate), who)
    }

    #[instrument(skip(self), fields(ledger = %self.address))]
    fn delegate_transfer(
        &self,
        mandate: Mandate,
        to: Address,
        amount: U256,
        origin: Address,
    ) -> Result<()> {
        self.route_transfer(Some(mandate), origin, to, amount)
    }
}

// =============================================================================
// TESTS
// =============================================================================
