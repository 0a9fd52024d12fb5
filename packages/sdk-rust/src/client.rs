//! [`AmmClient`]: the pool store and main entry point for integrations.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use cp_amm::instructions::{deposit, withdraw};
use cp_amm::{AmmError, Pool, PoolConfig, PoolKey};
use parking_lot::{Mutex, RwLock};
use solana_sdk::pubkey::Pubkey;

use crate::{
    error::Result,
    math::simulate_detailed,
    state::{load_state, save_state, PoolSnapshot},
    types::{
        DepositResult, InitializeParams, PoolInfo, SimulateResult, SwapResult, WithdrawResult,
    },
};

type PoolHandle = Arc<Mutex<Pool>>;

// ─── Client ───────────────────────────────────────────────────────────────────

/// Pool store keyed by `(mint_x, mint_y, seed)`.
///
/// Every pool sits behind its own mutex, so operations on one pool are
/// serialized while callers on different pools never wait on each other. The
/// outer map lock is held only long enough to look up or insert a handle.
///
/// ```rust
/// # use cp_amm_sdk::{AmmClient, InitializeParams};
/// # use solana_sdk::pubkey::Pubkey;
/// let client = AmmClient::new();
/// let lp = Pubkey::new_unique();
/// let params = InitializeParams {
///     mint_x: Pubkey::new_unique(), mint_y: Pubkey::new_unique(),
///     seed: 1, fee_bps: 30, authority: None,
/// };
/// let key = params.key();
/// client.initialize(params)?;
/// client.deposit(&key, &lp, 1, 100_000, 100_000)?;
/// let sim = client.simulate(&key, true, 10_000)?;
/// let out = client.swap(&key, &lp, true, 10_000, sim.estimated_out)?;
/// assert_eq!(out.amount_out, 9_066);
/// # Ok::<(), cp_amm_sdk::Error>(())
/// ```
#[derive(Default)]
pub struct AmmClient {
    pools: RwLock<HashMap<PoolKey, PoolHandle>>,
}

impl AmmClient {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `pools`. Fails on a repeated key.
    pub fn from_pools(pools: impl IntoIterator<Item = Pool>) -> Result<Self> {
        let mut map = HashMap::new();
        for pool in pools {
            match map.entry(pool.key()) {
                Entry::Occupied(_) => return Err(AmmError::DuplicatePool.into()),
                Entry::Vacant(slot) => {
                    slot.insert(Arc::new(Mutex::new(pool)));
                }
            }
        }
        Ok(Self { pools: RwLock::new(map) })
    }

    /// Load a store from a JSON state file; a missing file gives an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        let pools = load_state(path)?
            .iter()
            .map(PoolSnapshot::restore)
            .collect::<Result<Vec<_>>>()?;
        Self::from_pools(pools)
    }

    /// Persist every pool to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        save_state(path, self.snapshots())
    }

    /// Snapshots of every pool, ordered by key.
    pub fn snapshots(&self) -> Vec<PoolSnapshot> {
        let mut handles: Vec<(PoolKey, PoolHandle)> = self
            .pools
            .read()
            .iter()
            .map(|(k, h)| (*k, Arc::clone(h)))
            .collect();
        handles.sort_by_key(|(k, _)| *k);
        handles
            .iter()
            .map(|(_, h)| PoolSnapshot::capture(&h.lock()))
            .collect()
    }

    /// Keys of every pool, ordered.
    pub fn keys(&self) -> Vec<PoolKey> {
        let mut keys: Vec<PoolKey> = self.pools.read().keys().copied().collect();
        keys.sort();
        keys
    }

    // ── Write operations ──────────────────────────────────────────────────────

    /// Create a pool. Fails with `DuplicatePool` if the key is taken.
    pub fn initialize(&self, params: InitializeParams) -> Result<PoolConfig> {
        let key = params.key();
        let mut pools = self.pools.write();
        let slot = match pools.entry(key) {
            Entry::Occupied(_) => return Err(AmmError::DuplicatePool.into()),
            Entry::Vacant(slot) => slot,
        };
        let pool = cp_amm::initialize(
            params.mint_x,
            params.mint_y,
            params.seed,
            params.fee_bps,
            params.authority,
        )?;
        let config = pool.config().clone();
        slot.insert(Arc::new(Mutex::new(pool)));
        Ok(config)
    }

    /// Deposit liquidity; returns the amounts actually taken and LP minted.
    pub fn deposit(
        &self,
        key: &PoolKey,
        depositor: &Pubkey,
        lp_amount: u64,
        max_x: u64,
        max_y: u64,
    ) -> Result<DepositResult> {
        self.with_pool(key, |pool| pool.deposit(depositor, lp_amount, max_x, max_y))
            .map(Into::into)
    }

    /// Execute a swap; `min_amount_out` is the slippage floor.
    pub fn swap(
        &self,
        key: &PoolKey,
        trader: &Pubkey,
        x_to_y: bool,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<SwapResult> {
        self.with_pool(key, |pool| pool.swap(trader, x_to_y, amount_in, min_amount_out))
            .map(Into::into)
    }

    /// Burn LP and receive both reserves. Works on locked pools.
    pub fn withdraw(
        &self,
        key: &PoolKey,
        owner: &Pubkey,
        lp_amount: u64,
        min_x: u64,
        min_y: u64,
    ) -> Result<WithdrawResult> {
        self.with_pool(key, |pool| pool.withdraw(owner, lp_amount, min_x, min_y))
            .map(Into::into)
    }

    /// Authority-only lock switch.
    pub fn set_lock(&self, key: &PoolKey, caller: &Pubkey, locked: bool) -> Result<()> {
        self.with_pool(key, |pool| pool.set_lock(caller, locked))
    }

    // ── Read operations ───────────────────────────────────────────────────────

    pub fn pool_info(&self, key: &PoolKey) -> Result<PoolInfo> {
        self.read_pool(key, |pool| {
            let (x, y) = pool.reserves();
            Ok(PoolInfo::new(pool.config(), x, y, pool.lp_total_supply()))
        })
    }

    pub fn lp_balance(&self, key: &PoolKey, owner: &Pubkey) -> Result<u64> {
        self.read_pool(key, |pool| Ok(pool.lp_balance(owner)))
    }

    /// Fee and slippage preview; never mutates.
    pub fn simulate(&self, key: &PoolKey, x_to_y: bool, amount_in: u64) -> Result<SimulateResult> {
        self.read_pool(key, |pool| simulate_detailed(pool, x_to_y, amount_in))
    }

    /// Amounts a deposit would take, with the same rounding as the real one.
    pub fn quote_deposit(
        &self,
        key: &PoolKey,
        lp_amount: u64,
        max_x: u64,
        max_y: u64,
    ) -> Result<DepositResult> {
        self.read_pool(key, |pool| {
            Ok(deposit::quote(pool, lp_amount, max_x, max_y)?.into())
        })
    }

    /// Amounts a withdraw of `lp_amount` would pay out.
    pub fn quote_withdraw(&self, key: &PoolKey, lp_amount: u64) -> Result<WithdrawResult> {
        self.read_pool(key, |pool| Ok(withdraw::quote(pool, lp_amount)?.into()))
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn handle(&self, key: &PoolKey) -> Result<PoolHandle> {
        self.pools
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| AmmError::NotFound.into())
    }

    /// Run one engine operation with the pool's lock held.
    fn with_pool<T>(
        &self,
        key: &PoolKey,
        op: impl FnOnce(&mut Pool) -> cp_amm::Result<T>,
    ) -> Result<T> {
        let handle = self.handle(key)?;
        let mut pool = handle.lock();
        let result = op(&mut pool);
        if let Err(e) = &result {
            tracing::debug!(seed = key.seed, mint_x = %key.mint_x, error = %e, "pool operation rejected");
        }
        Ok(result?)
    }

    fn read_pool<T>(&self, key: &PoolKey, read: impl FnOnce(&Pool) -> Result<T>) -> Result<T> {
        let handle = self.handle(key)?;
        let pool = handle.lock();
        read(&pool)
    }
}
