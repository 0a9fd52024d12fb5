use solana_sdk::pubkey::Pubkey;

use crate::{
    custody::{Escrow, LpLedger, LpMint, TokenVault},
    error::Result,
    instructions::{deposit, set_lock, swap, withdraw},
    state::{DepositReceipt, PoolConfig, PoolKey, SwapReceipt, WithdrawReceipt},
};

// ─── Pool ──────────────────────────────────────────────────────────────────
// Config plus the custody it controls. Every mutation goes through one of the
// operation methods below; nothing else can move reserves or LP supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool<E = TokenVault, L = LpMint> {
    pub(crate) config: PoolConfig,
    pub(crate) vault_x: E,
    pub(crate) vault_y: E,
    pub(crate) lp: L,
}

impl<E: Escrow, L: LpLedger> Pool<E, L> {
    /// Assemble a pool around existing custody, e.g. when restoring from a
    /// snapshot or wiring in a host ledger.
    pub fn from_parts(config: PoolConfig, vault_x: E, vault_y: E, lp: L) -> Self {
        Self { config, vault_x, vault_y, lp }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn key(&self) -> PoolKey {
        self.config.key()
    }

    pub fn vault_x(&self) -> &E {
        &self.vault_x
    }

    pub fn vault_y(&self) -> &E {
        &self.vault_y
    }

    pub fn lp(&self) -> &L {
        &self.lp
    }

    /// `(reserve_x, reserve_y)` as held in custody right now.
    pub fn reserves(&self) -> (u64, u64) {
        (self.vault_x.balance(), self.vault_y.balance())
    }

    pub fn lp_total_supply(&self) -> u64 {
        self.lp.total_supply()
    }

    pub fn lp_balance(&self, owner: &Pubkey) -> u64 {
        self.lp.balance_of(owner)
    }

    /// `reserve_x * reserve_y`.
    pub fn constant_product(&self) -> u128 {
        let (x, y) = self.reserves();
        x as u128 * y as u128
    }

    /// Supply and reserves are either all zero or all non-zero.
    pub fn invariants_hold(&self) -> bool {
        let (x, y) = self.reserves();
        if self.lp_total_supply() == 0 {
            x == 0 && y == 0
        } else {
            x > 0 && y > 0
        }
    }

    // ── Operations ───────────────────────────────────────────────────────

    pub fn deposit(
        &mut self,
        depositor: &Pubkey,
        lp_amount: u64,
        max_x: u64,
        max_y: u64,
    ) -> Result<DepositReceipt> {
        deposit::handler(self, depositor, lp_amount, max_x, max_y)
    }

    pub fn swap(
        &mut self,
        trader: &Pubkey,
        x_to_y: bool,
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<SwapReceipt> {
        swap::handler(self, trader, x_to_y, amount_in, min_amount_out)
    }

    pub fn withdraw(
        &mut self,
        owner: &Pubkey,
        lp_amount: u64,
        min_x: u64,
        min_y: u64,
    ) -> Result<WithdrawReceipt> {
        withdraw::handler(self, owner, lp_amount, min_x, min_y)
    }

    pub fn set_lock(&mut self, caller: &Pubkey, locked: bool) -> Result<()> {
        set_lock::handler(self, caller, locked)
    }
}
