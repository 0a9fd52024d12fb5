//! Custody seams: the two reserve escrows and the LP ledger.
//!
//! The engine only ever talks to these traits. `TokenVault` and `LpMint` are
//! the in-memory implementations used by the SDK and the tests; a host ledger
//! can plug in its own as long as each call is atomic.
//!
//! A host call may still fail after the engine has validated an operation.
//! When it does, the engine reverses the calls it already made for that
//! operation (refund, re-credit, re-mint) and returns the host's error.

use std::collections::BTreeMap;

use solana_sdk::pubkey::Pubkey;

use crate::error::{AmmError, Result};

// ─── Escrow ────────────────────────────────────────────────────────────────

/// One reserve account owned by the pool.
pub trait Escrow {
    /// Mint of the asset held.
    fn mint(&self) -> Pubkey;
    fn balance(&self) -> u64;
    /// Credit `amount` into custody.
    fn deposit(&mut self, amount: u64) -> Result<()>;
    /// Pay `amount` out of custody to `destination`.
    /// Fails with `InsufficientBalance` if `balance() < amount`.
    fn withdraw(&mut self, amount: u64, destination: &Pubkey) -> Result<()>;
}

/// In-memory reserve escrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenVault {
    mint: Pubkey,
    amount: u64,
}

impl TokenVault {
    /// Fresh, empty vault for `mint`.
    pub fn new(mint: Pubkey) -> Self {
        Self { mint, amount: 0 }
    }

    /// Rebuild a vault from a persisted balance.
    pub fn with_balance(mint: Pubkey, amount: u64) -> Self {
        Self { mint, amount }
    }
}

impl Escrow for TokenVault {
    fn mint(&self) -> Pubkey {
        self.mint
    }

    fn balance(&self) -> u64 {
        self.amount
    }

    fn deposit(&mut self, amount: u64) -> Result<()> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(AmmError::MathOverflow)?;
        Ok(())
    }

    fn withdraw(&mut self, amount: u64, destination: &Pubkey) -> Result<()> {
        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientBalance)?;
        tracing::trace!(mint = %self.mint, %destination, amount, "vault payout");
        Ok(())
    }
}

/// Apply a compensating custody call. A failure here means host custody has
/// diverged from the pool and is logged; the caller still returns the error
/// that triggered the rollback.
pub(crate) fn undo(step: &str, result: Result<()>) {
    if let Err(e) = result {
        tracing::error!(step, error = %e, "custody rollback failed");
    }
}

// ─── LP ledger ─────────────────────────────────────────────────────────────

/// LP claim token: total supply plus per-holder balances.
/// `mint` and `burn` are the only mutations.
pub trait LpLedger {
    fn total_supply(&self) -> u64;
    fn balance_of(&self, holder: &Pubkey) -> u64;
    fn mint(&mut self, recipient: &Pubkey, amount: u64) -> Result<()>;
    /// Fails with `InsufficientBalance` if the holder has less than `amount`.
    fn burn(&mut self, holder: &Pubkey, amount: u64) -> Result<()>;
}

/// In-memory LP ledger. Holders with a zero balance are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LpMint {
    supply: u64,
    holders: BTreeMap<Pubkey, u64>,
}

impl LpMint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted holdings. Supply is their sum.
    pub fn from_holdings(holdings: impl IntoIterator<Item = (Pubkey, u64)>) -> Result<Self> {
        let mut ledger = Self::new();
        for (holder, amount) in holdings {
            ledger.mint(&holder, amount)?;
        }
        Ok(ledger)
    }

    /// Holders with a non-zero balance, ordered by key.
    pub fn holdings(&self) -> impl Iterator<Item = (&Pubkey, &u64)> {
        self.holders.iter()
    }
}

impl LpLedger for LpMint {
    fn total_supply(&self) -> u64 {
        self.supply
    }

    fn balance_of(&self, holder: &Pubkey) -> u64 {
        self.holders.get(holder).copied().unwrap_or(0)
    }

    fn mint(&mut self, recipient: &Pubkey, amount: u64) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let supply = self.supply.checked_add(amount).ok_or(AmmError::MathOverflow)?;
        let balance = self
            .balance_of(recipient)
            .checked_add(amount)
            .ok_or(AmmError::MathOverflow)?;
        self.supply = supply;
        self.holders.insert(*recipient, balance);
        Ok(())
    }

    fn burn(&mut self, holder: &Pubkey, amount: u64) -> Result<()> {
        let balance = self
            .balance_of(holder)
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientBalance)?;
        // supply >= any single balance, so this cannot underflow
        self.supply -= amount;
        if balance == 0 {
            self.holders.remove(holder);
        } else {
            self.holders.insert(*holder, balance);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vault_withdraw_rejects_overdraw() {
        let mut vault = TokenVault::with_balance(Pubkey::new_unique(), 10);
        let dest = Pubkey::new_unique();
        assert_eq!(vault.withdraw(11, &dest), Err(AmmError::InsufficientBalance));
        assert_eq!(vault.balance(), 10);
        vault.withdraw(10, &dest).unwrap();
        assert_eq!(vault.balance(), 0);
    }

    #[test]
    fn lp_burn_tracks_supply_and_drops_empty_holders() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let mut lp = LpMint::new();
        lp.mint(&alice, 70).unwrap();
        lp.mint(&bob, 30).unwrap();
        assert_eq!(lp.total_supply(), 100);

        assert_eq!(lp.burn(&bob, 31), Err(AmmError::InsufficientBalance));
        lp.burn(&bob, 30).unwrap();
        assert_eq!(lp.total_supply(), 70);
        assert_eq!(lp.holdings().count(), 1);
        assert_eq!(lp.balance_of(&bob), 0);
    }

    #[test]
    fn from_holdings_sums_supply() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let lp = LpMint::from_holdings([(a, 5), (b, 7)]).unwrap();
        assert_eq!(lp.total_supply(), 12);
        assert_eq!(lp.balance_of(&b), 7);
    }
}
