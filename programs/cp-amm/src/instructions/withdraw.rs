use solana_sdk::pubkey::Pubkey;

use super::fee_math::{proportional_amount, Rounding};
use crate::{
    custody::{undo, Escrow, LpLedger},
    error::{AmmError, Result},
    pool::Pool,
    state::WithdrawReceipt,
};

/// Amounts `lp_amount` redeems for, rounded down.
pub fn quote<E: Escrow, L: LpLedger>(
    pool: &Pool<E, L>,
    lp_amount: u64,
) -> Result<WithdrawReceipt> {
    if lp_amount == 0 {
        return Err(AmmError::InvalidAmount);
    }
    let supply = pool.lp_total_supply();
    if supply == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    if lp_amount > supply {
        return Err(AmmError::InsufficientBalance);
    }

    let (reserve_x, reserve_y) = pool.reserves();
    Ok(WithdrawReceipt {
        amount_x: proportional_amount(lp_amount, reserve_x, supply, Rounding::Down)?,
        amount_y: proportional_amount(lp_amount, reserve_y, supply, Rounding::Down)?,
        lp_burned: lp_amount,
    })
}

/// Burn LP and pay out the proportional share of both reserves.
/// Allowed while the pool is locked so providers can always exit.
pub fn handler<E: Escrow, L: LpLedger>(
    pool: &mut Pool<E, L>,
    owner: &Pubkey,
    lp_amount: u64,
    min_x: u64,
    min_y: u64,
) -> Result<WithdrawReceipt> {
    let receipt = quote(pool, lp_amount)?;
    if pool.lp.balance_of(owner) < lp_amount {
        return Err(AmmError::InsufficientBalance);
    }
    if receipt.amount_x < min_x || receipt.amount_y < min_y {
        return Err(AmmError::SlippageExceeded);
    }

    pool.lp.burn(owner, lp_amount)?;
    if let Err(e) = pool.vault_x.withdraw(receipt.amount_x, owner) {
        undo("re-mint lp", pool.lp.mint(owner, lp_amount));
        return Err(e);
    }
    if let Err(e) = pool.vault_y.withdraw(receipt.amount_y, owner) {
        undo("re-credit x", pool.vault_x.deposit(receipt.amount_x));
        undo("re-mint lp", pool.lp.mint(owner, lp_amount));
        return Err(e);
    }

    tracing::info!(
        pool_seed = pool.config.seed,
        %owner,
        lp = lp_amount,
        x = receipt.amount_x,
        y = receipt.amount_y,
        locked = pool.config.locked,
        "liquidity withdrawn"
    );
    Ok(receipt)
}
