use solana_sdk::pubkey::Pubkey;

use super::fee_math::{bootstrap_lp, proportional_amount, Rounding};
use crate::{
    custody::{undo, Escrow, LpLedger},
    error::{AmmError, Result},
    pool::Pool,
    state::DepositReceipt,
};

/// Amounts a deposit of `lp_amount` would take, without touching state.
///
/// Empty pool: the caller's `max_x` / `max_y` are taken as-is and set the
/// price; LP minted is their geometric mean. Otherwise contributions are the
/// proportional share of each reserve, rounded up so no LP is ever unbacked.
pub fn quote<E: Escrow, L: LpLedger>(
    pool: &Pool<E, L>,
    lp_amount: u64,
    max_x: u64,
    max_y: u64,
) -> Result<DepositReceipt> {
    if lp_amount == 0 {
        return Err(AmmError::InvalidAmount);
    }

    let supply = pool.lp_total_supply();
    let (reserve_x, reserve_y) = pool.reserves();

    let receipt = if supply == 0 {
        if max_x == 0 || max_y == 0 {
            return Err(AmmError::InvalidAmount);
        }
        DepositReceipt {
            amount_x: max_x,
            amount_y: max_y,
            lp_minted: bootstrap_lp(max_x, max_y)?,
        }
    } else {
        let amount_x = proportional_amount(lp_amount, reserve_x, supply, Rounding::Up)?;
        let amount_y = proportional_amount(lp_amount, reserve_y, supply, Rounding::Up)?;
        if amount_x > max_x || amount_y > max_y {
            return Err(AmmError::SlippageExceeded);
        }
        DepositReceipt { amount_x, amount_y, lp_minted: lp_amount }
    };

    // Reject now anything the apply step would overflow on
    reserve_x.checked_add(receipt.amount_x).ok_or(AmmError::MathOverflow)?;
    reserve_y.checked_add(receipt.amount_y).ok_or(AmmError::MathOverflow)?;
    supply.checked_add(receipt.lp_minted).ok_or(AmmError::MathOverflow)?;

    Ok(receipt)
}

/// Add liquidity and mint LP to `depositor`.
pub fn handler<E: Escrow, L: LpLedger>(
    pool: &mut Pool<E, L>,
    depositor: &Pubkey,
    lp_amount: u64,
    max_x: u64,
    max_y: u64,
) -> Result<DepositReceipt> {
    if pool.config.locked {
        return Err(AmmError::PoolLocked);
    }
    let bootstrap = pool.lp_total_supply() == 0;
    let receipt = quote(pool, lp_amount, max_x, max_y)?;

    pool.vault_x.deposit(receipt.amount_x)?;
    if let Err(e) = pool.vault_y.deposit(receipt.amount_y) {
        undo("refund x", pool.vault_x.withdraw(receipt.amount_x, depositor));
        return Err(e);
    }
    if let Err(e) = pool.lp.mint(depositor, receipt.lp_minted) {
        undo("refund x", pool.vault_x.withdraw(receipt.amount_x, depositor));
        undo("refund y", pool.vault_y.withdraw(receipt.amount_y, depositor));
        return Err(e);
    }

    tracing::info!(
        pool_seed = pool.config.seed,
        %depositor,
        bootstrap,
        x = receipt.amount_x,
        y = receipt.amount_y,
        lp = receipt.lp_minted,
        "liquidity deposited"
    );
    Ok(receipt)
}
