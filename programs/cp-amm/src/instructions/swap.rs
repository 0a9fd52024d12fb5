use solana_sdk::pubkey::Pubkey;

use super::fee_math::compute_swap;
use crate::{
    custody::{undo, Escrow, LpLedger},
    error::{AmmError, Result},
    pool::Pool,
    state::SwapReceipt,
};

/// Price a swap against the pool's current reserves without applying it.
///
/// Checks run in this order: zero input, empty reserves, slippage floor,
/// zero output, drain.
pub fn quote<E: Escrow, L: LpLedger>(
    pool: &Pool<E, L>,
    x_to_y: bool,
    amount_in: u64,
    min_amount_out: u64,
) -> Result<SwapReceipt> {
    if amount_in == 0 {
        return Err(AmmError::InvalidAmount);
    }

    let (reserve_x, reserve_y) = pool.reserves();
    let (reserve_in, reserve_out) = if x_to_y {
        (reserve_x, reserve_y)
    } else {
        (reserve_y, reserve_x)
    };

    let q = compute_swap(amount_in, pool.config.fee_bps, reserve_in, reserve_out)?;
    tracing::debug!(
        reserve_in,
        reserve_out,
        after_fee = q.amount_in_after_fee,
        out = q.amount_out,
        "swap priced"
    );

    if q.amount_out < min_amount_out {
        return Err(AmmError::SlippageExceeded);
    }
    if q.amount_out == 0 {
        return Err(AmmError::InvalidAmount);
    }
    if q.amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity);
    }
    // The full input lands in the vault
    reserve_in.checked_add(amount_in).ok_or(AmmError::MathOverflow)?;

    Ok(SwapReceipt {
        x_to_y,
        amount_in,
        amount_in_after_fee: q.amount_in_after_fee,
        amount_out: q.amount_out,
    })
}

/// Constant-product swap: x * y = k, fee taken on input.
///
/// The whole `amount_in` (fee included) stays in the pool, so the LP fee
/// accrues to existing LP units as higher reserves. No LP is minted or burned.
pub fn handler<E: Escrow, L: LpLedger>(
    pool: &mut Pool<E, L>,
    trader: &Pubkey,
    x_to_y: bool,
    amount_in: u64,
    min_amount_out: u64,
) -> Result<SwapReceipt> {
    if pool.config.locked {
        return Err(AmmError::PoolLocked);
    }
    let receipt = quote(pool, x_to_y, amount_in, min_amount_out)?;

    let (vault_in, vault_out) = if x_to_y {
        (&mut pool.vault_x, &mut pool.vault_y)
    } else {
        (&mut pool.vault_y, &mut pool.vault_x)
    };
    vault_in.deposit(receipt.amount_in)?;
    if let Err(e) = vault_out.withdraw(receipt.amount_out, trader) {
        undo("refund input", vault_in.withdraw(receipt.amount_in, trader));
        return Err(e);
    }

    tracing::info!(
        pool_seed = pool.config.seed,
        %trader,
        x_to_y,
        amount_in,
        lp_fee = receipt.amount_in - receipt.amount_in_after_fee,
        out = receipt.amount_out,
        "swap executed"
    );
    Ok(receipt)
}
