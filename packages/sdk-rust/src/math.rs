//! Fee constants and simulation math.
//!
//! Calls straight into the engine's `fee_math` so off-chain estimates match
//! executed swaps exactly.

use cp_amm::instructions::fee_math::{self, Rounding};
use cp_amm::{AmmError, Pool, BPS_DENOMINATOR};

use crate::error::Result;
use crate::types::SimulateResult;

// ─── Simulation ───────────────────────────────────────────────────────────────

/// Full fee and slippage breakdown for a hypothetical swap against `pool`.
///
/// Unlike a real swap this does not apply the slippage floor or reject a
/// zero output; it just reports what the engine would compute.
pub fn simulate_detailed(pool: &Pool, x_to_y: bool, amount_in: u64) -> Result<SimulateResult> {
    if amount_in == 0 {
        return Err(AmmError::InvalidAmount.into());
    }
    let (reserve_x, reserve_y) = pool.reserves();
    let (reserve_in, reserve_out) = if x_to_y {
        (reserve_x, reserve_y)
    } else {
        (reserve_y, reserve_x)
    };
    let fee_bps = pool.config().fee_bps;

    let q = fee_math::compute_swap(amount_in, fee_bps, reserve_in, reserve_out)?;

    let effective_rate = q.amount_out as f64 / amount_in as f64;
    let after_fee = q.amount_in_after_fee as f64;
    let price_impact_pct = after_fee / (reserve_in as f64 + after_fee) * 100.0;

    Ok(SimulateResult {
        x_to_y,
        amount_in,
        lp_fee: amount_in - q.amount_in_after_fee,
        amount_in_after_fee: q.amount_in_after_fee,
        estimated_out: q.amount_out,
        effective_rate,
        price_impact_pct,
        fee_bps,
        reserve_in,
        reserve_out,
    })
}

/// Slippage floor for a quoted output: `estimated * (10000 - bps) / 10000`,
/// rounded down.
pub fn min_amount_out(estimated_out: u64, max_slippage_bps: u16) -> Result<u64> {
    if max_slippage_bps as u128 > BPS_DENOMINATOR {
        return Err(crate::Error::InvalidArgument(format!(
            "max slippage {max_slippage_bps} bps exceeds 10000"
        )));
    }
    let keep = BPS_DENOMINATOR - max_slippage_bps as u128;
    let floor = fee_math::mul_div(estimated_out as u128, keep, BPS_DENOMINATOR, Rounding::Down)?;
    Ok(fee_math::to_u64(floor)?)
}
