//! Integer-only pool math.
//!
//! Every division takes an explicit [`Rounding`]: round up when the caller
//! owes the pool, round down when the caller receives from it.

use crate::{constants::*, error::{AmmError, Result}};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

/// `a * b / d` in u128 with the requested rounding.
pub fn mul_div(a: u128, b: u128, d: u128, rounding: Rounding) -> Result<u128> {
    if d == 0 {
        return Err(AmmError::MathOverflow);
    }
    let product = a.checked_mul(b).ok_or(AmmError::MathOverflow)?;
    let q = product / d;
    match rounding {
        Rounding::Down => Ok(q),
        Rounding::Up if product % d == 0 => Ok(q),
        Rounding::Up => q.checked_add(1).ok_or(AmmError::MathOverflow),
    }
}

/// Narrow a u128 result back to a token amount.
pub fn to_u64(v: u128) -> Result<u64> {
    u64::try_from(v).map_err(|_| AmmError::MathOverflow)
}

// ─── Swap ──────────────────────────────────────────────────────────────────

/// Result of the constant-product pricing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    /// Input that prices the trade; `amount_in - amount_in_after_fee` is the LP fee.
    pub amount_in_after_fee: u64,
    pub amount_out: u64,
}

/// `amount_in * (10000 - fee_bps) / 10000`, rounded down.
pub fn amount_after_fee(amount_in: u64, fee_bps: u16) -> Result<u64> {
    if fee_bps > MAX_FEE_BPS {
        return Err(AmmError::InvalidFee);
    }
    let keep = BPS_DENOMINATOR - fee_bps as u128;
    to_u64(mul_div(amount_in as u128, keep, BPS_DENOMINATOR, Rounding::Down)?)
}

/// Constant-product output with the fee taken on input.
///
/// `out = reserve_out - ceil(reserve_in * reserve_out / (reserve_in + dx))`.
/// Rounding the new output reserve up keeps `k` from ever shrinking.
pub fn compute_swap(
    amount_in: u64,
    fee_bps: u16,
    reserve_in: u64,
    reserve_out: u64,
) -> Result<SwapQuote> {
    if reserve_in == 0 || reserve_out == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    let amount_in_after_fee = amount_after_fee(amount_in, fee_bps)?;

    let r_in = reserve_in as u128;
    let r_out = reserve_out as u128;
    let new_r_in = r_in
        .checked_add(amount_in_after_fee as u128)
        .ok_or(AmmError::MathOverflow)?;
    let new_r_out = mul_div(r_in, r_out, new_r_in, Rounding::Up)?;
    // new_r_in >= r_in, so new_r_out <= r_out
    let amount_out = to_u64(r_out - new_r_out)?;

    Ok(SwapQuote { amount_in_after_fee, amount_out })
}

// ─── Liquidity ─────────────────────────────────────────────────────────────

/// Share of `reserve` backing `lp_amount` out of `lp_supply` units.
pub fn proportional_amount(
    lp_amount: u64,
    reserve: u64,
    lp_supply: u64,
    rounding: Rounding,
) -> Result<u64> {
    if lp_supply == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    to_u64(mul_div(lp_amount as u128, reserve as u128, lp_supply as u128, rounding)?)
}

/// LP minted by the first deposit: `floor(sqrt(x * y))`.
pub fn bootstrap_lp(amount_x: u64, amount_y: u64) -> Result<u64> {
    let product = (amount_x as u128)
        .checked_mul(amount_y as u128)
        .ok_or(AmmError::MathOverflow)?;
    // sqrt of a u64*u64 product always fits in u64
    to_u64(isqrt(product))
}

// ─── Integer square root (Babylonian method) ──────────────────────────────
pub fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    // (x + 1) / 2 without overflowing at u128::MAX
    let mut y = (x >> 1) + (x & 1);
    while y < x {
        x = y;
        y = (y + n / y) >> 1;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_rounds_in_requested_direction() {
        assert_eq!(mul_div(10, 10, 3, Rounding::Down).unwrap(), 33);
        assert_eq!(mul_div(10, 10, 3, Rounding::Up).unwrap(), 34);
        assert_eq!(mul_div(9, 10, 3, Rounding::Up).unwrap(), 30);
        assert_eq!(mul_div(1, 1, 0, Rounding::Down), Err(AmmError::MathOverflow));
        assert_eq!(
            mul_div(u128::MAX, 2, 1, Rounding::Down),
            Err(AmmError::MathOverflow)
        );
    }

    #[test]
    fn fee_rounds_in_pool_favor() {
        assert_eq!(amount_after_fee(10_000, 30).unwrap(), 9_970);
        // 333 * 9970 / 10000 = 331.998 → 331
        assert_eq!(amount_after_fee(333, 30).unwrap(), 331);
        assert_eq!(amount_after_fee(1, 30).unwrap(), 0);
        assert_eq!(amount_after_fee(500, 0).unwrap(), 500);
        assert_eq!(amount_after_fee(500, 10_000).unwrap(), 0);
        assert_eq!(amount_after_fee(500, 10_001), Err(AmmError::InvalidFee));
    }

    #[test]
    fn reference_swap_30bps() {
        let q = compute_swap(10_000, 30, 100_000, 100_000).unwrap();
        assert_eq!(q.amount_in_after_fee, 9_970);
        // 100000 - ceil(1e10 / 109970) = 100000 - 90934
        assert_eq!(q.amount_out, 9_066);
        let k_before = 100_000u128 * 100_000;
        let k_after = (100_000u128 + 10_000) * (100_000u128 - 9_066);
        assert!(k_after > k_before);
    }

    #[test]
    fn swap_against_empty_reserve_fails() {
        assert_eq!(compute_swap(10, 30, 0, 100), Err(AmmError::InsufficientLiquidity));
        assert_eq!(compute_swap(10, 30, 100, 0), Err(AmmError::InsufficientLiquidity));
    }

    #[test]
    fn swap_never_drains_output_reserve() {
        let q = compute_swap(u64::MAX / 2, 0, 1_000, 1_000).unwrap();
        assert!(q.amount_out < 1_000);
    }

    #[test]
    fn swap_prices_at_u64_edge() {
        assert_eq!(compute_swap(u64::MAX, 0, u64::MAX, 10).unwrap().amount_out, 5);
        assert!(compute_swap(u64::MAX, 0, u64::MAX, u64::MAX).is_ok());
    }

    #[test]
    fn proportional_rounding() {
        assert_eq!(proportional_amount(1, 10, 3, Rounding::Down).unwrap(), 3);
        assert_eq!(proportional_amount(1, 10, 3, Rounding::Up).unwrap(), 4);
        assert_eq!(
            proportional_amount(1, 10, 0, Rounding::Down),
            Err(AmmError::InsufficientLiquidity)
        );
    }

    #[test]
    fn bootstrap_is_geometric_mean() {
        assert_eq!(bootstrap_lp(100_000, 100_000).unwrap(), 100_000);
        assert_eq!(bootstrap_lp(4, 9).unwrap(), 6);
        assert_eq!(bootstrap_lp(2, 3).unwrap(), 2);
        assert_eq!(bootstrap_lp(u64::MAX, u64::MAX).unwrap(), u64::MAX);
    }

    #[test]
    fn isqrt_floors() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(u128::MAX), u64::MAX as u128);
    }
}
