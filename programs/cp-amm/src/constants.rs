/// Denominator for basis-point math (u128 to avoid up-cast noise)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Highest accepted fee: 100 %
pub const MAX_FEE_BPS: u16 = 10_000;

/// Default LP fee: 0.30 %
pub const DEFAULT_FEE_BPS: u16 = 30;
