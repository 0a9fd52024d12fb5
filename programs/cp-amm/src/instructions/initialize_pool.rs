use solana_sdk::pubkey::Pubkey;

use crate::{
    constants::MAX_FEE_BPS,
    custody::{LpMint, TokenVault},
    error::{AmmError, Result},
    pool::Pool,
    state::PoolConfig,
};

/// Create a constant-product pool with empty reserves and zero LP supply.
/// The fee is fixed here for the life of the pool. No LP is minted; the first
/// deposit sets the price.
///
/// Uniqueness of `(mint_x, mint_y, seed)` is the store's job; see
/// `DuplicatePool`.
pub fn handler(
    mint_x: Pubkey,
    mint_y: Pubkey,
    seed: u64,
    fee_bps: u16,
    authority: Option<Pubkey>,
) -> Result<Pool> {
    if fee_bps > MAX_FEE_BPS {
        return Err(AmmError::InvalidFee);
    }
    if mint_x == mint_y {
        return Err(AmmError::SameMint);
    }

    let config = PoolConfig {
        seed,
        mint_x,
        mint_y,
        fee_bps,
        authority,
        locked: false,
    };

    tracing::info!(
        %mint_x,
        %mint_y,
        seed,
        fee_bps,
        has_authority = authority.is_some(),
        "pool created"
    );
    Ok(Pool::from_parts(
        config,
        TokenVault::new(mint_x),
        TokenVault::new(mint_y),
        LpMint::new(),
    ))
}
