use solana_sdk::pubkey::Pubkey;

use crate::{
    custody::{Escrow, LpLedger},
    error::{AmmError, Result},
    pool::Pool,
};

/// Flip the pool's lock. Only the stored authority may call this; a pool
/// created without one can never be locked.
pub fn handler<E: Escrow, L: LpLedger>(
    pool: &mut Pool<E, L>,
    caller: &Pubkey,
    locked: bool,
) -> Result<()> {
    match pool.config.authority {
        Some(authority) if authority == *caller => {}
        _ => return Err(AmmError::Unauthorized),
    }

    pool.config.locked = locked;
    tracing::info!(pool_seed = pool.config.seed, %caller, locked, "pool lock updated");
    Ok(())
}
