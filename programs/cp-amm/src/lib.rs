//! cp-amm: constant-product AMM pool engine.
//!
//! 5 operations:
//!   initialize  create a pool for a mint pair + seed with an immutable fee
//!   deposit     add proportional liquidity (or seed an empty pool), mint LP
//!   swap        x * y = k trade with the fee taken on input
//!   withdraw    burn LP, receive the proportional share of both reserves
//!   set_lock    authority-only switch blocking deposit and swap
//!
//! Custody is abstract: the engine drives the [`Escrow`] and [`LpLedger`]
//! traits and validates everything before the first mutation, so a failed
//! operation leaves the pool untouched.
//!
//! ```
//! use cp_amm::initialize;
//! use solana_sdk::pubkey::Pubkey;
//!
//! let (mint_x, mint_y, lp) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
//! let mut pool = initialize(mint_x, mint_y, 7, 30, None).unwrap();
//! pool.deposit(&lp, 1, 100_000, 100_000).unwrap();
//! let out = pool.swap(&lp, true, 10_000, 0).unwrap().amount_out;
//! assert_eq!(out, 9_066);
//! ```

pub mod constants;
pub mod custody;
pub mod error;
pub mod instructions;
pub mod pool;
pub mod state;

use solana_sdk::pubkey::Pubkey;

pub use constants::*;
pub use custody::{Escrow, LpLedger, LpMint, TokenVault};
pub use error::{AmmError, Result};
pub use pool::Pool;
pub use state::*;

/// Create a pool with empty reserves. See [`instructions::initialize_pool`].
pub fn initialize(
    mint_x: Pubkey,
    mint_y: Pubkey,
    seed: u64,
    fee_bps: u16,
    authority: Option<Pubkey>,
) -> Result<Pool> {
    instructions::initialize_pool::handler(mint_x, mint_y, seed, fee_bps, authority)
}
