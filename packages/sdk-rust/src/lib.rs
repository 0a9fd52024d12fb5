//! cp-amm Rust SDK
//!
//! Pool store and integration layer for the `cp-amm` constant-product engine.
//! Wraps each pool in its own lock, persists pools as JSON snapshots, and
//! previews swaps with exactly the engine's math.
//!
//! # Feature Overview
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`AmmClient::initialize`] | Create a new pool for a mint pair + seed |
//! | [`AmmClient::deposit`] | Deposit tokens, receive LP |
//! | [`AmmClient::swap`] | Atomic token swap |
//! | [`AmmClient::withdraw`] | Burn LP, receive both reserves |
//! | [`AmmClient::set_lock`] | Authority-only lock switch |
//! | [`AmmClient::simulate`] | Fee + slippage breakdown |
//! | [`AmmClient::pool_info`] | Pool reserves, price, fee rate |
//! | [`AmmClient::load`] / [`AmmClient::save`] | JSON state file persistence |
//! | [`StateLock`] | Cross-process lock around a state file |

pub mod client;
pub mod error;
pub mod math;
pub mod state;
pub mod types;

pub use client::AmmClient;
pub use cp_amm::{AmmError, PoolConfig, PoolKey};
pub use error::{Error, Result};
pub use state::StateLock;
pub use types::*;
