//! Parameter and result types.
//!
//! All of these serialize to JSON with pubkeys as base-58 strings, so they can
//! be printed by the CLI or handed to another process as-is.

use cp_amm::{DepositReceipt, PoolConfig, PoolKey, SwapReceipt, WithdrawReceipt};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

// ─── Pubkey as base-58 ────────────────────────────────────────────────────────

pub(crate) mod pubkey_str {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use solana_sdk::pubkey::Pubkey;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(key: &Pubkey, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(key)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Pubkey, D::Error> {
        let raw = String::deserialize(d)?;
        Pubkey::from_str(&raw).map_err(|e| D::Error::custom(format!("bad pubkey '{raw}': {e}")))
    }
}

pub(crate) mod opt_pubkey_str {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
    use solana_sdk::pubkey::Pubkey;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(key: &Option<Pubkey>, s: S) -> Result<S::Ok, S::Error> {
        match key {
            Some(k) => s.collect_str(k),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Pubkey>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|raw| {
                Pubkey::from_str(&raw)
                    .map_err(|e| D::Error::custom(format!("bad pubkey '{raw}': {e}")))
            })
            .transpose()
    }
}

// ─── Params ───────────────────────────────────────────────────────────────────

/// Parameters for creating a pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeParams {
    #[serde(with = "pubkey_str")]
    pub mint_x: Pubkey,
    #[serde(with = "pubkey_str")]
    pub mint_y: Pubkey,
    pub seed: u64,
    pub fee_bps: u16,
    /// Key allowed to lock / unlock; `None` makes the pool permissionless
    #[serde(with = "opt_pubkey_str", default)]
    pub authority: Option<Pubkey>,
}

impl InitializeParams {
    pub fn key(&self) -> PoolKey {
        PoolKey::new(self.mint_x, self.mint_y, self.seed)
    }
}

// ─── Results ──────────────────────────────────────────────────────────────────

/// Pool state as seen by a reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolInfo {
    #[serde(with = "pubkey_str")]
    pub mint_x: Pubkey,
    #[serde(with = "pubkey_str")]
    pub mint_y: Pubkey,
    pub seed: u64,
    pub fee_bps: u16,
    #[serde(with = "opt_pubkey_str")]
    pub authority: Option<Pubkey>,
    pub locked: bool,
    pub reserve_x: u64,
    pub reserve_y: u64,
    pub lp_supply: u64,
    /// Y per X at current reserves; 0.0 for an empty pool. Display only.
    pub spot_price: f64,
}

impl PoolInfo {
    pub(crate) fn new(config: &PoolConfig, reserve_x: u64, reserve_y: u64, lp_supply: u64) -> Self {
        let spot_price = if reserve_x == 0 {
            0.0
        } else {
            reserve_y as f64 / reserve_x as f64
        };
        Self {
            mint_x: config.mint_x,
            mint_y: config.mint_y,
            seed: config.seed,
            fee_bps: config.fee_bps,
            authority: config.authority,
            locked: config.locked,
            reserve_x,
            reserve_y,
            lp_supply,
            spot_price,
        }
    }
}

/// Full fee and slippage breakdown for a hypothetical swap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateResult {
    pub x_to_y: bool,
    pub amount_in: u64,
    /// Part of `amount_in` retained for LPs
    pub lp_fee: u64,
    pub amount_in_after_fee: u64,
    pub estimated_out: u64,
    /// `estimated_out / amount_in`
    pub effective_rate: f64,
    /// `after_fee / (reserve_in + after_fee) * 100`
    pub price_impact_pct: f64,
    pub fee_bps: u16,
    pub reserve_in: u64,
    pub reserve_out: u64,
}

/// Amounts moved by a deposit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DepositResult {
    pub amount_x: u64,
    pub amount_y: u64,
    pub lp_minted: u64,
}

impl From<DepositReceipt> for DepositResult {
    fn from(r: DepositReceipt) -> Self {
        Self { amount_x: r.amount_x, amount_y: r.amount_y, lp_minted: r.lp_minted }
    }
}

/// Amounts moved by a withdraw.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WithdrawResult {
    pub amount_x: u64,
    pub amount_y: u64,
    pub lp_burned: u64,
}

impl From<WithdrawReceipt> for WithdrawResult {
    fn from(r: WithdrawReceipt) -> Self {
        Self { amount_x: r.amount_x, amount_y: r.amount_y, lp_burned: r.lp_burned }
    }
}

/// Amounts moved by a swap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SwapResult {
    pub x_to_y: bool,
    pub amount_in: u64,
    pub lp_fee: u64,
    pub amount_out: u64,
}

impl From<SwapReceipt> for SwapResult {
    fn from(r: SwapReceipt) -> Self {
        Self {
            x_to_y: r.x_to_y,
            amount_in: r.amount_in,
            lp_fee: r.amount_in - r.amount_in_after_fee,
            amount_out: r.amount_out,
        }
    }
}
