use solana_sdk::pubkey::Pubkey;

// ─── PoolKey ───────────────────────────────────────────────────────────────
// Store key for a pool. Mint order matters: (A, B) and (B, A) are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolKey {
    pub mint_x: Pubkey,
    pub mint_y: Pubkey,
    pub seed: u64,
}

impl PoolKey {
    pub fn new(mint_x: Pubkey, mint_y: Pubkey, seed: u64) -> Self {
        Self { mint_x, mint_y, seed }
    }
}

// ─── PoolConfig ────────────────────────────────────────────────────────────
// Root of the pool state machine. Reserves and LP supply are not stored here;
// they are read from the escrows and the LP ledger on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub seed: u64,
    pub mint_x: Pubkey,
    pub mint_y: Pubkey,
    /// Trading fee rate in basis points, fixed at initialization
    pub fee_bps: u16,
    /// Only key allowed to flip `locked`; `None` means never lockable
    pub authority: Option<Pubkey>,
    /// Blocks deposit and swap; withdraw stays open
    pub locked: bool,
}

impl PoolConfig {
    pub fn key(&self) -> PoolKey {
        PoolKey::new(self.mint_x, self.mint_y, self.seed)
    }
}

/// Amounts moved by a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositReceipt {
    pub amount_x: u64,
    pub amount_y: u64,
    pub lp_minted: u64,
}

/// Amounts paid out by a withdraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawReceipt {
    pub amount_x: u64,
    pub amount_y: u64,
    pub lp_burned: u64,
}

/// Amounts moved by a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapReceipt {
    pub x_to_y: bool,
    pub amount_in: u64,
    /// Portion of `amount_in` that priced the trade; the rest is the LP fee
    pub amount_in_after_fee: u64,
    pub amount_out: u64,
}
