/// Every way a pool operation can be rejected.
///
/// All variants are raised before any escrow or LP state is touched, so a
/// returned error always means "nothing happened".
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmmError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("Fee rate must be 0–10000 bps")]
    InvalidFee,
    #[error("Pool already exists for this mint pair and seed")]
    DuplicatePool,
    #[error("Pool is locked")]
    PoolLocked,
    #[error("Slippage exceeded")]
    SlippageExceeded,
    #[error("Pool has insufficient liquidity")]
    InsufficientLiquidity,
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("Caller is not the pool authority")]
    Unauthorized,
    #[error("Pool not found")]
    NotFound,
    #[error("Pool mints must differ")]
    SameMint,
    #[error("Math overflow")]
    MathOverflow,
}

pub type Result<T> = std::result::Result<T, AmmError>;
