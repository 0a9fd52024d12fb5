//! SDK error type.

use cp_amm::AmmError;
use solana_sdk::pubkey::Pubkey;

/// All errors returned by the cp-amm SDK.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── Engine ───────────────────────────────────────────────────────────────
    /// The pool engine rejected the operation; no state was changed.
    #[error(transparent)]
    Amm(#[from] AmmError),

    // ── Persistence ──────────────────────────────────────────────────────────
    #[error("State file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("State file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A snapshot decoded but describes a pool the engine would never produce.
    #[error("Corrupt snapshot for pool {mint_x}/{mint_y} seed {seed}: {reason}")]
    CorruptSnapshot {
        mint_x: Pubkey,
        mint_y: Pubkey,
        seed: u64,
        reason: String,
    },

    #[error("Unsupported state file version {found}; expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    // ── Validation ───────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// The engine error behind this one, if any.
    pub fn amm(&self) -> Option<AmmError> {
        match self {
            Error::Amm(e) => Some(*e),
            _ => None,
        }
    }
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
