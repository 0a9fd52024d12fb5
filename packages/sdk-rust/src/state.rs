//! Durable pool snapshots.
//!
//! A state file is a versioned JSON document holding one [`PoolSnapshot`] per
//! pool. Restoring re-validates everything the engine guarantees (fee range,
//! distinct mints, backed LP supply), so a hand-edited file cannot smuggle in
//! a state the engine would never produce.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use cp_amm::{Escrow, LpMint, Pool, PoolConfig, TokenVault, MAX_FEE_BPS};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::types::{opt_pubkey_str, pubkey_str};

/// Current state file layout version.
pub const STATE_VERSION: u32 = 1;

// ─── Snapshot types ───────────────────────────────────────────────────────────

/// One LP holder's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpHolding {
    #[serde(with = "pubkey_str")]
    pub owner: Pubkey,
    pub amount: u64,
}

/// Serialized form of a [`Pool`] with in-memory custody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    #[serde(with = "pubkey_str")]
    pub mint_x: Pubkey,
    #[serde(with = "pubkey_str")]
    pub mint_y: Pubkey,
    pub seed: u64,
    pub fee_bps: u16,
    #[serde(with = "opt_pubkey_str", default)]
    pub authority: Option<Pubkey>,
    pub locked: bool,
    pub reserve_x: u64,
    pub reserve_y: u64,
    #[serde(default)]
    pub lp_holders: Vec<LpHolding>,
}

/// Top-level state file document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFile {
    pub version: u32,
    pub pools: Vec<PoolSnapshot>,
}

impl PoolSnapshot {
    /// Capture a pool's config, reserves, and LP holders.
    pub fn capture(pool: &Pool) -> Self {
        let cfg = pool.config();
        let (reserve_x, reserve_y) = pool.reserves();
        Self {
            mint_x: cfg.mint_x,
            mint_y: cfg.mint_y,
            seed: cfg.seed,
            fee_bps: cfg.fee_bps,
            authority: cfg.authority,
            locked: cfg.locked,
            reserve_x,
            reserve_y,
            lp_holders: pool
                .lp()
                .holdings()
                .map(|(owner, amount)| LpHolding { owner: *owner, amount: *amount })
                .collect(),
        }
    }

    /// Rebuild the pool, rejecting anything the engine could not have produced.
    pub fn restore(&self) -> Result<Pool> {
        if self.fee_bps > MAX_FEE_BPS {
            return Err(self.corrupt(format!("fee_bps {} exceeds {}", self.fee_bps, MAX_FEE_BPS)));
        }
        if self.mint_x == self.mint_y {
            return Err(self.corrupt("mint_x and mint_y are identical".into()));
        }

        let lp = LpMint::from_holdings(self.lp_holders.iter().map(|h| (h.owner, h.amount)))
            .map_err(|e| self.corrupt(format!("LP holdings: {e}")))?;

        let config = PoolConfig {
            seed: self.seed,
            mint_x: self.mint_x,
            mint_y: self.mint_y,
            fee_bps: self.fee_bps,
            authority: self.authority,
            locked: self.locked,
        };
        let pool = Pool::from_parts(
            config,
            TokenVault::with_balance(self.mint_x, self.reserve_x),
            TokenVault::with_balance(self.mint_y, self.reserve_y),
            lp,
        );
        if !pool.invariants_hold() {
            return Err(self.corrupt(format!(
                "reserves ({}, {}) do not match LP supply {}",
                pool.vault_x().balance(),
                pool.vault_y().balance(),
                pool.lp_total_supply()
            )));
        }
        Ok(pool)
    }

    fn corrupt(&self, reason: String) -> Error {
        Error::CorruptSnapshot {
            mint_x: self.mint_x,
            mint_y: self.mint_y,
            seed: self.seed,
            reason,
        }
    }
}

// ─── File I/O ─────────────────────────────────────────────────────────────────

/// Read a state file. A missing file is an empty store.
pub fn load_state(path: &Path) -> Result<Vec<PoolSnapshot>> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no state file yet");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };
    let file: StateFile = serde_json::from_slice(&raw)?;
    if file.version != STATE_VERSION {
        return Err(Error::UnsupportedVersion { found: file.version, expected: STATE_VERSION });
    }
    tracing::debug!(path = %path.display(), pools = file.pools.len(), "state loaded");
    Ok(file.pools)
}

/// Write a state file. Goes through a uniquely named sibling temp file and a
/// rename, so a crash or a concurrent writer never leaves a truncated document.
pub fn save_state(path: &Path, pools: Vec<PoolSnapshot>) -> Result<()> {
    let file = StateFile { version: STATE_VERSION, pools };
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, &file)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    tracing::debug!(path = %path.display(), pools = file.pools.len(), "state saved");
    Ok(())
}

// ─── Cross-process lock ───────────────────────────────────────────────────────

/// Sidecar lock file for a state file: `<state>.lock`.
pub fn lock_path(state_path: &Path) -> PathBuf {
    let mut name = state_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

/// Advisory lock on a state file's sidecar, held across a whole
/// load → apply → save cycle. Two processes holding exclusive locks never
/// overlap, so every acknowledged operation lands in the file. Released on
/// drop.
#[derive(Debug)]
pub struct StateLock {
    file: fs::File,
    path: PathBuf,
}

impl StateLock {
    /// Writer lock; blocks until every other holder has released.
    pub fn exclusive(state_path: &Path) -> Result<Self> {
        let lock = Self::open(state_path)?;
        FileExt::lock_exclusive(&lock.file)?;
        tracing::debug!(path = %lock.path.display(), "state lock acquired (exclusive)");
        Ok(lock)
    }

    /// Reader lock; shared with other readers, excludes writers.
    pub fn shared(state_path: &Path) -> Result<Self> {
        let lock = Self::open(state_path)?;
        FileExt::lock_shared(&lock.file)?;
        tracing::debug!(path = %lock.path.display(), "state lock acquired (shared)");
        Ok(lock)
    }

    fn open(state_path: &Path) -> Result<Self> {
        let path = lock_path(state_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        Ok(Self { file, path })
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(path = %self.path.display(), error = %e, "state lock release failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Pool {
        let lp = Pubkey::new_unique();
        let mut pool = cp_amm::initialize(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            3,
            30,
            Some(Pubkey::new_unique()),
        )
        .unwrap();
        pool.deposit(&lp, 1, 5_000, 20_000).unwrap();
        pool
    }

    #[test]
    fn snapshot_restores_identical_pool() {
        let pool = seeded();
        let snap = PoolSnapshot::capture(&pool);
        assert_eq!(snap.lp_holders.len(), 1);
        assert_eq!(snap.restore().unwrap(), pool);
    }

    #[test]
    fn pubkeys_serialize_as_base58() {
        let pool = seeded();
        let json = serde_json::to_value(PoolSnapshot::capture(&pool)).unwrap();
        assert_eq!(json["mint_x"], pool.config().mint_x.to_string());
        assert!(json["authority"].is_string());
    }

    #[test]
    fn restore_rejects_unbacked_supply() {
        let mut snap = PoolSnapshot::capture(&seeded());
        snap.reserve_x = 0;
        assert!(matches!(snap.restore(), Err(Error::CorruptSnapshot { .. })));
    }

    #[test]
    fn restore_rejects_bad_fee_and_same_mint() {
        let mut snap = PoolSnapshot::capture(&seeded());
        snap.fee_bps = 10_001;
        assert!(matches!(snap.restore(), Err(Error::CorruptSnapshot { .. })));

        let mut snap = PoolSnapshot::capture(&seeded());
        snap.mint_y = snap.mint_x;
        assert!(matches!(snap.restore(), Err(Error::CorruptSnapshot { .. })));
    }

    #[test]
    fn save_replaces_file_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pools.json");
        save_state(&path, vec![PoolSnapshot::capture(&seeded())]).unwrap();
        save_state(&path, vec![]).unwrap();

        assert!(load_state(&path).unwrap().is_empty());
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("pools.json")]);
    }

    #[test]
    fn exclusive_lock_is_held_until_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pools.json");
        let other = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path(&path))
            .unwrap();

        let guard = StateLock::exclusive(&path).unwrap();
        assert!(FileExt::try_lock_shared(&other).is_err());
        drop(guard);
        FileExt::try_lock_exclusive(&other).unwrap();
        FileExt::unlock(&other).unwrap();
    }

    #[test]
    fn shared_locks_coexist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pools.json");
        let a = StateLock::shared(&path).unwrap();
        let b = StateLock::shared(&path).unwrap();
        drop((a, b));
        StateLock::exclusive(&path).unwrap();
    }
}
