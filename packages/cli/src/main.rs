use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use cp_amm::{AmmError, DEFAULT_FEE_BPS, MAX_FEE_BPS};
use cp_amm_sdk::{math::min_amount_out, AmmClient, InitializeParams, PoolKey, StateLock};
use serde_json::json;
use solana_sdk::pubkey::Pubkey;
use tracing_subscriber::EnvFilter;

const DEFAULT_STATE_FILE: &str = "cp-amm-state.json";
const DEFAULT_SLIPPAGE_BPS: u16 = 50;

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn parse_pubkey(raw: &str) -> std::result::Result<Pubkey, String> {
    Pubkey::from_str(raw).map_err(|e| format!("'{raw}' is not a base-58 pubkey: {e}"))
}

/// Shortened address for human output: first and last four characters.
fn short(key: &Pubkey) -> String {
    let addr = key.to_string();
    format!("{}…{}", &addr[..4], &addr[addr.len() - 4..])
}

fn label(key: &PoolKey) -> String {
    format!("{}/{}#{}", short(&key.mint_x), short(&key.mint_y), key.seed)
}

/// Operator-facing hint for an engine rejection.
fn hint(err: &AmmError) -> Option<&'static str> {
    match err {
        AmmError::NotFound => Some("Run `cp-amm init` for this mint pair and seed first."),
        AmmError::DuplicatePool => Some("Pick a different --seed to create a second pool for this pair."),
        AmmError::PoolLocked => Some("The pool authority must run `cp-amm unlock`. Withdrawals still work."),
        AmmError::SlippageExceeded => Some("Raise --max-slippage-bps or lower --min-out and retry."),
        AmmError::InsufficientLiquidity => Some("Seed the pool with `cp-amm deposit` first."),
        AmmError::Unauthorized => Some("Only the pool authority may lock or unlock; check --caller."),
        _ => None,
    }
}

/// Attach the engine hint (if any) and a short operation label to an SDK error.
fn explain(op: &str, key: &PoolKey, err: cp_amm_sdk::Error) -> anyhow::Error {
    let hint = err.amm().as_ref().and_then(hint);
    let err = anyhow::Error::new(err).context(format!("{op} on pool {} failed", label(key)));
    match hint {
        Some(h) => err.context(h),
        None => err,
    }
}

fn direction(x_to_y: bool) -> &'static str {
    if x_to_y {
        "X → Y"
    } else {
        "Y → X"
    }
}

// ─── CLI definition ───────────────────────────────────────────────────────────

/// cp-amm: constant-product AMM pools over a local JSON state file.
///
/// Every command supports --json for machine-readable output.
/// Global options can also be set via environment variables:
///   CP_AMM_STATE   path to the pool state file
///   CP_AMM_CALLER  pubkey acting as depositor, trader, or authority
#[derive(Parser)]
#[command(
    name    = "cp-amm",
    version = env!("CARGO_PKG_VERSION"),
    about   = "Constant-product (x·y=k) liquidity pools with fee-on-input swaps.",
    after_help = "\
ENVIRONMENT:
  CP_AMM_STATE   Pool state file  [default: cp-amm-state.json]
  CP_AMM_CALLER  Base-58 pubkey of the acting party
  RUST_LOG       Log filter for stderr diagnostics  [default: warn]

QUICK START:
  cp-amm init      --mint-x <X> --mint-y <Y> --fee-bps 30 --authority <KEY>
  cp-amm deposit   --mint-x <X> --mint-y <Y> --lp-amount 1 --max-x 100000 --max-y 100000
  cp-amm simulate  --mint-x <X> --mint-y <Y> --direction x-to-y --amount 10000
  cp-amm swap      --mint-x <X> --mint-y <Y> --direction x-to-y --amount 10000
  cp-amm withdraw  --mint-x <X> --mint-y <Y> --lp-amount 50000"
)]
struct Cli {
    /// Pool state file (created on first write)
    #[arg(
        long,
        global        = true,
        value_name    = "PATH",
        default_value = DEFAULT_STATE_FILE,
        env           = "CP_AMM_STATE"
    )]
    state: PathBuf,

    /// Pubkey of the acting party (depositor, trader, LP owner, or authority)
    #[arg(
        long,
        global       = true,
        value_name   = "PUBKEY",
        value_parser = parse_pubkey,
        env          = "CP_AMM_CALLER"
    )]
    caller: Option<Pubkey>,

    /// Output machine-readable JSON instead of human-readable text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Pool address: ordered mint pair plus seed.
#[derive(Args, Clone, Copy)]
struct PoolArgs {
    /// Mint of the X side
    #[arg(long, value_name = "PUBKEY", value_parser = parse_pubkey)]
    mint_x: Pubkey,

    /// Mint of the Y side
    #[arg(long, value_name = "PUBKEY", value_parser = parse_pubkey)]
    mint_y: Pubkey,

    /// Distinguishes several pools over the same mint pair
    #[arg(long, value_name = "U64", default_value_t = 0)]
    seed: u64,
}

impl PoolArgs {
    fn key(&self) -> PoolKey {
        PoolKey::new(self.mint_x, self.mint_y, self.seed)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    /// Sell X, receive Y
    XToY,
    /// Sell Y, receive X
    YToX,
}

impl Direction {
    fn x_to_y(self) -> bool {
        self == Direction::XToY
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty pool for a mint pair and seed
    #[command(
        after_help = "\
EXAMPLES:
  # 0.30% fee, lockable by <KEY>
  cp-amm init --mint-x <X> --mint-y <Y> --fee-bps 30 --authority <KEY>

  # Second, permissionless pool over the same pair
  cp-amm init --mint-x <X> --mint-y <Y> --seed 1

NOTES:
  The fee is fixed for the life of the pool. Range 0–10000 bps.
  Without --authority the pool can never be locked."
    )]
    Init {
        #[command(flatten)]
        pool: PoolArgs,

        /// Swap fee in basis points (1 bp = 0.01%)
        #[arg(long, value_name = "BPS", default_value_t = DEFAULT_FEE_BPS)]
        fee_bps: u16,

        /// Key allowed to lock and unlock the pool
        #[arg(long, value_name = "PUBKEY", value_parser = parse_pubkey)]
        authority: Option<Pubkey>,
    },

    /// Add liquidity and receive LP tokens
    #[command(
        after_help = "\
EXAMPLES:
  # Seed an empty pool: LP minted = floor(sqrt(max_x * max_y))
  cp-amm deposit --mint-x <X> --mint-y <Y> --lp-amount 1 --max-x 100000 --max-y 100000

  # Mint 5000 LP from a funded pool, spending at most 6000 of each side
  cp-amm deposit --mint-x <X> --mint-y <Y> --lp-amount 5000 --max-x 6000 --max-y 6000"
    )]
    Deposit {
        #[command(flatten)]
        pool: PoolArgs,

        /// LP tokens to mint (ignored when seeding an empty pool, but must be > 0)
        #[arg(long, value_name = "AMOUNT")]
        lp_amount: u64,

        /// Most X you are willing to deposit
        #[arg(long, value_name = "AMOUNT")]
        max_x: u64,

        /// Most Y you are willing to deposit
        #[arg(long, value_name = "AMOUNT")]
        max_y: u64,
    },

    /// Swap one side of the pool for the other
    #[command(
        after_help = "\
EXAMPLES:
  cp-amm swap --mint-x <X> --mint-y <Y> --direction x-to-y --amount 10000
  cp-amm swap --mint-x <X> --mint-y <Y> --direction y-to-x --amount 500 --min-out 480

NOTES:
  Without --min-out the floor is the simulated output minus --max-slippage-bps."
    )]
    Swap {
        #[command(flatten)]
        pool: PoolArgs,

        #[arg(long, value_enum)]
        direction: Direction,

        /// Input amount (atomic units)
        #[arg(long, value_name = "AMOUNT")]
        amount: u64,

        /// Explicit minimum output; overrides --max-slippage-bps
        #[arg(long, value_name = "AMOUNT")]
        min_out: Option<u64>,

        /// Tolerance below the simulated output, in basis points
        #[arg(long, value_name = "BPS", default_value_t = DEFAULT_SLIPPAGE_BPS)]
        max_slippage_bps: u16,
    },

    /// Burn LP tokens and receive both sides
    Withdraw {
        #[command(flatten)]
        pool: PoolArgs,

        /// LP tokens to burn
        #[arg(long, value_name = "AMOUNT")]
        lp_amount: u64,

        /// Minimum X to receive
        #[arg(long, value_name = "AMOUNT", default_value_t = 0)]
        min_x: u64,

        /// Minimum Y to receive
        #[arg(long, value_name = "AMOUNT", default_value_t = 0)]
        min_y: u64,
    },

    /// Block deposits and swaps (authority only)
    Lock {
        #[command(flatten)]
        pool: PoolArgs,
    },

    /// Re-enable deposits and swaps (authority only)
    Unlock {
        #[command(flatten)]
        pool: PoolArgs,
    },

    /// Show reserves, LP supply, fee, and spot price
    #[command(name = "pool-info")]
    PoolInfo {
        #[command(flatten)]
        pool: PoolArgs,
    },

    /// Preview a swap without executing it
    Simulate {
        #[command(flatten)]
        pool: PoolArgs,

        #[arg(long, value_enum)]
        direction: Direction,

        /// Input amount (atomic units)
        #[arg(long, value_name = "AMOUNT")]
        amount: u64,
    },

    /// LP balance of an owner (defaults to --caller)
    Balance {
        #[command(flatten)]
        pool: PoolArgs,

        #[arg(long, value_name = "PUBKEY", value_parser = parse_pubkey)]
        owner: Option<Pubkey>,
    },
}

impl Commands {
    fn mutates(&self) -> bool {
        !matches!(
            self,
            Commands::PoolInfo { .. } | Commands::Simulate { .. } | Commands::Balance { .. }
        )
    }
}

impl Cli {
    fn caller(&self) -> Result<Pubkey> {
        self.caller.ok_or_else(|| {
            anyhow!(
                "This command needs an acting party.\n  \
                 Pass --caller <PUBKEY> or set CP_AMM_CALLER."
            )
        })
    }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if std::env::args().len() == 1 {
        Cli::command().print_long_help().ok();
        println!();
        return Ok(());
    }

    let cli = Cli::parse();
    run(&cli)
}

/// One invocation: lock, load, apply, save. The lock spans the whole cycle so
/// overlapping invocations on the same state file run one after another.
fn run(cli: &Cli) -> Result<()> {
    let _lock = if cli.command.mutates() {
        StateLock::exclusive(&cli.state)
    } else {
        StateLock::shared(&cli.state)
    }
    .with_context(|| format!("Cannot lock pool state '{}'", cli.state.display()))?;

    let client = AmmClient::load(&cli.state)
        .with_context(|| format!("Cannot load pool state from '{}'", cli.state.display()))?;

    dispatch(cli, &client)?;

    if cli.command.mutates() {
        save(&client, &cli.state)?;
    }
    Ok(())
}

fn save(client: &AmmClient, path: &Path) -> Result<()> {
    client
        .save(path)
        .with_context(|| format!("Cannot write pool state to '{}'", path.display()))
}

fn dispatch(cli: &Cli, client: &AmmClient) -> Result<()> {
    let json_output = cli.json;
    match &cli.command {
        Commands::Init { pool, fee_bps, authority } => {
            cmd_init(client, pool, *fee_bps, *authority, json_output)
        }
        Commands::Deposit { pool, lp_amount, max_x, max_y } => {
            cmd_deposit(client, &cli.caller()?, pool, *lp_amount, *max_x, *max_y, json_output)
        }
        Commands::Swap { pool, direction, amount, min_out, max_slippage_bps } => cmd_swap(
            client,
            &cli.caller()?,
            pool,
            direction.x_to_y(),
            *amount,
            *min_out,
            *max_slippage_bps,
            json_output,
        ),
        Commands::Withdraw { pool, lp_amount, min_x, min_y } => {
            cmd_withdraw(client, &cli.caller()?, pool, *lp_amount, *min_x, *min_y, json_output)
        }
        Commands::Lock { pool } => cmd_set_lock(client, &cli.caller()?, pool, true, json_output),
        Commands::Unlock { pool } => cmd_set_lock(client, &cli.caller()?, pool, false, json_output),
        Commands::PoolInfo { pool } => cmd_pool_info(client, pool, json_output),
        Commands::Simulate { pool, direction, amount } => {
            cmd_simulate(client, pool, direction.x_to_y(), *amount, json_output)
        }
        Commands::Balance { pool, owner } => {
            let owner = match owner {
                Some(o) => *o,
                None => cli.caller().context("balance needs --owner or --caller")?,
            };
            cmd_balance(client, pool, &owner, json_output)
        }
    }
}

// ─── init ─────────────────────────────────────────────────────────────────────

fn cmd_init(
    client: &AmmClient,
    pool: &PoolArgs,
    fee_bps: u16,
    authority: Option<Pubkey>,
    json_output: bool,
) -> Result<()> {
    if fee_bps > MAX_FEE_BPS {
        return Err(anyhow!(
            "--fee-bps {fee_bps} is out of range. Allowed: 0–{MAX_FEE_BPS}."
        ));
    }
    let key = pool.key();
    let config = client
        .initialize(InitializeParams {
            mint_x: pool.mint_x,
            mint_y: pool.mint_y,
            seed: pool.seed,
            fee_bps,
            authority,
        })
        .map_err(|e| explain("init", &key, e))?;

    if json_output {
        println!("{}", json!({
            "status":    "ok",
            "command":   "init",
            "mint_x":    config.mint_x.to_string(),
            "mint_y":    config.mint_y.to_string(),
            "seed":      config.seed,
            "fee_bps":   config.fee_bps,
            "authority": config.authority.map(|a| a.to_string()),
        }));
    } else {
        println!("─── Pool Created ─────────────────────────────────────────────────");
        println!("  Mint X           {}", config.mint_x);
        println!("  Mint Y           {}", config.mint_y);
        println!("  Seed             {:>20}", config.seed);
        println!("  Fee rate         {} bps  ({:.2}% per swap)",
                 config.fee_bps, config.fee_bps as f64 / 100.0);
        match config.authority {
            Some(a) => println!("  Authority        {a}"),
            None => println!("  Authority        none (pool cannot be locked)"),
        }
        println!();
        println!("  Pool is empty. Run `cp-amm deposit` to seed it.");
    }
    Ok(())
}

// ─── deposit ──────────────────────────────────────────────────────────────────

fn cmd_deposit(
    client: &AmmClient,
    caller: &Pubkey,
    pool: &PoolArgs,
    lp_amount: u64,
    max_x: u64,
    max_y: u64,
    json_output: bool,
) -> Result<()> {
    let key = pool.key();
    let out = client
        .deposit(&key, caller, lp_amount, max_x, max_y)
        .map_err(|e| explain("deposit", &key, e))?;
    let balance = client.lp_balance(&key, caller)?;

    if json_output {
        println!("{}", json!({
            "status":     "ok",
            "command":    "deposit",
            "pool":       label(&key),
            "depositor":  caller.to_string(),
            "amount_x":   out.amount_x,
            "amount_y":   out.amount_y,
            "lp_minted":  out.lp_minted,
            "lp_balance": balance,
        }));
    } else {
        println!("─── Liquidity Added ──────────────────────────────────────────────");
        println!("  Pool             {}", label(&key));
        println!("  Deposited X      {:>20}  (max {})", out.amount_x, max_x);
        println!("  Deposited Y      {:>20}  (max {})", out.amount_y, max_y);
        println!("  LP minted        {:>20}", out.lp_minted);
        println!("  LP balance       {:>20}", balance);
    }
    Ok(())
}

// ─── swap ─────────────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn cmd_swap(
    client: &AmmClient,
    caller: &Pubkey,
    pool: &PoolArgs,
    x_to_y: bool,
    amount: u64,
    min_out: Option<u64>,
    max_slippage_bps: u16,
    json_output: bool,
) -> Result<()> {
    let key = pool.key();
    let min_out = match min_out {
        Some(m) => m,
        None => {
            let sim = client
                .simulate(&key, x_to_y, amount)
                .map_err(|e| explain("swap", &key, e))?;
            min_amount_out(sim.estimated_out, max_slippage_bps).context("--max-slippage-bps")?
        }
    };
    tracing::debug!(pool = %label(&key), amount, min_out, "submitting swap");

    let out = client
        .swap(&key, caller, x_to_y, amount, min_out)
        .map_err(|e| explain("swap", &key, e))?;

    if json_output {
        println!("{}", json!({
            "status":     "ok",
            "command":    "swap",
            "pool":       label(&key),
            "trader":     caller.to_string(),
            "x_to_y":     out.x_to_y,
            "amount_in":  out.amount_in,
            "lp_fee":     out.lp_fee,
            "amount_out": out.amount_out,
            "min_out":    min_out,
        }));
    } else {
        println!("─── Swap Executed ────────────────────────────────────────────────");
        println!("  Pool             {}  [{}]", label(&key), direction(x_to_y));
        println!("  Amount in        {:>20}", out.amount_in);
        println!("  LP fee           {:>20}", out.lp_fee);
        println!("  Amount out       {:>20}", out.amount_out);
        println!("  Min out guard    {:>20}", min_out);
    }
    Ok(())
}

// ─── withdraw ─────────────────────────────────────────────────────────────────

fn cmd_withdraw(
    client: &AmmClient,
    caller: &Pubkey,
    pool: &PoolArgs,
    lp_amount: u64,
    min_x: u64,
    min_y: u64,
    json_output: bool,
) -> Result<()> {
    let key = pool.key();
    let out = client
        .withdraw(&key, caller, lp_amount, min_x, min_y)
        .map_err(|e| explain("withdraw", &key, e))?;
    let balance = client.lp_balance(&key, caller)?;

    if json_output {
        println!("{}", json!({
            "status":     "ok",
            "command":    "withdraw",
            "pool":       label(&key),
            "owner":      caller.to_string(),
            "lp_burned":  out.lp_burned,
            "amount_x":   out.amount_x,
            "amount_y":   out.amount_y,
            "lp_balance": balance,
        }));
    } else {
        println!("─── Liquidity Removed ────────────────────────────────────────────");
        println!("  Pool             {}", label(&key));
        println!("  LP burnt         {:>20}", out.lp_burned);
        println!("  Received X       {:>20}", out.amount_x);
        println!("  Received Y       {:>20}", out.amount_y);
        if min_x > 0 || min_y > 0 {
            println!("  Min X guard      {:>20}", min_x);
            println!("  Min Y guard      {:>20}", min_y);
        }
        println!("  LP balance       {:>20}", balance);
    }
    Ok(())
}

// ─── lock / unlock ────────────────────────────────────────────────────────────

fn cmd_set_lock(
    client: &AmmClient,
    caller: &Pubkey,
    pool: &PoolArgs,
    locked: bool,
    json_output: bool,
) -> Result<()> {
    let key = pool.key();
    let op = if locked { "lock" } else { "unlock" };
    client
        .set_lock(&key, caller, locked)
        .map_err(|e| explain(op, &key, e))?;

    if json_output {
        println!("{}", json!({
            "status":  "ok",
            "command": op,
            "pool":    label(&key),
            "locked":  locked,
        }));
    } else if locked {
        println!("  Pool {} locked. Deposits and swaps are blocked; withdrawals still work.",
                 label(&key));
    } else {
        println!("  Pool {} unlocked.", label(&key));
    }
    Ok(())
}

// ─── pool-info ────────────────────────────────────────────────────────────────

fn cmd_pool_info(client: &AmmClient, pool: &PoolArgs, json_output: bool) -> Result<()> {
    let key = pool.key();
    let info = client.pool_info(&key).map_err(|e| explain("pool-info", &key, e))?;

    if json_output {
        println!("{}", json!({
            "status":             "ok",
            "command":            "pool-info",
            "mint_x":             info.mint_x.to_string(),
            "mint_y":             info.mint_y.to_string(),
            "seed":               info.seed,
            "reserve_x":          info.reserve_x,
            "reserve_y":          info.reserve_y,
            "lp_supply":          info.lp_supply,
            "fee_bps":            info.fee_bps,
            "fee_pct":            info.fee_bps as f64 / 100.0,
            "authority":          info.authority.map(|a| a.to_string()),
            "locked":             info.locked,
            "spot_price_y_per_x": info.spot_price,
        }));
    } else {
        println!("─── Pool Info: {} ─────────────────────────────────", label(&key));
        println!("  Mint X           {}", info.mint_x);
        println!("  Reserve X        {:>20}", info.reserve_x);
        println!();
        println!("  Mint Y           {}", info.mint_y);
        println!("  Reserve Y        {:>20}", info.reserve_y);
        println!();
        println!("  LP supply        {:>20}", info.lp_supply);
        println!("  Fee rate         {} bps  ({:.2}% per swap)",
                 info.fee_bps, info.fee_bps as f64 / 100.0);
        match info.authority {
            Some(a) => println!("  Authority        {a}"),
            None => println!("  Authority        none"),
        }
        println!("  Locked           {}", if info.locked { "yes" } else { "no" });
        if info.reserve_x > 0 {
            println!("  Spot price       {:.8}  Y/X  (raw atomic units)", info.spot_price);
        } else {
            println!("  Spot price       n/a (pool is empty, no liquidity)");
        }
    }
    Ok(())
}

// ─── simulate ─────────────────────────────────────────────────────────────────

fn cmd_simulate(
    client: &AmmClient,
    pool: &PoolArgs,
    x_to_y: bool,
    amount: u64,
    json_output: bool,
) -> Result<()> {
    if amount == 0 {
        return Err(anyhow!("--amount must be > 0 (atomic units)"));
    }
    let key = pool.key();
    let sim = client
        .simulate(&key, x_to_y, amount)
        .map_err(|e| explain("simulate", &key, e))?;

    if json_output {
        println!("{}", json!({
            "status":           "ok",
            "command":          "simulate",
            "pool":             label(&key),
            "x_to_y":           sim.x_to_y,
            "amount_in":        sim.amount_in,
            "lp_fee":           sim.lp_fee,
            "after_fee":        sim.amount_in_after_fee,
            "estimated_out":    sim.estimated_out,
            "effective_rate":   sim.effective_rate,
            "price_impact_pct": sim.price_impact_pct,
            "fee_bps":          sim.fee_bps,
            "reserve_in":       sim.reserve_in,
            "reserve_out":      sim.reserve_out,
        }));
    } else {
        println!("─── Swap Simulation ──────────────────────────────────────────────");
        println!("  Pool             {}  [{}]", label(&key), direction(x_to_y));
        println!("  Reserve in       {:>20}", sim.reserve_in);
        println!("  Reserve out      {:>20}", sim.reserve_out);
        println!();
        println!("  ─── Fee Breakdown ────────────────────────────────");
        println!("  Amount in        {:>20}", sim.amount_in);
        println!("  LP fee           {:>20}  ({:.2}%  →  reserves)",
                 sim.lp_fee, sim.fee_bps as f64 / 100.0);
        println!("  After fee        {:>20}", sim.amount_in_after_fee);
        println!();
        println!("  ─── Output Estimate ──────────────────────────────");
        println!("  Estimated out    {:>20}", sim.estimated_out);
        println!("  Effective rate   {:>20.8}", sim.effective_rate);
        println!("  Price impact     {:>19.4}%", sim.price_impact_pct);
        println!();
        println!("  Nothing executed.");
    }
    Ok(())
}

// ─── balance ──────────────────────────────────────────────────────────────────

fn cmd_balance(client: &AmmClient, pool: &PoolArgs, owner: &Pubkey, json_output: bool) -> Result<()> {
    let key = pool.key();
    let balance = client
        .lp_balance(&key, owner)
        .map_err(|e| explain("balance", &key, e))?;
    let supply = client.pool_info(&key)?.lp_supply;
    let share_pct = if supply > 0 {
        balance as f64 / supply as f64 * 100.0
    } else {
        0.0
    };

    if json_output {
        println!("{}", json!({
            "status":     "ok",
            "command":    "balance",
            "pool":       label(&key),
            "owner":      owner.to_string(),
            "lp_balance": balance,
            "lp_supply":  supply,
            "share_pct":  share_pct,
        }));
    } else {
        println!("─── LP Balance ───────────────────────────────────────────────────");
        println!("  Pool             {}", label(&key));
        println!("  Owner            {owner}");
        println!("  LP balance       {:>20}", balance);
        println!("  Pool share       {:>19.4}%", share_pct);
    }
    Ok(())
}
