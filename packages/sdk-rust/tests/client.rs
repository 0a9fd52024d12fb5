use std::sync::Arc;

use cp_amm_sdk::{AmmClient, AmmError, Error, InitializeParams, PoolKey};
use solana_sdk::pubkey::Pubkey;

fn params(seed: u64, authority: Option<Pubkey>) -> InitializeParams {
    InitializeParams {
        mint_x: Pubkey::new_unique(),
        mint_y: Pubkey::new_unique(),
        seed,
        fee_bps: 30,
        authority,
    }
}

fn seeded(client: &AmmClient, lp: &Pubkey, authority: Option<Pubkey>) -> PoolKey {
    let p = params(1, authority);
    let key = p.key();
    client.initialize(p).unwrap();
    client.deposit(&key, lp, 1, 100_000, 100_000).unwrap();
    key
}

#[test]
fn initialize_rejects_duplicate_key() {
    let client = AmmClient::new();
    let p = params(9, None);
    let config = client.initialize(p.clone()).unwrap();
    assert_eq!(config.fee_bps, 30);
    assert!(!config.locked);

    let err = client.initialize(p.clone()).unwrap_err();
    assert_eq!(err.amm(), Some(AmmError::DuplicatePool));

    // Same mints, different seed is a different pool.
    client.initialize(InitializeParams { seed: 10, ..p }).unwrap();
    assert_eq!(client.keys().len(), 2);
}

#[test]
fn reversed_mints_are_a_distinct_pool() {
    let client = AmmClient::new();
    let p = params(0, None);
    client.initialize(p.clone()).unwrap();
    client
        .initialize(InitializeParams { mint_x: p.mint_y, mint_y: p.mint_x, ..p })
        .unwrap();
    assert_eq!(client.keys().len(), 2);
}

#[test]
fn invalid_fee_leaves_store_empty() {
    let client = AmmClient::new();
    let err = client
        .initialize(InitializeParams { fee_bps: 10_001, ..params(0, None) })
        .unwrap_err();
    assert_eq!(err.amm(), Some(AmmError::InvalidFee));
    assert!(client.keys().is_empty());
}

#[test]
fn unknown_pool_is_not_found() {
    let client = AmmClient::new();
    let key = params(0, None).key();
    let who = Pubkey::new_unique();
    let checks = [
        client.deposit(&key, &who, 1, 1, 1).map(|_| ()).unwrap_err(),
        client.swap(&key, &who, true, 1, 0).map(|_| ()).unwrap_err(),
        client.withdraw(&key, &who, 1, 0, 0).map(|_| ()).unwrap_err(),
        client.set_lock(&key, &who, true).unwrap_err(),
        client.pool_info(&key).map(|_| ()).unwrap_err(),
        client.simulate(&key, true, 1).map(|_| ()).unwrap_err(),
    ];
    for err in checks {
        assert_eq!(err.amm(), Some(AmmError::NotFound));
    }
}

#[test]
fn reference_scenario_through_client() {
    let client = AmmClient::new();
    let lp = Pubkey::new_unique();
    let key = seeded(&client, &lp, None);

    let info = client.pool_info(&key).unwrap();
    assert_eq!((info.reserve_x, info.reserve_y, info.lp_supply), (100_000, 100_000, 100_000));
    assert!((info.spot_price - 1.0).abs() < f64::EPSILON);
    assert_eq!(client.lp_balance(&key, &lp).unwrap(), 100_000);

    let sim = client.simulate(&key, true, 10_000).unwrap();
    assert_eq!(sim.estimated_out, 9_066);

    let trader = Pubkey::new_unique();
    let swap = client.swap(&key, &trader, true, 10_000, 9_066).unwrap();
    assert_eq!(swap.amount_out, 9_066);
    assert_eq!(swap.lp_fee, 30);

    let info = client.pool_info(&key).unwrap();
    assert_eq!((info.reserve_x, info.reserve_y), (110_000, 90_934));
}

#[test]
fn quotes_match_execution() {
    let client = AmmClient::new();
    let lp = Pubkey::new_unique();
    let key = seeded(&client, &lp, None);

    let quoted = client.quote_deposit(&key, 333, 1_000, 1_000).unwrap();
    let done = client.deposit(&key, &lp, 333, 1_000, 1_000).unwrap();
    assert_eq!((quoted.amount_x, quoted.amount_y), (done.amount_x, done.amount_y));

    let quoted = client.quote_withdraw(&key, 12_345).unwrap();
    let done = client.withdraw(&key, &lp, 12_345, 0, 0).unwrap();
    assert_eq!((quoted.amount_x, quoted.amount_y), (done.amount_x, done.amount_y));
}

#[test]
fn lock_is_enforced_through_client() {
    let client = AmmClient::new();
    let authority = Pubkey::new_unique();
    let lp = Pubkey::new_unique();
    let key = seeded(&client, &lp, Some(authority));

    let stranger = Pubkey::new_unique();
    let err = client.set_lock(&key, &stranger, true).unwrap_err();
    assert_eq!(err.amm(), Some(AmmError::Unauthorized));

    client.set_lock(&key, &authority, true).unwrap();
    assert!(client.pool_info(&key).unwrap().locked);
    let err = client.swap(&key, &lp, true, 100, 0).unwrap_err();
    assert_eq!(err.amm(), Some(AmmError::PoolLocked));

    let out = client.withdraw(&key, &lp, 100_000, 0, 0).unwrap();
    assert_eq!((out.amount_x, out.amount_y), (100_000, 100_000));
}

#[test]
fn persistence_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pools.json");

    let client = AmmClient::new();
    let authority = Pubkey::new_unique();
    let lp = Pubkey::new_unique();
    let key = seeded(&client, &lp, Some(authority));
    client.swap(&key, &lp, false, 2_500, 0).unwrap();
    client.set_lock(&key, &authority, true).unwrap();
    client.save(&path).unwrap();

    let restored = AmmClient::load(&path).unwrap();
    assert_eq!(restored.snapshots(), client.snapshots());
    assert_eq!(restored.lp_balance(&key, &lp).unwrap(), 100_000);
    assert!(restored.pool_info(&key).unwrap().locked);
}

#[test]
fn missing_state_file_is_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let client = AmmClient::load(&dir.path().join("absent.json")).unwrap();
    assert!(client.keys().is_empty());
}

#[test]
fn garbage_state_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pools.json");
    std::fs::write(&path, b"{ not json").unwrap();
    assert!(matches!(AmmClient::load(&path), Err(Error::Json(_))));

    std::fs::write(&path, br#"{"version": 99, "pools": []}"#).unwrap();
    assert!(matches!(
        AmmClient::load(&path),
        Err(Error::UnsupportedVersion { found: 99, .. })
    ));
}

/// Log sink for asserting what reaches an operator at a given level.
#[derive(Clone, Default)]
struct Captured(Arc<parking_lot::Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn ordinary_rejections_stay_below_warn() {
    let client = AmmClient::new();
    let lp = Pubkey::new_unique();
    let key = seeded(&client, &lp, None);

    let sink = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(sink.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let err = client.swap(&key, &lp, true, 10_000, 9_067).unwrap_err();
        assert_eq!(err.amm(), Some(AmmError::SlippageExceeded));
        let err = client.withdraw(&key, &Pubkey::new_unique(), 1, 0, 0).unwrap_err();
        assert_eq!(err.amm(), Some(AmmError::InsufficientBalance));
    });
    let logged = String::from_utf8_lossy(&sink.0.lock()).into_owned();
    assert!(logged.is_empty(), "{logged}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_swaps_on_one_pool_serialize() {
    let client = Arc::new(AmmClient::new());
    let lp = Pubkey::new_unique();
    let key = seeded(&client, &lp, None);
    let k_before = {
        let info = client.pool_info(&key).unwrap();
        info.reserve_x as u128 * info.reserve_y as u128
    };

    let mut tasks = Vec::new();
    for i in 0..16u64 {
        let client = Arc::clone(&client);
        tasks.push(tokio::task::spawn_blocking(move || {
            let trader = Pubkey::new_unique();
            for _ in 0..25 {
                client.swap(&key, &trader, i % 2 == 0, 100 + i, 0).unwrap();
            }
        }));
    }
    for t in tasks {
        t.await.unwrap();
    }

    let info = client.pool_info(&key).unwrap();
    assert!(info.reserve_x as u128 * info.reserve_y as u128 > k_before);
    assert_eq!(info.lp_supply, 100_000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn independent_pools_progress_in_parallel() {
    let client = Arc::new(AmmClient::new());
    let lp = Pubkey::new_unique();
    let keys: Vec<PoolKey> = (0..8)
        .map(|seed| {
            let p = params(seed, None);
            let key = p.key();
            client.initialize(p).unwrap();
            key
        })
        .collect();

    let mut tasks = Vec::new();
    for key in keys.clone() {
        let client = Arc::clone(&client);
        tasks.push(tokio::task::spawn_blocking(move || {
            client.deposit(&key, &lp, 1, 4_000, 9_000).unwrap();
            client.swap(&key, &lp, true, 1_000, 0).unwrap()
        }));
    }
    for t in tasks {
        let swap = t.await.unwrap();
        assert!(swap.amount_out > 0);
    }
    for key in &keys {
        assert_eq!(client.pool_info(key).unwrap().lp_supply, 6_000);
    }
}
