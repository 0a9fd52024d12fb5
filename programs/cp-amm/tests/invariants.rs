use cp_amm::{initialize, Pool};
use proptest::prelude::*;
use solana_sdk::pubkey::Pubkey;

#[derive(Debug, Clone)]
enum Op {
    Deposit { who: usize, lp: u64, max_x: u64, max_y: u64 },
    Swap { who: usize, x_to_y: bool, amount_in: u64 },
    Withdraw { who: usize, lp: u64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize, 1..50_000u64, 1..10_000_000u64, 1..10_000_000u64)
            .prop_map(|(who, lp, max_x, max_y)| Op::Deposit { who, lp, max_x, max_y }),
        (0..3usize, any::<bool>(), 1..5_000_000u64)
            .prop_map(|(who, x_to_y, amount_in)| Op::Swap { who, x_to_y, amount_in }),
        (0..3usize, 1..200_000u64).prop_map(|(who, lp)| Op::Withdraw { who, lp }),
    ]
}

fn apply(pool: &mut Pool, users: &[Pubkey], op: &Op) {
    // Rejections are fine; a rejected op must leave no trace.
    let before = pool.clone();
    let ok = match *op {
        Op::Deposit { who, lp, max_x, max_y } => pool.deposit(&users[who], lp, max_x, max_y).is_ok(),
        Op::Swap { who, x_to_y, amount_in } => pool.swap(&users[who], x_to_y, amount_in, 0).is_ok(),
        Op::Withdraw { who, lp } => pool.withdraw(&users[who], lp, 0, 0).is_ok(),
    };
    if !ok {
        assert_eq!(*pool, before, "failed {op:?} mutated the pool");
    }
}

proptest! {
    #[test]
    fn swap_never_shrinks_k(
        rx in 1_000..1_000_000_000u64,
        ry in 1_000..1_000_000_000u64,
        fee_bps in 0..=1_000u16,
        amount_in in 1..1_000_000_000u64,
        x_to_y in any::<bool>(),
    ) {
        let lp = Pubkey::new_unique();
        let mut pool = initialize(Pubkey::new_unique(), Pubkey::new_unique(), 0, fee_bps, None).unwrap();
        pool.deposit(&lp, 1, rx, ry).unwrap();
        let k_before = pool.constant_product();

        if pool.swap(&lp, x_to_y, amount_in, 0).is_ok() {
            let k_after = pool.constant_product();
            prop_assert!(k_after >= k_before);
            if fee_bps > 0 {
                prop_assert!(k_after > k_before);
            }
        } else {
            prop_assert_eq!(pool.constant_product(), k_before);
        }
    }

    #[test]
    fn deposit_withdraw_round_trip_never_profits(
        rx in 1..1_000_000_000u64,
        ry in 1..1_000_000_000u64,
        lp_amount in 1..1_000_000u64,
    ) {
        let seeder = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let mut pool = initialize(Pubkey::new_unique(), Pubkey::new_unique(), 0, 30, None).unwrap();
        pool.deposit(&seeder, 1, rx, ry).unwrap();

        let d = pool.deposit(&user, lp_amount, u64::MAX, u64::MAX).unwrap();
        let w = pool.withdraw(&user, lp_amount, 0, 0).unwrap();
        prop_assert!(w.amount_x <= d.amount_x);
        prop_assert!(w.amount_y <= d.amount_y);
    }

    #[test]
    fn supply_is_always_backed(ops in prop::collection::vec(op(), 1..60)) {
        let users = [Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()];
        let mut pool = initialize(Pubkey::new_unique(), Pubkey::new_unique(), 0, 30, None).unwrap();

        for op in &ops {
            let supply_before = pool.lp_total_supply();
            apply(&mut pool, &users, op);
            prop_assert!(pool.invariants_hold(), "after {:?}: reserves {:?} supply {}",
                op, pool.reserves(), pool.lp_total_supply());
            if let Op::Swap { .. } = op {
                prop_assert_eq!(pool.lp_total_supply(), supply_before);
            }
            let held: u64 = users.iter().map(|u| pool.lp_balance(u)).sum();
            prop_assert_eq!(held, pool.lp_total_supply());
        }
    }
}
