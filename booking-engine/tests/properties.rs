//! Randomized invariant checks over seeded inputs

use booking_engine::money::money_eq;
use booking_engine::{BookingReconciler, ReconcileContext, recompute};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::booking::{AdvanceField, AdvancePayment, BookingStatus};
use shared::models::{FoodType, RatePlan, Role};

const SEED: u64 = 0x00b0_0c1e;
const ROUNDS: usize = 200;

const PRICED_PLANS: [RatePlan; 3] = [RatePlan::Silver, RatePlan::Gold, RatePlan::Platinum];
const GST_SLABS: [Option<f64>; 5] = [None, Some(5.0), Some(12.0), Some(18.0), Some(28.0)];

fn clock() -> i64 {
    1_700_000_000_000
}

fn random_amount(rng: &mut StdRng, max_cents: i64) -> f64 {
    rng.gen_range(0..=max_cents) as f64 / 100.0
}

/// Reconciler with random pricing inputs from the built-in table
fn random_booking(rng: &mut StdRng, role: Role) -> BookingReconciler {
    let mut rec = BookingReconciler::with_clock(ReconcileContext::new(role), clock);
    rec.set_rate_plan(Some(PRICED_PLANS[rng.gen_range(0..PRICED_PLANS.len())]))
        .unwrap();
    rec.set_food_type(Some(FoodType::ALL[rng.gen_range(0..FoodType::ALL.len())]))
        .unwrap();
    rec.set_pax(rng.gen_range(0..2000)).unwrap();
    rec.set_discount(random_amount(rng, 1000)).unwrap();
    rec.set_gst(GST_SLABS[rng.gen_range(0..GST_SLABS.len())]).unwrap();
    rec.set_decoration(rng.gen_bool(0.5), random_amount(rng, 2_000_000))
        .unwrap();
    rec.set_music(rng.gen_bool(0.5), random_amount(rng, 1_000_000))
        .unwrap();
    rec
}

#[test]
fn total_matches_formula() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..ROUNDS {
        let rec = random_booking(&mut rng, Role::Staff);
        let d = rec.draft();
        let expected =
            d.rate_per_plate * d.pax as f64 + d.decoration_charge + d.music_charge;
        assert!(
            money_eq(d.total, expected),
            "total {} != {} for {:?}",
            d.total,
            expected,
            d
        );
        assert!(d.rate_per_plate >= 0.0);
    }
}

#[test]
fn balance_is_total_minus_advances() {
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    for _ in 0..ROUNDS {
        let mut rec = random_booking(&mut rng, Role::Staff);
        assert_eq!(rec.draft().balance, rec.draft().total);

        for _ in 0..rng.gen_range(1..5) {
            rec.add_advance(AdvancePayment {
                amount: random_amount(&mut rng, 5_000_000),
                ..Default::default()
            })
            .unwrap();
        }
        let d = rec.draft();
        let paid: f64 = d.advance_payments.iter().map(|a| a.amount).sum();
        assert!(money_eq(d.balance, d.total - paid));
    }
}

#[test]
fn recompute_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(SEED + 2);
    for _ in 0..ROUNDS {
        let rec = random_booking(&mut rng, Role::Admin);
        let ctx = rec.context().clone();
        let once = recompute(rec.draft(), &ctx, clock()).unwrap();
        let twice = recompute(&once, &ctx, clock()).unwrap();
        assert_eq!(once, twice);
        assert_eq!(&once, rec.draft());
    }
}

#[test]
fn more_guests_never_cost_less() {
    let mut rng = StdRng::seed_from_u64(SEED + 3);
    for _ in 0..ROUNDS {
        let mut rec = random_booking(&mut rng, Role::Staff);
        let before = rec.draft().total;
        let pax = rec.draft().pax;
        rec.set_pax(pax + rng.gen_range(0..500)).unwrap();
        assert!(rec.draft().total >= before);
    }
}

#[test]
fn ledger_edits_keep_status_and_history_consistent() {
    let mut rng = StdRng::seed_from_u64(SEED + 4);
    for _ in 0..ROUNDS {
        let mut rec = random_booking(&mut rng, Role::Staff);
        let mut history_len = rec.draft().status_history.len();

        for _ in 0..20 {
            let rows = rec.draft().advance_payments.len();
            // Indices past the end exercise the no-op path
            let index = rng.gen_range(0..rows + 2);
            let amount = random_amount(&mut rng, 100_000) - 200.0;
            match rng.gen_range(0..3) {
                0 => rec
                    .add_advance(AdvancePayment {
                        amount,
                        ..Default::default()
                    })
                    .unwrap(),
                1 => rec
                    .update_advance(index, AdvanceField::Amount(amount))
                    .unwrap(),
                _ => rec.remove_advance(index).unwrap(),
            }

            let d = rec.draft();
            let paid: f64 = d.advance_payments.iter().map(|a| a.amount).sum();
            assert!(d.advance_payments.iter().all(|a| a.amount >= 0.0));
            if paid > 0.0 {
                assert_eq!(d.booking_status, BookingStatus::Confirmed);
            } else {
                assert_eq!(d.booking_status, BookingStatus::Enquiry);
            }
            assert!(d.status_history.len() >= history_len);
            assert_eq!(
                d.status_history.last().map(|c| c.status),
                Some(d.booking_status)
            );
            history_len = d.status_history.len();
        }
    }
}

#[test]
fn staff_discount_never_exceeds_cap() {
    let mut rng = StdRng::seed_from_u64(SEED + 5);
    for _ in 0..ROUNDS {
        let mut rec = random_booking(&mut rng, Role::Staff);
        let cap = rec
            .context()
            .discount
            .cap_for(Role::Staff, rec.draft().rate_plan)
            .unwrap();
        let requested = cap + random_amount(&mut rng, 1_000_000) + 0.01;
        rec.set_discount(requested).unwrap();
        assert_eq!(rec.draft().discount, cap);
    }
}
