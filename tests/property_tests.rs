//! Property-based tests for the market-state invariants.
//!
//! These verify the core guarantees under random inputs: prices stay
//! positive, change always reflects the previously committed price, money
//! moves exactly, rejections touch nothing, logs stay bounded, and recovery
//! never overshoots its baseline.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tradefloor_core::*;

fn quantity_strategy() -> impl Strategy<Value = u64> {
    1u64..=200
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

fn impact_strategy() -> impl Strategy<Value = Decimal> {
    (-50i64..=50).prop_map(|x| Decimal::new(x, 0))
}

fn classroom_engine(seed: u64) -> Engine {
    Engine::new(&MarketRoster::classroom(), SimulationParams::default(), seed)
}

proptest! {
    /// Prices stay positive and `change` always matches the previously
    /// committed price, whatever mix of commands runs.
    #[test]
    fn invariants_hold_under_random_commands(
        seed in any::<u64>(),
        commands in prop::collection::vec(
            (0u8..3, 0u32..6, 0u64..11, quantity_strategy(), side_strategy(), impact_strategy()),
            1..60,
        ),
    ) {
        let mut engine = classroom_engine(seed);

        for (kind, inst_idx, seat_idx, quantity, side, impact) in commands {
            let instrument_id = InstrumentId(inst_idx % 6 + 1);
            let seat_id = SeatId(seat_idx % 11 + 1);
            engine.advance_time(100);

            match kind {
                0 => {
                    let _ = engine.process_order(instrument_id, seat_id, quantity, side);
                }
                1 => {
                    let _ = engine.process_event(instrument_id, impact, "headline", "body");
                }
                _ => {
                    engine.recovery_tick();
                }
            }

            for inst in engine.state().instruments_iter() {
                prop_assert!(inst.current_price.value() > Decimal::ZERO);
                if let Some(prev) = inst.previous_price() {
                    let expected =
                        (inst.current_price.value() - prev.value()) / prev.value() * dec!(100);
                    prop_assert_eq!(inst.change, expected);
                }
            }
            for seat in engine.state().seats_iter() {
                prop_assert!(!seat.cash.is_negative());
            }
            prop_assert!(engine.state().order_log().len() <= LOG_CAPACITY);
            prop_assert!(engine.state().event_log().len() <= LOG_CAPACITY);
        }
    }

    /// Executed orders move exactly notional + fee of cash and exactly the
    /// ordered quantity of shares; total wealth valued at the execution
    /// price drops by exactly the fee.
    #[test]
    fn executed_order_moves_exact_amounts(
        seed in any::<u64>(),
        quantity in quantity_strategy(),
        side in side_strategy(),
    ) {
        let mut engine = classroom_engine(seed);
        let instrument_id = InstrumentId(1);

        // give the seat inventory so sells are exercised too
        engine.process_order(instrument_id, SeatId(1), 300, Side::Buy).unwrap();

        let before = engine.snapshot();
        let seat_before = &before.seats[0];

        match engine.process_order(instrument_id, SeatId(1), quantity, side) {
            Ok(result) => {
                let px = result.execution_price.value();
                let fee = result.fee.value();
                let notional = Decimal::from(quantity) * px;

                let after = engine.snapshot();
                let seat_after = &after.seats[0];

                match side {
                    Side::Buy => {
                        prop_assert_eq!(
                            seat_after.cash.value(),
                            seat_before.cash.value() - notional - fee
                        );
                        prop_assert_eq!(
                            seat_after.holding(instrument_id),
                            seat_before.holding(instrument_id) + quantity
                        );
                    }
                    Side::Sell => {
                        prop_assert_eq!(
                            seat_after.cash.value(),
                            seat_before.cash.value() + notional - fee
                        );
                        prop_assert_eq!(
                            seat_after.holding(instrument_id),
                            seat_before.holding(instrument_id) - quantity
                        );
                    }
                }

                // conservation, valued at this trade's execution price
                let wealth = |seats: &[Seat]| -> Decimal {
                    seats
                        .iter()
                        .map(|s| s.cash.value() + Decimal::from(s.holding(instrument_id)) * px)
                        .sum()
                };
                prop_assert_eq!(wealth(&after.seats), wealth(&before.seats) - fee);
            }
            Err(_) => {
                let after = engine.snapshot();
                prop_assert_eq!(&before.instruments, &after.instruments);
                prop_assert_eq!(&before.seats, &after.seats);
            }
        }
    }

    /// A rejected sell leaves instruments and seats untouched and records
    /// exactly one audit entry.
    #[test]
    fn rejected_orders_leave_state_identical(
        seed in any::<u64>(),
        quantity in 1u64..=1000,
    ) {
        let mut engine = classroom_engine(seed);
        let before = engine.snapshot();

        // seat 2 holds nothing, so any sell is rejected
        let err = engine
            .process_order(InstrumentId(2), SeatId(2), quantity, Side::Sell)
            .unwrap_err();
        prop_assert!(
            matches!(
                err,
                EngineError::State(StateError::InsufficientShares { .. })
            ),
            "expected InsufficientShares, got {:?}",
            err
        );

        let after = engine.snapshot();
        prop_assert_eq!(&before.instruments, &after.instruments);
        prop_assert_eq!(&before.seats, &after.seats);
        prop_assert_eq!(after.order_log.len(), before.order_log.len() + 1);
        prop_assert_eq!(after.order_log[0].status, OrderStatus::Rejected);
    }

    /// Recovery approaches the baseline from one side: the gap shrinks every
    /// tick and the price never crosses over.
    #[test]
    fn recovery_never_overshoots(
        seed in any::<u64>(),
        impact in (-80i64..=-1).prop_map(|x| Decimal::new(x, 0)),
        ticks in 1usize..40,
    ) {
        let mut engine = classroom_engine(seed);
        let instrument_id = InstrumentId(3);
        let baseline = engine.state().instrument(instrument_id).unwrap().current_price.value();

        engine.process_event(instrument_id, impact, "shock", "").unwrap();
        let mut last_gap =
            (baseline - engine.state().instrument(instrument_id).unwrap().current_price.value()).abs();

        for _ in 0..ticks {
            engine.recovery_tick();
            let price = engine.state().instrument(instrument_id).unwrap().current_price.value();
            prop_assert!(price <= baseline);
            let gap = (baseline - price).abs();
            prop_assert!(gap <= last_gap);
            last_gap = gap;
        }
    }

    /// The event log is a ring: it never grows past capacity.
    #[test]
    fn logs_stay_bounded(n in 1usize..300) {
        let mut engine = Engine::new(&MarketRoster::classic(), SimulationParams::calm(), 0);
        for i in 0..n {
            engine.advance_time(1);
            let impact = if i % 2 == 0 { dec!(0.1) } else { dec!(-0.1) };
            engine
                .process_event(InstrumentId(1), impact, "drip", "alternating micro shocks")
                .unwrap();
        }
        prop_assert_eq!(engine.state().event_log().len(), n.min(LOG_CAPACITY));
    }
}
