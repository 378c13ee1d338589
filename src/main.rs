//! Trading floor exercise simulation.
//!
//! Walks the engine through a full session: orders with price impact and
//! fees, rejections, news shocks with recovery, admin overrides, parameter
//! updates, and the live hub with subscribers and the recovery driver.

use rust_decimal_macros::dec;
use std::time::Duration;
use tradefloor_core::*;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tradefloor_core=debug"));
    fmt().with_env_filter(filter).with_target(false).init();

    println!("Trading Floor Core Engine Simulation");
    println!("Two seats, four instruments, full session\n");

    scenario_1_basic_trading();
    scenario_2_rejections();
    scenario_3_news_shock_and_recovery();
    scenario_4_admin_channel();
    scenario_5_live_hub();

    println!("\nAll simulations completed successfully.");
}

/// Buys and sells with price impact and fees.
fn scenario_1_basic_trading() {
    println!("Scenario 1: Basic Trading\n");

    let mut engine = Engine::new(&MarketRoster::classic(), SimulationParams::calm(), 42);
    let aapl = InstrumentId(1);
    let alpha = SeatId(1);

    let result = engine.process_order(aapl, alpha, 100, Side::Buy).unwrap();
    println!(
        "  Team Alpha buys 100 AAPL @ {} (fee {})",
        result.execution_price, result.fee
    );
    println!(
        "  AAPL change: {}%, cash left: {}",
        result.instrument.change,
        engine.state().seat(alpha).unwrap().cash
    );

    engine.advance_time(1000);
    let result = engine.process_order(aapl, alpha, 40, Side::Sell).unwrap();
    println!(
        "  Team Alpha sells 40 AAPL @ {} (fee {})",
        result.execution_price, result.fee
    );
    println!(
        "  Holdings now: {} shares\n",
        engine.state().seat(alpha).unwrap().holding(aapl)
    );
}

/// Orders that fail leave the market untouched.
fn scenario_2_rejections() {
    println!("Scenario 2: Rejections\n");

    let mut engine = Engine::new(&MarketRoster::classic(), SimulationParams::calm(), 42);
    let amzn = InstrumentId(4);
    let beta = SeatId(2);

    // 1,000,000 cash cannot cover 1000 shares of a 3300 instrument
    let err = engine.process_order(amzn, beta, 1000, Side::Buy).unwrap_err();
    println!("  Oversized buy: {err}");

    let err = engine.process_order(amzn, beta, 1, Side::Sell).unwrap_err();
    println!("  Sell without holdings: {err}");

    let log = engine.state().order_log();
    println!("  Order log records {} rejections", log.len());
    println!(
        "  Latest entry status: {:?}\n",
        log.latest().unwrap().status
    );
}

/// A news shock and its decay back to baseline.
fn scenario_3_news_shock_and_recovery() {
    println!("Scenario 3: News Shock and Recovery\n");

    let mut engine = Engine::new(&MarketRoster::classic(), SimulationParams::default(), 42);
    let aapl = InstrumentId(1);

    let shock = engine
        .process_event(aapl, dec!(-10), "Regulatory probe", "antitrust inquiry opened")
        .unwrap();
    println!(
        "  -10% shock: AAPL {} -> {} (baseline {})",
        shock.baseline, shock.shocked_price, shock.baseline
    );

    for tick in 1..=6 {
        engine.advance_time(1000);
        engine.recovery_tick();
        let price = engine.state().instrument(aapl).unwrap().current_price;
        println!("  tick {tick}: {price}");
    }
    println!();
}

/// Admin overrides and parameter updates, all action-logged.
fn scenario_4_admin_channel() {
    println!("Scenario 4: Admin Channel\n");

    let mut engine = Engine::new(&MarketRoster::classic(), SimulationParams::calm(), 42);
    let proctor = Actor::admin("proctor");
    let msft = InstrumentId(3);

    let updated = engine.override_price(&proctor, msft, dec!(310)).unwrap();
    println!("  MSFT overridden to {} ({}%)", updated.current_price, updated.change);

    let err = engine
        .override_price(&Actor::Seat(SeatId(1)), msft, dec!(1))
        .unwrap_err();
    println!("  Seat attempting an override: {err}");

    engine
        .update_params(
            &proctor,
            ParamUpdate::Order(OrderParams {
                volatility: dec!(0),
                trading_fee: dec!(0.002),
                price_impact: dec!(0.0002),
            }),
        )
        .unwrap();
    println!(
        "  Fees doubled; action log has {} entries\n",
        engine.state().action_log().len()
    );
}

/// The hub serializes concurrent seats and fans out notifications while the
/// recovery driver ticks in the background.
fn scenario_5_live_hub() {
    println!("Scenario 5: Live Hub\n");

    let engine = Engine::new(&MarketRoster::classic(), SimulationParams::default(), 42);
    let hub = MarketHub::new(engine);
    let updates = hub.subscribe();

    let driver = RecoveryDriver::start(hub.clone(), Duration::from_millis(20))
        .expect("spawn recovery driver");

    hub.execute(
        &Actor::admin("proctor"),
        EngineCommand::SubmitEvent {
            title: "Sector selloff".to_string(),
            targets: vec![InstrumentId(1), InstrumentId(2)],
            impact_percent: dec!(-5),
            description: "broad tech selloff".to_string(),
        },
    )
    .unwrap();

    let mut handles = Vec::new();
    for seat in 1..=2u64 {
        let hub = hub.clone();
        handles.push(std::thread::spawn(move || {
            for i in 0..10u64 {
                let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
                let _ = hub.execute(
                    &Actor::Seat(SeatId(seat)),
                    EngineCommand::SubmitOrder {
                        instrument_id: InstrumentId((i % 4) as u32 + 1),
                        seat_id: SeatId(seat),
                        quantity: 5,
                        side,
                    },
                );
            }
        }));
    }
    for handle in handles {
        handle.join().expect("seat thread");
    }

    std::thread::sleep(Duration::from_millis(300));
    driver.stop();

    let received: Vec<_> = updates.try_iter().collect();
    let snapshot = hub.snapshot();
    println!("  {} notifications delivered, last seq {:?}", received.len(), snapshot.seq);
    println!("  Order log: {} entries", snapshot.order_log.len());
    for seat in &snapshot.seats {
        println!("  {}: cash {}, positions {}", seat.name, seat.cash, seat.position_count());
    }
}
