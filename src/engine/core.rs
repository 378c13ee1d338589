// 6.1 engine/core.rs: the engine owns the canonical state, the tunable
// parameters, a seeded noise source, and an explicit clock. time never
// advances on its own: the caller stamps it, which keeps every run
// reproducible.

use crate::notify::Notification;
use crate::params::SimulationParams;
use crate::roster::MarketRoster;
use crate::state::{MarketSnapshot, MarketState};
use crate::types::{OrderId, Timestamp};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

#[derive(Debug)]
pub struct Engine {
    pub(super) state: MarketState,
    pub(super) params: SimulationParams,
    pub(super) rng: StdRng,
    pub(super) next_order_id: u64,
    pub(super) current_time: Timestamp,
}

impl Engine {
    pub fn new(roster: &MarketRoster, params: SimulationParams, seed: u64) -> Self {
        let current_time = Timestamp::from_millis(0);
        Self {
            state: MarketState::new(roster, current_time),
            params,
            rng: StdRng::seed_from_u64(seed),
            next_order_id: 1,
            current_time,
        }
    }

    pub fn set_time(&mut self, timestamp: Timestamp) {
        self.current_time = timestamp;
    }

    pub fn time(&self) -> Timestamp {
        self.current_time
    }

    pub fn advance_time(&mut self, millis: i64) {
        self.current_time = Timestamp::from_millis(self.current_time.as_millis() + millis);
    }

    pub fn state(&self) -> &MarketState {
        &self.state
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn snapshot(&self) -> MarketSnapshot {
        self.state.snapshot()
    }

    /// Drain notifications accumulated by committed mutations.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.state.take_notifications()
    }

    pub(super) fn next_order_id(&mut self) -> OrderId {
        let id = OrderId(self.next_order_id);
        self.next_order_id += 1;
        id
    }

    /// Bounded uniform noise in [-1, 1], drawn in 0.0001 steps so downstream
    /// decimal arithmetic stays exact.
    pub(super) fn noise_unit(&mut self) -> Decimal {
        Decimal::new(self.rng.gen_range(-10_000i64..=10_000), 4)
    }
}
