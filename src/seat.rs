//! Participant seats.
//!
//! A seat holds cash and per-instrument share counts. Both are invariantly
//! non-negative; an absent holdings entry means zero shares. Mutation happens
//! through `MarketState::apply_trade`, which validates before writing.

use crate::types::{Cash, InstrumentId, SeatId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub name: String,
    pub cash: Cash,
    pub holdings: HashMap<InstrumentId, u64>,
}

impl Seat {
    pub fn new(id: SeatId, name: &str, cash: Cash) -> Self {
        Self {
            id,
            name: name.to_string(),
            cash,
            holdings: HashMap::new(),
        }
    }

    /// Shares held for an instrument. Absence means zero.
    pub fn holding(&self, instrument_id: InstrumentId) -> u64 {
        self.holdings.get(&instrument_id).copied().unwrap_or(0)
    }

    /// Total number of instruments with a non-zero position.
    pub fn position_count(&self) -> usize {
        self.holdings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn absent_holding_is_zero() {
        let seat = Seat::new(SeatId(1), "Team Alpha", Cash::new(dec!(1000000)));
        assert_eq!(seat.holding(InstrumentId(1)), 0);
        assert_eq!(seat.position_count(), 0);
    }

    #[test]
    fn holdings_lookup() {
        let mut seat = Seat::new(SeatId(1), "Team Alpha", Cash::new(dec!(1000000)));
        seat.holdings.insert(InstrumentId(2), 100);
        assert_eq!(seat.holding(InstrumentId(2)), 100);
        assert_eq!(seat.position_count(), 1);
    }
}
