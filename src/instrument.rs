//! Tradable instruments.
//!
//! An instrument carries its current price, the percent change against the
//! previously committed price, a bounded history of committed prices, and an
//! optional recovery baseline while an event shock is decaying.

use crate::types::{InstrumentId, Price, Timestamp};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Committed prices retained per instrument.
pub const PRICE_HISTORY_CAPACITY: usize = 100;

/// One committed price point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: Price,
    pub at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: InstrumentId,
    pub symbol: String,
    pub name: String,
    pub current_price: Price,
    /// Percent delta from the previously committed price.
    pub change: Decimal,
    /// Pre-shock price while an event shock is decaying back. None when no
    /// recovery is active.
    pub recovery_baseline: Option<Price>,
    history: VecDeque<PricePoint>,
}

impl Instrument {
    pub fn new(id: InstrumentId, symbol: &str, name: &str, price: Price, at: Timestamp) -> Self {
        let mut history = VecDeque::new();
        history.push_front(PricePoint { price, at });
        Self {
            id,
            symbol: symbol.to_string(),
            name: name.to_string(),
            current_price: price,
            change: Decimal::ZERO,
            recovery_baseline: None,
            history,
        }
    }

    /// Commit a new price: recompute `change` against the old price and record
    /// the point in the bounded history.
    pub fn set_price(&mut self, new_price: Price, at: Timestamp) {
        let old = self.current_price.value();
        self.current_price = new_price;
        self.change = (new_price.value() - old) / old * dec!(100);
        self.history.push_front(PricePoint { price: new_price, at });
        if self.history.len() > PRICE_HISTORY_CAPACITY {
            self.history.pop_back();
        }
    }

    /// Committed prices, newest first.
    pub fn history(&self) -> impl Iterator<Item = &PricePoint> {
        self.history.iter()
    }

    /// The price committed immediately before the current one.
    pub fn previous_price(&self) -> Option<Price> {
        self.history.get(1).map(|p| p.price)
    }
}
