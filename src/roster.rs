//! Seed rosters.
//!
//! Instruments and seats are created once at initialization and live for the
//! process lifetime; there is no creation or deletion path afterwards.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentSeed {
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
}

impl InstrumentSeed {
    pub fn new(symbol: &str, name: &str, price: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatSeed {
    pub name: String,
    pub cash: Decimal,
}

impl SeatSeed {
    pub fn new(name: &str, cash: Decimal) -> Self {
        Self {
            name: name.to_string(),
            cash,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketRoster {
    pub instruments: Vec<InstrumentSeed>,
    pub seats: Vec<SeatSeed>,
}

impl MarketRoster {
    /// Two-team exercise over four large caps.
    pub fn classic() -> Self {
        Self {
            instruments: vec![
                InstrumentSeed::new("AAPL", "Apple Inc.", dec!(150.00)),
                InstrumentSeed::new("GOOGL", "Alphabet Inc.", dec!(2800.00)),
                InstrumentSeed::new("MSFT", "Microsoft Corp.", dec!(290.00)),
                InstrumentSeed::new("AMZN", "Amazon.com Inc.", dec!(3300.00)),
            ],
            seats: vec![
                SeatSeed::new("Team Alpha", dec!(1000000)),
                SeatSeed::new("Team Beta", dec!(1000000)),
            ],
        }
    }

    /// Eleven-team classroom session over six fictional companies.
    pub fn classroom() -> Self {
        Self {
            instruments: vec![
                InstrumentSeed::new("NOVA", "TechNova Innovations", dec!(100)),
                InstrumentSeed::new("GREEN", "GreenFusion Energy", dec!(80)),
                InstrumentSeed::new("FIN", "FinTrust Capital", dec!(120)),
                InstrumentSeed::new("MED", "MediCore Health", dec!(90)),
                InstrumentSeed::new("CSMR", "ConsumerX Global", dec!(110)),
                InstrumentSeed::new("IND", "IndustriMax Holdings", dec!(70)),
            ],
            seats: (1..=11)
                .map(|i| SeatSeed::new(&format!("Team {i}"), dec!(100000)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_roster() {
        let roster = MarketRoster::classic();
        assert_eq!(roster.instruments.len(), 4);
        assert_eq!(roster.seats.len(), 2);
        assert_eq!(roster.instruments[0].symbol, "AAPL");
        assert_eq!(roster.instruments[0].price, dec!(150.00));
    }

    #[test]
    fn classroom_roster() {
        let roster = MarketRoster::classroom();
        assert_eq!(roster.instruments.len(), 6);
        assert_eq!(roster.seats.len(), 11);
        assert!(roster.seats.iter().all(|s| s.cash == dec!(100000)));
    }
}
