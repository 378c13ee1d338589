// 5.0 state.rs: canonical market state. sole owner of mutable simulation
// truth: instruments, seats, and the three bounded logs. every mutating
// operation either commits fully or leaves state untouched, and pushes
// sequence-numbered notifications into an outbox after commit. readers only
// ever get copy-out snapshots.

use crate::instrument::Instrument;
use crate::logs::{ActionRecord, ActivityLog, EventRecord, LogKind, OrderRecord};
use crate::notify::{Notification, NotificationPayload};
use crate::roster::MarketRoster;
use crate::seat::Seat;
use crate::types::{Cash, InstrumentId, Price, SeatId, SeqNo, Side, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug)]
pub struct MarketState {
    instruments: HashMap<InstrumentId, Instrument>,
    seats: HashMap<SeatId, Seat>,
    order_log: ActivityLog<OrderRecord>,
    event_log: ActivityLog<EventRecord>,
    action_log: ActivityLog<ActionRecord>,
    next_seq: u64,
    outbox: Vec<Notification>,
}

/// Copy-out view of the whole market. Instruments and seats are sorted by id
/// so equal states compare equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub instruments: Vec<Instrument>,
    pub seats: Vec<Seat>,
    pub order_log: Vec<OrderRecord>,
    pub event_log: Vec<EventRecord>,
    pub action_log: Vec<ActionRecord>,
    /// Last committed sequence number.
    pub seq: SeqNo,
}

/// Result of a committed trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeApplied {
    pub instrument: Instrument,
    pub seat_id: SeatId,
    pub cash_after: Cash,
    pub holding_after: u64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StateError {
    #[error("instrument {0:?} not found")]
    UnknownInstrument(InstrumentId),

    #[error("seat {0:?} not found")]
    UnknownSeat(SeatId),

    #[error("invalid price: {0}")]
    InvalidPrice(Decimal),

    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: Cash, available: Cash },

    #[error("insufficient shares: requested {requested}, held {held}")]
    InsufficientShares { requested: u64, held: u64 },
}

impl MarketState {
    /// Build the fixed entity set. Ids are assigned in roster order from 1.
    pub fn new(roster: &MarketRoster, at: Timestamp) -> Self {
        let instruments = roster
            .instruments
            .iter()
            .enumerate()
            .map(|(i, seed)| {
                let id = InstrumentId(i as u32 + 1);
                let price = Price::new_unchecked(seed.price);
                (id, Instrument::new(id, &seed.symbol, &seed.name, price, at))
            })
            .collect();

        let seats = roster
            .seats
            .iter()
            .enumerate()
            .map(|(i, seed)| {
                let id = SeatId(i as u64 + 1);
                (id, Seat::new(id, &seed.name, Cash::new(seed.cash)))
            })
            .collect();

        Self {
            instruments,
            seats,
            order_log: ActivityLog::new(),
            event_log: ActivityLog::new(),
            action_log: ActivityLog::new(),
            next_seq: 0,
            outbox: Vec::new(),
        }
    }

    pub fn instrument(&self, id: InstrumentId) -> Option<&Instrument> {
        self.instruments.get(&id)
    }

    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.get(&id)
    }

    pub fn instruments_iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.values()
    }

    pub fn seats_iter(&self) -> impl Iterator<Item = &Seat> {
        self.seats.values()
    }

    pub fn last_seq(&self) -> SeqNo {
        SeqNo(self.next_seq)
    }

    pub fn snapshot(&self) -> MarketSnapshot {
        let mut instruments: Vec<Instrument> = self.instruments.values().cloned().collect();
        instruments.sort_by_key(|i| i.id);
        let mut seats: Vec<Seat> = self.seats.values().cloned().collect();
        seats.sort_by_key(|s| s.id);

        MarketSnapshot {
            instruments,
            seats,
            order_log: self.order_log.to_vec(),
            event_log: self.event_log.to_vec(),
            action_log: self.action_log.to_vec(),
            seq: self.last_seq(),
        }
    }

    /// Atomically settle one trade: move cash and shares on the seat and set
    /// the instrument price to the execution price. Validation happens before
    /// any write; on failure nothing changes.
    pub fn apply_trade(
        &mut self,
        instrument_id: InstrumentId,
        seat_id: SeatId,
        side: Side,
        quantity: u64,
        execution_price: Price,
        fee: Cash,
        at: Timestamp,
    ) -> Result<TradeApplied, StateError> {
        if !self.instruments.contains_key(&instrument_id) {
            return Err(StateError::UnknownInstrument(instrument_id));
        }
        let seat = self
            .seats
            .get(&seat_id)
            .ok_or(StateError::UnknownSeat(seat_id))?;

        let notional = Decimal::from(quantity) * execution_price.value();
        let held = seat.holding(instrument_id);

        let (new_cash, new_holding) = match side {
            Side::Buy => {
                let required = notional + fee.value();
                let new_cash = seat.cash.value() - required;
                if new_cash < Decimal::ZERO {
                    return Err(StateError::InsufficientFunds {
                        required: Cash::new(required),
                        available: seat.cash,
                    });
                }
                (new_cash, held + quantity)
            }
            Side::Sell => {
                if held < quantity {
                    return Err(StateError::InsufficientShares {
                        requested: quantity,
                        held,
                    });
                }
                let new_cash = seat.cash.value() + notional - fee.value();
                if new_cash < Decimal::ZERO {
                    return Err(StateError::InsufficientFunds {
                        required: fee,
                        available: Cash::new(seat.cash.value() + notional),
                    });
                }
                (new_cash, held - quantity)
            }
        };

        // validation passed: commit all three sub-updates
        let (cash_after, holding_after) = {
            let seat = self.seats.get_mut(&seat_id).expect("validated above");
            seat.cash = Cash::new(new_cash);
            if new_holding == 0 {
                seat.holdings.remove(&instrument_id);
            } else {
                seat.holdings.insert(instrument_id, new_holding);
            }
            (seat.cash, new_holding)
        };

        let instrument = {
            let instrument = self
                .instruments
                .get_mut(&instrument_id)
                .expect("validated above");
            instrument.set_price(execution_price, at);
            instrument.clone()
        };

        self.notify(
            at,
            NotificationPayload::InstrumentUpdated {
                instrument_id,
                price: instrument.current_price,
                change: instrument.change,
            },
        );
        self.notify(
            at,
            NotificationPayload::SeatUpdated {
                seat_id,
                cash: cash_after,
            },
        );

        Ok(TradeApplied {
            instrument,
            seat_id,
            cash_after,
            holding_after,
        })
    }

    /// Set an instrument's price directly, bypassing trade math.
    pub fn override_price(
        &mut self,
        instrument_id: InstrumentId,
        new_price: Decimal,
        at: Timestamp,
    ) -> Result<Instrument, StateError> {
        let price = Price::new(new_price).ok_or(StateError::InvalidPrice(new_price))?;
        let instrument = self
            .instruments
            .get_mut(&instrument_id)
            .ok_or(StateError::UnknownInstrument(instrument_id))?;
        instrument.set_price(price, at);
        let updated = instrument.clone();

        self.notify(
            at,
            NotificationPayload::InstrumentUpdated {
                instrument_id,
                price: updated.current_price,
                change: updated.change,
            },
        );
        Ok(updated)
    }

    /// Set or clear an instrument's recovery baseline.
    pub fn set_recovery_baseline(
        &mut self,
        instrument_id: InstrumentId,
        baseline: Option<Price>,
    ) -> Result<(), StateError> {
        let instrument = self
            .instruments
            .get_mut(&instrument_id)
            .ok_or(StateError::UnknownInstrument(instrument_id))?;
        instrument.recovery_baseline = baseline;
        Ok(())
    }

    /// Instruments currently decaying back toward a baseline:
    /// (id, current price, baseline).
    pub fn recovery_candidates(&self) -> Vec<(InstrumentId, Price, Price)> {
        let mut candidates: Vec<_> = self
            .instruments
            .values()
            .filter_map(|i| i.recovery_baseline.map(|b| (i.id, i.current_price, b)))
            .collect();
        candidates.sort_by_key(|(id, _, _)| *id);
        candidates
    }

    pub fn append_order_log(&mut self, record: OrderRecord) {
        let at = record.at;
        self.order_log.push(record);
        self.notify(at, NotificationPayload::LogAppended { kind: LogKind::Order });
    }

    pub fn append_event_log(&mut self, record: EventRecord) {
        let at = record.at;
        self.event_log.push(record);
        self.notify(at, NotificationPayload::LogAppended { kind: LogKind::Event });
    }

    pub fn append_action_log(&mut self, record: ActionRecord) {
        let at = record.at;
        self.action_log.push(record);
        self.notify(at, NotificationPayload::LogAppended { kind: LogKind::Action });
    }

    pub fn order_log(&self) -> &ActivityLog<OrderRecord> {
        &self.order_log
    }

    pub fn event_log(&self) -> &ActivityLog<EventRecord> {
        &self.event_log
    }

    pub fn action_log(&self) -> &ActivityLog<ActionRecord> {
        &self.action_log
    }

    /// Drain committed notifications for delivery.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    fn notify(&mut self, at: Timestamp, payload: NotificationPayload) {
        self.next_seq += 1;
        self.outbox.push(Notification {
            seq: SeqNo(self.next_seq),
            at,
            payload,
        });
    }
}
