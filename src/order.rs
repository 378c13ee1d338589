//! Order record and lifecycle.
//!
//! An order is a single atomic decision: it is submitted, validated, then
//! either executed or rejected. Both outcomes are terminal; there is no
//! retry or re-queue.

use crate::types::{InstrumentId, OrderId, Price, SeatId, Side, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Submitted,
    Validated,
    Executed,
    Rejected,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Executed | OrderStatus::Rejected)
    }

    /// Legal lifecycle edges: Submitted -> Validated -> Executed, and any
    /// non-terminal state -> Rejected.
    pub fn can_transition(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Submitted, OrderStatus::Validated)
                | (OrderStatus::Validated, OrderStatus::Executed)
                | (OrderStatus::Submitted, OrderStatus::Rejected)
                | (OrderStatus::Validated, OrderStatus::Rejected)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub instrument_id: InstrumentId,
    pub seat_id: SeatId,
    pub side: Side,
    pub quantity: u64,
    /// Instrument price observed at submission.
    pub reference_price: Price,
    pub submitted_at: Timestamp,
    pub status: OrderStatus,
}

impl Order {
    pub fn new(
        id: OrderId,
        instrument_id: InstrumentId,
        seat_id: SeatId,
        side: Side,
        quantity: u64,
        reference_price: Price,
        submitted_at: Timestamp,
    ) -> Self {
        Self {
            id,
            instrument_id,
            seat_id,
            side,
            quantity,
            reference_price,
            submitted_at,
            status: OrderStatus::Submitted,
        }
    }

    pub fn mark_validated(&mut self) {
        debug_assert!(self.status.can_transition(OrderStatus::Validated));
        self.status = OrderStatus::Validated;
    }

    pub fn mark_executed(&mut self) {
        debug_assert!(self.status.can_transition(OrderStatus::Executed));
        self.status = OrderStatus::Executed;
    }

    pub fn mark_rejected(&mut self) {
        debug_assert!(self.status.can_transition(OrderStatus::Rejected));
        self.status = OrderStatus::Rejected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order() -> Order {
        Order::new(
            OrderId(1),
            InstrumentId(1),
            SeatId(1),
            Side::Buy,
            100,
            Price::new_unchecked(dec!(150)),
            Timestamp::from_millis(0),
        )
    }

    #[test]
    fn happy_path_transitions() {
        let mut o = order();
        assert_eq!(o.status, OrderStatus::Submitted);
        o.mark_validated();
        o.mark_executed();
        assert!(o.status.is_terminal());
    }

    #[test]
    fn rejection_is_terminal() {
        let mut o = order();
        o.mark_validated();
        o.mark_rejected();
        assert!(o.status.is_terminal());
        assert!(!o.status.can_transition(OrderStatus::Executed));
    }

    #[test]
    fn no_execution_without_validation() {
        assert!(!OrderStatus::Submitted.can_transition(OrderStatus::Executed));
        assert!(!OrderStatus::Executed.can_transition(OrderStatus::Rejected));
    }
}
